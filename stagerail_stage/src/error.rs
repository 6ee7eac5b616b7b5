// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stage errors.

use thiserror::Error;

/// Result type for stage operations.
pub type Result<T> = core::result::Result<T, StageError>;

/// Errors surfaced by the stage controller.
///
/// Only construction and lifecycle misuse are errors. Missing platform capabilities and
/// degenerate geometry degrade silently.
#[derive(Debug, Error)]
pub enum StageError {
    /// The surface has no mount root.
    #[error("stage root element is required")]
    MissingRoot,
    /// `init` was called on a stage that is already mounted.
    #[error("stage is already mounted")]
    AlreadyMounted,
    /// `init` was called after `destroy`.
    #[error("stage has been destroyed")]
    Destroyed,
    /// Options could not be parsed.
    #[error("invalid stage options: {0}")]
    Config(#[from] serde_json::Error),
}
