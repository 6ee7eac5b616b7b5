// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Custom property names and value helpers.

/// Safe-top inset read from the root (for example a display notch).
pub const SAFE_TOP: &str = "--live2d-safe-top";
/// Rail height cap, in `vh`.
pub const RAIL_MAX_HEIGHT: &str = "--live2d-rail-max-height";
/// Rail width cap.
pub const RAIL_WIDTH: &str = "--live2d-rail-width";
/// Rail fade duration.
pub const RAIL_TRANSITION: &str = "--live2d-rail-transition";
/// On-screen keyboard inset.
pub const KEYBOARD_OFFSET: &str = "--live2d-keyboard-offset";

/// `data-rail-visibility` on the root.
pub const DATA_RAIL_VISIBILITY: &str = "rail-visibility";
/// `data-rail-chromeless` on the root.
pub const DATA_RAIL_CHROMELESS: &str = "rail-chromeless";
/// `data-blur` on the root.
pub const DATA_BLUR: &str = "blur";
/// `data-keyboard` on the root.
pub const DATA_KEYBOARD: &str = "keyboard";

/// Format a pixel length.
pub fn px(v: f64) -> String {
    format!("{v}px")
}

/// Parse the leading number of a CSS value, as `parseFloat` would (`"24px"` → 24).
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_leading_numbers() {
        assert_eq!(parse_leading_float("24px"), Some(24.0));
        assert_eq!(parse_leading_float("  -3.5rem"), Some(-3.5));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("1e2px"), Some(100.0));
        assert_eq!(parse_leading_float("7em"), Some(7.0));
        assert_eq!(parse_leading_float("env(safe-area-inset-top)"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("-"), None);
    }

    #[test]
    fn formats_pixels_without_trailing_zeroes() {
        assert_eq!(px(12.0), "12px");
        assert_eq!(px(12.5), "12.5px");
    }
}
