// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage controller.
//!
//! ## Mount order
//!
//! [`Stage::init`] applies configuration to the root, creates the scaffold, attaches the
//! interaction listeners, initializes visibility, binds the face-guard observers and finally
//! attaches the viewport listeners.
//!
//! ## Teardown
//!
//! [`Stage::destroy`] undoes all of that in reverse: viewport listeners, interaction listeners,
//! idle timers, resize observation, the pending animation frame, and finally the mounted
//! subtree. Subscriptions and timers are gone before the subtree is cleared, so nothing can
//! write to the surface afterwards. It is idempotent and also runs on drop.

use core::time::Duration;

use stagerail_guard::guard::{FaceGuard, GuardInput, Placement};
use stagerail_guard::viewport::KeyboardInset;
use stagerail_visibility::{RailVisibility, Transition, VisibilityMachine, VisibilityMode};

use crate::config::StageConfig;
use crate::css;
use crate::error::{Result, StageError};
use crate::hooks::{HostHooks, Sender};
use crate::listeners::{EventKind, ListenerRegistry, Target};
use crate::router::{self, Route};
use crate::scaffold::{Element, Scaffold};
use crate::surface::{Capabilities, FrameHandle, Surface};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Phase {
    Constructed,
    Mounted,
    Destroyed,
}

/// One mounted conversation stage.
///
/// All mutable state lives here, so any number of stages can coexist.
pub struct Stage<S: Surface> {
    surface: S,
    config: StageConfig,
    locale: String,
    hooks: HostHooks,
    scaffold: Scaffold,
    guard: FaceGuard,
    machine: VisibilityMachine,
    listeners: ListenerRegistry,
    viewport_listeners: ListenerRegistry,
    resize_observed: bool,
    pending_frame: Option<FrameHandle>,
    keyboard: KeyboardInset,
    phase: Phase,
}

impl<S: Surface> core::fmt::Debug for Stage<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stage")
            .field("phase", &self.phase)
            .field("locale", &self.locale)
            .field("machine", &self.machine)
            .field("listeners", &self.listeners.len())
            .field("viewport_listeners", &self.viewport_listeners.len())
            .field("resize_observed", &self.resize_observed)
            .field("pending_frame", &self.pending_frame)
            .field("keyboard", &self.keyboard)
            .finish_non_exhaustive()
    }
}

impl<S: Surface> Stage<S> {
    /// Create a stage on `surface`. Fails if the surface has no mount root.
    pub fn new(surface: S, config: StageConfig, locale: &str, hooks: HostHooks) -> Result<Self> {
        if !surface.has_root() {
            return Err(StageError::MissingRoot);
        }
        let scaffold = Scaffold::build(&config, locale);
        let guard = FaceGuard::new(config.face_guard_fraction());
        let machine = VisibilityMachine::new(config.visibility_mode, config.idle_dim());
        Ok(Self {
            surface,
            config,
            locale: locale.to_owned(),
            hooks,
            scaffold,
            guard,
            machine,
            listeners: ListenerRegistry::new(),
            viewport_listeners: ListenerRegistry::new(),
            resize_observed: false,
            pending_frame: None,
            keyboard: KeyboardInset::NONE,
            phase: Phase::Constructed,
        })
    }

    /// Mount onto the surface and return the scaffold the host binds to.
    pub fn init(&mut self, now: Duration) -> Result<&Scaffold> {
        match self.phase {
            Phase::Mounted => return Err(StageError::AlreadyMounted),
            Phase::Destroyed => return Err(StageError::Destroyed),
            Phase::Constructed => {}
        }
        self.apply_config();
        self.build_scaffold();
        self.phase = Phase::Mounted;
        self.attach_interaction_listeners();
        self.initialize_visibility(now);
        self.bind_face_guard_observers();
        self.attach_viewport_listeners();
        log::info!("stage mounted (locale={})", self.locale);
        Ok(&self.scaffold)
    }

    /// Tear everything down. Safe to call at any time, any number of times.
    ///
    /// A stage that was never mounted owns nothing on the surface and leaves it untouched.
    pub fn destroy(&mut self) {
        match self.phase {
            Phase::Destroyed => return,
            Phase::Constructed => {
                self.machine.shutdown();
                self.phase = Phase::Destroyed;
                log::debug!("unmounted stage destroyed");
                return;
            }
            Phase::Mounted => {}
        }
        self.viewport_listeners.dispose(&mut self.surface);
        self.listeners.dispose(&mut self.surface);
        self.machine.shutdown();
        if self.resize_observed {
            self.surface.disconnect_resize(Element::Rail);
            self.resize_observed = false;
        }
        if let Some(handle) = self.pending_frame.take() {
            self.surface.cancel_animation_frame(handle);
        }
        if self.surface.has_root() {
            self.surface.clear_children(Element::Root);
        }
        self.phase = Phase::Destroyed;
        log::info!("stage destroyed");
    }

    /// Deliver a platform signal. Returns the route taken, or `None` if nothing listens for it.
    pub fn handle_event(&mut self, target: Target, event: EventKind, now: Duration) -> Option<Route> {
        if !self.accepts("handle_event") {
            return None;
        }
        let route = self
            .listeners
            .route(target, event)
            .or_else(|| self.viewport_listeners.route(target, event))?;
        log::trace!("{} on {target:?} -> {route:?}", event.as_str());
        match route {
            Route::Interaction => {
                let transition = self.machine.interaction(now);
                self.apply_transitions(transition);
            }
            Route::IdleCountdown => {
                let _ = self.machine.idle_countdown(now);
            }
            Route::FaceGuard => {
                let _ = self.apply_face_guard();
            }
            Route::Viewport => self.update_keyboard_offset(),
            Route::Submit => self.submit(),
        }
        Some(route)
    }

    /// Deliver an animation frame requested by the stage. Returns false for stale handles.
    pub fn animation_frame(&mut self, handle: FrameHandle) -> bool {
        if !self.accepts("animation_frame") || self.pending_frame != Some(handle) {
            return false;
        }
        self.pending_frame = None;
        let _ = self.apply_face_guard();
        true
    }

    /// Deliver a resize observation for the rail.
    pub fn rail_resized(&mut self) {
        if self.accepts("rail_resized") && self.resize_observed {
            let _ = self.apply_face_guard();
        }
    }

    /// Fire idle timers due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<Transition> {
        if !self.accepts("advance") {
            return Vec::new();
        }
        let transitions = self.machine.advance(now);
        self.apply_transitions(transitions.iter().copied());
        transitions
    }

    /// When [`Stage::advance`] next has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        if self.phase == Phase::Mounted {
            self.machine.next_deadline()
        } else {
            None
        }
    }

    /// Force the rail into `mode`. `Show` counts as an interaction.
    pub fn flash_rail(&mut self, mode: RailVisibility, now: Duration) {
        if !self.accepts("flash_rail") {
            return;
        }
        let transition = self.machine.flash(mode, now);
        self.apply_transitions(transition);
    }

    /// Re-run face-guard placement and write the rail's top offset.
    pub fn apply_face_guard(&mut self) -> Option<Placement> {
        if !self.accepts("apply_face_guard") {
            return None;
        }
        let safe_top = self
            .surface
            .computed_style(Element::Root, css::SAFE_TOP)
            .and_then(|v| css::parse_leading_float(&v))
            .unwrap_or(0.0);
        let input = GuardInput {
            stage: self.surface.bounding_rect(Element::Root),
            canvas: self.surface.bounding_rect(Element::CanvasHost),
            rail_height: self.surface.offset_height(Element::Rail),
            safe_top,
        };
        let placement = self.guard.resolve(&input);
        log::debug!(
            "face guard: top={} floor={} strict={:?} wide={:?}",
            placement.top,
            placement.floor,
            placement.strict_limit,
            placement.wide_limit
        );
        self.surface
            .set_style(Element::Rail, "top", &css::px(placement.top));
        Some(placement)
    }

    /// Submit the composer through the host's `send_message` hook.
    pub fn submit(&mut self) {
        match self.hooks.send_message.as_mut() {
            Some(send) => send(),
            None => log::debug!("submit ignored: no send_message hook"),
        }
    }

    /// Add a transcript message through the host hook, or append it directly.
    pub fn add_message(&mut self, text: &str, sender: Sender) {
        if let Some(add) = self.hooks.add_message.as_mut() {
            add(text, sender);
            return;
        }
        if self.phase == Phase::Mounted {
            let class = format!("message {}", sender.as_str());
            self.surface
                .append_text(Element::MessagesScroll, &class, text);
        }
    }

    /// Show the host's typing indicator, if it has one.
    pub fn show_typing_indicator(&mut self) {
        if let Some(show) = self.hooks.show_typing_indicator.as_mut() {
            show();
        }
    }

    /// Hide the host's typing indicator, if it has one.
    pub fn hide_typing_indicator(&mut self) {
        if let Some(hide) = self.hooks.hide_typing_indicator.as_mut() {
            hide();
        }
    }

    /// Current rail visibility.
    pub fn visibility(&self) -> RailVisibility {
        self.machine.state()
    }

    /// Last measured keyboard inset.
    pub fn keyboard_offset(&self) -> KeyboardInset {
        self.keyboard
    }

    /// True between `init` and `destroy`.
    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    /// Options this stage was created with.
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The node tree this stage mounts.
    pub fn scaffold(&self) -> &Scaffold {
        &self.scaffold
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The underlying surface, mutably. Writes made through it are not tracked by the stage.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // Only a mounted stage acts on calls; anything else is dropped with a warning.
    fn accepts(&self, call: &str) -> bool {
        match self.phase {
            Phase::Mounted => true,
            Phase::Constructed => {
                log::warn!("{call} ignored: stage is not mounted yet");
                false
            }
            Phase::Destroyed => {
                log::warn!("{call} ignored: stage has been destroyed");
                false
            }
        }
    }

    fn apply_config(&mut self) {
        let root = Element::Root;
        self.surface.add_class(root, root.class());
        self.surface.set_style(
            root,
            css::RAIL_MAX_HEIGHT,
            &format!("{}vh", self.config.rail_max_height_vh()),
        );
        self.surface.set_style(
            root,
            css::RAIL_WIDTH,
            &format!("min({}px, 96vw)", self.config.rail_width_max_px()),
        );
        self.surface.set_style(
            root,
            css::RAIL_TRANSITION,
            &format!("{}ms", self.config.fade().as_millis()),
        );
        let chromeless = self.config.chromeless.then_some("true");
        self.surface
            .set_data(root, css::DATA_RAIL_CHROMELESS, chromeless);

        let blur = self.config.blur_enabled
            && self
                .surface
                .capabilities()
                .contains(Capabilities::BACKDROP_BLUR);
        self.surface
            .set_data(root, css::DATA_BLUR, Some(if blur { "true" } else { "false" }));
    }

    fn build_scaffold(&mut self) {
        self.surface.clear_children(Element::Root);
        for node in self.scaffold.nodes() {
            self.surface.create(node);
        }
    }

    fn attach_interaction_listeners(&mut self) {
        for registration in router::composer_bindings() {
            let _ = self.listeners.add(&mut self.surface, registration);
        }
        if self.config.visibility_mode != VisibilityMode::Auto {
            return;
        }
        for registration in router::interaction_bindings() {
            let _ = self.listeners.add(&mut self.surface, registration);
        }
    }

    fn initialize_visibility(&mut self, now: Duration) {
        let transitions = self.machine.mount(now);
        self.apply_transitions(transitions);
    }

    fn bind_face_guard_observers(&mut self) {
        let _ = self.apply_face_guard();
        self.pending_frame = Some(self.surface.request_animation_frame());

        if self
            .surface
            .capabilities()
            .contains(Capabilities::RESIZE_OBSERVER)
        {
            self.surface.observe_resize(Element::Rail);
            self.resize_observed = true;
        } else {
            log::warn!("resize observation unavailable; rail placement follows window resizes only");
        }

        for registration in router::face_guard_bindings() {
            let _ = self.listeners.add(&mut self.surface, registration);
        }
    }

    fn attach_viewport_listeners(&mut self) {
        if !self
            .surface
            .capabilities()
            .contains(Capabilities::VISUAL_VIEWPORT)
        {
            log::warn!("visual viewport unavailable; keyboard inset tracking disabled");
            return;
        }
        for registration in router::viewport_bindings() {
            let _ = self.viewport_listeners.add(&mut self.surface, registration);
        }
        self.update_keyboard_offset();
    }

    fn update_keyboard_offset(&mut self) {
        let Some(metrics) = self.surface.visual_viewport() else {
            return;
        };
        let inset = KeyboardInset::measure(&metrics);
        self.surface
            .set_style(Element::Root, css::KEYBOARD_OFFSET, &css::px(inset.offset()));
        let flag = if inset.is_raised() { "raised" } else { "" };
        self.surface
            .set_data(Element::Root, css::DATA_KEYBOARD, Some(flag));
        self.keyboard = inset;
    }

    fn apply_transitions(&mut self, transitions: impl IntoIterator<Item = Transition>) {
        for t in transitions {
            self.surface.set_data(
                Element::Root,
                css::DATA_RAIL_VISIBILITY,
                Some(t.to.as_str()),
            );
            if t.relayout {
                let _ = self.apply_face_guard();
            }
        }
    }
}

impl<S: Surface> Drop for Stage<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::Rect;
    use stagerail_guard::viewport::ViewportMetrics;

    use super::*;
    use crate::headless::HeadlessSurface;
    use crate::scaffold::NodeSpec;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn surface() -> HeadlessSurface {
        let mut s = HeadlessSurface::new();
        s.set_rect(Element::Root, Rect::new(0.0, 0.0, 800.0, 1000.0));
        s.set_rect(Element::CanvasHost, Rect::new(0.0, 100.0, 800.0, 500.0));
        s.set_offset_height(Element::Rail, 150.0);
        s.set_computed_style(Element::Root, css::SAFE_TOP, "0px");
        s
    }

    fn mount(surface: HeadlessSurface, config: StageConfig, hooks: HostHooks) -> Stage<HeadlessSurface> {
        let mut stage = Stage::new(surface, config, "en-US", hooks).unwrap();
        stage.init(Duration::ZERO).unwrap();
        stage
    }

    fn mounted() -> Stage<HeadlessSurface> {
        mount(surface(), StageConfig::default(), HostHooks::new())
    }

    fn always_on() -> StageConfig {
        StageConfig {
            visibility_mode: VisibilityMode::AlwaysOn,
            ..StageConfig::default()
        }
    }

    fn rail_attr(stage: &Stage<HeadlessSurface>) -> Option<&str> {
        stage
            .surface()
            .data(Element::Root, css::DATA_RAIL_VISIBILITY)
    }

    fn rail_top(stage: &Stage<HeadlessSurface>) -> Option<&str> {
        stage.surface().style(Element::Rail, "top")
    }

    fn tap(stage: &mut Stage<HeadlessSurface>, now: Duration) -> Option<Route> {
        stage.handle_event(
            Target::Element(Element::CanvasHost),
            EventKind::PointerDown,
            now,
        )
    }

    #[test]
    fn missing_root_is_a_construction_error() {
        let result = Stage::new(
            HeadlessSurface::detached(),
            StageConfig::default(),
            "en-US",
            HostHooks::new(),
        );
        assert!(matches!(result, Err(StageError::MissingRoot)));
    }

    #[test]
    fn init_applies_configuration() {
        let stage = mounted();
        let s = stage.surface();
        assert!(s.has_class(Element::Root, "live2d-chat-stage"));
        assert_eq!(s.style(Element::Root, css::RAIL_MAX_HEIGHT), Some("38vh"));
        assert_eq!(s.style(Element::Root, css::RAIL_WIDTH), Some("min(880px, 96vw)"));
        assert_eq!(s.style(Element::Root, css::RAIL_TRANSITION), Some("180ms"));
        assert_eq!(s.data(Element::Root, css::DATA_RAIL_CHROMELESS), Some("true"));
        assert_eq!(s.data(Element::Root, css::DATA_BLUR), Some("true"));
        assert_eq!(s.node_count(), stage.scaffold().nodes().len());
        assert_eq!(rail_attr(&stage), Some("hidden"));
        assert!(stage.is_mounted());
    }

    #[test]
    fn clamped_height_and_missing_blur_support() {
        let config = StageConfig {
            rail_max_height_vh: 90.0,
            chromeless: false,
            ..StageConfig::default()
        };
        let surface = surface().with_capabilities(Capabilities::RESIZE_OBSERVER);
        let stage = mount(surface, config, HostHooks::new());
        let s = stage.surface();
        assert_eq!(s.style(Element::Root, css::RAIL_MAX_HEIGHT), Some("50vh"));
        assert_eq!(s.data(Element::Root, css::DATA_RAIL_CHROMELESS), None);
        assert_eq!(s.data(Element::Root, css::DATA_BLUR), Some("false"));
    }

    #[test]
    fn init_hands_back_the_scaffold() {
        let mut stage = Stage::new(surface(), StageConfig::default(), "zh-HK", HostHooks::new()).unwrap();
        let scaffold = stage.init(Duration::ZERO).unwrap();
        let input = scaffold.get(Element::TextInput).unwrap();
        assert_eq!(input.attribute("maxlength"), Some("2000"));
        assert_eq!(input.attribute("placeholder"), Some("請輸入訊息…"));
        assert!(scaffold.get(Element::SendButton).is_some());
    }

    #[test]
    fn init_is_single_use() {
        let mut stage = mounted();
        assert!(matches!(stage.init(ms(1)), Err(StageError::AlreadyMounted)));
        stage.destroy();
        assert!(matches!(stage.init(ms(2)), Err(StageError::Destroyed)));
    }

    #[test]
    fn signals_before_init_are_ignored() {
        let mut stage = Stage::new(surface(), StageConfig::default(), "en-US", HostHooks::new()).unwrap();
        assert_eq!(tap(&mut stage, ms(10)), None);
        assert_eq!(stage.apply_face_guard(), None);
        assert!(stage.advance(Duration::from_secs(60)).is_empty());
        assert!(!stage.animation_frame(FrameHandle(1)));
        stage.rail_resized();
        stage.flash_rail(RailVisibility::Show, ms(20));
        assert_eq!(stage.visibility(), RailVisibility::Hidden);
        assert_eq!(stage.next_deadline(), None);
        assert_eq!(stage.surface().mutations(), 0);
    }

    #[test]
    fn idle_lifecycle() {
        let mut stage = mounted();
        assert_eq!(stage.next_deadline(), None);

        assert_eq!(tap(&mut stage, ms(1_000)), Some(Route::Interaction));
        assert_eq!(stage.visibility(), RailVisibility::Show);
        assert_eq!(rail_attr(&stage), Some("show"));
        assert_eq!(stage.next_deadline(), Some(ms(3_000)));

        assert!(stage.advance(ms(2_999)).is_empty());
        let _ = stage.advance(ms(3_000));
        assert_eq!(rail_attr(&stage), Some("peek"));

        let _ = stage.advance(ms(5_000));
        assert_eq!(rail_attr(&stage), Some("hidden"));
        assert_eq!(stage.next_deadline(), None);
    }

    #[test]
    fn fresh_interaction_supersedes_pending_timers() {
        let mut stage = mounted();
        let _ = tap(&mut stage, ms(0));
        let _ = stage.handle_event(
            Target::Element(Element::TextInput),
            EventKind::Focus,
            ms(1_500),
        );
        let _ = stage.advance(ms(2_500));
        assert_eq!(stage.visibility(), RailVisibility::Show);
        let _ = stage.advance(ms(4_500));
        assert_eq!(stage.visibility(), RailVisibility::Peek);
        let _ = stage.advance(ms(5_499));
        assert_eq!(stage.visibility(), RailVisibility::Peek);
        let _ = stage.advance(ms(5_500));
        assert_eq!(stage.visibility(), RailVisibility::Hidden);
    }

    #[test]
    fn leaving_restarts_the_countdown_without_showing() {
        let mut stage = mounted();
        let leave = Target::Element(Element::Rail);
        assert_eq!(
            stage.handle_event(leave, EventKind::PointerLeave, ms(100)),
            Some(Route::IdleCountdown)
        );
        assert_eq!(stage.visibility(), RailVisibility::Hidden);
        assert_eq!(stage.next_deadline(), None);

        let _ = tap(&mut stage, ms(0));
        let _ = stage.handle_event(leave, EventKind::PointerLeave, ms(1_500));
        let _ = stage.advance(ms(2_000));
        assert_eq!(stage.visibility(), RailVisibility::Show);
        let _ = stage.advance(ms(3_500));
        assert_eq!(stage.visibility(), RailVisibility::Peek);
    }

    #[test]
    fn unknown_signals_are_not_routed() {
        let mut stage = mounted();
        assert_eq!(
            stage.handle_event(Target::Element(Element::EmptyTitle), EventKind::Click, ms(1)),
            None
        );
        assert_eq!(stage.visibility(), RailVisibility::Hidden);
    }

    #[test]
    fn always_on_shows_once_and_never_schedules() {
        let mut stage = mount(surface(), always_on(), HostHooks::new());
        assert_eq!(rail_attr(&stage), Some("show"));
        assert!(
            !stage
                .surface()
                .is_listening(Target::Element(Element::CanvasHost), EventKind::PointerDown)
        );
        assert!(
            stage
                .surface()
                .is_listening(Target::Element(Element::Composer), EventKind::Submit)
        );
        assert_eq!(tap(&mut stage, ms(10)), None);
        assert_eq!(stage.next_deadline(), None);
        assert!(stage.advance(Duration::from_secs(3_600)).is_empty());
        assert_eq!(stage.visibility(), RailVisibility::Show);
    }

    #[test]
    fn face_guard_is_published_at_mount_and_on_resize() {
        let mut stage = mounted();
        assert_eq!(rail_top(&stage), Some("12px"));

        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "30px");
        assert_eq!(
            stage.handle_event(Target::Window, EventKind::Resize, ms(5)),
            Some(Route::FaceGuard)
        );
        assert_eq!(rail_top(&stage), Some("42px"));

        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "env(safe-area-inset-top)");
        let placement = stage.apply_face_guard().unwrap();
        assert_eq!(placement.top, 12.0);
        assert_eq!(placement.strict_limit, Some(50.0));
        assert_eq!(rail_top(&stage), Some("12px"));
    }

    #[test]
    fn mount_frame_runs_once() {
        let mut stage = mounted();
        let frames = stage.surface().pending_frames();
        assert_eq!(frames.len(), 1);
        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "8px");
        assert!(stage.animation_frame(frames[0]));
        assert_eq!(rail_top(&stage), Some("20px"));
        assert!(!stage.animation_frame(frames[0]));
    }

    #[test]
    fn rail_resize_reruns_the_guard() {
        let mut stage = mounted();
        assert!(stage.surface().observed(Element::Rail));
        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "4px");
        stage.rail_resized();
        assert_eq!(rail_top(&stage), Some("16px"));
    }

    #[test]
    fn missing_resize_observation_degrades_to_window_signals() {
        let surface = surface().with_capabilities(Capabilities::empty());
        let stage = mount(surface, StageConfig::default(), HostHooks::new());
        assert!(!stage.surface().observed(Element::Rail));
        assert!(
            stage
                .surface()
                .is_listening(Target::Window, EventKind::OrientationChange)
        );
        assert!(
            !stage
                .surface()
                .is_listening(Target::VisualViewport, EventKind::Resize)
        );
        assert_eq!(stage.surface().style(Element::Root, css::KEYBOARD_OFFSET), None);
    }

    #[test]
    fn keyboard_inset_tracks_the_visual_viewport() {
        let mut surface = surface();
        surface.set_viewport(Some(ViewportMetrics {
            inner_height: 800.0,
            height: 500.0,
            offset_top: 0.0,
        }));
        let mut stage = mount(surface, StageConfig::default(), HostHooks::new());
        assert_eq!(stage.keyboard_offset().offset(), 300.0);
        assert_eq!(stage.surface().style(Element::Root, css::KEYBOARD_OFFSET), Some("300px"));
        assert_eq!(stage.surface().data(Element::Root, css::DATA_KEYBOARD), Some("raised"));

        stage.surface_mut().set_viewport(Some(ViewportMetrics {
            inner_height: 800.0,
            height: 790.0,
            offset_top: 0.0,
        }));
        assert_eq!(
            stage.handle_event(Target::VisualViewport, EventKind::Scroll, ms(1)),
            Some(Route::Viewport)
        );
        assert_eq!(stage.surface().style(Element::Root, css::KEYBOARD_OFFSET), Some("10px"));
        assert_eq!(stage.surface().data(Element::Root, css::DATA_KEYBOARD), Some(""));
        assert!(!stage.keyboard_offset().is_raised());
    }

    #[test]
    fn flash_rail() {
        let mut stage = mounted();

        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "30px");
        stage.flash_rail(RailVisibility::Peek, ms(100));
        assert_eq!(rail_attr(&stage), Some("peek"));
        assert_eq!(stage.next_deadline(), None);
        // Peek is not immediate, so it re-ran the guard.
        assert_eq!(rail_top(&stage), Some("42px"));

        stage
            .surface_mut()
            .set_computed_style(Element::Root, css::SAFE_TOP, "0px");
        stage.flash_rail(RailVisibility::Show, ms(200));
        assert_eq!(rail_attr(&stage), Some("show"));
        assert_eq!(stage.next_deadline(), Some(ms(2_200)));
        assert_eq!(rail_top(&stage), Some("42px"));

        stage.flash_rail(RailVisibility::Hidden, ms(300));
        assert_eq!(rail_attr(&stage), Some("hidden"));
        assert_eq!(stage.next_deadline(), None);
        assert_eq!(rail_top(&stage), Some("12px"));
    }

    #[test]
    fn destroy_releases_everything() {
        let mut stage = mounted();
        let _ = tap(&mut stage, ms(0));
        let frames = stage.surface().pending_frames();
        assert!(stage.surface().listener_count() > 0);

        stage.destroy();
        let s = stage.surface();
        assert_eq!(s.listener_count(), 0);
        assert!(!s.observed(Element::Rail));
        assert!(s.pending_frames().is_empty());
        assert_eq!(s.node_count(), 0);
        assert!(!stage.is_mounted());
        assert_eq!(stage.next_deadline(), None);

        let mutations = stage.surface().mutations();
        assert_eq!(tap(&mut stage, ms(10)), None);
        assert!(stage.advance(Duration::from_secs(60)).is_empty());
        assert!(!stage.animation_frame(frames[0]));
        stage.rail_resized();
        stage.flash_rail(RailVisibility::Show, ms(20));
        assert_eq!(stage.apply_face_guard(), None);
        stage.add_message("late", Sender::Bot);
        stage.destroy();
        assert_eq!(stage.surface().mutations(), mutations);
    }

    #[test]
    fn destroy_before_init_leaves_the_surface_alone() {
        let mut surface = surface();
        surface.create(&NodeSpec {
            element: Element::SttOverlay,
            parent: Element::Root,
            attributes: Vec::new(),
            style: Vec::new(),
            text: None,
        });
        let mut stage = Stage::new(surface, StageConfig::default(), "en-US", HostHooks::new()).unwrap();
        let mutations = stage.surface().mutations();

        stage.destroy();
        assert_eq!(stage.surface().mutations(), mutations);
        assert_eq!(stage.surface().node_count(), 1);
        assert!(stage.surface().node(Element::SttOverlay).is_some());
        assert!(matches!(stage.init(ms(1)), Err(StageError::Destroyed)));
        assert_eq!(stage.surface().mutations(), mutations);
    }

    #[test]
    fn composer_submits_through_the_hook() {
        let sent = Rc::new(RefCell::new(0_u32));
        let counter = Rc::clone(&sent);
        let hooks = HostHooks::new().on_send_message(move || *counter.borrow_mut() += 1);
        let mut stage = mount(surface(), always_on(), hooks);

        let composer = Target::Element(Element::Composer);
        let send = Target::Element(Element::SendButton);
        assert_eq!(
            stage.handle_event(composer, EventKind::Submit, ms(1)),
            Some(Route::Submit)
        );
        assert_eq!(stage.handle_event(send, EventKind::Click, ms(2)), Some(Route::Submit));
        assert_eq!(*sent.borrow(), 2);
    }

    #[test]
    fn messages_use_the_hook_or_fall_back() {
        let mut stage = mounted();
        stage.add_message("hello", Sender::Bot);
        let texts: Vec<_> = stage.surface().texts(Element::MessagesScroll).collect();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].class, "message bot");
        assert_eq!(texts[0].text, "hello");
        // No indicator hooks: nothing happens.
        stage.show_typing_indicator();
        stage.hide_typing_indicator();

        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        let typing = Rc::new(RefCell::new(false));
        let (on, off) = (Rc::clone(&typing), Rc::clone(&typing));
        let hooks = HostHooks::new()
            .on_add_message(move |text, sender| sink.borrow_mut().push((text.to_owned(), sender)))
            .on_show_typing_indicator(move || *on.borrow_mut() = true)
            .on_hide_typing_indicator(move || *off.borrow_mut() = false);
        let mut stage = mount(surface(), StageConfig::default(), hooks);

        stage.show_typing_indicator();
        assert!(*typing.borrow());
        stage.add_message("hi", Sender::User);
        stage.hide_typing_indicator();
        assert!(!*typing.borrow());
        assert_eq!(*received.borrow(), vec![("hi".to_owned(), Sender::User)]);
        assert_eq!(stage.surface().texts(Element::MessagesScroll).count(), 0);
    }
}
