// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture-phase input routing into the activation engine.
//!
//! ## Overview
//!
//! [`Router`] is the single document-scoped entry point for normalized input.
//! The host calls [`Router::handle`] for every event **before** its own
//! application-level handlers run (the capture phase), so the engine can veto
//! an event — via [`Event::default_prevented`] — before downstream logic sees
//! it, even when an application handler stops propagation.
//!
//! ## Touch/mouse de-duplication
//!
//! Touch-capable platforms synthesize mouse events after touch sequences.
//! The router records the timestamp of every touch event and forwards mouse
//! events only when they arrive more than [`MOUSE_WAIT`] milliseconds after
//! the last real touch, so one physical tap produces exactly one activation.
//!
//! ## Ghost clicks
//!
//! A click observed while the session is cancelled — or while a scroll is in
//! progress — is a ghost: the interaction it stems from was already claimed
//! by a scroll or gesture. The router suppresses its default action; hosts
//! should also stop its propagation.

use tactile_tree::ElementTree;

use crate::engine::{ActivationConfig, TapClick};
use crate::event::{Event, EventKind};

/// Window in milliseconds during which mouse events following a touch are
/// treated as synthetic and dropped.
pub const MOUSE_WAIT: u64 = 2500;

/// Document-scoped router feeding normalized events into [`TapClick`].
#[derive(Debug)]
pub struct Router {
    engine: TapClick,
    /// Timestamp of the most recent touch event, for synthetic-mouse
    /// suppression.
    last_touch_ms: Option<u64>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(ActivationConfig::default())
    }
}

impl Router {
    /// Create a router and its engine with the given configuration.
    pub fn new(config: ActivationConfig) -> Self {
        Self {
            engine: TapClick::new(config),
            last_touch_ms: None,
        }
    }

    /// Read access to the underlying engine.
    pub fn engine(&self) -> &TapClick {
        &self.engine
    }

    /// Route one capture-phase event.
    ///
    /// Mutates `ev` only to set [`Event::default_prevented`] when the engine
    /// vetoes it.
    pub fn handle(&mut self, tree: &mut ElementTree, ev: &mut Event) {
        let now = ev.timestamp_ms;
        match ev.kind {
            EventKind::Click => {
                if self.engine.is_cancelled() || self.engine.is_scrolling() {
                    log::trace!("suppressing ghost click at {now}");
                    ev.prevent_default();
                }
            }
            EventKind::TouchStart => {
                self.last_touch_ms = Some(now);
                self.engine.pointer_down(tree, ev);
            }
            EventKind::TouchEnd | EventKind::TouchCancel => {
                self.last_touch_ms = Some(now);
                self.engine.pointer_up(tree, ev);
            }
            EventKind::MouseDown => {
                if self.mouse_is_real(now) {
                    self.engine.pointer_down(tree, ev);
                }
            }
            EventKind::MouseUp => {
                if self.mouse_is_real(now) {
                    self.engine.pointer_up(tree, ev);
                }
            }
            EventKind::ScrollStart => self.engine.scroll_start(tree, now),
            EventKind::ScrollEnd => self.engine.scroll_end(),
            EventKind::GestureCaptured => self.engine.cancel_active(tree, now),
        }
    }

    /// Execute due deferred transitions.
    pub fn tick(&mut self, tree: &mut ElementTree, now_ms: u64) {
        self.engine.tick(tree, now_ms);
    }

    /// Tear down the router's engine; call when listeners detach.
    pub fn dispose(&mut self, tree: &mut ElementTree) {
        self.engine.dispose(tree);
    }

    fn mouse_is_real(&self, now_ms: u64) -> bool {
        match self.last_touch_ms {
            Some(touch) => now_ms.saturating_sub(touch) > MOUSE_WAIT,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ADD_ACTIVATED_DEFERS;
    use kurbo::Point;
    use tactile_tree::{ElementId, Markers};

    fn activatable(tree: &mut ElementTree) -> ElementId {
        let root = tree.insert(None);
        let el = tree.insert(Some(root));
        tree.insert_markers(el, Markers::ACTIVATABLE);
        el
    }

    // Events rely on the ancestor-walk fallback for target resolution; the
    // composed-path scan is covered by the target module's tests.
    fn ev(kind: EventKind, target: ElementId, t: u64) -> Event {
        Event::pointer(kind, target, Point::new(3.0, 4.0), t)
    }

    #[test]
    fn touch_then_synthetic_mouse_is_one_activation() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 1_000));
        router.handle(&mut tree, &mut ev(EventKind::TouchEnd, el, 1_050));
        // The browser-style synthetic mouse pair arrives shortly after.
        router.handle(&mut tree, &mut ev(EventKind::MouseDown, el, 1_060));
        router.handle(&mut tree, &mut ev(EventKind::MouseUp, el, 1_070));

        // The synthetic mouse-down did not re-acquire the slot.
        assert_eq!(router.engine().activating(), None);
        // Only the touch interaction's fade-out remains.
        assert_eq!(router.engine().deferred_clear_count(), 1);
    }

    #[test]
    fn mouse_beyond_the_wait_window_is_forwarded() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 1_000));
        router.handle(&mut tree, &mut ev(EventKind::TouchEnd, el, 1_050));
        router.tick(&mut tree, 2_000);

        let t = 1_050 + MOUSE_WAIT + 1;
        router.handle(&mut tree, &mut ev(EventKind::MouseDown, el, t));
        assert_eq!(router.engine().activating(), Some(el));
    }

    #[test]
    fn mouse_without_prior_touch_is_forwarded() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::MouseDown, el, 5));
        assert_eq!(router.engine().activating(), Some(el));
    }

    #[test]
    fn ghost_click_is_suppressed_after_gesture_capture() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 0));
        router.handle(&mut tree, &mut Event::signal(EventKind::GestureCaptured, 30));
        assert!(router.engine().is_cancelled());

        let mut click = ev(EventKind::Click, el, 60);
        router.handle(&mut tree, &mut click);
        assert!(click.default_prevented);
    }

    #[test]
    fn click_during_scroll_is_suppressed_then_allowed_again() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut Event::signal(EventKind::ScrollStart, 0));
        let mut click = ev(EventKind::Click, el, 10);
        router.handle(&mut tree, &mut click);
        assert!(click.default_prevented);

        router.handle(&mut tree, &mut Event::signal(EventKind::ScrollEnd, 20));
        // A fresh interaction clears the cancelled flag.
        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 30));
        router.tick(&mut tree, 30 + ADD_ACTIVATED_DEFERS);
        let mut click = ev(EventKind::Click, el, 300);
        router.handle(&mut tree, &mut click);
        assert!(!click.default_prevented);
    }

    #[test]
    fn scroll_start_cancels_in_flight_activation() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 0));
        router.handle(&mut tree, &mut Event::signal(EventKind::ScrollStart, 50));

        router.tick(&mut tree, 1_000);
        assert!(!tree.has_marker(el, Markers::ACTIVATED));
        assert_eq!(router.engine().activating(), None);
    }

    #[test]
    fn touch_cancel_behaves_like_release() {
        let mut tree = ElementTree::new();
        let el = activatable(&mut tree);
        let mut router = Router::default();

        router.handle(&mut tree, &mut ev(EventKind::TouchStart, el, 0));
        router.handle(&mut tree, &mut ev(EventKind::TouchCancel, el, 40));
        assert_eq!(router.engine().activating(), None);
    }
}
