// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized input events and the pointer geometry helpers.
//!
//! Hosts translate their platform events into [`Event`] values and feed them
//! to the router. Timestamps are host-supplied monotonic milliseconds; the
//! engine never reads a clock of its own. Higher-level outcomes such as
//! "default prevented" live as flags on the event payload, which the host
//! inspects after the capture-phase handler has run and before its own
//! bubbling-phase logic.

use kurbo::Point;
use tactile_tree::{ElementId, PathEntry};

use alloc::vec::Vec;

/// Kind of a normalized input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// A touch point went down.
    TouchStart,
    /// A touch point lifted.
    TouchEnd,
    /// The platform aborted a touch sequence.
    TouchCancel,
    /// A mouse button went down.
    MouseDown,
    /// A mouse button lifted.
    MouseUp,
    /// A click, possibly synthesized by the platform after a touch.
    Click,
    /// A scroll began somewhere in the document.
    ScrollStart,
    /// The scroll that was in progress ended.
    ScrollEnd,
    /// Another responder claimed the in-flight gesture (e.g. a swipe).
    GestureCaptured,
}

/// One normalized input event.
#[derive(Clone, Debug)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The concrete element the platform reported as target, if any.
    pub target: Option<ElementId>,
    /// Pre-resolved composed path (innermost first), when the platform
    /// provides one. Absent paths degrade to a plain ancestor walk during
    /// target resolution.
    pub path: Option<Vec<PathEntry>>,
    /// Pointer position, when the event carries one.
    pub position: Option<Point>,
    /// Host-supplied monotonic timestamp in milliseconds.
    pub timestamp_ms: u64,
    /// Whether the event's default action may be suppressed.
    pub cancelable: bool,
    /// Set by capture-phase handlers to veto the default action.
    pub default_prevented: bool,
}

impl Event {
    /// Create an event with no target and no position (scroll and gesture
    /// signals).
    pub fn signal(kind: EventKind, timestamp_ms: u64) -> Self {
        Self {
            kind,
            target: None,
            path: None,
            position: None,
            timestamp_ms,
            cancelable: false,
            default_prevented: false,
        }
    }

    /// Create a pointer event at `position` targeting `target`.
    pub fn pointer(
        kind: EventKind,
        target: ElementId,
        position: Point,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            kind,
            target: Some(target),
            path: None,
            position: Some(position),
            timestamp_ms,
            cancelable: true,
            default_prevented: false,
        }
    }

    /// Attach a pre-resolved composed path.
    pub fn with_path(mut self, path: Vec<PathEntry>) -> Self {
        self.path = Some(path);
        self
    }

    /// Mark the event as not cancelable.
    pub fn non_cancelable(mut self) -> Self {
        self.cancelable = false;
        self
    }

    /// Veto the event's default action. No-op on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }
}

/// Pointer coordinates of an event, `(0, 0)` when it carries none.
///
/// Pure helper with no failure modes.
///
/// ```rust
/// use kurbo::Point;
/// use tactile_activation::event::{coords, Event, EventKind};
///
/// let ev = Event::signal(EventKind::ScrollStart, 10);
/// assert_eq!(coords(&ev), Point::ZERO);
/// ```
pub fn coords(ev: &Event) -> Point {
    ev.position.unwrap_or(Point::ZERO)
}

/// Monotonic timestamp of an event in milliseconds.
pub fn timestamp(ev: &Event) -> u64 {
    ev.timestamp_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_defaults_to_origin() {
        let ev = Event::signal(EventKind::ScrollEnd, 5);
        assert_eq!(coords(&ev), Point::ZERO);
        assert_eq!(timestamp(&ev), 5);
    }

    #[test]
    fn prevent_default_respects_cancelable() {
        let mut ev = Event::signal(EventKind::Click, 0);
        ev.prevent_default();
        assert!(!ev.default_prevented);

        let mut tree = tactile_tree::ElementTree::new();
        let el = tree.insert(None);
        let mut ev = Event::pointer(EventKind::TouchEnd, el, Point::new(1.0, 2.0), 7);
        ev.prevent_default();
        assert!(ev.default_prevented);
    }
}
