// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tap/click activation state machine.
//!
//! ## Overview
//!
//! [`TapClick`] owns the single system-wide activation slot: at most one
//! element is "activating" (pending or applied) at any instant, and ownership
//! transfers atomically inside [`TapClick::set_activated_element`]. Two
//! deferred transitions smooth the visual state:
//!
//! - **Apply delay** ([`ADD_ACTIVATED_DEFERS`]): the activated marker is
//!   applied only after a short delay, so elements brushed during a
//!   scroll-initiating gesture never flash.
//! - **Clear smoothing** ([`CLEAR_STATE_DEFERS`]): once applied, the marker
//!   stays visible for a minimum duration, so genuine quick taps still read as
//!   presses.
//!
//! Elements marked [`Markers::INSTANT`] opt out of both delays.
//!
//! Both delays are entries in an owned [`TimerQueue`] driven by the host via
//! [`TapClick::tick`]; there are no OS timers and nothing fires stale. A
//! pending apply for one element and a pending clear for the same element
//! never coexist: starting either cancels the other.
//!
//! ## Cancellation
//!
//! Scrolls and captured gestures call [`TapClick::cancel_active`], which
//! drops any pending apply, clears an applied marker without smoothing, and
//! sets the cancelled flag so the synthetic click that may follow the
//! interaction is suppressed by the router.

use hashbrown::HashMap;
use kurbo::Point;
use tactile_tree::{ElementId, ElementTree, Markers, RippleToken};

use crate::event::{Event, coords, timestamp};
use crate::ripple::find_ripple;
use crate::target::resolve_target;
use crate::timer::{TimerHandle, TimerQueue};

/// Delay in milliseconds before the activated marker is applied.
pub const ADD_ACTIVATED_DEFERS: u64 = 200;

/// Minimum visible duration in milliseconds of an applied activated marker.
pub const CLEAR_STATE_DEFERS: u64 = 200;

/// Configuration consumed by the activation engine.
#[derive(Copy, Clone, Debug)]
pub struct ActivationConfig {
    /// Master switch for animated feedback.
    pub animated: bool,
    /// Whether activation triggers ripple effects. Ripples are invoked only
    /// when both flags are `true`.
    pub ripple: bool,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            animated: true,
            ripple: true,
        }
    }
}

/// Deferred transition executed by [`TapClick::tick`].
#[derive(Copy, Clone, Debug, PartialEq)]
enum Task {
    /// Apply the activated marker to the pending element.
    Apply { element: ElementId, at: Point },
    /// Clear the activated marker after its smoothing delay.
    Clear { element: ElementId },
}

/// The activation state machine.
///
/// One instance coordinates activation for a whole document scope; construct
/// it when listeners attach and [`TapClick::dispose`] it when they detach.
/// The element tree is passed into each operation rather than owned, matching
/// the rest of the Tactile crates.
#[derive(Debug)]
pub struct TapClick {
    config: ActivationConfig,
    /// The single activation slot.
    activating: Option<ElementId>,
    /// Pending apply-delay timer; only ever set while `activating` is.
    add_timer: Option<TimerHandle>,
    /// When the activated marker was last applied.
    last_activated_ms: u64,
    cancelled: bool,
    scrolling: bool,
    /// Elements fading out: applied marker awaiting its smoothing clear.
    deferred_clears: HashMap<ElementId, TimerHandle>,
    /// Ripple started for the current activation, dismissed on deactivation.
    pending_ripple: Option<(ElementId, RippleToken)>,
    timers: TimerQueue<Task>,
}

impl Default for TapClick {
    fn default() -> Self {
        Self::new(ActivationConfig::default())
    }
}

impl TapClick {
    /// Create an engine with the given configuration.
    pub fn new(config: ActivationConfig) -> Self {
        Self {
            config,
            activating: None,
            add_timer: None,
            last_activated_ms: 0,
            cancelled: false,
            scrolling: false,
            deferred_clears: HashMap::new(),
            pending_ripple: None,
            timers: TimerQueue::new(),
        }
    }

    /// The element currently owning the activation slot, if any.
    pub fn activating(&self) -> Option<ElementId> {
        self.activating
    }

    /// Whether the session was cancelled by a scroll or captured gesture.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether a scroll is in progress.
    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Number of pending deferred transitions (apply + clear).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of elements currently fading out in the deferred-clear table.
    pub fn deferred_clear_count(&self) -> usize {
        self.deferred_clears.len()
    }

    /// Handle a pointer going down.
    ///
    /// Ignored while an element is already activating or a scroll is in
    /// progress. Otherwise clears the cancelled flag and requests activation
    /// of the resolved target (which may be none).
    pub fn pointer_down(&mut self, tree: &mut ElementTree, ev: &Event) {
        if self.activating.is_some() || self.scrolling {
            return;
        }
        self.cancelled = false;
        let target = resolve_target(tree, ev);
        self.set_activated_element(tree, target, ev);
    }

    /// Handle a pointer lifting.
    ///
    /// Ignored while scrolling. Deactivates the current element; when the
    /// session was cancelled and `ev` is cancelable, its default action is
    /// suppressed so no synthetic click follows.
    pub fn pointer_up(&mut self, tree: &mut ElementTree, ev: &mut Event) {
        if self.scrolling {
            return;
        }
        self.set_activated_element(tree, None, ev);
        if self.cancelled {
            ev.prevent_default();
        }
    }

    /// Cancel the in-flight activation without smoothing.
    ///
    /// Clears a pending apply timer, removes an applied marker immediately,
    /// and sets the cancelled flag. Invoked when a scroll starts or another
    /// responder captures the gesture, so an in-flight tap does not also
    /// register as an activation.
    pub fn cancel_active(&mut self, tree: &mut ElementTree, now_ms: u64) {
        if let Some(h) = self.add_timer.take() {
            self.timers.cancel(h);
        }
        if self.activating.is_some() {
            log::trace!("cancelling activation of {:?}", self.activating);
            self.remove_activated(tree, false, now_ms);
            self.activating = None;
        }
        self.cancelled = true;
    }

    /// A scroll started: suppress and cancel activation until it ends.
    pub fn scroll_start(&mut self, tree: &mut ElementTree, now_ms: u64) {
        self.scrolling = true;
        self.cancel_active(tree, now_ms);
    }

    /// The scroll ended: new activations are accepted again.
    pub fn scroll_end(&mut self) {
        self.scrolling = false;
    }

    /// Transfer the activation slot to `target`.
    ///
    /// This is the core transition: it cancels the pending apply timer,
    /// deactivates the previous owner (late-applying the marker if it was
    /// still pending, then smoothing it out), revives `target` if it was
    /// fading out, and schedules its apply — immediately for
    /// [`Markers::INSTANT`] elements, after [`ADD_ACTIVATED_DEFERS`]
    /// otherwise. Ownership transfers before the timer fires, so a second
    /// pointer-down can never race the slot.
    pub fn set_activated_element(
        &mut self,
        tree: &mut ElementTree,
        target: Option<ElementId>,
        ev: &Event,
    ) {
        // Do nothing on repeated pointer events on the same element.
        if target.is_some() && target == self.activating {
            return;
        }
        if let Some(h) = self.add_timer.take() {
            self.timers.cancel(h);
        }

        let at = coords(ev);
        let now = timestamp(ev);

        // Deactivate the previous owner.
        if let Some(prev) = self.activating {
            assert!(
                !self.deferred_clears.contains_key(&prev),
                "activating element already has a deferred clear; the \
                 exclusive-ownership invariant was broken elsewhere"
            );
            if !tree.has_marker(prev, Markers::ACTIVATED) {
                // Still pending: show the press briefly even for quick taps.
                self.add_activated(tree, prev, at, now);
            }
            self.remove_activated(tree, true, now);
        }

        // Activate the new owner.
        if let Some(el) = target {
            if let Some(h) = self.deferred_clears.remove(&el) {
                // Re-activated before its fade-out completed.
                self.timers.cancel(h);
            }
            tree.remove_markers(el, Markers::ACTIVATED);
            if tree.has_marker(el, Markers::INSTANT) {
                self.add_activated(tree, el, at, now);
            } else {
                let h = self
                    .timers
                    .schedule(now + ADD_ACTIVATED_DEFERS, Task::Apply { element: el, at });
                self.add_timer = Some(h);
            }
        }

        log::trace!("activation slot {:?} -> {:?}", self.activating, target);
        self.activating = target;
    }

    /// Execute deferred transitions whose deadline has been reached.
    pub fn tick(&mut self, tree: &mut ElementTree, now_ms: u64) {
        for task in self.timers.drain_due(now_ms) {
            match task {
                Task::Apply { element, at } => {
                    self.add_timer = None;
                    debug_assert_eq!(
                        self.activating,
                        Some(element),
                        "apply task fired for an element that lost the slot"
                    );
                    self.add_activated(tree, element, at, now_ms);
                }
                Task::Clear { element } => {
                    let removed = self.deferred_clears.remove(&element);
                    debug_assert!(removed.is_some(), "clear task without a registry entry");
                    tree.remove_markers(element, Markers::ACTIVATED);
                }
            }
        }
    }

    /// Tear the engine down: cancel every pending transition, clear applied
    /// markers, and dismiss a retained ripple. Call when listeners detach.
    pub fn dispose(&mut self, tree: &mut ElementTree) {
        self.dismiss_ripple(tree);
        self.timers.clear();
        self.add_timer = None;
        for (el, _) in self.deferred_clears.drain() {
            tree.remove_markers(el, Markers::ACTIVATED);
        }
        if let Some(el) = self.activating.take() {
            tree.remove_markers(el, Markers::ACTIVATED);
        }
        self.cancelled = false;
        self.scrolling = false;
    }

    /// Apply the activated marker and start a ripple when configured.
    fn add_activated(&mut self, tree: &mut ElementTree, element: ElementId, at: Point, now_ms: u64) {
        self.last_activated_ms = now_ms;
        tree.insert_markers(element, Markers::ACTIVATED);
        if !(self.config.animated && self.config.ripple) {
            return;
        }
        if let Some(host) = find_ripple(tree, element) {
            self.dismiss_ripple(tree);
            if let Some(effect) = tree.ripple_mut(host) {
                let token = effect.add_ripple(at);
                self.pending_ripple = Some((host, token));
            }
        }
    }

    /// Remove the activated marker from the current owner.
    ///
    /// With `smooth`, and while the minimum visible duration has not elapsed
    /// for a non-instant element, removal is deferred until
    /// `last_activated + CLEAR_STATE_DEFERS` and registered in the
    /// deferred-clear table; otherwise the marker is removed immediately.
    fn remove_activated(&mut self, tree: &mut ElementTree, smooth: bool, now_ms: u64) {
        let Some(active) = self.activating else {
            return;
        };
        self.dismiss_ripple(tree);
        let elapsed = now_ms.saturating_sub(self.last_activated_ms);
        if smooth && elapsed < CLEAR_STATE_DEFERS && !tree.has_marker(active, Markers::INSTANT) {
            let h = self.timers.schedule(
                self.last_activated_ms + CLEAR_STATE_DEFERS,
                Task::Clear { element: active },
            );
            self.deferred_clears.insert(active, h);
        } else {
            tree.remove_markers(active, Markers::ACTIVATED);
        }
    }

    fn dismiss_ripple(&mut self, tree: &mut ElementTree) {
        if let Some((host, token)) = self.pending_ripple.take()
            && let Some(effect) = tree.ripple_mut(host)
        {
            effect.dismiss(token);
        }
    }
}
