// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tactile_activation --heading-base-level=0

//! Tactile Activation: the tap/click engine behind pressed states and ripples.
//!
//! ## Overview
//!
//! This crate unifies touch and mouse input into a single activation model
//! for a [`tactile_tree::ElementTree`]:
//!
//! 1. The host normalizes platform input into [`event::Event`] values and
//!    feeds them to the capture-phase [`router::Router`].
//! 2. The router de-duplicates touch vs. synthetic mouse input and forwards
//!    pointer transitions to the [`engine::TapClick`] state machine.
//! 3. The engine resolves the activatable target through composed paths
//!    ([`target::resolve_target`]), owns the single activation slot, and
//!    schedules the deferred apply/clear transitions on its
//!    [`timer::TimerQueue`].
//! 4. On activation, the [`ripple::find_ripple`] adapter locates an optional
//!    ripple capability and invokes it at the pointer coordinates.
//!
//! ## Time model
//!
//! Everything is single-threaded and host-driven: events carry monotonic
//! millisecond timestamps, and deferred transitions fire when the host calls
//! [`router::Router::tick`]. Timers are cancellable, coalescing entries, not
//! blocking waits, and cancellation is idempotent.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use tactile_activation::engine::ADD_ACTIVATED_DEFERS;
//! use tactile_activation::event::{Event, EventKind};
//! use tactile_activation::router::Router;
//! use tactile_tree::{ElementTree, Markers};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.insert(None);
//! let button = tree.insert(Some(root));
//! tree.insert_markers(button, Markers::ACTIVATABLE);
//!
//! let mut router = Router::default();
//!
//! // Touch down; the pressed state applies after the activation delay.
//! let mut down = Event::pointer(EventKind::TouchStart, button, Point::new(5.0, 5.0), 0)
//!     .with_path(tree.composed_path(button));
//! router.handle(&mut tree, &mut down);
//! router.tick(&mut tree, ADD_ACTIVATED_DEFERS);
//! assert!(tree.has_marker(button, Markers::ACTIVATED));
//! ```
//!
//! ## Suppression guarantees
//!
//! - One physical tap yields one activation: mouse events within
//!   [`router::MOUSE_WAIT`] of a touch are synthetic and dropped.
//! - Scrolls and captured gestures cancel the in-flight activation and mark
//!   the session cancelled; the ghost click that may follow is vetoed via
//!   [`event::Event::default_prevented`].
//! - At most one element owns the activation slot at any instant, and a
//!   pending apply never coexists with a pending clear for the same element.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod engine;
pub mod event;
pub mod ripple;
pub mod router;
pub mod target;
pub mod timer;
