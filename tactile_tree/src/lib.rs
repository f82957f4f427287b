// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tactile_tree --heading-base-level=0

//! Tactile Tree: the element hierarchy the Tactile interaction crates operate on.
//!
//! ## Overview
//!
//! This crate models just enough of a component tree for pointer interaction:
//!
//! - A hierarchy of elements with generational [`ElementId`] handles.
//! - Per-element marker classes ([`Markers`]): opt-in to activation handling,
//!   opt-out of delays, and the applied pressed state.
//! - Shadow boundaries: an element may host an encapsulated shadow subtree in
//!   addition to its light children, and [`ElementTree::composed_path`]
//!   traverses both transparently the way platform event paths do.
//! - An explicit capability slot for ripple hosts ([`RippleEffect`]): a
//!   sub-element either implements the contract or it does not; resolution is
//!   a typed lookup, never a property probe.
//!
//! It deliberately does not model layout, rendering, styling, or component
//! lifecycles. Geometry is limited to the [`kurbo::Point`] pointer coordinates
//! handed to ripple capabilities.
//!
//! ## Composed paths
//!
//! [`ElementTree::composed_path`] lists entries innermost → outermost and
//! always terminates with two synthetic entries ([`PathEntry::DocumentRoot`],
//! [`PathEntry::Window`]), mirroring the host-chain tail of platform composed
//! paths. Consumers that resolve interaction targets skip that tail.
//!
//! ```rust
//! use tactile_tree::{ElementTree, Markers, PathEntry};
//!
//! let mut tree = ElementTree::new();
//! let host = tree.insert(None);
//! let inner = tree.insert_shadow(host);
//!
//! let path = tree.composed_path(inner);
//! assert_eq!(path.first(), Some(&PathEntry::Element(inner)));
//! assert_eq!(path.last(), Some(&PathEntry::Window));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::ElementTree;
pub use types::{ElementId, Markers, PathEntry, RippleEffect, RippleToken};
