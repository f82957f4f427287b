// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, marker classes, composed
//! paths, and the ripple capability contract.

use kurbo::Point;

/// Identifier for an element in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Marker classes carried by an element.
    ///
    /// These are the typed rendition of the CSS-style marker-class contract:
    /// an element opts into activation handling with [`Markers::ACTIVATABLE`],
    /// opts out of activation/deactivation delays with [`Markers::INSTANT`],
    /// and has its pressed visual state reflected by [`Markers::ACTIVATED`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Element participates in pointer activation.
        const ACTIVATABLE = 0b0000_0001;
        /// Element applies/clears the activated state with zero delay.
        const INSTANT     = 0b0000_0010;
        /// Element is currently showing the pressed/active visual state.
        const ACTIVATED   = 0b0000_0100;
    }
}

/// One entry of a composed event path, innermost first.
///
/// A composed path traverses shadow boundaries (a shadow child's composed
/// parent is its shadow host) and always ends with two synthetic entries for
/// the document and window stand-ins, mirroring platform event paths. Target
/// resolution skips those trailing entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathEntry {
    /// A live element in the tree.
    Element(ElementId),
    /// The synthetic document-root entry at the outer end of every path.
    DocumentRoot,
    /// The synthetic window entry, always the outermost path entry.
    Window,
}

impl PathEntry {
    /// The element id, if this entry is an element.
    pub fn element(self) -> Option<ElementId> {
        match self {
            Self::Element(id) => Some(id),
            Self::DocumentRoot | Self::Window => None,
        }
    }
}

/// Token identifying one started ripple, handed back on dismissal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RippleToken(
    /// Effect-assigned identity; opaque to the activation engine.
    pub u64,
);

/// Capability interface for a ripple-hosting sub-element.
///
/// The visual effect itself is out of scope here; this is only the invocation
/// contract: start an effect at the pressed coordinates and later dismiss it
/// via the returned token. An element either hosts this capability (see
/// [`crate::ElementTree::set_ripple`]) or it does not; there is no probing.
pub trait RippleEffect {
    /// Start a ripple at `at` (element-local pointer coordinates).
    ///
    /// Returns a token the caller retains and later passes to
    /// [`RippleEffect::dismiss`] when the activated state clears.
    fn add_ripple(&mut self, at: Point) -> RippleToken;

    /// Release the ripple identified by `token`, letting it fade out.
    ///
    /// Dismissing an unknown or already-dismissed token is a no-op.
    fn dismiss(&mut self, token: RippleToken);
}

impl core::fmt::Debug for dyn RippleEffect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("dyn RippleEffect")
    }
}
