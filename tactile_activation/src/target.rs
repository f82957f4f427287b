// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Activatable target resolution.

use tactile_tree::{ElementId, ElementTree, Markers};

use crate::event::Event;

/// Find the nearest activatable ancestor for an event's target.
///
/// When the event carries a composed path, scan it innermost → outermost,
/// skipping the two synthetic outermost entries (the document/window host
/// chain), and return the first live element marked
/// [`Markers::ACTIVATABLE`]. Without a composed path, walk the plain
/// ancestor chain from the concrete target instead.
///
/// Returns `None` when nothing qualifies; that is normal control flow, not an
/// error.
pub fn resolve_target(tree: &ElementTree, ev: &Event) -> Option<ElementId> {
    if let Some(path) = &ev.path {
        let scan = &path[..path.len().saturating_sub(2)];
        return scan
            .iter()
            .filter_map(|entry| entry.element())
            .find(|&id| tree.has_marker(id, Markers::ACTIVATABLE));
    }

    let mut cur = ev.target;
    while let Some(id) = cur {
        if tree.has_marker(id, Markers::ACTIVATABLE) {
            return Some(id);
        }
        cur = tree.parent_of(id);
    }
    None
}
