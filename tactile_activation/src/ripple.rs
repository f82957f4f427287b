// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ripple capability lookup.

use tactile_tree::{ElementId, ElementTree};

use alloc::vec::Vec;

/// Find the descendant of `element` hosting a ripple capability, if any.
///
/// Searches the encapsulated shadow subtree first, then the light subtree,
/// depth-first in child order. The element itself is not considered a
/// candidate; the capability always lives on a sub-element. Pure lookup, no
/// mutation.
pub fn find_ripple(tree: &ElementTree, element: ElementId) -> Option<ElementId> {
    find_in(tree, tree.shadow_children_of(element))
        .or_else(|| find_in(tree, tree.children_of(element)))
}

fn find_in(tree: &ElementTree, roots: &[ElementId]) -> Option<ElementId> {
    let mut stack: Vec<ElementId> = roots.iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if tree.has_ripple(id) {
            return Some(id);
        }
        // Depth-first, shadow content before light, preserving child order.
        stack.extend(tree.children_of(id).iter().rev());
        stack.extend(tree.shadow_children_of(id).iter().rev());
    }
    None
}
