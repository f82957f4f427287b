// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, marker classes, composed paths,
//! capability slots.

use alloc::boxed::Box;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::types::{ElementId, Markers, PathEntry, RippleEffect};

/// Element hierarchy with light and shadow children.
///
/// Elements are addressed by generational [`ElementId`]s; removing an element
/// invalidates its id (and the ids of its whole subtree) so stale handles are
/// never confused with reused slots.
///
/// Each element owns two child lists: its light children and, when it acts as
/// a shadow host, its shadow children. Both kinds report the same
/// [`ElementTree::parent_of`], which keeps ancestor walks and composed paths
/// in agreement.
///
/// ## Example
///
/// ```rust
/// use tactile_tree::{ElementTree, Markers};
///
/// let mut tree = ElementTree::new();
/// let root = tree.insert(None);
/// let button = tree.insert(Some(root));
/// tree.insert_markers(button, Markers::ACTIVATABLE);
///
/// assert_eq!(tree.parent_of(button), Some(root));
/// assert!(tree.has_marker(button, Markers::ACTIVATABLE));
/// ```
pub struct ElementTree {
    /// slots
    elements: Vec<Option<Element>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

struct Element {
    parent: Option<ElementId>,
    /// True when attached to the parent's shadow children.
    in_shadow: bool,
    light: SmallVec<[ElementId; 4]>,
    shadow: SmallVec<[ElementId; 4]>,
    markers: Markers,
    ripple: Option<Box<dyn RippleEffect>>,
}

impl Element {
    fn new(parent: Option<ElementId>, in_shadow: bool) -> Self {
        Self {
            parent,
            in_shadow,
            light: SmallVec::new(),
            shadow: SmallVec::new(),
            markers: Markers::empty(),
            ripple: None,
        }
    }
}

impl core::fmt::Debug for ElementTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.elements.len();
        let alive = self.elements.iter().filter(|e| e.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("ElementTree")
            .field("elements_total", &total)
            .field("elements_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert an element as a light child of `parent` (or as a root).
    ///
    /// ## Panics
    ///
    /// Panics if `parent` is not alive.
    pub fn insert(&mut self, parent: Option<ElementId>) -> ElementId {
        self.insert_inner(parent, false)
    }

    /// Insert an element into `host`'s shadow children, making `host` a
    /// shadow host.
    ///
    /// The new element's [`ElementTree::parent_of`] is `host`; composed paths
    /// cross this boundary transparently.
    ///
    /// ## Panics
    ///
    /// Panics if `host` is not alive.
    pub fn insert_shadow(&mut self, host: ElementId) -> ElementId {
        self.insert_inner(Some(host), true)
    }

    fn insert_inner(&mut self, parent: Option<ElementId>, in_shadow: bool) -> ElementId {
        if let Some(p) = parent {
            assert!(self.contains(p), "parent element is not alive");
        }
        let id = match self.free_list.pop() {
            Some(idx) => {
                let generation = self.generations[idx].wrapping_add(1);
                self.generations[idx] = generation;
                self.elements[idx] = Some(Element::new(parent, in_shadow));
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "ElementId uses 32-bit indices by design."
                )]
                ElementId::new(idx as u32, generation)
            }
            None => {
                let idx = self.elements.len();
                self.elements.push(Some(Element::new(parent, in_shadow)));
                self.generations.push(0);
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "ElementId uses 32-bit indices by design."
                )]
                ElementId::new(idx as u32, 0)
            }
        };
        if let Some(p) = parent {
            let host = self.element_mut(p).expect("parent checked alive above");
            if in_shadow {
                host.shadow.push(id);
            } else {
                host.light.push(id);
            }
        }
        id
    }

    /// Remove an element and its whole subtree (light and shadow).
    ///
    /// Returns `false` if `id` is not alive.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if !self.contains(id) {
            return false;
        }
        // Detach from the parent's child list first.
        if let Some(el) = self.element(id)
            && let Some(p) = el.parent
        {
            let in_shadow = el.in_shadow;
            if let Some(parent) = self.element_mut(p) {
                let list = if in_shadow {
                    &mut parent.shadow
                } else {
                    &mut parent.light
                };
                list.retain(|c| *c != id);
            }
        }
        // Free the subtree iteratively.
        let mut stack: Vec<ElementId> = alloc::vec![id];
        while let Some(cur) = stack.pop() {
            let Some(el) = self.elements[cur.idx()].take() else {
                continue;
            };
            stack.extend(el.light);
            stack.extend(el.shadow);
            self.free_list.push(cur.idx());
        }
        true
    }

    /// Whether `id` refers to a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    /// Whether the tree has no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parent of a live element (`None` for roots and dead ids).
    ///
    /// Shadow children report their shadow host as parent.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(|el| el.parent)
    }

    /// Light children of `id` (empty for dead ids).
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(&[], |el| el.light.as_slice())
    }

    /// Shadow children of `id` (empty for non-hosts and dead ids).
    pub fn shadow_children_of(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map_or(&[], |el| el.shadow.as_slice())
    }

    /// Whether `id` hosts a shadow subtree.
    pub fn is_shadow_host(&self, id: ElementId) -> bool {
        !self.shadow_children_of(id).is_empty()
    }

    /// Marker classes of a live element (empty for dead ids).
    pub fn markers(&self, id: ElementId) -> Markers {
        self.element(id).map_or(Markers::empty(), |el| el.markers)
    }

    /// Replace the marker classes of a live element.
    pub fn set_markers(&mut self, id: ElementId, markers: Markers) {
        if let Some(el) = self.element_mut(id) {
            el.markers = markers;
        }
    }

    /// Add marker classes to a live element.
    pub fn insert_markers(&mut self, id: ElementId, markers: Markers) {
        if let Some(el) = self.element_mut(id) {
            el.markers |= markers;
        }
    }

    /// Remove marker classes from a live element.
    pub fn remove_markers(&mut self, id: ElementId, markers: Markers) {
        if let Some(el) = self.element_mut(id) {
            el.markers &= !markers;
        }
    }

    /// Whether a live element carries all of `markers`.
    pub fn has_marker(&self, id: ElementId, markers: Markers) -> bool {
        self.markers(id).contains(markers)
    }

    /// Attach a ripple capability to a live element, replacing any previous
    /// one. Returns `false` (dropping `effect`) if `id` is not alive.
    pub fn set_ripple(&mut self, id: ElementId, effect: Box<dyn RippleEffect>) -> bool {
        match self.element_mut(id) {
            Some(el) => {
                el.ripple = Some(effect);
                true
            }
            None => false,
        }
    }

    /// Detach and return the ripple capability of a live element.
    pub fn take_ripple(&mut self, id: ElementId) -> Option<Box<dyn RippleEffect>> {
        self.element_mut(id).and_then(|el| el.ripple.take())
    }

    /// Whether a live element hosts a ripple capability.
    pub fn has_ripple(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|el| el.ripple.is_some())
    }

    /// Mutable access to the ripple capability of a live element.
    pub fn ripple_mut(&mut self, id: ElementId) -> Option<&mut (dyn RippleEffect + 'static)> {
        self.element_mut(id)
            .and_then(|el| el.ripple.as_deref_mut())
    }

    /// Composed path from `target` to the outermost scope, innermost first.
    ///
    /// Crosses shadow boundaries (shadow children continue through their
    /// host) and ends with the two synthetic [`PathEntry::DocumentRoot`] and
    /// [`PathEntry::Window`] entries. Returns an empty path for dead ids.
    pub fn composed_path(&self, target: ElementId) -> Vec<PathEntry> {
        let mut out = Vec::new();
        if !self.contains(target) {
            return out;
        }
        let mut cur = target;
        loop {
            out.push(PathEntry::Element(cur));
            match self.parent_of(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.push(PathEntry::DocumentRoot);
        out.push(PathEntry::Window);
        out
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        match self.elements.get(id.idx()) {
            Some(Some(el)) if self.generations[id.idx()] == id.1 => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        match self.elements.get_mut(id.idx()) {
            Some(Some(el)) if self.generations[id.idx()] == id.1 => Some(el),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RippleToken;
    use kurbo::Point;

    #[test]
    fn insert_and_parent_child_links() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None);
        let a = tree.insert(Some(root));
        let b = tree.insert(Some(root));

        assert_eq!(tree.parent_of(root), None);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.children_of(root), &[a, b][..]);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn shadow_children_are_separate_but_share_parent() {
        let mut tree = ElementTree::new();
        let host = tree.insert(None);
        let light = tree.insert(Some(host));
        let shadow = tree.insert_shadow(host);

        assert!(tree.is_shadow_host(host));
        assert_eq!(tree.children_of(host), &[light][..]);
        assert_eq!(tree.shadow_children_of(host), &[shadow][..]);
        assert_eq!(tree.parent_of(shadow), Some(host));
    }

    #[test]
    fn remove_frees_subtree_and_invalidates_ids() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None);
        let mid = tree.insert(Some(root));
        let leaf = tree.insert(Some(mid));
        let shadow_leaf = tree.insert_shadow(mid);

        assert!(tree.remove(mid));
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(!tree.contains(shadow_leaf));
        assert!(tree.contains(root));
        assert_eq!(tree.children_of(root), &[] as &[ElementId]);

        // Slot reuse bumps the generation, so the stale id stays dead.
        let reused = tree.insert(Some(root));
        assert!(tree.contains(reused));
        assert!(!tree.contains(mid));
    }

    #[test]
    fn markers_roundtrip() {
        let mut tree = ElementTree::new();
        let el = tree.insert(None);

        tree.insert_markers(el, Markers::ACTIVATABLE | Markers::INSTANT);
        assert!(tree.has_marker(el, Markers::ACTIVATABLE));
        assert!(tree.has_marker(el, Markers::INSTANT));
        assert!(!tree.has_marker(el, Markers::ACTIVATED));

        tree.remove_markers(el, Markers::INSTANT);
        assert!(!tree.has_marker(el, Markers::INSTANT));

        // Dead ids degrade to empty markers, not errors.
        tree.remove(el);
        assert_eq!(tree.markers(el), Markers::empty());
    }

    #[test]
    fn composed_path_crosses_shadow_boundary_and_ends_synthetic() {
        let mut tree = ElementTree::new();
        let root = tree.insert(None);
        let host = tree.insert(Some(root));
        let inner = tree.insert_shadow(host);
        let leaf = tree.insert(Some(inner));

        let path = tree.composed_path(leaf);
        assert_eq!(
            path,
            alloc::vec![
                PathEntry::Element(leaf),
                PathEntry::Element(inner),
                PathEntry::Element(host),
                PathEntry::Element(root),
                PathEntry::DocumentRoot,
                PathEntry::Window,
            ]
        );
    }

    struct CountingRipple {
        started: u32,
    }

    impl RippleEffect for CountingRipple {
        fn add_ripple(&mut self, _at: Point) -> RippleToken {
            self.started += 1;
            RippleToken(u64::from(self.started))
        }

        fn dismiss(&mut self, _token: RippleToken) {}
    }

    #[test]
    fn ripple_slot_is_an_explicit_capability() {
        let mut tree = ElementTree::new();
        let el = tree.insert(None);
        assert!(!tree.has_ripple(el));

        assert!(tree.set_ripple(el, Box::new(CountingRipple { started: 0 })));
        assert!(tree.has_ripple(el));

        let token = tree
            .ripple_mut(el)
            .map(|r| r.add_ripple(Point::new(4.0, 2.0)));
        assert_eq!(token, Some(RippleToken(1)));

        assert!(tree.take_ripple(el).is_some());
        assert!(!tree.has_ripple(el));
    }
}
