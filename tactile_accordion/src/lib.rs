// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=tactile_accordion --heading-base-level=0

//! Tactile Accordion: group-owned expand/collapse state.
//!
//! An [`Accordion`] never decides its own expansion. User interaction asks
//! the enclosing [`AccordionGroup`] to toggle the accordion's key; the group
//! applies its policy (one open entry, or several when constructed with
//! `multiple`) and updates its [`GroupValue`]. Accordions then recompute
//! their `expanded` flag from the group's change notification — the group has
//! final authority.
//!
//! ## Example
//!
//! ```rust
//! use tactile_accordion::{Accordion, AccordionGroup};
//!
//! let mut group: AccordionGroup<&str> = AccordionGroup::new(false);
//! let mut first = Accordion::new("first");
//! let mut second = Accordion::new("second");
//!
//! // The user taps the first header.
//! first.request_toggle(&mut group);
//! second.on_group_change(group.value());
//! assert!(first.is_expanded());
//!
//! // Opening the second collapses the first: single-open policy.
//! second.request_toggle(&mut group);
//! first.on_group_change(group.value());
//! assert!(second.is_expanded());
//! assert!(!first.is_expanded());
//! ```
//!
//! The types are generic over the entry key `K`; callers commonly use an
//! element id or a small string key.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

/// Current value of an accordion group: which entries are expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupValue<K> {
    /// No entry is expanded.
    Empty,
    /// Exactly one entry is expanded (single-open policy).
    Single(K),
    /// A set of expanded entries (multiple-open policy). May be empty.
    Multiple(Vec<K>),
}

impl<K: PartialEq> GroupValue<K> {
    /// Whether `key` is among the expanded entries.
    pub fn contains(&self, key: &K) -> bool {
        match self {
            Self::Empty => false,
            Self::Single(k) => k == key,
            Self::Multiple(keys) => keys.contains(key),
        }
    }
}

/// The aggregator owning expansion state for a set of accordions.
#[derive(Clone, Debug)]
pub struct AccordionGroup<K> {
    value: GroupValue<K>,
    /// Whether several entries may be expanded simultaneously.
    multiple: bool,
}

impl<K: Clone + PartialEq> AccordionGroup<K> {
    /// Create a group; `multiple` allows several entries open at once.
    pub fn new(multiple: bool) -> Self {
        Self {
            value: GroupValue::Empty,
            multiple,
        }
    }

    /// The current group value.
    pub fn value(&self) -> &GroupValue<K> {
        &self.value
    }

    /// Whether several entries may be expanded simultaneously.
    pub fn multiple(&self) -> bool {
        self.multiple
    }

    /// Replace the value wholesale, normalizing it under the group's policy.
    ///
    /// In single mode a multi-entry value collapses to its first key.
    pub fn set_value(&mut self, value: GroupValue<K>) -> &GroupValue<K> {
        self.value = match value {
            GroupValue::Multiple(keys) if !self.multiple => match keys.into_iter().next() {
                Some(k) => GroupValue::Single(k),
                None => GroupValue::Empty,
            },
            other => other,
        };
        &self.value
    }

    /// Toggle `key` under the group's policy and return the new value.
    ///
    /// Single mode replaces the open entry (or closes it when `key` was
    /// already open); multiple mode flips `key`'s membership.
    pub fn toggle(&mut self, key: K) -> &GroupValue<K> {
        if self.multiple {
            let mut keys = match core::mem::replace(&mut self.value, GroupValue::Empty) {
                GroupValue::Empty => Vec::new(),
                GroupValue::Single(k) => alloc::vec![k],
                GroupValue::Multiple(keys) => keys,
            };
            match keys.iter().position(|k| *k == key) {
                Some(i) => {
                    keys.remove(i);
                }
                None => keys.push(key),
            }
            self.value = GroupValue::Multiple(keys);
        } else {
            self.value = if self.value.contains(&key) {
                GroupValue::Empty
            } else {
                GroupValue::Single(key)
            };
        }
        &self.value
    }
}

/// One collapsible entry bound to an [`AccordionGroup`].
#[derive(Clone, Debug)]
pub struct Accordion<K> {
    key: K,
    expanded: bool,
}

impl<K: Clone + PartialEq> Accordion<K> {
    /// Create a collapsed accordion identified by `key`.
    pub fn new(key: K) -> Self {
        Self {
            key,
            expanded: false,
        }
    }

    /// The accordion's key within its group.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Whether the accordion is currently expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Recompute the expanded flag from the group's current value.
    ///
    /// Call this for every accordion in the group whenever the group's value
    /// changes.
    pub fn on_group_change(&mut self, value: &GroupValue<K>) {
        self.expanded = value.contains(&self.key);
    }

    /// User interaction: ask the group to toggle this entry.
    ///
    /// The accordion does not flip its own state; it derives it from the
    /// value the group settles on.
    pub fn request_toggle(&mut self, group: &mut AccordionGroup<K>) {
        let value = group.toggle(self.key.clone());
        self.expanded = value.contains(&self.key);
    }
}
