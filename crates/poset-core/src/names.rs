//! # Name Index
//!
//! Per-poset mapping between external element names and internal
//! `ElementId`s.
//!
//! Identifiers come from a counter owned by the index and are never handed
//! out twice, even after the name is removed or the index is cleared. The
//! relation graph is never touched from here; keeping it in step is the
//! owning `Poset`'s job.

use crate::ElementId;
use std::collections::BTreeMap;

/// Bidirectional name <-> identifier map with a monotonic id counter.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    /// Forward lookup: name -> id
    ids: BTreeMap<String, ElementId>,

    /// Reverse lookup: id -> name
    names: BTreeMap<ElementId, String>,

    /// Next identifier to allocate
    next_id: u64,
}

impl NameIndex {
    /// Create a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` under a fresh identifier.
    ///
    /// Returns `None` if the name is already present.
    pub fn insert(&mut self, name: &str) -> Option<ElementId> {
        if self.ids.contains_key(name) {
            return None;
        }

        let id = ElementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        self.ids.insert(name.to_owned(), id);
        self.names.insert(id, name.to_owned());

        Some(id)
    }

    /// Resolve a name to its identifier.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.ids.get(name).copied()
    }

    /// Resolve an identifier back to its name.
    #[must_use]
    pub fn name_of(&self, id: ElementId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Drop the mapping for `name`, returning the identifier it held.
    pub fn remove(&mut self, name: &str) -> Option<ElementId> {
        let id = self.ids.remove(name)?;
        self.names.remove(&id);
        Some(id)
    }

    /// Drop every mapping. The identifier counter keeps running.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.names.clear();
    }

    /// Number of live names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the index holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Live names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Live identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.names.keys().copied()
    }
}
