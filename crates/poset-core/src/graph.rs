//! # Relation Graph
//!
//! The relation-maintenance engine for one poset.
//!
//! Every element carries a predecessor set and a successor set, and the
//! stored relation is always the *full* transitive closure: if `a -> b` and
//! `b -> c` are stored then `a -> c` is stored too. Each edge lives in both
//! the predecessor's successor set and the successor's predecessor set, and
//! both halves are always updated together.
//!
//! All operations take identifiers the caller has already resolved. They
//! still re-check their preconditions and return `false` instead of
//! mutating when one does not hold.

use crate::ElementId;
use std::collections::{BTreeMap, BTreeSet};

/// Predecessor and successor sets of one element.
#[derive(Debug, Clone, Default)]
struct Relatives {
    predecessors: BTreeSet<ElementId>,
    successors: BTreeSet<ElementId>,
}

/// Closure-complete relation store.
///
/// Uses `BTreeMap`/`BTreeSet` so iteration (and therefore snapshots) is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    elements: BTreeMap<ElementId, Relatives>,
}

impl RelationGraph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` with no relations. Returns `false` if already present.
    pub fn register(&mut self, id: ElementId) -> bool {
        if self.elements.contains_key(&id) {
            return false;
        }
        self.elements.insert(id, Relatives::default());
        true
    }

    /// Remove `id` together with every edge touching it.
    ///
    /// Predecessors and successors of `id` are not reconnected: any
    /// `p -> id -> s` path already produced a direct `p -> s` edge when it
    /// was formed, and that edge survives.
    pub fn unregister(&mut self, id: ElementId) -> bool {
        let Some(relatives) = self.elements.remove(&id) else {
            return false;
        };

        for p in &relatives.predecessors {
            if let Some(entry) = self.elements.get_mut(p) {
                entry.successors.remove(&id);
            }
        }
        for s in &relatives.successors {
            if let Some(entry) = self.elements.get_mut(s) {
                entry.predecessors.remove(&id);
            }
        }

        true
    }

    /// Check if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// True iff `a` strictly precedes `b`.
    #[must_use]
    pub fn related(&self, a: ElementId, b: ElementId) -> bool {
        self.elements
            .get(&a)
            .is_some_and(|entry| entry.successors.contains(&b))
    }

    /// True iff the elements are ordered one way or the other.
    #[must_use]
    pub fn comparable(&self, a: ElementId, b: ElementId) -> bool {
        self.related(a, b) || self.related(b, a)
    }

    /// Make `a` precede `b` and close the relation transitively.
    ///
    /// Requires `a != b`, both registered and currently incomparable.
    /// Every element of `predecessors(a) ∪ {a}` is linked to every element
    /// of `successors(b) ∪ {b}`. Linking only `predecessors(a) -> b` and
    /// `a -> successors(b)` would miss the pairs between the two outer sets.
    pub fn add(&mut self, a: ElementId, b: ElementId) -> bool {
        if a == b || self.comparable(a, b) {
            return false;
        }
        let (Some(entry_a), Some(entry_b)) = (self.elements.get(&a), self.elements.get(&b)) else {
            return false;
        };

        let lower: Vec<ElementId> = entry_a
            .predecessors
            .iter()
            .copied()
            .chain(std::iter::once(a))
            .collect();
        let upper: Vec<ElementId> = entry_b
            .successors
            .iter()
            .copied()
            .chain(std::iter::once(b))
            .collect();

        for &u in &lower {
            for &v in &upper {
                // Disjoint by the incomparability precondition.
                if u != v {
                    self.link(u, v);
                }
            }
        }

        true
    }

    /// An element strictly between `a` and `b`, if one exists.
    ///
    /// Since the closure is complete, any `s` with `a -> s -> b` lies in
    /// `successors(a) ∩ predecessors(b)`.
    #[must_use]
    pub fn covering_witness(&self, a: ElementId, b: ElementId) -> Option<ElementId> {
        let entry_a = self.elements.get(&a)?;
        let entry_b = self.elements.get(&b)?;
        entry_a
            .successors
            .intersection(&entry_b.predecessors)
            .next()
            .copied()
    }

    /// True iff dropping `a -> b` keeps the stored relation transitively
    /// closed, i.e. no element lies strictly between them.
    #[must_use]
    pub fn can_remove(&self, a: ElementId, b: ElementId) -> bool {
        self.covering_witness(a, b).is_none()
    }

    /// Drop the covering edge `a -> b`.
    ///
    /// Requires `related(a, b)` and `can_remove(a, b)`. Nothing cascades.
    pub fn remove(&mut self, a: ElementId, b: ElementId) -> bool {
        if !self.related(a, b) || !self.can_remove(a, b) {
            return false;
        }
        self.unlink(a, b);
        true
    }

    /// Drop every element and edge.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of stored ordered pairs (closure included).
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.elements.values().map(|e| e.successors.len()).sum()
    }

    /// Registered identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.elements.keys().copied()
    }

    /// Successor set of `id`, or `None` if it is not registered.
    #[must_use]
    pub fn successors(&self, id: ElementId) -> Option<&BTreeSet<ElementId>> {
        self.elements.get(&id).map(|e| &e.successors)
    }

    /// Predecessor set of `id`, or `None` if it is not registered.
    #[must_use]
    pub fn predecessors(&self, id: ElementId) -> Option<&BTreeSet<ElementId>> {
        self.elements.get(&id).map(|e| &e.predecessors)
    }

    /// Every stored pair `(from, to)` in deterministic order.
    pub fn pairs(&self) -> impl Iterator<Item = (ElementId, ElementId)> + '_ {
        self.elements
            .iter()
            .flat_map(|(from, entry)| entry.successors.iter().map(move |to| (*from, *to)))
    }

    fn link(&mut self, from: ElementId, to: ElementId) {
        if let Some(entry) = self.elements.get_mut(&from) {
            entry.successors.insert(to);
        }
        if let Some(entry) = self.elements.get_mut(&to) {
            entry.predecessors.insert(from);
        }
    }

    /// Store one half of an edge, bypassing closure maintenance.
    #[cfg(test)]
    pub(crate) fn insert_successor_unchecked(&mut self, from: ElementId, to: ElementId) {
        if let Some(entry) = self.elements.get_mut(&from) {
            entry.successors.insert(to);
        }
    }

    /// Store a mirrored edge, bypassing closure maintenance.
    #[cfg(test)]
    pub(crate) fn link_unchecked(&mut self, from: ElementId, to: ElementId) {
        self.link(from, to);
    }

    fn unlink(&mut self, from: ElementId, to: ElementId) {
        if let Some(entry) = self.elements.get_mut(&from) {
            entry.successors.remove(&to);
        }
        if let Some(entry) = self.elements.get_mut(&to) {
            entry.predecessors.remove(&from);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
