//! # Poset
//!
//! One named strict partial order: a `NameIndex` paired with a
//! `RelationGraph`.
//!
//! Each operation resolves names first and only mutates once every
//! precondition has been confirmed, so a rejected call leaves the poset
//! exactly as it was. The boolean methods are the public contract; the
//! `try_*` forms carry the rejection reason.

use crate::graph::RelationGraph;
use crate::invariants::check_relation_graph;
use crate::names::NameIndex;
use crate::snapshot::PosetSnapshot;
use crate::{ElementId, InvariantViolation, PosetError};

/// A named strict partial order with an eagerly stored transitive closure.
#[derive(Debug, Clone, Default)]
pub struct Poset {
    names: NameIndex,
    graph: RelationGraph,
}

impl Poset {
    /// Create a new empty poset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live elements.
    #[must_use]
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Check if the poset has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if `name` is a live element.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.lookup(name).is_some()
    }

    /// Live element names in ascending order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.names.names()
    }

    /// Number of stored ordered pairs, implied ones included.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.graph.relation_count()
    }

    // -------------------------------------------------------------------------
    // Element operations
    // -------------------------------------------------------------------------

    /// Add a new element, unrelated to every existing one.
    pub fn try_insert(&mut self, name: &str) -> Result<ElementId, PosetError> {
        let id = self
            .names
            .insert(name)
            .ok_or_else(|| PosetError::DuplicateElement(name.to_owned()))?;
        self.graph.register(id);
        Ok(id)
    }

    /// Add a new element. Returns `false` if the name is taken.
    pub fn insert(&mut self, name: &str) -> bool {
        self.try_insert(name).is_ok()
    }

    /// Remove an element together with all relations it takes part in.
    ///
    /// Relations between other elements that passed through it survive.
    pub fn try_remove(&mut self, name: &str) -> Result<ElementId, PosetError> {
        let id = self.resolve(name)?;
        self.graph.unregister(id);
        self.names.remove(name);
        Ok(id)
    }

    /// Remove an element. Returns `false` if it is not present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.try_remove(name).is_ok()
    }

    // -------------------------------------------------------------------------
    // Relation operations
    // -------------------------------------------------------------------------

    /// Make `first` precede `second`, extending the closure.
    ///
    /// Rejected unless the names differ, both exist, and the elements are
    /// currently incomparable.
    pub fn try_add(&mut self, first: &str, second: &str) -> Result<(), PosetError> {
        let (a, b) = self.resolve_pair(first, second)?;
        if a == b {
            return Err(PosetError::SelfRelation(first.to_owned()));
        }
        if self.graph.comparable(a, b) {
            return Err(PosetError::AlreadyComparable(
                first.to_owned(),
                second.to_owned(),
            ));
        }
        self.graph.add(a, b);
        Ok(())
    }

    /// Make `first` precede `second`. Returns `false` if rejected.
    pub fn add(&mut self, first: &str, second: &str) -> bool {
        self.try_add(first, second).is_ok()
    }

    /// Drop the relation `first -> second`.
    ///
    /// Only covering relations may be dropped: if some element lies strictly
    /// between the two, the relation is implied and stays.
    pub fn try_del(&mut self, first: &str, second: &str) -> Result<(), PosetError> {
        let (a, b) = self.resolve_pair(first, second)?;
        if !self.graph.related(a, b) {
            return Err(PosetError::NotRelated(first.to_owned(), second.to_owned()));
        }
        if let Some(witness) = self.graph.covering_witness(a, b) {
            return Err(PosetError::NotCovering {
                from: first.to_owned(),
                to: second.to_owned(),
                witness: self.names.name_of(witness).unwrap_or_default().to_owned(),
            });
        }
        self.graph.remove(a, b);
        Ok(())
    }

    /// Drop the relation `first -> second`. Returns `false` if rejected.
    pub fn del(&mut self, first: &str, second: &str) -> bool {
        self.try_del(first, second).is_ok()
    }

    /// Query whether `first` precedes `second`.
    ///
    /// An element is reported as related to itself even though no self-edge
    /// is stored. Fails only when a name does not resolve.
    pub fn try_test(&self, first: &str, second: &str) -> Result<bool, PosetError> {
        let (a, b) = self.resolve_pair(first, second)?;
        Ok(a == b || self.graph.related(a, b))
    }

    /// Query whether `first` precedes `second`. Unknown names yield `false`.
    #[must_use]
    pub fn test(&self, first: &str, second: &str) -> bool {
        matches!(self.try_test(first, second), Ok(true))
    }

    /// Remove every element and relation.
    ///
    /// Identifiers handed out before the clear are never reissued.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.names.clear();
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Capture elements and stored relations by name.
    #[must_use]
    pub fn snapshot(&self) -> PosetSnapshot {
        let elements = self.names.names().map(str::to_owned).collect();
        let mut relations: Vec<(String, String)> = self
            .graph
            .pairs()
            .filter_map(|(from, to)| {
                Some((
                    self.names.name_of(from)?.to_owned(),
                    self.names.name_of(to)?.to_owned(),
                ))
            })
            .collect();
        relations.sort();
        PosetSnapshot {
            elements,
            relations,
        }
    }

    /// Audit the stored relation and the name index against each other.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_relation_graph(&self.graph)?;

        if let Some(id) = self.names.ids().find(|id| !self.graph.contains(*id)) {
            return Err(InvariantViolation::IndexMismatch(id));
        }
        if let Some(id) = self.graph.ids().find(|id| self.names.name_of(*id).is_none()) {
            return Err(InvariantViolation::IndexMismatch(id));
        }

        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<ElementId, PosetError> {
        self.names
            .lookup(name)
            .ok_or_else(|| PosetError::UnknownElement(name.to_owned()))
    }

    fn resolve_pair(
        &self,
        first: &str,
        second: &str,
    ) -> Result<(ElementId, ElementId), PosetError> {
        Ok((self.resolve(first)?, self.resolve(second)?))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn poset_with(names: &[&str]) -> Poset {
        let mut poset = Poset::new();
        for name in names {
            assert!(poset.insert(name));
        }
        poset
    }

    #[test]
    fn insert_duplicate_rejected() {
        let mut poset = Poset::new();
        assert!(poset.insert("a"));
        assert_eq!(
            poset.try_insert("a"),
            Err(PosetError::DuplicateElement("a".to_string()))
        );
        assert_eq!(poset.size(), 1);
    }

    #[test]
    fn any_string_is_a_name() {
        let long = "x".repeat(5000);
        let mut poset = poset_with(&["", "a", long.as_str()]);
        assert_eq!(poset.size(), 3);
        assert!(!poset.insert(""));

        assert!(poset.add("", "a"));
        assert!(poset.add("a", &long));
        assert!(poset.test("", &long));
        assert!(poset.remove(""));
        assert!(!poset.test("", "a"));
        assert_eq!(poset.check_invariants(), Ok(()));
    }

    #[test]
    fn test_is_reflexive_for_present_elements() {
        let poset = poset_with(&["a"]);
        assert!(poset.test("a", "a"));
        assert!(!poset.test("b", "b"));
        assert_eq!(poset.relation_count(), 0);
    }

    #[test]
    fn test_unknown_reports_reason() {
        let poset = poset_with(&["a"]);
        assert_eq!(
            poset.try_test("a", "zz"),
            Err(PosetError::UnknownElement("zz".to_string()))
        );
        assert_eq!(poset.try_test("a", "a"), Ok(true));
    }

    #[test]
    fn add_reasons() {
        let mut poset = poset_with(&["a", "b"]);

        assert_eq!(
            poset.try_add("a", "a"),
            Err(PosetError::SelfRelation("a".to_string()))
        );
        assert_eq!(poset.try_add("a", "b"), Ok(()));
        assert_eq!(
            poset.try_add("b", "a"),
            Err(PosetError::AlreadyComparable("b".to_string(), "a".to_string()))
        );
        assert_eq!(
            poset.try_add("a", "ghost"),
            Err(PosetError::UnknownElement("ghost".to_string()))
        );
    }

    #[test]
    fn del_reports_witness() {
        let mut poset = poset_with(&["a", "b", "c"]);
        assert!(poset.add("a", "b"));
        assert!(poset.add("b", "c"));

        assert_eq!(
            poset.try_del("a", "c"),
            Err(PosetError::NotCovering {
                from: "a".to_string(),
                to: "c".to_string(),
                witness: "b".to_string(),
            })
        );
        assert_eq!(
            poset.try_del("c", "a"),
            Err(PosetError::NotRelated("c".to_string(), "a".to_string()))
        );
        assert!(poset.test("a", "c"));
    }

    #[test]
    fn del_covering_keeps_implied_pairs() {
        let mut poset = poset_with(&["a", "b", "c"]);
        assert!(poset.add("a", "b"));
        assert!(poset.add("b", "c"));

        assert!(poset.del("a", "b"));
        assert!(!poset.test("a", "b"));
        assert!(poset.test("a", "c"));
        assert!(poset.test("b", "c"));
        assert_eq!(poset.check_invariants(), Ok(()));
    }

    #[test]
    fn remove_then_reinsert_starts_unrelated() {
        let mut poset = poset_with(&["a", "b"]);
        assert!(poset.add("a", "b"));

        assert!(poset.remove("b"));
        assert!(!poset.remove("b"));
        assert!(poset.insert("b"));
        assert!(!poset.test("a", "b"));
        assert!(!poset.test("b", "a"));
    }

    #[test]
    fn clear_keeps_poset_usable() {
        let mut poset = poset_with(&["a", "b"]);
        assert!(poset.add("a", "b"));
        poset.clear();

        assert_eq!(poset.size(), 0);
        assert!(!poset.test("a", "b"));
        assert!(poset.insert("a"));
        assert_eq!(poset.check_invariants(), Ok(()));
    }

    #[test]
    fn snapshot_lists_closure_by_name() {
        let mut poset = poset_with(&["c", "b", "a"]);
        assert!(poset.add("a", "b"));
        assert!(poset.add("b", "c"));

        let snapshot = poset.snapshot();
        assert_eq!(snapshot.elements, vec!["a", "b", "c"]);
        assert_eq!(
            snapshot.relations,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
                ("b".to_string(), "c".to_string()),
            ]
        );
    }
}
