//! # Acceptance Tiers (T0-T3)
//!
//! End-to-end scenarios through the `Registry` surface.
//!
//! ## Tiers
//! - T0: Registry lifecycle
//! - T1: Element bookkeeping
//! - T2: Relation closure
//! - T3: Covering-only deletion

use poset_core::{PosetError, PosetHandle, Registry};

fn registry_with(names: &[&str]) -> (Registry, PosetHandle) {
    let mut registry = Registry::new();
    let h = registry.create();
    for name in names {
        assert!(registry.insert(h, name), "insert {name}");
    }
    (registry, h)
}

// =============================================================================
// TIER T0: REGISTRY LIFECYCLE
// =============================================================================

mod t0_registry_lifecycle {
    use super::*;

    /// T0.1: A fresh poset is empty.
    #[test]
    fn new_poset_is_empty() {
        let mut registry = Registry::new();
        let h = registry.create();
        assert_eq!(registry.size(h), 0);
    }

    /// T0.2: Destroyed handles behave as unknown.
    #[test]
    fn destroyed_handle_is_unknown() {
        let (mut registry, h) = registry_with(&["a"]);
        registry.destroy(h);

        assert_eq!(registry.size(h), 0);
        assert!(!registry.insert(h, "b"));
        assert_eq!(
            registry.try_test(h, "a", "a"),
            Err(PosetError::UnknownHandle(h))
        );
    }

    /// T0.3: Destroying an unknown handle is a no-op.
    #[test]
    fn destroy_unknown_is_noop() {
        let (mut registry, h) = registry_with(&["a"]);
        assert!(!registry.destroy(PosetHandle(h.value() + 10)));
        assert_eq!(registry.size(h), 1);
    }
}

// =============================================================================
// TIER T1: ELEMENT BOOKKEEPING
// =============================================================================

mod t1_elements {
    use super::*;

    /// T1.1: Names are unique within a poset.
    #[test]
    fn duplicate_insert_rejected() {
        let (mut registry, h) = registry_with(&["a"]);
        assert!(!registry.insert(h, "a"));
        assert_eq!(registry.size(h), 1);
    }

    /// T1.2: The empty string and long strings are ordinary names.
    #[test]
    fn empty_and_long_names_accepted() {
        let long = "x".repeat(5000);
        let (mut registry, h) = registry_with(&["a"]);
        assert!(registry.insert(h, ""));
        assert!(registry.insert(h, &long));
        assert_eq!(registry.size(h), 3);

        assert!(registry.add(h, "", "a"));
        assert!(registry.test(h, "", "a"));
        assert!(registry.test(h, "", ""));
        assert!(registry.del(h, "", "a"));
        assert!(registry.remove(h, ""));
        assert!(!registry.test(h, "", ""));
        assert_eq!(registry.size(h), 2);
    }

    /// T1.3: Removing an element leaves the rest of the order intact.
    #[test]
    fn remove_keeps_other_relations() {
        let (mut registry, h) = registry_with(&["a", "b", "c", "d"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));

        assert!(registry.remove(h, "b"));
        assert!(registry.test(h, "a", "c"));
        assert!(!registry.test(h, "a", "b"));
        assert_eq!(registry.size(h), 3);
    }

    /// T1.4: An element tests as related to itself.
    #[test]
    fn test_reflexive() {
        let (registry, h) = registry_with(&["a"]);
        assert!(registry.test(h, "a", "a"));
    }
}

// =============================================================================
// TIER T2: RELATION CLOSURE
// =============================================================================

mod t2_closure {
    use super::*;

    /// T2.1: The canonical acceptance sequence.
    #[test]
    fn canonical_sequence() {
        let (mut registry, h) = registry_with(&["a", "b", "c", "d"]);

        assert!(registry.add(h, "b", "c"));
        assert!(registry.test(h, "b", "c"));
        assert!(!registry.test(h, "c", "b"));
        assert!(!registry.add(h, "a", "a"));
        assert!(!registry.add(h, "c", "b"));
        assert!(!registry.add(h, "b", "c"));

        assert!(registry.add(h, "c", "d"));
        assert!(registry.test(h, "c", "d"));
        assert!(registry.test(h, "b", "d"));

        assert!(registry.add(h, "a", "b"));
        assert!(registry.test(h, "a", "b"));
        assert!(registry.test(h, "a", "d"));
        assert!(!registry.test(h, "d", "a"));

        registry.clear(h);
        assert_eq!(registry.size(h), 0);
        assert!(!registry.test(h, "a", "d"));
        assert!(!registry.test(h, "b", "c"));
        assert!(registry.insert(h, "a"));
    }

    /// T2.2: Both cones are joined when linking their tips.
    #[test]
    fn cross_product_closure() {
        let (mut registry, h) = registry_with(&["p", "a", "b", "s"]);
        assert!(registry.add(h, "p", "a"));
        assert!(registry.add(h, "b", "s"));
        assert!(registry.add(h, "a", "b"));

        assert!(registry.test(h, "p", "b"));
        assert!(registry.test(h, "a", "s"));
        assert!(registry.test(h, "p", "s"));
        assert!(!registry.test(h, "s", "p"));
    }

    /// T2.3: Implied pairs are stored, so relating them is rejected.
    #[test]
    fn implied_pair_is_comparable() {
        let (mut registry, h) = registry_with(&["a", "b", "c"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));

        assert_eq!(
            registry.try_add(h, "a", "c"),
            Err(PosetError::AlreadyComparable("a".to_string(), "c".to_string()))
        );
        assert!(!registry.add(h, "c", "a"));
    }
}

// =============================================================================
// TIER T3: COVERING-ONLY DELETION
// =============================================================================

mod t3_deletion {
    use super::*;

    /// T3.1: The second canonical sequence.
    #[test]
    fn canonical_deletion_sequence() {
        let (mut registry, h) = registry_with(&["a", "b", "c"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));

        assert!(!registry.del(h, "a", "c"));
        assert!(registry.insert(h, "d"));
        assert!(!registry.del(h, "a", "d"));
        assert!(!registry.del(h, "a", "e"));

        assert!(registry.remove(h, "b"));
        assert!(registry.remove(h, "c"));
        assert!(registry.remove(h, "d"));
        assert_eq!(registry.size(h), 1);
        assert!(!registry.test(h, "b", "d"));
        assert!(!registry.test(h, "a", "d"));
    }

    /// T3.2: A covering pair can be dropped; implied pairs stay.
    #[test]
    fn covering_pair_deleted() {
        let (mut registry, h) = registry_with(&["a", "b", "c"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));

        assert!(registry.del(h, "a", "b"));
        assert!(!registry.test(h, "a", "b"));
        assert!(registry.test(h, "a", "c"));
        assert!(registry.test(h, "b", "c"));

        // a and b are incomparable again.
        assert!(registry.add(h, "b", "a"));
        assert!(registry.test(h, "b", "a"));
    }

    /// T3.3: Once its witness is gone, an implied pair becomes covering.
    #[test]
    fn witness_removal_unlocks_deletion() {
        let (mut registry, h) = registry_with(&["a", "b", "c"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));
        assert!(!registry.del(h, "a", "c"));

        assert!(registry.remove(h, "b"));
        assert!(registry.del(h, "a", "c"));
        assert!(!registry.test(h, "a", "c"));
    }

    /// T3.4: Failed deletions leave every relation in place.
    #[test]
    fn failed_deletion_is_idempotent() {
        let (mut registry, h) = registry_with(&["a", "b", "c"]);
        assert!(registry.add(h, "a", "b"));
        assert!(registry.add(h, "b", "c"));

        let before = registry.get(h).map(|p| p.snapshot());
        assert!(!registry.del(h, "a", "c"));
        assert!(!registry.del(h, "c", "a"));
        assert_eq!(registry.get(h).map(|p| p.snapshot()), before);
    }
}
