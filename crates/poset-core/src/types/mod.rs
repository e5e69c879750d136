//! # Core Type Definitions
//!
//! This module contains the shared types for the poset engine:
//! - Identifiers (`ElementId`, `PosetHandle`)
//! - Error types (`PosetError`, `InvariantViolation`)
//!
//! ## Identifier Guarantees
//!
//! Both identifier kinds are allocated from monotonic counters owned by the
//! structure that hands them out. They are never reused, so a stale
//! identifier can only ever miss, never alias a newer element or poset.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Internal identifier of an element within one poset.
///
/// Assigned by the poset's `NameIndex` on insertion. Unique for the lifetime
/// of the owning poset, including across `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Opaque, caller-visible identifier of one poset in a `Registry`.
///
/// The first handle issued by a registry is 1; `0` is never a live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosetHandle(pub u64);

impl PosetHandle {
    /// Get the raw handle value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PosetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Reason a poset operation was rejected.
///
/// The public boolean API collapses every variant into `false`; the `try_*`
/// methods surface the variant for logging and diagnostics. A rejected
/// operation never leaves partial changes behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosetError {
    /// No poset is registered under the handle.
    #[error("Unknown poset handle: {0}")]
    UnknownHandle(PosetHandle),

    /// The name does not denote a live element.
    #[error("Unknown element: {0:?}")]
    UnknownElement(String),

    /// An element with this name is already present.
    #[error("Element already present: {0:?}")]
    DuplicateElement(String),

    /// Both sides of a relation name the same element.
    #[error("Element cannot be related to itself: {0:?}")]
    SelfRelation(String),

    /// The elements are already ordered one way or the other.
    #[error("Elements are already comparable: {0:?} and {1:?}")]
    AlreadyComparable(String, String),

    /// The first element does not precede the second.
    #[error("Elements are not related: {0:?} -> {1:?}")]
    NotRelated(String, String),

    /// The relation is implied through an intermediate element and cannot be
    /// dropped without breaking transitivity.
    #[error("Relation {from:?} -> {to:?} is implied through {witness:?}")]
    NotCovering {
        from: String,
        to: String,
        witness: String,
    },
}

/// A breach of the structural invariants of a stored relation.
///
/// Produced only by the invariant checker. A correct engine never yields one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// An element appears in its own successor or predecessor set.
    #[error("Element {0:?} is related to itself")]
    Reflexive(ElementId),

    /// Two elements each precede the other.
    #[error("Elements {0:?} and {1:?} precede each other")]
    Symmetric(ElementId, ElementId),

    /// `a -> b -> c` is stored but `a -> c` is not.
    #[error("Closure incomplete: {0:?} -> {1:?} -> {2:?} without {0:?} -> {2:?}")]
    Intransitive(ElementId, ElementId, ElementId),

    /// An edge is recorded on one side only.
    #[error("Edge {0:?} -> {1:?} is not mirrored")]
    Unmirrored(ElementId, ElementId),

    /// An edge refers to an element that is not registered.
    #[error("Edge {0:?} -> {1:?} refers to an unregistered element")]
    Dangling(ElementId, ElementId),

    /// The name index and the relation graph hold different element sets.
    #[error("Name index and relation graph disagree on element {0:?}")]
    IndexMismatch(ElementId),
}

// =============================================================================
// TESTS
// =============================================================================
