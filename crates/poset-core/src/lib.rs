//! # poset-core
//!
//! Registry of independent strict partial orders over named elements.
//!
//! Each `Poset` pairs a `NameIndex` (name -> stable `ElementId`) with a
//! `RelationGraph` that stores the *full* transitive closure of the order.
//! Relatedness queries are a single set lookup; adding a relation closes
//! the cross product of the two affected cones; removing a relation is only
//! allowed for covering pairs, so the closure never has to be recomputed.
//!
//! ## Contract
//!
//! - Every public operation is total: a violated precondition yields `false`
//!   (or `0`, or a no-op) and leaves state untouched.
//! - `try_*` variants return `PosetError` describing the rejection.
//! - No async, no I/O, no global state. A `Registry` is a plain owned value.
//!
//! ## Example
//!
//! ```
//! use poset_core::Registry;
//!
//! let mut registry = Registry::new();
//! let h = registry.create();
//! for name in ["a", "b", "c"] {
//!     assert!(registry.insert(h, name));
//! }
//! assert!(registry.add(h, "a", "b"));
//! assert!(registry.add(h, "b", "c"));
//! assert!(registry.test(h, "a", "c"));
//! assert!(!registry.del(h, "a", "c"));
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod invariants;
pub mod names;
pub mod poset;
pub mod registry;
pub mod snapshot;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{ElementId, InvariantViolation, PosetError, PosetHandle};

pub use graph::RelationGraph;
pub use invariants::check_relation_graph;
pub use names::NameIndex;
pub use poset::Poset;
pub use registry::Registry;
pub use snapshot::PosetSnapshot;
