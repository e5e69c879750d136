//! # Poset Snapshot
//!
//! Name-level view of a poset for display and diffing. Lists every stored
//! ordered pair, implied ones included, sorted by name. It is an inspection
//! format only; posets are never rebuilt from it.

use serde::{Deserialize, Serialize};

/// Elements and stored relations of one poset, by name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PosetSnapshot {
    /// Live element names, ascending.
    pub elements: Vec<String>,
    /// Stored `(predecessor, successor)` pairs, ascending.
    pub relations: Vec<(String, String)>,
}

impl PosetSnapshot {
    /// Check if the snapshot holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_pairs_as_arrays() {
        let snapshot = PosetSnapshot {
            elements: vec!["a".to_string(), "b".to_string()],
            relations: vec![("a".to_string(), "b".to_string())],
        };

        let json = serde_json::to_string(&snapshot).expect("serialize");
        assert_eq!(json, r#"{"elements":["a","b"],"relations":[["a","b"]]}"#);
    }

    #[test]
    fn default_is_empty() {
        assert!(PosetSnapshot::default().is_empty());
    }
}
