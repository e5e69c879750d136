//! # Invariant Checker
//!
//! Full structural audit of a stored relation. Walks every edge, so it is
//! meant for tests, scripted sessions with checking enabled, and debugging,
//! not for the hot path.
//!
//! Checked for every registered `a` and every `b ∈ successors(a)`:
//! - irreflexivity: `b != a`
//! - antisymmetry: `a ∉ successors(b)`
//! - transitivity: `successors(b) ⊆ successors(a)`
//! - mirroring: `a ∈ predecessors(b)`, and symmetrically for predecessor sets

use crate::graph::RelationGraph;
use crate::{ElementId, InvariantViolation};

/// Audit a relation graph, returning the first violation found.
pub fn check_relation_graph(graph: &RelationGraph) -> Result<(), InvariantViolation> {
    for a in graph.ids() {
        let Some(successors) = graph.successors(a) else {
            continue;
        };

        for &b in successors {
            if b == a {
                return Err(InvariantViolation::Reflexive(a));
            }
            let (Some(b_predecessors), Some(b_successors)) =
                (graph.predecessors(b), graph.successors(b))
            else {
                return Err(InvariantViolation::Dangling(a, b));
            };
            if !b_predecessors.contains(&a) {
                return Err(InvariantViolation::Unmirrored(a, b));
            }
            if b_successors.contains(&a) {
                return Err(InvariantViolation::Symmetric(a, b));
            }
            if let Some(&c) = b_successors.difference(successors).next() {
                return Err(InvariantViolation::Intransitive(a, b, c));
            }
        }

        check_predecessors(graph, a)?;
    }

    Ok(())
}

fn check_predecessors(graph: &RelationGraph, a: ElementId) -> Result<(), InvariantViolation> {
    let Some(predecessors) = graph.predecessors(a) else {
        return Ok(());
    };

    for &p in predecessors {
        if p == a {
            return Err(InvariantViolation::Reflexive(a));
        }
        match graph.successors(p) {
            None => return Err(InvariantViolation::Dangling(p, a)),
            Some(p_successors) if !p_successors.contains(&a) => {
                return Err(InvariantViolation::Unmirrored(p, a));
            }
            Some(_) => {}
        }
    }

    Ok(())
}
