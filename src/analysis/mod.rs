//! Static analysis of the constraint graph.
//!
//! Pure functions over constraint lists used by the solver before search:
//!
//! - **Structurally impossible** ([`structurally_impossible`]): `=` under
//!   pairwise-disjunctness can never hold
//! - **Redundancy** ([`redundant`]): duplicates, implied `!=`, and
//!   constraints implied by a chain of others
//! - **Cycles** ([`cycles`]): closed `>`/`<` chains, i.e. impossible orderings
//! - **Contradiction scoring** ([`inconsistent_constraint`]): which edge of a
//!   cycle to give up
//!
//! None of these functions fail: they only reclassify constraints.
//!
//! # Node order
//!
//! Wherever the graph's nodes are enumerated, the order is: every `x`
//! operand in constraint order, then every `y` operand, first occurrence
//! wins. Results that depend on iteration order (which duplicate survives,
//! which cycle is reported first) follow from this.

mod contradiction;
mod cycles;
mod redundancy;

pub use contradiction::{contradiction_score, inconsistent_constraint};
pub use cycles::cycles;
pub use redundancy::redundant;

use crate::model::{Comparator, Constraint, VarId};

/// Constraints that cannot hold whatever the assignment.
///
/// In pairwise-disjunct mode every variable takes a distinct value, so every
/// `=` constraint is unsatisfiable. Outside that mode nothing is.
pub fn structurally_impossible(constraints: &[Constraint], pairwise_disjunct: bool) -> Vec<Constraint> {
    if !pairwise_disjunct {
        return Vec::new();
    }
    constraints
        .iter()
        .filter(|c| c.comparator == Comparator::Equals)
        .copied()
        .collect()
}

/// Distinct operands of `constraints` in node order.
pub fn nodes(constraints: &[Constraint]) -> Vec<VarId> {
    let mut nodes = Vec::new();
    for var in constraints
        .iter()
        .map(|c| c.x)
        .chain(constraints.iter().map(|c| c.y))
    {
        if !nodes.contains(&var) {
            nodes.push(var);
        }
    }
    nodes
}
