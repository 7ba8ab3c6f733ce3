//! Solver result types.

use crate::model::{Constraint, Domain, VarId, Variable};

/// How a solve call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Complete assignment satisfying every constraint.
    Solved,
    /// Complete assignment; some constraints are unmatched.
    Relaxed,
    /// Search failed on every branch. No assignment is reported.
    Exhausted,
    /// Stopped through the cancellation flag.
    Cancelled,
    /// Stopped after `max_nodes` search expansions.
    NodeLimit,
}

/// The value chosen for one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableAssignment {
    pub variable: VarId,
    /// Variable name, copied for display.
    pub name: String,
    pub domain: Domain,
}

/// Result of a [`CspSolver`](super::CspSolver) run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspResult {
    /// Solver status.
    pub status: SolveStatus,
    /// One entry per variable in variable order; empty unless the status is
    /// `Solved` or `Relaxed`.
    pub assignments: Vec<VariableAssignment>,
    /// Constraints the result does not satisfy, sorted by index.
    ///
    /// When no assignment is reported this holds the constraints removed by
    /// preprocessing instead.
    pub unmatched: Vec<Constraint>,
    /// Number of search expansions.
    pub nodes: usize,
    /// Solve time in milliseconds.
    pub elapsed_ms: u64,
}

impl CspResult {
    /// Whether a complete assignment was produced.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolveStatus::Solved | SolveStatus::Relaxed)
    }

    /// The domain assigned to the variable called `name`.
    pub fn value_of(&self, name: &str) -> Option<&Domain> {
        self.assignments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.domain)
    }

    /// The unmatched constraints rendered as `"X <op> Y"`.
    pub fn unmatched_display(&self, variables: &[Variable]) -> Vec<String> {
        self.unmatched
            .iter()
            .map(|c| c.display(variables).to_string())
            .collect()
    }
}
