//! CSP solver: preprocessing pipeline and search strategies.
//!
//! # Key Components
//!
//! - **Runner** ([`CspSolver`]): validation, preprocessing, dispatch, re-test
//! - **Configuration** ([`SolverConfig`]): fast path toggle, cycle bound, node budget
//! - **Result**: [`CspResult`] with [`SolveStatus`] and [`VariableAssignment`]s
//! - **Pool** ([`DomainSet`]): bit set used as domain pool and legal-value sets
//!
//! # Design
//!
//! Two strategies:
//!
//! - General backtracking with MRV variable selection (ties by degree),
//!   forward checking and LCV value ordering. Every frame owns copies of the
//!   pool and of the legal sets, so nothing has to be restored by hand.
//! - For pairwise-disjunct models whose remaining constraints are all `>`
//!   or `<`, a ranking of the variables is built by relative insertion and
//!   mapped onto the pool in ascending order. The result is verified and the
//!   solver falls back to backtracking if it does not hold.
//!
//! Search failure is a normal outcome ([`SolveStatus::Exhausted`]), not an
//! error. Only invalid models and configurations produce a
//! [`SolveError`](crate::error::SolveError).
//!
//! # References
//!
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"
//! - Russell & Norvig, "Artificial Intelligence: A Modern Approach", ch. 6

mod config;
mod domain_set;
mod runner;
mod search;
mod total_order;
mod types;

pub use config::SolverConfig;
pub use domain_set::DomainSet;
pub use runner::CspSolver;
pub use types::{CspResult, SolveStatus, VariableAssignment};
