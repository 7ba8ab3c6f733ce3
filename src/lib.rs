//! Binary constraint satisfaction solver.
//!
//! Assigns one value from a shared, ordered domain pool to every variable so
//! that binary relational constraints (`=`, `!=`, `>`, `<`, `>=`, `<=`) hold.
//! When that is impossible the solver relaxes the problem and reports which
//! constraints it gave up.
//!
//! - **Model**: variables, domains, constraints and validation ([`model`])
//! - **Parsing**: comma-separated declarations and `"X <op> Y"` constraints
//!   ([`parse`])
//! - **Analysis**: redundancy, contradictory cycles and contradiction
//!   scoring over the constraint graph ([`analysis`])
//! - **Solver**: preprocessing pipeline, backtracking with MRV/LCV and a
//!   total-order fast path for pairwise-disjunct models ([`solver`])
//!
//! # Example
//!
//! ```
//! use u_csp::model::CspModel;
//! use u_csp::solver::{CspSolver, SolveStatus, SolverConfig};
//!
//! let mut model = CspModel::from_declarations("A, B, C", "red, green, blue", false)?;
//! model.constrain_text("A > B")?;
//! model.constrain_text("B > C")?;
//! model.constrain_text("C > A")?;
//!
//! let result = CspSolver::solve(&model, &SolverConfig::default())?;
//! assert_eq!(result.status, SolveStatus::Relaxed);
//! assert_eq!(result.unmatched.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Logging
//!
//! Uses the [`log`] facade: `debug!` per preprocessing phase, `trace!` per
//! search expansion, `info!` for the outcome. No logger is installed.

pub mod analysis;
pub mod error;
pub mod model;
pub mod parse;
pub mod solver;

pub use error::{ParseError, SolveError, ValidationError};
pub use model::{Comparator, CspModel};
pub use solver::{CspResult, CspSolver, SolveStatus, SolverConfig};
