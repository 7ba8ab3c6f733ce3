//! CSP data model.
//!
//! Variables and domains live in the [`CspModel`] arenas and are referenced
//! by [`VarId`] / [`DomainId`]. Two constraints with the same operands and
//! comparator are still distinct entities: identity is the constraint
//! `index`, which the model assigns from the insertion position.
//!
//! # Key Components
//!
//! - **Values** ([`Domain`]): a named value with a total `order`
//! - **Variables** ([`Variable`]): a named decision variable
//! - **Constraints**: [`RawConstraint`] as supplied by a front-end,
//!   [`Constraint`] once validated
//! - **Assignment** ([`Assignment`]): the single owner of `variable -> domain`
//! - **Model** ([`CspModel`]): container plus the pairwise-disjunct flag
//! - **Validator** ([`validate`]): structural checks run before solving

mod assignment;
mod constraint;
mod csp;
mod domain;
mod validator;
mod variable;

pub use assignment::Assignment;
pub use constraint::{Comparator, Constraint, ConstraintDisplay, RawConstraint};
pub use csp::CspModel;
pub use domain::{Domain, DomainId};
pub use validator::validate;
pub use variable::{VarId, Variable};
