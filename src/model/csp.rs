//! CSP model definition.

use super::constraint::{Comparator, Constraint, RawConstraint};
use super::domain::{Domain, DomainId};
use super::validator::validate;
use super::variable::{VarId, Variable};
use crate::error::{ParseError, ValidationError};
use crate::parse;

/// A binary constraint satisfaction problem.
///
/// Contains variables, the shared domain pool, raw constraints and the
/// pairwise-disjunct flag (every variable must receive a distinct value).
///
/// # Examples
///
/// ```
/// use u_csp::model::{Comparator, CspModel};
///
/// let mut model = CspModel::new("colors");
/// let a = model.add_variable("A");
/// let b = model.add_variable("B");
/// model.add_domain("red", 1);
/// model.add_domain("blue", 2);
/// model.constrain(a, Comparator::Greater, b);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CspModel {
    /// Model name.
    pub name: String,
    /// Variables, indexed by [`VarId`].
    pub variables: Vec<Variable>,
    /// Domain pool, indexed by [`DomainId`].
    pub domains: Vec<Domain>,
    /// Constraints as supplied; the position is the constraint index.
    pub constraints: Vec<RawConstraint>,
    /// All variables must take mutually distinct values.
    pub pairwise_disjunct: bool,
}

impl CspModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a model from comma-separated variable and domain declarations.
    ///
    /// See [`parse::parse_variables`] and [`parse::parse_domains`] for the
    /// accepted syntax.
    pub fn from_declarations(
        variables: &str,
        domains: &str,
        pairwise_disjunct: bool,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            name: String::new(),
            variables: parse::parse_variables(variables)?,
            domains: parse::parse_domains(domains)?,
            constraints: Vec::new(),
            pairwise_disjunct,
        })
    }

    pub fn with_pairwise_disjunct(mut self, pairwise_disjunct: bool) -> Self {
        self.pairwise_disjunct = pairwise_disjunct;
        self
    }

    /// Adds a variable.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(Variable::new(name));
        VarId(self.variables.len() - 1)
    }

    /// Adds a domain value.
    pub fn add_domain(&mut self, name: impl Into<String>, order: i64) -> DomainId {
        self.domains.push(Domain::new(name, order));
        DomainId(self.domains.len() - 1)
    }

    /// Adds a raw constraint and returns its index.
    pub fn add_constraint(&mut self, constraint: RawConstraint) -> usize {
        self.constraints.push(constraint);
        self.constraints.len() - 1
    }

    /// Convenience: add `x <op> y`.
    pub fn constrain(&mut self, x: VarId, comparator: Comparator, y: VarId) -> usize {
        self.add_constraint(RawConstraint::new(x, comparator, y))
    }

    /// Convenience: add a constraint written as `"X <op> Y"`.
    pub fn constrain_text(&mut self, text: &str) -> Result<usize, ParseError> {
        let raw = parse::parse_constraint(text, &self.variables)?;
        Ok(self.add_constraint(raw))
    }

    /// Looks up a variable by name.
    pub fn variable_id(&self, name: &str) -> Option<VarId> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .map(VarId)
    }

    /// Looks up a domain by name.
    pub fn domain_id(&self, name: &str) -> Option<DomainId> {
        self.domains
            .iter()
            .position(|d| d.name == name)
            .map(DomainId)
    }

    /// Validates the model and returns its typed constraints.
    pub fn validate(&self) -> Result<Vec<Constraint>, ValidationError> {
        validate(
            &self.variables,
            &self.domains,
            &self.constraints,
            self.pairwise_disjunct,
        )
    }

    /// Returns the number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
