//! Structural checks over a raw model.

use super::constraint::{Constraint, RawConstraint};
use super::domain::Domain;
use super::variable::{VarId, Variable};
use crate::error::ValidationError;

/// Validates a raw problem and returns its typed constraints.
///
/// Checks, failing on the first violation:
///
/// 1. pairwise-disjunct with more variables than domains
/// 2. variables without any domain
/// 3. per constraint: missing operand, operand outside the model,
///    unset comparator, constraint of a variable against itself
///
/// The returned constraints carry their position in `constraints` as index.
///
/// # Examples
///
/// ```
/// use u_csp::model::{validate, Comparator, Domain, RawConstraint, VarId, Variable};
///
/// let vars = vec![Variable::new("A"), Variable::new("B")];
/// let domains = vec![Domain::new("red", 1), Domain::new("blue", 2)];
/// let raw = vec![RawConstraint::new(VarId(0), Comparator::Greater, VarId(1))];
/// let constraints = validate(&vars, &domains, &raw, true).unwrap();
/// assert_eq!(constraints[0].index, 0);
/// ```
pub fn validate(
    variables: &[Variable],
    domains: &[Domain],
    constraints: &[RawConstraint],
    pairwise_disjunct: bool,
) -> Result<Vec<Constraint>, ValidationError> {
    if pairwise_disjunct && variables.len() > domains.len() {
        return Err(ValidationError::InsufficientDomains {
            variables: variables.len(),
            domains: domains.len(),
        });
    }
    if !variables.is_empty() && domains.is_empty() {
        return Err(ValidationError::EmptyDomainPool {
            variables: variables.len(),
        });
    }

    let known = |index: usize, var: VarId| {
        if var.index() < variables.len() {
            Ok(var)
        } else {
            Err(ValidationError::UnknownVariable {
                index,
                var: var.index(),
            })
        }
    };

    constraints
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let (x, y) = match (raw.x, raw.y) {
                (Some(x), Some(y)) => (known(index, x)?, known(index, y)?),
                _ => return Err(ValidationError::MissingOperand { index }),
            };
            let comparator = raw
                .comparator
                .ok_or(ValidationError::UnsetComparator { index })?;
            if x == y {
                return Err(ValidationError::SelfConstraint { index });
            }
            Ok(Constraint::new(index, x, comparator, y))
        })
        .collect()
}
