//! Error types.

/// Structural problem found by [`validate`](crate::model::validate).
///
/// Raised before any solving starts; solving never begins on a model that
/// fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "more variables ({variables}) than domains ({domains}) in pairwise-disjunct mode; \
         add domains or clear the pairwise-disjunct flag"
    )]
    InsufficientDomains { variables: usize, domains: usize },

    #[error("the model has {variables} variables but no domains")]
    EmptyDomainPool { variables: usize },

    #[error("constraint [{index}]: both operands must be set")]
    MissingOperand { index: usize },

    #[error("constraint [{index}]: operand #{var} is not a variable of the model")]
    UnknownVariable { index: usize, var: usize },

    #[error("constraint [{index}]: comparator is not set")]
    UnsetComparator { index: usize },

    #[error("constraint [{index}]: a variable cannot be constrained against itself")]
    SelfConstraint { index: usize },
}

/// Error from the declaration parsers in [`parse`](crate::parse).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("{kind} names are not unique: '{name}' appears more than once")]
    Duplicate { kind: &'static str, name: String },

    #[error("variable name '{0}' must not contain '=', '!', '<' or '>'")]
    ReservedCharacter(String),

    #[error("invalid range '{0}'")]
    InvalidRange(String),

    #[error("unknown comparator '{0}'")]
    UnknownComparator(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("constraint '{0}' must have the form 'X <op> Y'")]
    MalformedConstraint(String),
}

/// Error returned by [`CspSolver`](crate::solver::CspSolver) before search starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("invalid model: {0}")]
    Invalid(#[from] ValidationError),

    #[error("invalid solver config: {0}")]
    Config(String),
}
