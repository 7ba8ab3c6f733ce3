//! CSP variables.

use std::fmt;

/// Index of a [`Variable`] within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarId(pub usize);

impl VarId {
    /// Position in the model's variable list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A decision variable.
///
/// The variable itself carries no value: the current value lives in an
/// [`Assignment`](super::Assignment) owned by whoever is solving.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// Variable name (unique identifier within a model).
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
