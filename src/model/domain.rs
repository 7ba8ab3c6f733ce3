//! Domain values.

use std::fmt;

/// Index of a [`Domain`] within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainId(pub usize);

impl DomainId {
    /// Position in the model's domain list.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named domain value.
///
/// `order` defines the total order used by every comparator and by the
/// "maximum value" choice for unconstrained variables. Names are for
/// display only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Domain {
    /// Display name (unique within a model).
    pub name: String,
    /// Ordering key.
    pub order: i64,
}

impl Domain {
    /// Creates a new domain value.
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
