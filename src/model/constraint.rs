//! Binary relational constraints.

use std::fmt;
use std::str::FromStr;

use super::assignment::Assignment;
use super::domain::Domain;
use super::variable::{VarId, Variable};
use crate::error::ParseError;

/// Relation between the two operands of a constraint, read as `x <op> y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    /// `x = y`
    Equals,
    /// `x != y`
    NotEquals,
    /// `x > y`
    Greater,
    /// `x < y`
    Smaller,
    /// `x >= y`
    GreaterOrEquals,
    /// `x <= y`
    SmallerOrEquals,
}

impl Comparator {
    /// All comparators, in display order.
    pub const ALL: [Comparator; 6] = [
        Comparator::Equals,
        Comparator::NotEquals,
        Comparator::Greater,
        Comparator::Smaller,
        Comparator::GreaterOrEquals,
        Comparator::SmallerOrEquals,
    ];

    /// The symbol used when rendering a constraint.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Equals => "=",
            Comparator::NotEquals => "!=",
            Comparator::Greater => ">",
            Comparator::Smaller => "<",
            Comparator::GreaterOrEquals => ">=",
            Comparator::SmallerOrEquals => "<=",
        }
    }

    /// The comparator that expresses the same relation with swapped operands.
    ///
    /// `x > y` holds exactly when `y < x` holds.
    pub fn mirror(self) -> Self {
        match self {
            Comparator::Equals => Comparator::Equals,
            Comparator::NotEquals => Comparator::NotEquals,
            Comparator::Greater => Comparator::Smaller,
            Comparator::Smaller => Comparator::Greater,
            Comparator::GreaterOrEquals => Comparator::SmallerOrEquals,
            Comparator::SmallerOrEquals => Comparator::GreaterOrEquals,
        }
    }

    /// The contradicting comparator used by contradiction scoring.
    ///
    /// Only `=`/`!=` and `>`/`<` have one; the non-strict comparators
    /// return `None` and never take part in a contradiction pattern.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Comparator::Equals => Some(Comparator::NotEquals),
            Comparator::NotEquals => Some(Comparator::Equals),
            Comparator::Greater => Some(Comparator::Smaller),
            Comparator::Smaller => Some(Comparator::Greater),
            Comparator::GreaterOrEquals | Comparator::SmallerOrEquals => None,
        }
    }

    /// Whether this is `>` or `<`.
    pub fn is_strict_order(self) -> bool {
        matches!(self, Comparator::Greater | Comparator::Smaller)
    }

    /// Evaluates `a <op> b` on domain order keys.
    #[inline]
    pub fn holds(self, a: i64, b: i64) -> bool {
        match self {
            Comparator::Equals => a == b,
            Comparator::NotEquals => a != b,
            Comparator::Greater => a > b,
            Comparator::Smaller => a < b,
            Comparator::GreaterOrEquals => a >= b,
            Comparator::SmallerOrEquals => a <= b,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Comparator::ALL
            .into_iter()
            .find(|c| c.symbol() == s)
            .ok_or_else(|| ParseError::UnknownComparator(s.to_owned()))
    }
}

/// A constraint as built by a front-end, before validation.
///
/// Operands and comparator may still be unset; [`validate`](super::validate)
/// rejects such constraints and turns the rest into [`Constraint`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawConstraint {
    pub x: Option<VarId>,
    pub comparator: Option<Comparator>,
    pub y: Option<VarId>,
}

impl RawConstraint {
    /// A fully specified raw constraint.
    pub fn new(x: VarId, comparator: Comparator, y: VarId) -> Self {
        Self {
            x: Some(x),
            comparator: Some(comparator),
            y: Some(y),
        }
    }
}

/// A validated binary constraint `x <op> y`.
///
/// The direction only matters for display: satisfaction is symmetric
/// under operand swap with [`Comparator::mirror`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// Position in the model's constraint list; unique per model.
    pub index: usize,
    pub x: VarId,
    pub comparator: Comparator,
    pub y: VarId,
}

impl Constraint {
    pub fn new(index: usize, x: VarId, comparator: Comparator, y: VarId) -> Self {
        Self {
            index,
            x,
            comparator,
            y,
        }
    }

    /// Whether both constraints relate the same unordered pair with the same
    /// relation, allowing for swapped operands (`A > B` is the same as `B < A`).
    pub fn is_same(&self, other: &Constraint) -> bool {
        (self.x == other.x && self.y == other.y && self.comparator == other.comparator)
            || (self.x == other.y
                && self.y == other.x
                && self.comparator == other.comparator.mirror())
    }

    /// Whether `var` is one of the operands.
    #[inline]
    pub fn touches(&self, var: VarId) -> bool {
        self.x == var || self.y == var
    }

    /// The operand on the other side of `var`, if `var` is an operand.
    #[inline]
    pub fn other(&self, var: VarId) -> Option<VarId> {
        if self.x == var {
            Some(self.y)
        } else if self.y == var {
            Some(self.x)
        } else {
            None
        }
    }

    /// The relation read from `from` towards the other operand.
    ///
    /// For `A > B`, `relation_from(A)` is `>` and `relation_from(B)` is `<`.
    #[inline]
    pub fn relation_from(&self, from: VarId) -> Comparator {
        if self.x == from {
            self.comparator
        } else {
            self.comparator.mirror()
        }
    }

    /// Whether the constraint holds under `assignment`.
    ///
    /// Vacuously true while either operand is unassigned.
    pub fn is_satisfied(&self, assignment: &Assignment, domains: &[Domain]) -> bool {
        match (assignment.get(self.x), assignment.get(self.y)) {
            (Some(a), Some(b)) => self
                .comparator
                .holds(domains[a.index()].order, domains[b.index()].order),
            _ => true,
        }
    }

    /// Renders the constraint as `"X <op> Y"` using variable names.
    pub fn display<'a>(&'a self, variables: &'a [Variable]) -> ConstraintDisplay<'a> {
        ConstraintDisplay {
            constraint: self,
            variables,
        }
    }
}

/// Helper returned by [`Constraint::display`].
#[derive(Debug, Clone, Copy)]
pub struct ConstraintDisplay<'a> {
    constraint: &'a Constraint,
    variables: &'a [Variable],
}

impl fmt::Display for ConstraintDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = |v: VarId| {
            self.variables
                .get(v.index())
                .map_or("?", |var| var.name.as_str())
        };
        write!(
            f,
            "{} {} {}",
            name(self.constraint.x),
            self.constraint.comparator,
            name(self.constraint.y)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DomainId;
    use proptest::prelude::*;

    const A: VarId = VarId(0);
    const B: VarId = VarId(1);
    const C: VarId = VarId(2);

    fn c(index: usize, x: VarId, cmp: Comparator, y: VarId) -> Constraint {
        Constraint::new(index, x, cmp, y)
    }

    #[test]
    fn test_same_properties_is_same() {
        assert!(c(1, A, Comparator::NotEquals, B).is_same(&c(2, A, Comparator::NotEquals, B)));
    }

    #[test]
    fn test_different_x_is_not_same() {
        assert!(!c(1, A, Comparator::NotEquals, B).is_same(&c(2, C, Comparator::NotEquals, B)));
    }

    #[test]
    fn test_different_y_is_not_same() {
        assert!(!c(1, A, Comparator::NotEquals, B).is_same(&c(2, A, Comparator::NotEquals, C)));
    }

    #[test]
    fn test_different_comparator_is_not_same() {
        assert!(!c(1, A, Comparator::NotEquals, B).is_same(&c(2, A, Comparator::Equals, B)));
    }

    #[test]
    fn test_turned_constraints_are_same() {
        let pairs = [
            (Comparator::Equals, Comparator::Equals),
            (Comparator::NotEquals, Comparator::NotEquals),
            (Comparator::Greater, Comparator::Smaller),
            (Comparator::Smaller, Comparator::Greater),
            (Comparator::GreaterOrEquals, Comparator::SmallerOrEquals),
            (Comparator::SmallerOrEquals, Comparator::GreaterOrEquals),
        ];
        for (left, right) in pairs {
            assert!(
                c(1, A, left, B).is_same(&c(2, B, right, A)),
                "{left} should match turned {right}"
            );
        }
    }

    #[test]
    fn test_turned_without_mirror_is_not_same() {
        assert!(!c(1, A, Comparator::Greater, B).is_same(&c(2, B, Comparator::Greater, A)));
        assert!(!c(1, A, Comparator::GreaterOrEquals, B)
            .is_same(&c(2, B, Comparator::Greater, A)));
    }

    #[test]
    fn test_satisfaction_is_vacuous_when_unassigned() {
        let domains = vec![Domain::new("x", 1), Domain::new("y", 2)];
        let mut assignment = Assignment::unassigned(2);
        let gt = c(0, A, Comparator::Greater, B);
        assert!(gt.is_satisfied(&assignment, &domains));

        assignment.set(A, DomainId(0));
        assert!(gt.is_satisfied(&assignment, &domains));

        assignment.set(B, DomainId(1));
        assert!(!gt.is_satisfied(&assignment, &domains));

        assignment.set(A, DomainId(1));
        assignment.set(B, DomainId(0));
        assert!(gt.is_satisfied(&assignment, &domains));
    }

    #[test]
    fn test_relation_from_mirrors_for_y() {
        let gt = c(0, A, Comparator::Greater, B);
        assert_eq!(gt.relation_from(A), Comparator::Greater);
        assert_eq!(gt.relation_from(B), Comparator::Smaller);
        assert_eq!(gt.other(A), Some(B));
        assert_eq!(gt.other(C), None);
    }

    #[test]
    fn test_display_uses_symbols() {
        let vars = vec![Variable::new("X"), Variable::new("Y")];
        let rendered: Vec<String> = Comparator::ALL
            .iter()
            .map(|&cmp| c(0, A, cmp, B).display(&vars).to_string())
            .collect();
        assert_eq!(
            rendered,
            vec!["X = Y", "X != Y", "X > Y", "X < Y", "X >= Y", "X <= Y"]
        );
    }

    #[test]
    fn test_comparator_from_str() {
        for cmp in Comparator::ALL {
            assert_eq!(cmp.symbol().parse::<Comparator>().unwrap(), cmp);
        }
        assert!(" >= ".parse::<Comparator>().is_ok());
        assert!("=>".parse::<Comparator>().is_err());
    }

    proptest! {
        #[test]
        fn prop_is_same_is_symmetric_under_turning(
            x in 0usize..4,
            y in 0usize..4,
            i in 0usize..6,
            j in 0usize..6,
        ) {
            let (cx, cy) = (Comparator::ALL[i], Comparator::ALL[j]);
            let left = c(0, VarId(x), cx, VarId(y));
            let right = c(1, VarId(y), cy, VarId(x));
            prop_assert_eq!(left.is_same(&right), right.is_same(&left));
            prop_assert!(left.is_same(&c(2, VarId(y), cx.mirror(), VarId(x))));
        }
    }
}
