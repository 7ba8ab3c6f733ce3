//! Variable-to-domain assignment.

use super::domain::DomainId;
use super::variable::VarId;

/// Current value of every variable, indexed by [`VarId`].
///
/// Exactly one owner mutates an assignment: the search frame that holds it.
/// Analysis helpers only ever receive `&Assignment`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    values: Vec<Option<DomainId>>,
}

impl Assignment {
    /// Creates an assignment with `num_vars` unassigned variables.
    pub fn unassigned(num_vars: usize) -> Self {
        Self {
            values: vec![None; num_vars],
        }
    }

    /// Value of `var`, if assigned.
    #[inline]
    pub fn get(&self, var: VarId) -> Option<DomainId> {
        self.values.get(var.index()).copied().flatten()
    }

    #[inline]
    pub fn is_assigned(&self, var: VarId) -> bool {
        self.get(var).is_some()
    }

    /// Assigns `domain` to `var`.
    pub fn set(&mut self, var: VarId, domain: DomainId) {
        self.values[var.index()] = Some(domain);
    }

    /// Removes the value of `var`.
    pub fn clear(&mut self, var: VarId) {
        self.values[var.index()] = None;
    }

    /// Number of variables covered by this assignment.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of variables that currently hold a value.
    pub fn assigned_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Whether every variable holds a value.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Unassigned variables in ascending id order.
    pub fn unassigned_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| VarId(i))
    }

    /// Share of assigned variables as a percentage in `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        if self.values.is_empty() {
            return 100;
        }
        (self.assigned_count() * 100 / self.values.len()) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_roundtrip() {
        let mut a = Assignment::unassigned(3);
        assert_eq!(a.assigned_count(), 0);
        a.set(VarId(1), DomainId(4));
        assert_eq!(a.get(VarId(1)), Some(DomainId(4)));
        assert!(!a.is_complete());
        assert_eq!(a.unassigned_vars().collect::<Vec<_>>(), vec![VarId(0), VarId(2)]);
        a.clear(VarId(1));
        assert!(!a.is_assigned(VarId(1)));
    }

    #[test]
    fn test_progress_percent() {
        let mut a = Assignment::unassigned(4);
        a.set(VarId(0), DomainId(0));
        assert_eq!(a.progress_percent(), 25);
        assert_eq!(Assignment::unassigned(0).progress_percent(), 100);
    }

    #[test]
    fn test_out_of_range_get_is_none() {
        let a = Assignment::unassigned(1);
        assert_eq!(a.get(VarId(9)), None);
    }
}
