//! General backtracking search.
//!
//! Depth-first over the unassigned variables with forward checking. Every
//! frame owns its own copies of the domain pool and of the legal-value sets;
//! the only shared state is the [`Assignment`], which a frame undoes before
//! returning anything but success.

use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;

use super::domain_set::DomainSet;
use crate::model::{Assignment, Comparator, Constraint, Domain, DomainId, VarId};

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Solved,
    Exhausted,
    Cancelled,
    NodeLimit,
}

/// Backtracking search over a fixed set of active constraints.
pub struct Backtracking<'a, F: FnMut(u8)> {
    domains: &'a [Domain],
    constraints: &'a [Constraint],
    /// Positions in `constraints` touching each variable.
    incident: Vec<Vec<usize>>,
    pairwise_disjunct: bool,
    cancel: Option<&'a AtomicBool>,
    progress: F,
    max_nodes: usize,
    nodes: usize,
}

impl<'a, F: FnMut(u8)> Backtracking<'a, F> {
    pub fn new(
        num_vars: usize,
        domains: &'a [Domain],
        constraints: &'a [Constraint],
        pairwise_disjunct: bool,
        progress: F,
    ) -> Self {
        let mut incident = vec![Vec::new(); num_vars];
        for (i, c) in constraints.iter().enumerate() {
            incident[c.x.index()].push(i);
            incident[c.y.index()].push(i);
        }
        Self {
            domains,
            constraints,
            incident,
            pairwise_disjunct,
            cancel: None,
            progress,
            max_nodes: 0,
            nodes: 0,
        }
    }

    pub fn with_cancel(mut self, cancel: Option<&'a AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    /// Number of expansions performed so far.
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Completes `assignment` using values from `pool`.
    ///
    /// On anything but [`SearchOutcome::Solved`] the assignment is left as it
    /// was passed in.
    pub fn run(&mut self, assignment: &mut Assignment, pool: &DomainSet) -> SearchOutcome {
        let legal: Vec<DomainSet> = (0..assignment.len())
            .map(|i| {
                let var = VarId(i);
                let mut set = pool.clone();
                if !assignment.is_assigned(var) {
                    set.retain(|d| self.consistent(var, d, assignment));
                }
                set
            })
            .collect();
        self.search(assignment, pool, &legal)
    }

    fn search(
        &mut self,
        assignment: &mut Assignment,
        pool: &DomainSet,
        legal: &[DomainSet],
    ) -> SearchOutcome {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return SearchOutcome::Cancelled;
        }
        if self.max_nodes > 0 && self.nodes >= self.max_nodes {
            return SearchOutcome::NodeLimit;
        }
        self.nodes += 1;

        let Some(var) = self.select_variable(assignment, legal) else {
            return SearchOutcome::Solved;
        };
        let values = self.order_values(var, assignment, pool, legal);
        trace!(
            "node {}: {:?} has {} legal, {} viable values",
            self.nodes,
            var,
            legal[var.index()].len(),
            values.len()
        );

        for value in values {
            assignment.set(var, value);
            let mut child_pool = pool.clone();
            if self.pairwise_disjunct {
                child_pool.remove(value);
            }
            let mut child_legal = legal.to_vec();
            self.prune(&mut child_legal, var, value, assignment);
            (self.progress)(assignment.progress_percent());

            match self.search(assignment, &child_pool, &child_legal) {
                SearchOutcome::Solved => return SearchOutcome::Solved,
                SearchOutcome::Exhausted => assignment.clear(var),
                stopped => {
                    assignment.clear(var);
                    return stopped;
                }
            }
        }
        SearchOutcome::Exhausted
    }

    /// Minimum remaining values, ties broken by degree, then by variable order.
    fn select_variable(&self, assignment: &Assignment, legal: &[DomainSet]) -> Option<VarId> {
        let mut best: Option<(VarId, usize, usize)> = None;
        for var in assignment.unassigned_vars() {
            let remaining = legal[var.index()].len();
            let degree = self.incident[var.index()].len();
            let better = match best {
                None => true,
                Some((_, r, d)) => remaining < r || (remaining == r && degree > d),
            };
            if better {
                best = Some((var, remaining, degree));
            }
        }
        best.map(|(var, _, _)| var)
    }

    /// Least constraining value order over the viable legal values of `var`.
    fn order_values(
        &self,
        var: VarId,
        assignment: &Assignment,
        pool: &DomainSet,
        legal: &[DomainSet],
    ) -> Vec<DomainId> {
        let neighbors = self.unassigned_neighbors(var, assignment);

        let mut candidates: Vec<(DomainId, Vec<usize>)> = legal[var.index()]
            .iter()
            .filter_map(|value| {
                let profile: Vec<usize> = neighbors
                    .iter()
                    .map(|&n| {
                        legal[n.index()]
                            .iter()
                            .filter(|&d| self.compatible(var, value, n, d))
                            .count()
                    })
                    .collect();
                if profile.contains(&0) {
                    return None;
                }
                if self.pairwise_disjunct && !self.pool_can_serve(var, value, &neighbors, pool) {
                    return None;
                }
                Some((value, profile))
            })
            .collect();

        let mut ordered = Vec::with_capacity(candidates.len());
        while !candidates.is_empty() {
            let mut best = 0;
            for i in 1..candidates.len() {
                if beats(&candidates[i].1, &candidates[best].1) {
                    best = i;
                }
            }
            ordered.push(candidates.remove(best).0);
        }
        ordered
    }

    /// Whether the pool, without `value`, still holds enough values at or
    /// above (below) `value` for the neighbors that must be greater (smaller).
    fn pool_can_serve(
        &self,
        var: VarId,
        value: DomainId,
        neighbors: &[VarId],
        pool: &DomainSet,
    ) -> bool {
        let order = self.domains[value.index()].order;
        let mut above = 0;
        let mut below = 0;
        for &n in neighbors {
            let relations = || self.between(var, n).map(move |c| c.relation_from(n));
            if relations().any(|r| matches!(r, Comparator::Greater | Comparator::GreaterOrEquals)) {
                above += 1;
            }
            if relations().any(|r| matches!(r, Comparator::Smaller | Comparator::SmallerOrEquals)) {
                below += 1;
            }
        }
        if above == 0 && below == 0 {
            return true;
        }

        let others = || {
            pool.iter()
                .filter(move |&d| d != value)
                .map(move |d| self.domains[d.index()].order)
        };
        let supply_above = others().filter(|&o| o >= order).count();
        let supply_below = others().filter(|&o| o <= order).count();
        above <= supply_above && below <= supply_below
    }

    /// Narrows the legal sets of the unassigned neighbors of `var` after it
    /// took `value`.
    fn prune(&self, legal: &mut [DomainSet], var: VarId, value: DomainId, assignment: &Assignment) {
        for &i in &self.incident[var.index()] {
            let c = &self.constraints[i];
            let Some(n) = c.other(var) else {
                continue;
            };
            if assignment.is_assigned(n) {
                continue;
            }
            let relation = c.relation_from(n);
            let order = self.domains[value.index()].order;
            legal[n.index()].retain(|d| relation.holds(self.domains[d.index()].order, order));
        }
        if self.pairwise_disjunct {
            for other in assignment.unassigned_vars() {
                legal[other.index()].remove(value);
            }
        }
    }

    /// Whether `n = d` is compatible with `var = value`.
    fn compatible(&self, var: VarId, value: DomainId, n: VarId, d: DomainId) -> bool {
        if self.pairwise_disjunct && d == value {
            return false;
        }
        let (value_order, d_order) = (
            self.domains[value.index()].order,
            self.domains[d.index()].order,
        );
        self.between(var, n)
            .all(|c| c.relation_from(n).holds(d_order, value_order))
    }

    /// Whether `var = value` satisfies every constraint towards an assigned
    /// neighbor.
    fn consistent(&self, var: VarId, value: DomainId, assignment: &Assignment) -> bool {
        let order = self.domains[value.index()].order;
        self.incident[var.index()].iter().all(|&i| {
            let c = &self.constraints[i];
            match c.other(var).and_then(|n| assignment.get(n)) {
                Some(d) => c
                    .relation_from(var)
                    .holds(order, self.domains[d.index()].order),
                None => true,
            }
        })
    }

    fn between(&self, var: VarId, n: VarId) -> impl Iterator<Item = &Constraint> + '_ {
        self.incident[var.index()]
            .iter()
            .map(move |&i| &self.constraints[i])
            .filter(move |c| c.other(var) == Some(n))
    }

    fn unassigned_neighbors(&self, var: VarId, assignment: &Assignment) -> Vec<VarId> {
        let mut neighbors = Vec::new();
        for &i in &self.incident[var.index()] {
            if let Some(n) = self.constraints[i].other(var) {
                if !assignment.is_assigned(n) && !neighbors.contains(&n) {
                    neighbors.push(n);
                }
            }
        }
        neighbors
    }
}

/// Whether neighbor profile `a` is preferable to `b`.
///
/// `a` wins outright when it is nowhere worse and somewhere better;
/// otherwise it needs strictly more improved than worsened neighbors.
fn beats(a: &[usize], b: &[usize]) -> bool {
    let better = a.iter().zip(b).filter(|(x, y)| x > y).count();
    let worse = a.iter().zip(b).filter(|(x, y)| x < y).count();
    if worse == 0 {
        better > 0
    } else {
        better > worse
    }
}
