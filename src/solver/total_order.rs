//! Total-order construction for pairwise-disjunct `>`/`<` graphs.
//!
//! When every constraint is a strict ordering and all values must differ,
//! a single ranking of the variables consistent with every edge can be
//! mapped onto the pool sorted by order. The ranking is built by relative
//! insertion: each neighbor of an expanded variable is placed right below
//! or right above it, and moved (and expanded again) when a later edge
//! disagrees with its position.

use std::collections::VecDeque;

use log::debug;

use super::domain_set::DomainSet;
use crate::analysis::nodes;
use crate::model::{Assignment, Comparator, Constraint, Domain, DomainId, VarId};

/// Ranks the operands of `constraints` from lowest to highest.
///
/// Returns `None` if insertion does not settle within its step budget or
/// the final ranking violates an edge. Only `>`/`<` constraints are
/// expected.
pub fn rank(constraints: &[Constraint], num_vars: usize) -> Option<Vec<VarId>> {
    let mut incident: Vec<Vec<&Constraint>> = vec![Vec::new(); num_vars];
    for c in constraints {
        incident[c.x.index()].push(c);
        incident[c.y.index()].push(c);
    }

    let mut order: Vec<VarId> = Vec::new();
    let mut placed = vec![false; num_vars];
    let mut finalized = vec![false; num_vars];
    let mut queued = vec![false; num_vars];
    let mut queue = VecDeque::new();
    let mut budget = (num_vars + 1) * (constraints.len() + 1) * 4;

    for root in nodes(constraints) {
        if placed[root.index()] {
            continue;
        }
        order.push(root);
        placed[root.index()] = true;
        queued[root.index()] = true;
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            queued[current.index()] = false;
            for c in &incident[current.index()] {
                budget = budget.checked_sub(1)?;
                let Some(n) = c.other(current) else {
                    continue;
                };
                let current_above = c.relation_from(current) == Comparator::Greater;
                let at = order.iter().position(|&v| v == current)?;

                if placed[n.index()] {
                    let pos = order.iter().position(|&v| v == n)?;
                    if (pos < at) == current_above {
                        continue;
                    }
                    order.remove(pos);
                    finalized[n.index()] = false;
                } else {
                    placed[n.index()] = true;
                }

                let at = order.iter().position(|&v| v == current)?;
                let slot = if current_above { at } else { at + 1 };
                order.insert(slot, n);
                if !finalized[n.index()] && !queued[n.index()] {
                    queued[n.index()] = true;
                    queue.push_back(n);
                }
            }
            finalized[current.index()] = true;
        }
    }

    let mut position = vec![usize::MAX; num_vars];
    for (i, v) in order.iter().enumerate() {
        position[v.index()] = i;
    }
    let consistent = constraints.iter().all(|c| {
        let (px, py) = (position[c.x.index()], position[c.y.index()]);
        match c.comparator {
            Comparator::Greater => px > py,
            Comparator::Smaller => px < py,
            _ => false,
        }
    });
    consistent.then_some(order)
}

/// Assigns the ranked variables the pool values in ascending order.
///
/// Returns false, leaving `assignment` untouched, if no ranking was found,
/// the pool is too small, or the result violates a constraint.
pub fn assign(
    constraints: &[Constraint],
    domains: &[Domain],
    pool: &DomainSet,
    assignment: &mut Assignment,
) -> bool {
    let Some(ranking) = rank(constraints, assignment.len()) else {
        debug!("total order: no consistent ranking");
        return false;
    };
    let mut values: Vec<DomainId> = pool.iter().collect();
    values.sort_by_key(|d| domains[d.index()].order);
    if values.len() < ranking.len() {
        return false;
    }

    for (&var, &value) in ranking.iter().zip(&values) {
        assignment.set(var, value);
    }
    if constraints
        .iter()
        .all(|c| c.is_satisfied(assignment, domains))
    {
        debug!("total order: ranked {} variables", ranking.len());
        return true;
    }

    debug!("total order: ranking does not fit the pool orders");
    for &var in &ranking {
        assignment.clear(var);
    }
    false
}
