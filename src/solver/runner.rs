//! Preprocessing and search pipeline.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use super::config::SolverConfig;
use super::domain_set::DomainSet;
use super::search::{Backtracking, SearchOutcome};
use super::total_order;
use super::types::{CspResult, SolveStatus, VariableAssignment};
use crate::analysis;
use crate::error::SolveError;
use crate::model::{Assignment, Constraint, CspModel, DomainId, VarId};

/// Solves a [`CspModel`].
///
/// Pipeline:
/// 1. drop structurally impossible constraints (`=` when pairwise-disjunct)
/// 2. break contradictory `>`/`<` cycles, one edge per cycle and round,
///    with the cycle bound growing from 3 to the node count
/// 3. drop redundant constraints
/// 4. give every unconstrained variable the highest-order value
/// 5. total-order construction when applicable, else backtracking
/// 6. re-test every removed constraint against the final assignment
///
/// # Examples
///
/// ```
/// use u_csp::model::CspModel;
/// use u_csp::solver::{CspSolver, SolveStatus, SolverConfig};
///
/// let mut model = CspModel::from_declarations("A, B, C", "1, 2, 3", false).unwrap();
/// model.constrain_text("A > B").unwrap();
/// model.constrain_text("B > C").unwrap();
///
/// let result = CspSolver::solve(&model, &SolverConfig::default()).unwrap();
/// assert_eq!(result.status, SolveStatus::Solved);
/// assert_eq!(result.value_of("A").unwrap().name, "3");
/// ```
pub struct CspSolver;

impl CspSolver {
    /// Solves `model` without progress reporting or cancellation.
    pub fn solve(model: &CspModel, config: &SolverConfig) -> Result<CspResult, SolveError> {
        Self::solve_with(model, config, &mut |_| {}, None)
    }

    /// Solves `model` with an optional cancellation flag.
    pub fn solve_with_cancel(
        model: &CspModel,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CspResult, SolveError> {
        Self::solve_with(model, config, &mut |_| {}, cancel)
    }

    /// Solves `model`, reporting progress as a percentage of assigned
    /// variables and polling `cancel` before every cycle round and every
    /// search expansion.
    ///
    /// Errors only if the configuration or the model is invalid; an
    /// unsolvable model is reported through [`CspResult::status`].
    pub fn solve_with(
        model: &CspModel,
        config: &SolverConfig,
        progress: &mut dyn FnMut(u8),
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<CspResult, SolveError> {
        config.validate().map_err(SolveError::Config)?;
        let constraints = model.validate()?;
        let start = Instant::now();
        let cancel = cancel.as_deref();
        let disjunct = model.pairwise_disjunct;
        progress(0);

        let impossible = analysis::structurally_impossible(&constraints, disjunct);
        let mut active: Vec<Constraint> = constraints
            .iter()
            .filter(|c| !impossible.contains(c))
            .copied()
            .collect();
        debug!("{} structurally impossible constraints", impossible.len());

        let limit = config
            .max_cycle_length
            .unwrap_or_else(|| analysis::nodes(&active).len());
        let broken = match break_cycles(&mut active, limit, cancel, progress) {
            ControlFlow::Continue(broken) => broken,
            ControlFlow::Break(broken) => {
                let removed = [impossible, broken].concat();
                return Ok(interrupted(SolveStatus::Cancelled, removed, 0, start));
            }
        };

        let redundant = analysis::redundant(&active, disjunct);
        active.retain(|c| !redundant.contains(c));
        debug!(
            "{} redundant constraints, {} left for search",
            redundant.len(),
            active.len()
        );
        progress(0);

        let num_vars = model.variables.len();
        let mut assignment = Assignment::unassigned(num_vars);
        let mut pool = DomainSet::full(model.domains.len());
        for var in (0..num_vars).map(VarId) {
            if active.iter().any(|c| c.touches(var)) {
                continue;
            }
            let Some(value) = highest(&pool, model) else {
                continue;
            };
            assignment.set(var, value);
            if disjunct {
                pool.remove(value);
            }
            progress(assignment.progress_percent());
        }

        let use_total_order = disjunct
            && config.total_order_fast_path
            && !active.is_empty()
            && active.iter().all(|c| c.comparator.is_strict_order());
        let (outcome, nodes) = if use_total_order
            && total_order::assign(&active, &model.domains, &pool, &mut assignment)
        {
            progress(assignment.progress_percent());
            (SearchOutcome::Solved, 0)
        } else {
            let mut search =
                Backtracking::new(num_vars, &model.domains, &active, disjunct, &mut *progress)
                    .with_cancel(cancel)
                    .with_max_nodes(config.max_nodes);
            let outcome = search.run(&mut assignment, &pool);
            (outcome, search.nodes())
        };

        let result = match outcome {
            SearchOutcome::Solved => {
                let mut unmatched = impossible;
                unmatched.extend(
                    broken
                        .iter()
                        .chain(&redundant)
                        .chain(&active)
                        .filter(|c| !c.is_satisfied(&assignment, &model.domains)),
                );
                unmatched.sort_by_key(|c| c.index);
                let status = if unmatched.is_empty() {
                    SolveStatus::Solved
                } else {
                    SolveStatus::Relaxed
                };
                CspResult {
                    status,
                    assignments: assignments(model, &assignment),
                    unmatched,
                    nodes,
                    elapsed_ms: start.elapsed().as_millis() as u64,
                }
            }
            SearchOutcome::Exhausted => {
                interrupted(SolveStatus::Exhausted, [impossible, broken].concat(), nodes, start)
            }
            SearchOutcome::Cancelled => {
                interrupted(SolveStatus::Cancelled, [impossible, broken].concat(), nodes, start)
            }
            SearchOutcome::NodeLimit => {
                interrupted(SolveStatus::NodeLimit, [impossible, broken].concat(), nodes, start)
            }
        };

        progress(100);
        info!(
            "{:?} after {} nodes in {} ms, {} unmatched",
            result.status,
            result.nodes,
            result.elapsed_ms,
            result.unmatched.len()
        );
        Ok(result)
    }
}

/// Removes one edge from every contradictory cycle of `active`, with the
/// cycle bound growing from 3 up to `limit`.
///
/// Within a round a cycle that shares an edge with one already broken in
/// that round is left for later rounds. Returns the removed edges, as
/// `Break` if `cancel` was raised before a round.
fn break_cycles(
    active: &mut Vec<Constraint>,
    limit: usize,
    cancel: Option<&AtomicBool>,
    progress: &mut dyn FnMut(u8),
) -> ControlFlow<Vec<Constraint>, Vec<Constraint>> {
    let mut bound = limit.min(3);
    let mut broken: Vec<Constraint> = Vec::new();
    loop {
        if is_cancelled(cancel) {
            return ControlFlow::Break(broken);
        }
        let mut removed_this_round: Vec<Constraint> = Vec::new();
        for cycle in analysis::cycles(active, Some(bound)) {
            if cycle.iter().any(|e| removed_this_round.contains(e)) {
                continue;
            }
            if let Some(edge) = analysis::inconsistent_constraint(&cycle, active) {
                active.retain(|c| *c != edge);
                removed_this_round.push(edge);
            }
        }
        debug!(
            "cycle bound {bound}: {} constraints removed",
            removed_this_round.len()
        );
        broken.extend(removed_this_round);
        // Nothing is assigned before search.
        progress(0);
        if bound >= limit {
            return ControlFlow::Continue(broken);
        }
        bound += 1;
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// First value of the pool with the highest order.
fn highest(pool: &DomainSet, model: &CspModel) -> Option<DomainId> {
    pool.iter().fold(None, |best, d| match best {
        Some(b) if model.domains[b.index()].order >= model.domains[d.index()].order => Some(b),
        _ => Some(d),
    })
}

fn assignments(model: &CspModel, assignment: &Assignment) -> Vec<VariableAssignment> {
    model
        .variables
        .iter()
        .enumerate()
        .filter_map(|(i, v)| {
            let var = VarId(i);
            assignment.get(var).map(|d| VariableAssignment {
                variable: var,
                name: v.name.clone(),
                domain: model.domains[d.index()].clone(),
            })
        })
        .collect()
}

/// A result without assignment, listing the constraints removed so far.
fn interrupted(
    status: SolveStatus,
    mut removed: Vec<Constraint>,
    nodes: usize,
    start: Instant,
) -> CspResult {
    removed.sort_by_key(|c| c.index);
    CspResult {
        status,
        assignments: Vec::new(),
        unmatched: removed,
        nodes,
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}
