//! Choosing which edge of a contradictory cycle to give up.
//!
//! Each edge is scored against the rest of the constraint graph through
//! every third node `n`. If the constraints between `n` and the edge's two
//! operands imply the opposite of the edge, the edge is contradicted there
//! (+1); if they imply the edge itself, it is confirmed there (-1). The
//! edge with the highest score is the least supported one.

use super::nodes;
use crate::model::{Comparator, Constraint, VarId};

/// Picks the edge of `cycle` with the maximal contradiction score.
///
/// Ties go to the edge that comes last in the cycle. Returns `None` only for
/// an empty cycle.
///
/// # Examples
///
/// ```
/// use u_csp::analysis::inconsistent_constraint;
/// use u_csp::model::{Comparator::Greater, Constraint, VarId};
///
/// let cycle = vec![
///     Constraint::new(0, VarId(0), Greater, VarId(1)),
///     Constraint::new(1, VarId(1), Greater, VarId(2)),
///     Constraint::new(2, VarId(2), Greater, VarId(0)),
/// ];
/// assert_eq!(inconsistent_constraint(&cycle, &cycle), Some(cycle[2]));
/// ```
pub fn inconsistent_constraint(cycle: &[Constraint], constraints: &[Constraint]) -> Option<Constraint> {
    let mut best: Option<(Constraint, i64)> = None;
    for edge in cycle {
        let score = contradiction_score(edge, constraints);
        if best.is_none_or(|(_, max)| score >= max) {
            best = Some((*edge, score));
        }
    }
    best.map(|(edge, _)| edge)
}

/// Contradictions minus confirmations of `edge` over all third nodes.
pub fn contradiction_score(edge: &Constraint, constraints: &[Constraint]) -> i64 {
    let e = Some(edge.comparator);
    let o = edge.comparator.opposite();
    let (ex, ey) = (edge.x, edge.y);
    let has = |x: VarId, y: VarId, cmp: Option<Comparator>| {
        cmp.is_some_and(|cmp| {
            constraints
                .iter()
                .any(|c| c.x == x && c.y == y && c.comparator == cmp)
        })
    };

    let mut score = 0;
    for n in nodes(constraints) {
        if n == ex || n == ey {
            continue;
        }
        // Each relation between `n` and an operand may be stated in either
        // orientation, so every check reads both.
        let n_over_ex = has(n, ex, e) || has(ex, n, o);
        let ey_over_n = has(n, ey, o) || has(ey, n, e);
        let n_under_ex = has(n, ex, o) || has(ex, n, e);
        let ey_under_n = has(n, ey, e) || has(ey, n, o);

        if n_over_ex && ey_over_n {
            score += 1;
        }
        if n_under_ex && ey_under_n {
            score -= 1;
        }
    }
    score
}
