//! Contradictory ordering cycles.
//!
//! Only `>` and `<` edges are considered. Walking an edge from one operand
//! to the other reads it as "goes up" or "goes down"; a closed walk that
//! keeps the same sense on every edge (`A > B > C > A`) is an ordering no
//! assignment can satisfy.

use super::nodes;
use crate::model::{Constraint, VarId};

/// Enumerates contradictory `>`/`<` cycles of at most `max_len` edges.
///
/// Every node in node order is used as a start once; nodes already used as
/// a start are excluded from later walks, so each cycle is reported from its
/// first node only. Cycles with identical edge sets (the same loop walked in
/// the other direction) are collapsed, keeping the first.
///
/// `None` means no length bound.
pub fn cycles(constraints: &[Constraint], max_len: Option<usize>) -> Vec<Vec<Constraint>> {
    let nodes = nodes(constraints);
    let ordering: Vec<Constraint> = constraints
        .iter()
        .filter(|c| c.comparator.is_strict_order())
        .copied()
        .collect();
    let max_len = max_len.unwrap_or(usize::MAX);

    let mut found = Vec::new();
    for (i, &root) in nodes.iter().enumerate() {
        let inspected = &nodes[..i];
        let edges: Vec<Constraint> = ordering
            .iter()
            .filter(|c| !inspected.contains(&c.x) && !inspected.contains(&c.y))
            .copied()
            .collect();
        let mut walk = CycleWalk {
            root,
            edges: &edges,
            max_len,
            path: Vec::new(),
            visited: vec![root],
            found: &mut found,
        };
        walk.extend();
    }

    let mut unique: Vec<Vec<Constraint>> = Vec::with_capacity(found.len());
    for cycle in found {
        let seen = unique
            .iter()
            .any(|u| u.len() == cycle.len() && u.iter().all(|e| cycle.contains(e)));
        if !seen {
            unique.push(cycle);
        }
    }
    unique
}

struct CycleWalk<'a> {
    root: VarId,
    edges: &'a [Constraint],
    max_len: usize,
    path: Vec<Constraint>,
    visited: Vec<VarId>,
    found: &'a mut Vec<Vec<Constraint>>,
}

impl CycleWalk<'_> {
    fn extend(&mut self) {
        if self.path.len() >= self.max_len {
            return;
        }
        let Some(&current) = self.visited.last() else {
            return;
        };
        let previous = self.path.last().copied();

        for &edge in self.edges {
            if !edge.touches(current) || Some(edge) == previous {
                continue;
            }
            let Some(target) = edge.other(current) else {
                continue;
            };
            // The walk must keep its sense across `current`.
            if let Some(prev) = previous {
                if edge.relation_from(current) != prev.relation_from(current).mirror() {
                    continue;
                }
            }

            self.path.push(edge);
            if target == self.root {
                self.found.push(self.path.clone());
            } else if !self.visited.contains(&target) {
                self.visited.push(target);
                self.extend();
                self.visited.pop();
            }
            self.path.pop();
        }
    }
}
