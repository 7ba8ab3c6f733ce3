//! Redundant constraint detection.
//!
//! A constraint is redundant when dropping it cannot change the set of
//! satisfying assignments: it duplicates an earlier constraint, it is a
//! `!=` under pairwise-disjunctness, or a chain of other constraints
//! implies it (`A > B`, `B > C` imply `A > C`).

use super::nodes;
use crate::model::{Comparator, Constraint, VarId};

/// Returns every redundant constraint, each once.
///
/// Of each group of [`Constraint::is_same`] duplicates only the first
/// survives. Transitive redundancy is searched only among the constraints
/// that survive the duplicate and `!=` passes, and a constraint found
/// redundant never serves as a link for a later chain.
pub fn redundant(constraints: &[Constraint], pairwise_disjunct: bool) -> Vec<Constraint> {
    let mut redundant = duplicates(constraints);
    if pairwise_disjunct {
        for c in constraints {
            if c.comparator == Comparator::NotEquals && !redundant.contains(c) {
                redundant.push(*c);
            }
        }
    }

    let remaining: Vec<Constraint> = constraints
        .iter()
        .filter(|c| !redundant.contains(c))
        .copied()
        .collect();
    for c in transitive(&remaining) {
        if !redundant.contains(&c) {
            redundant.push(c);
        }
    }
    redundant
}

fn duplicates(constraints: &[Constraint]) -> Vec<Constraint> {
    let mut duplicates = Vec::new();
    for (i, first) in constraints.iter().enumerate() {
        for second in &constraints[i + 1..] {
            if first.is_same(second) && !duplicates.contains(second) {
                duplicates.push(*second);
            }
        }
    }
    duplicates
}

fn transitive(constraints: &[Constraint]) -> Vec<Constraint> {
    let mut found: Vec<Constraint> = Vec::new();
    for source in nodes(constraints) {
        let remaining: Vec<Constraint> = constraints
            .iter()
            .filter(|c| !found.contains(c))
            .copied()
            .collect();
        let mut path = vec![source];
        found.extend(chain_closures(source, &remaining, None, &mut path));
    }
    found
}

/// Depth-first walk from the end of `path`, extending the chain started at
/// `source` and collecting every edge that closes a chain back onto it.
///
/// `incoming` is the link the walk arrived through; `None` at the source.
fn chain_closures(
    source: VarId,
    constraints: &[Constraint],
    incoming: Option<Constraint>,
    path: &mut Vec<VarId>,
) -> Vec<Constraint> {
    let Some(&at) = path.last() else {
        return Vec::new();
    };
    let mut found: Vec<Constraint> = Vec::new();

    loop {
        let candidates: Vec<Constraint> = constraints
            .iter()
            .filter(|c| c.touches(at) && Some(**c) != incoming && !found.contains(c))
            .copied()
            .collect();

        let mut progressed = false;
        for edge in candidates {
            let Some(target) = edge.other(at) else {
                continue;
            };
            if target == source && closes_chain(&edge, incoming.as_ref(), at) {
                found.push(edge);
                return found;
            }
            if !continues_chain(&edge, incoming.as_ref(), at) || path.contains(&target) {
                continue;
            }

            let remaining: Vec<Constraint> = constraints
                .iter()
                .filter(|c| !found.contains(c))
                .copied()
                .collect();
            path.push(target);
            let deeper = chain_closures(source, &remaining, Some(edge), path);
            path.pop();

            if !deeper.is_empty() {
                found.extend(deeper);
                progressed = true;
                break;
            }
        }
        if !progressed {
            return found;
        }
    }
}

/// Whether `edge`, leaving `at`, keeps the chain relation of `incoming`.
///
/// Relations are read in walk direction. `!=` never chains.
fn continues_chain(edge: &Constraint, incoming: Option<&Constraint>, at: VarId) -> bool {
    let Some(incoming) = incoming else {
        return true;
    };
    edge.comparator != Comparator::NotEquals
        && edge.relation_from(at) == incoming.relation_from(at).mirror()
}

/// Whether `edge`, leaving `at` towards the chain source, is implied by the
/// chain that arrived through `incoming`.
fn closes_chain(edge: &Constraint, incoming: Option<&Constraint>, at: VarId) -> bool {
    let Some(incoming) = incoming else {
        return false;
    };
    edge.comparator != Comparator::NotEquals
        && incoming.comparator != Comparator::NotEquals
        && edge.relation_from(at) == incoming.relation_from(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const A: VarId = VarId(0);
    const B: VarId = VarId(1);
    const C: VarId = VarId(2);
    const D: VarId = VarId(3);

    use crate::model::Comparator::{Equals, Greater, NotEquals, Smaller};

    fn build(edges: &[(VarId, Comparator, VarId)]) -> Vec<Constraint> {
        edges
            .iter()
            .enumerate()
            .map(|(i, &(x, cmp, y))| Constraint::new(i, x, cmp, y))
            .collect()
    }

    #[test]
    fn test_not_equals_redundant_when_pairwise_disjunct() {
        let cs = build(&[(A, NotEquals, B)]);
        assert_eq!(redundant(&cs, true), cs);
        assert!(redundant(&cs, false).is_empty());
    }

    #[test]
    fn test_duplicate_is_redundant() {
        let cs = build(&[(A, Greater, B), (A, Greater, B)]);
        assert_eq!(redundant(&cs, true), vec![cs[1]]);
    }

    #[test]
    fn test_turned_duplicate_is_redundant() {
        let cs = build(&[(A, Greater, B), (B, Smaller, A), (A, Smaller, B)]);
        assert_eq!(redundant(&cs, false), vec![cs[1]]);
    }

    #[test]
    fn test_equality_triangle_closing_edge() {
        let cs = build(&[(A, Equals, B), (B, Equals, C), (A, Equals, C)]);
        assert_eq!(redundant(&cs, false), vec![cs[2]]);

        let cs = build(&[(A, Equals, B), (B, Equals, C), (C, Equals, A)]);
        assert_eq!(redundant(&cs, false), vec![cs[2]]);
    }

    #[test]
    fn test_equality_triangle_any_orientation_drops_one() {
        let cs = build(&[(B, Equals, A), (C, Equals, B), (C, Equals, A)]);
        assert_eq!(redundant(&cs, false).len(), 1);
    }

    #[test]
    fn test_equality_chain() {
        let cs = build(&[(A, Equals, B), (B, Equals, C), (C, Equals, D), (A, Equals, D)]);
        assert_eq!(redundant(&cs, false), vec![cs[3]]);

        let cs = build(&[(A, Equals, B), (C, Equals, B), (C, Equals, D), (A, Equals, D)]);
        assert_eq!(redundant(&cs, false), vec![cs[3]]);
    }

    #[test]
    fn test_greater_triangle() {
        let cs = build(&[(A, Greater, B), (B, Greater, C), (A, Greater, C)]);
        assert_eq!(redundant(&cs, false), vec![cs[2]]);

        let cs = build(&[(A, Greater, B), (B, Greater, C), (C, Smaller, A)]);
        assert_eq!(redundant(&cs, false), vec![cs[2]]);
    }

    #[test]
    fn test_smaller_triangle() {
        let cs = build(&[(B, Smaller, A), (C, Smaller, B), (C, Smaller, A)]);
        assert_eq!(redundant(&cs, false), vec![cs[2]]);
    }

    #[test]
    fn test_greater_chain() {
        let cs = build(&[(A, Greater, B), (B, Greater, C), (C, Greater, D), (A, Greater, D)]);
        assert_eq!(redundant(&cs, false), vec![cs[3]]);

        let cs = build(&[(A, Greater, B), (C, Smaller, B), (C, Greater, D), (A, Greater, D)]);
        assert_eq!(redundant(&cs, false), vec![cs[3]]);
    }

    #[test]
    fn test_not_equals_is_never_implied() {
        let cs = build(&[(A, Greater, B), (B, Greater, C), (A, NotEquals, C)]);
        assert!(redundant(&cs, false).is_empty());
    }

    #[test]
    fn test_contradicting_edge_is_not_redundant() {
        let cs = build(&[(A, Greater, B), (B, Greater, C), (C, Greater, A)]);
        assert!(redundant(&cs, false).is_empty());
    }

    #[test]
    fn test_mixed_relations_do_not_chain() {
        let cs = build(&[(A, Greater, B), (B, Equals, C), (A, Greater, C)]);
        assert!(redundant(&cs, false).is_empty());
    }

    fn arb_constraints() -> impl Strategy<Value = Vec<Constraint>> {
        let edge = (0usize..5, 0usize..6, 1usize..5).prop_map(|(x, cmp, offset)| {
            (VarId(x), Comparator::ALL[cmp], VarId((x + offset) % 5))
        });
        prop::collection::vec(edge, 0..10).prop_map(|edges| build(&edges))
    }

    proptest! {
        #[test]
        fn prop_redundancy_is_idempotent(cs in arb_constraints(), disjunct in any::<bool>()) {
            let removed = redundant(&cs, disjunct);
            let rest: Vec<Constraint> =
                cs.iter().filter(|c| !removed.contains(c)).copied().collect();
            prop_assert!(redundant(&rest, disjunct).is_empty());
        }

        #[test]
        fn prop_redundant_are_listed_once(cs in arb_constraints(), disjunct in any::<bool>()) {
            let removed = redundant(&cs, disjunct);
            for (i, c) in removed.iter().enumerate() {
                prop_assert!(!removed[i + 1..].contains(c));
            }
        }
    }
}
