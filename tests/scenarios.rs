//! End-to-end solving scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use proptest::prelude::*;
use test_log::test;
use u_csp::model::{Assignment, Comparator, CspModel, VarId};
use u_csp::solver::{CspResult, CspSolver, SolveStatus, SolverConfig};

fn model(vars: &str, domains: &str, disjunct: bool, constraints: &[&str]) -> CspModel {
    let mut model = CspModel::from_declarations(vars, domains, disjunct).unwrap();
    for c in constraints {
        model.constrain_text(c).unwrap();
    }
    model
}

fn solve(model: &CspModel) -> CspResult {
    CspSolver::solve(model, &SolverConfig::default()).unwrap()
}

fn assignment_of(model: &CspModel, result: &CspResult) -> Assignment {
    let mut assignment = Assignment::unassigned(model.variable_count());
    for a in &result.assignments {
        assignment.set(a.variable, model.domain_id(&a.domain.name).unwrap());
    }
    assignment
}

#[test]
fn test_ordering_cycle_is_relaxed() {
    let model = model(
        "A, B, C",
        "red, green, blue",
        false,
        &["A > B", "B > C", "C > A"],
    );
    let result = solve(&model);

    assert_eq!(result.status, SolveStatus::Relaxed);
    assert_eq!(result.unmatched.len(), 1);
    assert_eq!(result.assignments.len(), 3);

    let assignment = assignment_of(&model, &result);
    let constraints = model.validate().unwrap();
    let satisfied = constraints
        .iter()
        .filter(|c| c.is_satisfied(&assignment, &model.domains))
        .count();
    assert_eq!(satisfied, 2);
}

#[test]
fn test_equality_under_pairwise_disjunct() {
    let model = model("A, B", "x, y", true, &["A = B"]);
    let result = solve(&model);

    assert_eq!(result.status, SolveStatus::Relaxed);
    assert_eq!(result.unmatched_display(&model.variables), ["A = B"]);
    let a = result.value_of("A").unwrap();
    let b = result.value_of("B").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_all_different_without_disjunct_flag() {
    let model = model(
        "A, B, C",
        "1, 2, 3",
        false,
        &["A != B", "A != C", "B != C"],
    );
    let result = solve(&model);

    assert_eq!(result.status, SolveStatus::Solved);
    assert!(result.unmatched.is_empty());
    let mut orders: Vec<i64> = result.assignments.iter().map(|a| a.domain.order).collect();
    orders.sort();
    assert_eq!(orders, [1, 2, 3]);
}

#[test]
fn test_unconstrained_variable_gets_highest_in_both_modes() {
    for disjunct in [false, true] {
        let model = model("A, B, C", "[1-5]", disjunct, &["A < B"]);
        let result = solve(&model);
        assert_eq!(result.status, SolveStatus::Solved);
        assert_eq!(result.value_of("C").unwrap().order, 5);
    }
}

#[test]
fn test_two_independent_cycles() {
    let model = model(
        "A, B, C, D, E, F",
        "[1-6]",
        false,
        &["A > B", "B > C", "C > A", "D < E", "E < F", "F < D"],
    );
    let result = solve(&model);

    assert_eq!(result.status, SolveStatus::Relaxed);
    assert_eq!(result.unmatched.len(), 2);
}

#[test]
fn test_cancellation() {
    let model = model("A, B, C", "1, 2, 3", false, &["A > B"]);
    let cancel = Arc::new(AtomicBool::new(true));
    let result = CspSolver::solve_with_cancel(&model, &SolverConfig::default(), Some(cancel))
        .unwrap();

    assert_eq!(result.status, SolveStatus::Cancelled);
    assert!(result.assignments.is_empty());
    assert!(!result.is_solution_found());
}

#[test]
fn test_empty_model() {
    let result = solve(&CspModel::new("empty"));
    assert_eq!(result.status, SolveStatus::Solved);
    assert!(result.assignments.is_empty());
}

#[test]
fn test_invalid_model_is_an_error() {
    let mut model = CspModel::new("no domains");
    model.add_variable("A");
    assert!(CspSolver::solve(&model, &SolverConfig::default()).is_err());
}

fn arb_model() -> impl Strategy<Value = CspModel> {
    let edge = (0usize..5, 0usize..6, 1usize..5);
    (
        2usize..6,
        0usize..3,
        any::<bool>(),
        prop::collection::vec(edge, 0..8),
    )
        .prop_map(|(vars, extra_domains, disjunct, edges)| {
            let mut model = CspModel::new("random").with_pairwise_disjunct(disjunct);
            for i in 0..vars {
                model.add_variable(format!("v{i}"));
            }
            for d in 0..vars + extra_domains {
                model.add_domain(format!("d{d}"), d as i64);
            }
            for (x, cmp, offset) in edges {
                let x = x % vars;
                let y = (x + offset % (vars - 1) + 1) % vars;
                model.constrain(VarId(x), Comparator::ALL[cmp], VarId(y));
            }
            model
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unmatched_is_exactly_the_violated_set(model in arb_model()) {
        let result = solve(&model);
        let constraints = model.validate().unwrap();

        if result.is_solution_found() {
            prop_assert_eq!(result.assignments.len(), model.variable_count());
            let assignment = assignment_of(&model, &result);
            for c in &constraints {
                let impossible =
                    model.pairwise_disjunct && c.comparator == Comparator::Equals;
                let violated = impossible || !c.is_satisfied(&assignment, &model.domains);
                prop_assert_eq!(violated, result.unmatched.contains(c));
            }
            prop_assert_eq!(result.status == SolveStatus::Solved, result.unmatched.is_empty());

            if model.pairwise_disjunct {
                let mut used: Vec<&str> =
                    result.assignments.iter().map(|a| a.domain.name.as_str()).collect();
                used.sort();
                used.dedup();
                prop_assert_eq!(used.len(), model.variable_count());
            }
        } else {
            prop_assert!(result.assignments.is_empty());
        }
        prop_assert!(result.unmatched.windows(2).all(|w| w[0].index < w[1].index));
    }
}
