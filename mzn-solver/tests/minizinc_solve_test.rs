#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use std::collections::BTreeSet;

use helpers::integer_factorisation;
use helpers::minizinc;
use helpers::ordered_pair;
use helpers::queens;
use mzn_solver::minizinc::SolveStatus;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;

#[test]
fn integer_factorisation_has_a_unique_solution() {
    let Some(minizinc) = minizinc() else {
        return;
    };
    let (mut model, x, y) = integer_factorisation();

    let result = minizinc
        .with_all_solutions(true)
        .solve(&mut model)
        .unwrap();

    assert_eq!(SolveStatus::Complete, result.status());
    let assignments = result
        .solutions()
        .iter()
        .map(|solution| (solution.int_value(&x), solution.int_value(&y)))
        .collect::<Vec<_>>();
    assert_eq!(vec![(Some(7829), Some(6907))], assignments);
}

#[test]
fn eight_queens_has_92_solutions() {
    let Some(minizinc) = minizinc() else {
        return;
    };
    let (mut model, queens) = queens(8);

    let result = minizinc
        .with_all_solutions(true)
        .solve(&mut model)
        .unwrap();

    assert_eq!(SolveStatus::Complete, result.status());
    assert_eq!(92, result.solutions().len());

    let placements = result
        .solutions()
        .iter()
        .map(|solution| {
            queens
                .iter()
                .map(|queen| solution.int_value(queen).unwrap())
                .collect::<Vec<_>>()
        })
        .collect::<BTreeSet<_>>();
    assert_eq!(92, placements.len());
}

#[test]
fn redundant_constraints_do_not_change_the_solutions() {
    let Some(minizinc) = minizinc() else {
        return;
    };

    let solve = |with_redundant: bool| {
        let (mut model, x, y) = ordered_pair(with_redundant);
        minizinc
            .clone()
            .with_all_solutions(true)
            .solve(&mut model)
            .unwrap()
            .solutions()
            .iter()
            .map(|solution| (solution.int_value(&x), solution.int_value(&y)))
            .collect::<BTreeSet<_>>()
    };

    let plain = solve(false);
    let redundant = solve(true);

    assert_eq!(6, plain.len());
    assert_eq!(plain, redundant);
}

#[test]
fn maximisation_reports_the_optimum_last() {
    let Some(minizinc) = minizinc() else {
        return;
    };
    let mut model = Model::default();
    let x = model
        .add_variable("x", VariableDefinition::int().with_bounds(1, 10))
        .unwrap();
    let y = model
        .add_variable("y", VariableDefinition::int().with_bounds(1, 10))
        .unwrap();
    model.add_constraint((&x + &y).less_than_or_equals(12)).post().unwrap();
    model.maximize(&x * 2 + &y).unwrap();

    let result = minizinc.solve(&mut model).unwrap();
    let best = result.best_solution().unwrap();

    assert_eq!(SolveStatus::Complete, result.status());
    assert_eq!(Some(10), best.int_value(&x));
    assert_eq!(Some(2), best.int_value(&y));
    assert_eq!(Some(22), best.objective().and_then(|value| value.as_int()));
}

#[test]
fn infeasible_model_is_reported_unsatisfiable() {
    let Some(minizinc) = minizinc() else {
        return;
    };
    let mut model = Model::default();
    let b = model.add_variable("b", VariableDefinition::bool()).unwrap();
    model.add_constraint(&b).post().unwrap();
    model
        .add_constraint(mzn_solver::expressions::not(&b).unwrap())
        .post()
        .unwrap();
    model.satisfy();

    let result = minizinc.solve(&mut model).unwrap();

    assert!(result.is_unsatisfiable());
    assert!(result.solutions().is_empty());
}
