//! Shared model builders and MiniZinc detection for the integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use mzn_solver::constraints;
use mzn_solver::minizinc::MiniZinc;
use mzn_solver::variables::IndexedVariables;
use mzn_solver::variables::Variable;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;

/// Returns a MiniZinc runner when the `minizinc` executable is installed; tests which need to
/// solve are skipped otherwise.
pub(crate) fn minizinc() -> Option<MiniZinc> {
    let minizinc = MiniZinc::default().with_solver("gecode");
    if minizinc.is_available() {
        Some(minizinc)
    } else {
        eprintln!("minizinc is not available, skipping");
        None
    }
}

pub(crate) fn integer_factorisation() -> (Model, Variable, Variable) {
    let mut model = Model::default();
    let definition = VariableDefinition::int().with_bounds(1, 99_999_999);
    let x = model.add_variable("x", definition.clone()).unwrap();
    let y = model.add_variable("y", definition).unwrap();

    model
        .add_constraint((&x * &y).equals(7829 * 6907))
        .post()
        .unwrap();
    model.add_constraint(y.greater_than(1)).post().unwrap();
    model.add_constraint(x.greater_than(&y)).post().unwrap();
    model.satisfy();

    (model, x, y)
}

pub(crate) fn queens(n: i64) -> (Model, IndexedVariables<i64>) {
    let mut model = Model::default();
    let queens = model
        .add_variables("q", 0..n, VariableDefinition::int().with_bounds(0, n - 1))
        .unwrap();

    model
        .add_constraint(constraints::all_different(&queens).unwrap())
        .post()
        .unwrap();
    model
        .add_constraint(
            constraints::all_different(queens.entries().map(|(&i, queen)| queen + i)).unwrap(),
        )
        .post()
        .unwrap();
    model
        .add_constraint(
            constraints::all_different(queens.entries().map(|(&i, queen)| queen - i)).unwrap(),
        )
        .post()
        .unwrap();
    model.satisfy();

    (model, queens)
}

/// Two ordered variables, optionally with an implied `x != y` posted as redundant.
pub(crate) fn ordered_pair(with_redundant: bool) -> (Model, Variable, Variable) {
    let mut model = Model::default();
    let x = model
        .add_variable("x", VariableDefinition::int().with_bounds(1, 4))
        .unwrap();
    let y = model
        .add_variable("y", VariableDefinition::int().with_bounds(1, 4))
        .unwrap();

    model.add_constraint(x.less_than(&y)).post().unwrap();
    if with_redundant {
        model.add_constraint(x.not_equals(&y)).post_redundant().unwrap();
    }
    model.satisfy();

    (model, x, y)
}
