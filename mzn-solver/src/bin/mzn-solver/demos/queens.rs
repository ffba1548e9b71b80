use mzn_solver::constraints;
use mzn_solver::search::SearchAnnotation;
use mzn_solver::search::ValueChoice;
use mzn_solver::search::VariableChoice;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

/// Queen `q_i` is the row of the queen in column `i`.
pub(super) fn build(size: u32) -> Result<Model, ModelError> {
    let n = i64::from(size);
    let mut model = Model::default();

    let _ = model.add_constant("n", n)?;
    let queens = model.add_variables("q", 0..n, VariableDefinition::int().with_bounds(0, n - 1))?;

    model
        .add_constraint(constraints::all_different(&queens)?)
        .post()?;
    model
        .add_constraint(constraints::all_different(
            queens.entries().map(|(&column, queen)| queen + column),
        )?)
        .post()?;
    model
        .add_constraint(constraints::all_different(
            queens.entries().map(|(&column, queen)| queen - column),
        )?)
        .post()?;

    model.set_search(SearchAnnotation::int_search(
        &queens,
        VariableChoice::FirstFail,
        ValueChoice::IndomainMin,
    )?);
    model.satisfy();

    Ok(model)
}
