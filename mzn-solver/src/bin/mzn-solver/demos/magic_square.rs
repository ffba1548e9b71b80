use itertools::iproduct;
use mzn_solver::constraints;
use mzn_solver::expressions;
use mzn_solver::search::RestartStrategy;
use mzn_solver::search::SearchAnnotation;
use mzn_solver::search::ValueChoice;
use mzn_solver::search::VariableChoice;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

pub(super) fn build(size: u32) -> Result<Model, ModelError> {
    let size = size as usize;
    let n = size as i64;
    let mut model = Model::default();

    let magic_sum = model.add_constant("magic_sum", magic_sum_value(n))?;
    let magic_sum = magic_sum.expression()?;
    let square = model.add_variables(
        "square",
        iproduct!(0..size, 0..size),
        VariableDefinition::int().with_bounds(1, n * n),
    )?;

    model
        .add_constraint(constraints::all_different(&square)?)
        .post()?;

    let mut lines = vec![];
    for line in 0..size {
        lines.push((0..size).map(|column| (line, column)).collect::<Vec<_>>());
        lines.push((0..size).map(|row| (row, line)).collect::<Vec<_>>());
    }
    lines.push((0..size).map(|i| (i, i)).collect());
    lines.push((0..size).map(|i| (i, size - 1 - i)).collect());

    for line in lines {
        let total = expressions::sum(line.iter().map(|index| &square[index]))?;
        model.add_constraint(total.equals(&magic_sum)).post()?;
    }

    // The total of all cells follows from the row sums.
    let total = expressions::sum(&square)?;
    model
        .add_constraint(total.equals(n * magic_sum_value(n)))
        .post_redundant()?;

    model.set_search(SearchAnnotation::int_search(
        &square,
        VariableChoice::FirstFail,
        ValueChoice::IndomainSplit,
    )?);
    model.set_restart_strategy(RestartStrategy::Luby { scale: 250 })?;
    model.satisfy();

    Ok(model)
}

fn magic_sum_value(n: i64) -> i64 {
    n * (n * n + 1) / 2
}
