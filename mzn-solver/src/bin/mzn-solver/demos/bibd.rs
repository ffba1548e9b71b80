use itertools::iproduct;
use itertools::Itertools;
use mzn_solver::expressions;
use mzn_solver::search::SearchAnnotation;
use mzn_solver::search::ValueChoice;
use mzn_solver::search::VariableChoice;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

/// Number of objects.
const V: usize = 7;
/// Number of blocks.
const B: usize = 7;
/// Number of blocks containing each object.
const R: i64 = 3;
/// Number of objects in each block.
const K: i64 = 3;
/// Number of blocks containing each pair of objects.
const LAMBDA: i64 = 1;

/// `incidence_i_j` holds when object `i` is in block `j`.
pub(super) fn build() -> Result<Model, ModelError> {
    let mut model = Model::default();

    let incidence = model.add_variables(
        "incidence",
        iproduct!(0..V, 0..B),
        VariableDefinition::bool(),
    )?;

    for object in 0..V {
        let blocks = expressions::sum((0..B).map(|block| &incidence[&(object, block)]))?;
        model.add_constraint(blocks.equals(R)).post()?;
    }

    for block in 0..B {
        let objects = expressions::sum((0..V).map(|object| &incidence[&(object, block)]))?;
        model.add_constraint(objects.equals(K)).post()?;
    }

    for (first, second) in (0..V).tuple_combinations() {
        let shared = (0..B)
            .map(|block| {
                expressions::and(&incidence[&(first, block)], &incidence[&(second, block)])
                    .map(|both| both.into_expression())
            })
            .collect::<Result<Vec<_>, _>>()?;
        model
            .add_constraint(expressions::sum(shared)?.equals(LAMBDA))
            .post()?;
    }

    model.set_search(SearchAnnotation::bool_search(
        &incidence,
        VariableChoice::InputOrder,
        ValueChoice::IndomainMax,
    )?);
    model.satisfy();

    Ok(model)
}
