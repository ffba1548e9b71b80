use itertools::iproduct;
use mzn_solver::constraints;
use mzn_solver::expressions;
use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

const WEIGHTS: [i64; 10] = [4, 8, 1, 4, 2, 1, 7, 3, 6, 5];
const CAPACITY: i64 = 10;

/// Packs `items` items, with weights taken cyclically from [`WEIGHTS`], into at most `items` bins.
pub(super) fn build(items: u32) -> Result<Model, ModelError> {
    let items = items as usize;
    let weights = WEIGHTS.iter().copied().cycle().take(items).collect::<Vec<_>>();
    let mut model = Model::default();

    let weight = model.add_constant("weight", weights.clone())?;
    let capacity = model.add_constant("capacity", CAPACITY)?;
    let bin_item = model.add_variables(
        "bin_item",
        iproduct!(0..items, 0..items),
        VariableDefinition::bool(),
    )?;
    let used = model.add_variables("used", 0..items, VariableDefinition::bool())?;

    for item in 0..items {
        let placements = expressions::sum((0..items).map(|bin| &bin_item[&(bin, item)]))?;
        model.add_constraint(placements.equals(1)).post()?;
    }

    for bin in 0..items {
        let load = (0..items)
            .map(|item| Ok(weight.at(&[item])? * &bin_item[&(bin, item)]))
            .collect::<Result<Vec<_>, ModelError>>()?;
        let limit = capacity.expression()? * &used[&bin];
        model
            .add_constraint(expressions::sum(load)?.less_than_or_equals(limit))
            .post()?;
    }

    model
        .add_constraint(constraints::decreasing(&used)?)
        .post()?;

    let number_of_bins = expressions::sum(&used)?;
    let lower_bound = (weights.iter().sum::<i64>() + CAPACITY - 1) / CAPACITY;
    model
        .add_constraint(number_of_bins.greater_than_or_equals(lower_bound))
        .post_redundant()?;

    model.minimize(number_of_bins)?;

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_placed_in_exactly_one_bin() {
        let mut model = build(3).unwrap();
        let text = model.generate().unwrap();

        assert!(text.starts_with("include \"decreasing.mzn\";\n"));
        assert!(text.contains("array[1..3] of int: weight = [4, 8, 1];"));
        assert!(text.contains("var bool: bin_item_1_2;"));
        assert!(text.contains("constraint (sum([bin_item_0_0, bin_item_1_0, bin_item_2_0]) = 1);"));
        assert!(text.contains(
            "constraint (sum([(weight[1] * bin_item_0_0), (weight[2] * bin_item_0_1), \
             (weight[3] * bin_item_0_2)]) <= (capacity * used_0));"
        ));
        assert!(text.contains("constraint redundant_constraint((sum([used_0, used_1, used_2]) >= 2));"));
        assert!(text.ends_with("solve minimize sum([used_0, used_1, used_2]);\n"));
    }
}
