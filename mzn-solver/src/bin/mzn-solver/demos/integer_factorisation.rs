use mzn_solver::variables::VariableDefinition;
use mzn_solver::Model;
use mzn_solver::ModelError;

const FIRST_PRIME: i64 = 7829;
const SECOND_PRIME: i64 = 6907;
const UPPER_BOUND: i64 = 99_999_999;

pub(super) fn build() -> Result<Model, ModelError> {
    let mut model = Model::default();

    let product = model.add_constant("product", FIRST_PRIME * SECOND_PRIME)?;
    let x = model.add_variable("x", VariableDefinition::int().with_bounds(1, UPPER_BOUND))?;
    let y = model.add_variable("y", VariableDefinition::int().with_bounds(1, UPPER_BOUND))?;

    model
        .add_constraint((&x * &y).equals(product.expression()?))
        .post()?;
    model.add_constraint(y.greater_than(1)).post()?;
    model.add_constraint(x.greater_than(&y)).post()?;
    model.satisfy();

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_is_declared_as_a_constant() {
        let mut model = build().unwrap();

        assert_eq!(
            "int: product = 54074903;\n\
             var 1..99999999: x;\n\
             var 1..99999999: y;\n\
             constraint ((x * y) = product);\n\
             constraint (y > 1);\n\
             constraint (x > y);\n\
             solve satisfy;\n",
            model.generate().unwrap()
        );
    }
}
