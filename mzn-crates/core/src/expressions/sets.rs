use super::BoolExpression;
use super::Expression;
use super::Node;
use super::ValueType;
use crate::error::ModelError;

fn set(argument: &'static str, value: impl Into<Expression>) -> Result<Expression, ModelError> {
    let expression = value.into();
    if expression.value_type() != ValueType::IntSet {
        return Err(ModelError::InvalidOperandKind {
            argument,
            found: expression.value_type(),
        });
    }
    Ok(expression)
}

/// The number of elements in `set`, `card(set)`.
pub fn cardinality(set_value: impl Into<Expression>) -> Result<Expression, ModelError> {
    let set_value = set("set", set_value)?;
    Ok(Expression::call(ValueType::Int, "card", vec![set_value]))
}

/// The smallest element of `set`, `min(set)`.
pub fn set_minimum(set_value: impl Into<Expression>) -> Result<Expression, ModelError> {
    let set_value = set("set", set_value)?;
    Ok(Expression::call(ValueType::Int, "min", vec![set_value]))
}

/// The largest element of `set`, `max(set)`.
pub fn set_maximum(set_value: impl Into<Expression>) -> Result<Expression, ModelError> {
    let set_value = set("set", set_value)?;
    Ok(Expression::call(ValueType::Int, "max", vec![set_value]))
}

/// Membership of an integer in a set, `(element in set)`.
pub fn contains(
    set_value: impl Into<Expression>,
    element: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    let set_value = set("set", set_value)?;
    let element = element.into();
    if !matches!(element.value_type(), ValueType::Int | ValueType::Bool) {
        return Err(ModelError::InvalidOperandKind {
            argument: "element",
            found: element.value_type(),
        });
    }

    Ok(BoolExpression::new(Node::Membership {
        element,
        set: set_value,
    }))
}

/// The number of elements shared by two sets, `card((lhs intersect rhs))`.
pub fn intersection_cardinality(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let lhs = set("lhs", lhs)?;
    let rhs = set("rhs", rhs)?;

    let intersection = Expression::new(ValueType::IntSet, Node::Intersection { lhs, rhs });
    Ok(Expression::call(ValueType::Int, "card", vec![intersection]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s() -> Expression {
        Expression::identifier("s".into(), ValueType::IntSet)
    }

    fn t() -> Expression {
        Expression::identifier("t".into(), ValueType::IntSet)
    }

    #[test]
    fn set_operations_render_as_minizinc_functions() {
        assert_eq!("card(s)", cardinality(s()).unwrap().to_string());
        assert_eq!("min(s)", set_minimum(s()).unwrap().to_string());
        assert_eq!("max(s)", set_maximum(s()).unwrap().to_string());
        assert_eq!("(3 in s)", contains(s(), 3).unwrap().to_string());
        assert_eq!(
            "card((s intersect t))",
            intersection_cardinality(s(), t()).unwrap().to_string()
        );
    }

    #[test]
    fn set_operations_require_sets() {
        assert!(matches!(
            cardinality(Expression::int(3)),
            Err(ModelError::InvalidOperandKind {
                argument: "set",
                found: ValueType::Int
            })
        ));
        assert!(matches!(
            intersection_cardinality(s(), Expression::float(1.0)),
            Err(ModelError::InvalidOperandKind {
                argument: "rhs",
                found: ValueType::Float
            })
        ));
        assert!(matches!(
            contains(s(), t()),
            Err(ModelError::InvalidOperandKind {
                argument: "element",
                ..
            })
        ));
    }

    #[test]
    fn set_cardinality_can_be_compared() {
        let cardinality = cardinality(s()).unwrap();

        assert_eq!("(card(s) = 2)", cardinality.equals(2).to_string());
    }
}
