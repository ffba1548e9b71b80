use super::ArithmeticOperator;
use super::BoolExpression;
use super::ComparisonOperator;
use super::Expression;
use super::IntoCondition;
use super::Node;
use super::ValueType;
use crate::error::ModelError;

/// Accepts any scalar except non-finite float literals; booleans are coerced to integers by
/// MiniZinc.
pub(crate) fn scalar(
    argument: &'static str,
    value: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let expression = value.into();
    if !expression.value_type().is_scalar() || !expression.is_finite() {
        return Err(ModelError::InvalidOperandKind {
            argument,
            found: expression.value_type(),
        });
    }
    Ok(expression)
}

fn integral(
    argument: &'static str,
    value: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let expression = scalar(argument, value)?;
    if expression.value_type() == ValueType::Float {
        return Err(ModelError::InvalidOperandKind {
            argument,
            found: ValueType::Float,
        });
    }
    Ok(expression)
}

fn arithmetic(
    operator: ArithmeticOperator,
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let (lhs, rhs) = match operator {
        ArithmeticOperator::IntegerDivide | ArithmeticOperator::Modulo => {
            (integral("lhs", lhs)?, integral("rhs", rhs)?)
        }
        _ => (scalar("lhs", lhs)?, scalar("rhs", rhs)?),
    };

    let value_type = if operator == ArithmeticOperator::Divide {
        ValueType::Float
    } else {
        ValueType::arithmetic(lhs.value_type(), rhs.value_type())
    };

    Ok(Expression::new(
        value_type,
        Node::Arithmetic { operator, lhs, rhs },
    ))
}

/// `(lhs + rhs)`
pub fn add(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::Add, lhs, rhs)
}

/// `(lhs - rhs)`
pub fn sub(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::Subtract, lhs, rhs)
}

/// `(lhs * rhs)`
pub fn mul(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::Multiply, lhs, rhs)
}

/// Floating point division `(lhs / rhs)`; integer operands are coerced to floats.
pub fn div(lhs: impl Into<Expression>, rhs: impl Into<Expression>) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::Divide, lhs, rhs)
}

/// Integer division rounding towards zero, `(lhs div rhs)`.
pub fn int_div(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::IntegerDivide, lhs, rhs)
}

/// `(lhs mod rhs)`
pub fn modulo(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    arithmetic(ArithmeticOperator::Modulo, lhs, rhs)
}

/// Negation, expressed as `(0 - operand)`.
pub fn negate(operand: impl Into<Expression>) -> Result<Expression, ModelError> {
    let operand = scalar("operand", operand)?;
    arithmetic(ArithmeticOperator::Subtract, Expression::int(0), operand)
}

/// `pow(base, exponent)`
pub fn pow(
    base: impl Into<Expression>,
    exponent: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let base = scalar("base", base)?;
    let exponent = scalar("exponent", exponent)?;
    let value_type = ValueType::arithmetic(base.value_type(), exponent.value_type());
    Ok(Expression::call(value_type, "pow", vec![base, exponent]))
}

/// `abs(operand)`
pub fn abs(operand: impl Into<Expression>) -> Result<Expression, ModelError> {
    let operand = scalar("operand", operand)?;
    let value_type = ValueType::arithmetic(operand.value_type(), ValueType::Int);
    Ok(Expression::call(value_type, "abs", vec![operand]))
}

fn comparison(
    operator: ComparisonOperator,
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    let lhs = lhs.into();
    let rhs = rhs.into();

    let sets_allowed = matches!(
        operator,
        ComparisonOperator::Equal | ComparisonOperator::NotEqual
    );
    let (lhs, rhs) = if sets_allowed && lhs.value_type() == ValueType::IntSet {
        if rhs.value_type() != ValueType::IntSet {
            return Err(ModelError::InvalidOperandKind {
                argument: "rhs",
                found: rhs.value_type(),
            });
        }
        (lhs, rhs)
    } else {
        (scalar("lhs", lhs)?, scalar("rhs", rhs)?)
    };

    Ok(BoolExpression::new(Node::Comparison { operator, lhs, rhs }))
}

/// `(lhs = rhs)`; two sets may also be compared for equality.
pub fn equals(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::Equal, lhs, rhs)
}

/// `(lhs != rhs)`; two sets may also be compared.
pub fn not_equals(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::NotEqual, lhs, rhs)
}

/// `(lhs < rhs)`
pub fn less_than(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::LessThan, lhs, rhs)
}

/// `(lhs <= rhs)`
pub fn less_than_or_equals(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::LessThanOrEqual, lhs, rhs)
}

/// `(lhs > rhs)`
pub fn greater_than(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::GreaterThan, lhs, rhs)
}

/// `(lhs >= rhs)`
pub fn greater_than_or_equals(
    lhs: impl Into<Expression>,
    rhs: impl Into<Expression>,
) -> Result<BoolExpression, ModelError> {
    comparison(ComparisonOperator::GreaterThanOrEqual, lhs, rhs)
}

fn collect_scalars<Operand: Into<Expression>>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<(Vec<Expression>, ValueType), ModelError> {
    let operands = operands
        .into_iter()
        .map(|operand| scalar("operands", operand))
        .collect::<Result<Vec<_>, _>>()?;
    let value_type = operands
        .iter()
        .fold(ValueType::Int, |value_type, operand| {
            ValueType::arithmetic(value_type, operand.value_type())
        });
    Ok((operands, value_type))
}

fn reduction<Operand: Into<Expression>>(
    function: &'static str,
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Expression, ModelError> {
    let (operands, value_type) = collect_scalars(operands)?;
    if operands.is_empty() {
        return Err(ModelError::EmptyOperandSequence {
            argument: "operands",
        });
    }

    Ok(Expression::call(
        value_type,
        function,
        vec![Expression::array(operands)],
    ))
}

/// `sum([e1, e2, ...])`. The sum of no operands is the literal `0`.
pub fn sum<Operand: Into<Expression>>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Expression, ModelError> {
    let (operands, value_type) = collect_scalars(operands)?;
    if operands.is_empty() {
        return Ok(Expression::int(0));
    }

    Ok(Expression::call(
        value_type,
        "sum",
        vec![Expression::array(operands)],
    ))
}

/// `product([e1, e2, ...])`, which requires at least one operand.
pub fn product<Operand: Into<Expression>>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Expression, ModelError> {
    reduction("product", operands)
}

/// `min([e1, e2, ...])`, which requires at least one operand.
pub fn minimum<Operand: Into<Expression>>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Expression, ModelError> {
    reduction("min", operands)
}

/// `max([e1, e2, ...])`, which requires at least one operand.
pub fn maximum<Operand: Into<Expression>>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Expression, ModelError> {
    reduction("max", operands)
}

/// `(if condition then then_value else else_value endif)`.
///
/// Both branches have to be scalars, or both have to be sets.
pub fn if_then_else(
    condition: impl IntoCondition,
    then_value: impl Into<Expression>,
    else_value: impl Into<Expression>,
) -> Result<Expression, ModelError> {
    let condition = condition
        .into_condition()
        .map_err(|found| ModelError::InvalidConditionKind {
            argument: "condition",
            found,
        })?;
    let then = then_value.into();
    let otherwise = else_value.into();

    let value_type = match (then.value_type(), otherwise.value_type()) {
        (ValueType::IntSet, ValueType::IntSet) => ValueType::IntSet,
        (ValueType::Bool, ValueType::Bool) => ValueType::Bool,
        (ValueType::IntSet, found) => {
            return Err(ModelError::InvalidOperandKind {
                argument: "else_value",
                found,
            })
        }
        (found, ValueType::IntSet) => {
            return Err(ModelError::InvalidOperandKind {
                argument: "then_value",
                found,
            })
        }
        (lhs, rhs) => ValueType::arithmetic(lhs, rhs),
    };

    Ok(Expression::new(
        value_type,
        Node::IfThenElse {
            condition: condition.into_expression(),
            then,
            otherwise,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::identifier("x".into(), ValueType::Int)
    }

    fn f() -> Expression {
        Expression::identifier("f".into(), ValueType::Float)
    }

    fn s() -> Expression {
        Expression::identifier("s".into(), ValueType::IntSet)
    }

    #[test]
    fn arithmetic_operators_render_bracketed() {
        assert_eq!("(x + 1)", add(x(), 1).unwrap().to_string());
        assert_eq!("(1 - x)", sub(1, x()).unwrap().to_string());
        assert_eq!("(x * x)", mul(x(), x()).unwrap().to_string());
        assert_eq!("(x / 2)", div(x(), 2).unwrap().to_string());
        assert_eq!("(x div 2)", int_div(x(), 2).unwrap().to_string());
        assert_eq!("(x mod 2)", modulo(x(), 2).unwrap().to_string());
        assert_eq!("(0 - x)", negate(x()).unwrap().to_string());
        assert_eq!("pow(x, 2)", pow(x(), 2).unwrap().to_string());
        assert_eq!("abs(x)", abs(x()).unwrap().to_string());
    }

    #[test]
    fn result_kinds_follow_operands() {
        assert_eq!(ValueType::Int, add(x(), 1).unwrap().value_type());
        assert_eq!(ValueType::Float, add(x(), 1.5).unwrap().value_type());
        assert_eq!(ValueType::Float, div(x(), 2).unwrap().value_type());
        assert_eq!(ValueType::Float, negate(f()).unwrap().value_type());
    }

    #[test]
    fn set_operands_are_rejected_by_every_arithmetic_operator() {
        type Operator = fn(Expression, Expression) -> Result<Expression, ModelError>;
        let operators: [Operator; 7] = [
            |l, r| add(l, r),
            |l, r| sub(l, r),
            |l, r| mul(l, r),
            |l, r| div(l, r),
            |l, r| int_div(l, r),
            |l, r| modulo(l, r),
            |l, r| pow(l, r),
        ];

        for operator in operators {
            assert!(matches!(
                operator(x(), s()),
                Err(ModelError::InvalidOperandKind {
                    found: ValueType::IntSet,
                    ..
                })
            ));
            assert!(matches!(
                operator(s(), x()),
                Err(ModelError::InvalidOperandKind {
                    found: ValueType::IntSet,
                    ..
                })
            ));
        }
    }

    #[test]
    fn offending_argument_is_named() {
        let error = add(x(), s()).unwrap_err();
        assert!(matches!(
            error,
            ModelError::InvalidOperandKind {
                argument: "rhs",
                found: ValueType::IntSet
            }
        ));

        let error = abs(s()).unwrap_err();
        assert!(matches!(
            error,
            ModelError::InvalidOperandKind {
                argument: "operand",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_literals_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                add(x(), value),
                Err(ModelError::InvalidOperandKind {
                    argument: "rhs",
                    found: ValueType::Float
                })
            ));
            assert!(less_than(Expression::float(value), f()).is_err());
        }
        assert_eq!("(f * 0.5)", mul(f(), 0.5).unwrap().to_string());
    }

    #[test]
    fn integer_division_rejects_floats() {
        let error = int_div(f(), 2).unwrap_err();
        assert!(matches!(
            error,
            ModelError::InvalidOperandKind {
                argument: "lhs",
                found: ValueType::Float
            }
        ));
        assert!(modulo(x(), 2.0).is_err());
    }

    #[test]
    fn comparisons_produce_conditions() {
        assert_eq!("(x = 3)", equals(x(), 3).unwrap().to_string());
        assert_eq!("(x != 3)", not_equals(x(), 3).unwrap().to_string());
        assert_eq!("(x < 3)", less_than(x(), 3).unwrap().to_string());
        assert_eq!("(x <= 3)", less_than_or_equals(x(), 3).unwrap().to_string());
        assert_eq!("(x > 3)", greater_than(x(), 3).unwrap().to_string());
        assert_eq!(
            "(x >= (-3))",
            greater_than_or_equals(x(), -3).unwrap().to_string()
        );
    }

    #[test]
    fn sets_can_only_be_compared_for_equality_with_sets() {
        assert_eq!(
            "(s = {1, 2})",
            equals(s(), Expression::int_set([2, 1])).unwrap().to_string()
        );
        assert!(matches!(
            equals(s(), x()),
            Err(ModelError::InvalidOperandKind { argument: "rhs", .. })
        ));
        assert!(matches!(
            less_than(s(), s()),
            Err(ModelError::InvalidOperandKind { argument: "lhs", .. })
        ));
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!("0", sum(Vec::<Expression>::new()).unwrap().to_string());
    }

    #[test]
    fn other_reductions_require_operands() {
        for result in [
            product(Vec::<Expression>::new()),
            minimum(Vec::<Expression>::new()),
            maximum(Vec::<Expression>::new()),
        ] {
            assert!(matches!(
                result,
                Err(ModelError::EmptyOperandSequence {
                    argument: "operands"
                })
            ));
        }
    }

    #[test]
    fn reductions_render_as_calls_on_arrays() {
        assert_eq!("sum([x, 1, 2])", sum([x(), 1.into(), 2.into()]).unwrap().to_string());
        assert_eq!("product([x, x])", product([x(), x()]).unwrap().to_string());
        assert_eq!("min([x, f])", minimum([x(), f()]).unwrap().to_string());
        assert_eq!("max([x])", maximum([x()]).unwrap().to_string());
        assert_eq!(ValueType::Float, minimum([x(), f()]).unwrap().value_type());
    }

    #[test]
    fn reductions_reject_set_operands() {
        assert!(matches!(
            sum([x(), s()]),
            Err(ModelError::InvalidOperandKind {
                argument: "operands",
                found: ValueType::IntSet
            })
        ));
    }

    #[test]
    fn conditional_requires_boolean_condition() {
        let condition = less_than(x(), 3).unwrap();
        assert_eq!(
            "(if (x < 3) then x else 3 endif)",
            if_then_else(&condition, x(), 3).unwrap().to_string()
        );

        assert!(matches!(
            if_then_else(x(), 1, 2),
            Err(ModelError::InvalidConditionKind {
                argument: "condition",
                found: ValueType::Int
            })
        ));
    }

    #[test]
    fn conditional_branches_must_have_matching_kinds() {
        assert!(matches!(
            if_then_else(true, x(), s()),
            Err(ModelError::InvalidOperandKind {
                argument: "then_value",
                found: ValueType::Int
            })
        ));
        assert_eq!(
            ValueType::IntSet,
            if_then_else(true, s(), s()).unwrap().value_type()
        );
    }
}
