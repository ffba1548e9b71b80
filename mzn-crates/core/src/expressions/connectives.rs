use super::BoolExpression;
use super::Connective;
use super::IntoCondition;
use super::Node;
use crate::error::ModelError;

fn condition(
    argument: &'static str,
    value: impl IntoCondition,
) -> Result<BoolExpression, ModelError> {
    value
        .into_condition()
        .map_err(|found| ModelError::InvalidConditionKind { argument, found })
}

/// Joins already validated conditions; a single operand is returned as-is.
pub(crate) fn connect(connective: Connective, mut operands: Vec<BoolExpression>) -> BoolExpression {
    if operands.len() == 1 {
        return operands.remove(0);
    }

    BoolExpression::new(Node::Connective {
        connective,
        operands: operands.into_iter().map(BoolExpression::into_expression).collect(),
    })
}

fn binary(
    connective: Connective,
    lhs: impl IntoCondition,
    rhs: impl IntoCondition,
) -> Result<BoolExpression, ModelError> {
    let lhs = condition("lhs", lhs)?;
    let rhs = condition("rhs", rhs)?;
    Ok(connect(connective, vec![lhs, rhs]))
}

fn n_ary<Operand: IntoCondition>(
    connective: Connective,
    operands: impl IntoIterator<Item = Operand>,
) -> Result<Vec<BoolExpression>, ModelError> {
    let operands = operands
        .into_iter()
        .map(|operand| condition("operands", operand))
        .collect::<Result<Vec<_>, _>>()?;

    if operands.is_empty() {
        return Err(ModelError::EmptyOperandSequence {
            argument: "operands",
        });
    }

    log::trace!("joining {} operands with {connective:?}", operands.len());
    Ok(operands)
}

/// `lhs /\ rhs`
pub fn and(lhs: impl IntoCondition, rhs: impl IntoCondition) -> Result<BoolExpression, ModelError> {
    binary(Connective::And, lhs, rhs)
}

/// `lhs \/ rhs`
pub fn or(lhs: impl IntoCondition, rhs: impl IntoCondition) -> Result<BoolExpression, ModelError> {
    binary(Connective::Or, lhs, rhs)
}

/// `lhs xor rhs`
pub fn xor(lhs: impl IntoCondition, rhs: impl IntoCondition) -> Result<BoolExpression, ModelError> {
    binary(Connective::Xor, lhs, rhs)
}

/// `lhs -> rhs`
pub fn implies(
    lhs: impl IntoCondition,
    rhs: impl IntoCondition,
) -> Result<BoolExpression, ModelError> {
    binary(Connective::Implies, lhs, rhs)
}

/// `lhs <- rhs`
pub fn only_if(
    lhs: impl IntoCondition,
    rhs: impl IntoCondition,
) -> Result<BoolExpression, ModelError> {
    binary(Connective::OnlyIf, lhs, rhs)
}

/// `lhs <-> rhs`
pub fn iff(lhs: impl IntoCondition, rhs: impl IntoCondition) -> Result<BoolExpression, ModelError> {
    binary(Connective::Iff, lhs, rhs)
}

pub fn not(operand: impl IntoCondition) -> Result<BoolExpression, ModelError> {
    let operand = condition("operand", operand)?;
    Ok(BoolExpression::new(Node::Not(operand.into_expression())))
}

/// Creates the conjunction of all `operands`, which has to be non-empty.
pub fn conjunction<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    Ok(connect(Connective::And, n_ary(Connective::And, operands)?))
}

/// Creates the disjunction of all `operands`, which has to be non-empty.
pub fn disjunction<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    Ok(connect(Connective::Or, n_ary(Connective::Or, operands)?))
}

/// Creates the exclusive disjunction of all `operands`, which has to be non-empty.
pub fn exclusive_disjunction<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    Ok(connect(Connective::Xor, n_ary(Connective::Xor, operands)?))
}

fn chain<Operand: IntoCondition>(
    connective: Connective,
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    let mut operands = n_ary(connective, operands)?;
    let first = operands.remove(0);
    Ok(operands
        .into_iter()
        .fold(first, |lhs, rhs| connect(connective, vec![lhs, rhs])))
}

/// Chains `operands` with `->`, associating to the left: `[a, b, c]` becomes
/// `((a -> b) -> c)`.
pub fn implication<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    chain(Connective::Implies, operands)
}

/// Chains `operands` with `<-`, associating to the left: `[a, b, c]` becomes
/// `((a <- b) <- c)`.
pub fn reverse_implication<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    chain(Connective::OnlyIf, operands)
}

/// Chains `operands` with `<->`, associating to the left: `[a, b, c]` becomes
/// `((a <-> b) <-> c)`.
pub fn equivalence<Operand: IntoCondition>(
    operands: impl IntoIterator<Item = Operand>,
) -> Result<BoolExpression, ModelError> {
    chain(Connective::Iff, operands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::Expression;
    use crate::expressions::ValueType;

    fn condition_named(name: &str) -> BoolExpression {
        BoolExpression::raw(name)
    }

    #[test]
    fn binary_connectives_use_minizinc_tokens() {
        let a = condition_named("a");
        let b = condition_named("b");

        assert_eq!("(a /\\ b)", and(&a, &b).unwrap().to_string());
        assert_eq!("(a \\/ b)", or(&a, &b).unwrap().to_string());
        assert_eq!("(a xor b)", xor(&a, &b).unwrap().to_string());
        assert_eq!("(a -> b)", implies(&a, &b).unwrap().to_string());
        assert_eq!("(a <- b)", only_if(&a, &b).unwrap().to_string());
        assert_eq!("(a <-> b)", iff(&a, &b).unwrap().to_string());
        assert_eq!("not(a)", not(&a).unwrap().to_string());
    }

    #[test]
    fn host_booleans_are_accepted() {
        let a = condition_named("a");

        assert_eq!("(a /\\ true)", and(&a, true).unwrap().to_string());
    }

    #[test]
    fn non_boolean_operands_are_rejected() {
        let a = condition_named("a");

        let error = not(Expression::float(1.0)).unwrap_err();
        assert!(matches!(
            error,
            ModelError::InvalidConditionKind {
                argument: "operand",
                found: ValueType::Float
            }
        ));

        type Binary = fn(&BoolExpression, Expression) -> Result<BoolExpression, ModelError>;
        let binary_connectives: [(&str, Binary); 6] = [
            ("and", |a, b| and(a, b)),
            ("or", |a, b| or(a, b)),
            ("xor", |a, b| xor(a, b)),
            ("implies", |a, b| implies(a, b)),
            ("only_if", |a, b| only_if(a, b)),
            ("iff", |a, b| iff(a, b)),
        ];
        for (name, connective) in binary_connectives {
            let result = connective(&a, Expression::int(3));
            assert!(
                matches!(
                    result,
                    Err(ModelError::InvalidConditionKind {
                        argument: "rhs",
                        found: ValueType::Int
                    })
                ),
                "{name} accepted an integer operand"
            );
        }

        type NAry = fn(Vec<Expression>) -> Result<BoolExpression, ModelError>;
        let n_ary_connectives: [(&str, NAry); 6] = [
            ("conjunction", |operands| conjunction(operands)),
            ("disjunction", |operands| disjunction(operands)),
            ("exclusive_disjunction", |operands| exclusive_disjunction(operands)),
            ("implication", |operands| implication(operands)),
            ("reverse_implication", |operands| reverse_implication(operands)),
            ("equivalence", |operands| equivalence(operands)),
        ];
        for (name, connective) in n_ary_connectives {
            let result = connective(vec![Expression::bool(true), Expression::int_set([1])]);
            assert!(
                matches!(
                    result,
                    Err(ModelError::InvalidConditionKind {
                        argument: "operands",
                        found: ValueType::IntSet
                    })
                ),
                "{name} accepted a set operand"
            );
        }
    }

    #[test]
    fn n_ary_connectives_are_flat() {
        let operands = ["a", "b", "c"].map(condition_named);

        assert_eq!(
            "(a /\\ b /\\ c)",
            conjunction(operands.clone()).unwrap().to_string()
        );
        assert_eq!(
            "(a \\/ b \\/ c)",
            disjunction(operands.clone()).unwrap().to_string()
        );
        assert_eq!("(a xor b xor c)", exclusive_disjunction(operands).unwrap().to_string());
    }

    #[test]
    fn chains_associate_to_the_left() {
        let operands = ["a", "b", "c"].map(condition_named);

        assert_eq!(
            "((a -> b) -> c)",
            implication(operands.clone()).unwrap().to_string()
        );
        assert_eq!(
            "((a <- b) <- c)",
            reverse_implication(operands.clone()).unwrap().to_string()
        );
        assert_eq!("((a <-> b) <-> c)", equivalence(operands).unwrap().to_string());
    }

    #[test]
    fn single_operand_is_returned_unchanged() {
        assert_eq!("a", conjunction([condition_named("a")]).unwrap().to_string());
    }

    #[test]
    fn empty_operand_sequences_are_rejected() {
        let error = disjunction(Vec::<BoolExpression>::new()).unwrap_err();
        assert!(matches!(
            error,
            ModelError::EmptyOperandSequence {
                argument: "operands"
            }
        ));
    }
}
