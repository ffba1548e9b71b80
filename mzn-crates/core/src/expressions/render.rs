use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;

use super::ArithmeticOperator;
use super::ComparisonOperator;
use super::Connective;
use super::Expression;
use super::Node;
use crate::basic_types::write_float;
use crate::basic_types::write_int;

impl ArithmeticOperator {
    fn token(self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Subtract => "-",
            ArithmeticOperator::Multiply => "*",
            ArithmeticOperator::Divide => "/",
            ArithmeticOperator::IntegerDivide => "div",
            ArithmeticOperator::Modulo => "mod",
        }
    }
}

impl ComparisonOperator {
    fn token(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
        }
    }
}

impl Connective {
    fn token(self) -> &'static str {
        match self {
            Connective::And => "/\\",
            Connective::Or => "\\/",
            Connective::Xor => "xor",
            Connective::Implies => "->",
            Connective::OnlyIf => "<-",
            Connective::Iff => "<->",
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.node() {
            Node::Int(value) => write_int(f, *value),
            Node::Float(value) => write_float(f, *value),
            Node::Bool(value) => write!(f, "{value}"),
            Node::IntSet(values) => write!(f, "{{{}}}", values.iter().join(", ")),
            Node::Identifier(name) => write!(f, "{name}"),
            Node::Raw(text) => write!(f, "{text}"),
            Node::Arithmetic { operator, lhs, rhs } => {
                write!(f, "({lhs} {} {rhs})", operator.token())
            }
            Node::Comparison { operator, lhs, rhs } => {
                write!(f, "({lhs} {} {rhs})", operator.token())
            }
            Node::Connective {
                connective,
                operands,
            } => {
                let separator = format!(" {} ", connective.token());
                write!(f, "({})", operands.iter().join(&separator))
            }
            Node::Not(operand) => write!(f, "not({operand})"),
            Node::Call {
                function,
                arguments,
            } => write!(f, "{function}({})", arguments.iter().join(", ")),
            Node::Array(elements) => write!(f, "[{}]", elements.iter().join(", ")),
            Node::IfThenElse {
                condition,
                then,
                otherwise,
            } => write!(f, "(if {condition} then {then} else {otherwise} endif)"),
            Node::Access { array, indices } => {
                write!(f, "{array}[{}]", indices.iter().join(", "))
            }
            Node::Membership { element, set } => write!(f, "({element} in {set})"),
            Node::Intersection { lhs, rhs } => write!(f, "({lhs} intersect {rhs})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::ValueType;

    fn variable(name: &str) -> Expression {
        Expression::identifier(name.into(), ValueType::Int)
    }

    #[test]
    fn nesting_is_unambiguous() {
        let a = variable("a");
        let b = variable("b");
        let c = variable("c");

        let left = (&a + &b) * &c;
        let right = &a * (&b + &c);

        assert_eq!("((a + b) * c)", left.to_string());
        assert_eq!("(a * (b + c))", right.to_string());
        assert_ne!(left.to_string(), right.to_string());
    }

    #[test]
    fn deep_nesting_stays_balanced() {
        let a = variable("a");
        let b = variable("b");
        let c = variable("c");
        let d = variable("d");

        let expression = ((&a - &b) * (&c + &d)) % (&a - 3);
        let text = expression.to_string();

        assert_eq!("(((a - b) * (c + d)) mod (a - 3))", text);

        let mut depth = 0_i32;
        for c in text.chars() {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0);
        }
        assert_eq!(0, depth);
    }

    #[test]
    fn negative_literals_are_bracketed() {
        let a = variable("a");

        assert_eq!("(a - (-2))", (&a - -2).to_string());
        assert_eq!("(a * (-0.5))", (&a * -0.5).to_string());
    }

    #[test]
    fn empty_set_literal() {
        assert_eq!("{}", Expression::int_set([]).to_string());
    }
}
