//! Symbolic expressions over variables, constants and host values.
//!
//! An [`Expression`] is an immutable tree; every operation builds a new node which shares its
//! operands. Expressions are rendered to MiniZinc text through their [`Display`]
//! implementation, in which every composite term is bracketed so that the text never depends
//! on the precedence of the surrounding context.
//!
//! There are two ways of building expressions:
//! - the checked functions in this module (e.g. [`add`], [`less_than`], [`conjunction`]),
//!   which validate the kinds of their operands and return a [`ModelError`] on a mismatch;
//! - the operators of [`std::ops`] together with the comparison methods on [`Expression`] and
//!   [`Variable`](crate::variables::Variable), which call the checked functions and panic on a
//!   mismatch.
//!
//! ```rust
//! # use mzn_core::expressions::Expression;
//! # use mzn_core::expressions::BoolExpression;
//! let a = Expression::int(2);
//! let b = Expression::int(3);
//! let c = Expression::int(4);
//!
//! assert_eq!("((2 + 3) * 4)", ((&a + &b) * &c).to_string());
//! assert_eq!("(2 * (3 + 4))", (&a * (&b + &c)).to_string());
//!
//! let condition: BoolExpression = a.less_than(&b) & b.not_equals(&c);
//! assert_eq!("((2 < 3) /\\ (3 != 4))", condition.to_string());
//! ```
mod connectives;
mod functions;
mod operators;
mod render;
mod sets;

use std::fmt::Display;
use std::fmt::Formatter;
use std::rc::Rc;

pub use connectives::*;
pub use functions::*;
pub(crate) use functions::scalar;
pub use sets::*;

use crate::basic_types::Number;
use crate::error::ModelError;

/// The kind of value an [`Expression`] evaluates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    IntSet,
}

impl ValueType {
    /// Scalars are valid arithmetic operands; booleans are coerced to integers.
    pub fn is_scalar(self) -> bool {
        !matches!(self, ValueType::IntSet)
    }

    /// The kind of the result of an arithmetic operation on operands of these kinds.
    pub(crate) fn arithmetic(lhs: ValueType, rhs: ValueType) -> ValueType {
        if lhs == ValueType::Float || rhs == ValueType::Float {
            ValueType::Float
        } else {
            ValueType::Int
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Float => write!(f, "float"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::IntSet => write!(f, "set of int"),
        }
    }
}

/// A symbolic value in a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    value_type: ValueType,
    node: Rc<Node>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Node {
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Sorted and without duplicates.
    IntSet(Vec<i64>),
    Identifier(Rc<str>),
    /// Text which is emitted as-is.
    Raw(String),
    Arithmetic {
        operator: ArithmeticOperator,
        lhs: Expression,
        rhs: Expression,
    },
    Comparison {
        operator: ComparisonOperator,
        lhs: Expression,
        rhs: Expression,
    },
    Connective {
        connective: Connective,
        operands: Vec<Expression>,
    },
    Not(Expression),
    Call {
        function: String,
        arguments: Vec<Expression>,
    },
    Array(Vec<Expression>),
    IfThenElse {
        condition: Expression,
        then: Expression,
        otherwise: Expression,
    },
    Access {
        array: Rc<str>,
        indices: Vec<Expression>,
    },
    Membership {
        element: Expression,
        set: Expression,
    },
    Intersection {
        lhs: Expression,
        rhs: Expression,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ArithmeticOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Connective {
    And,
    Or,
    Xor,
    Implies,
    OnlyIf,
    Iff,
}

impl Expression {
    pub(crate) fn new(value_type: ValueType, node: Node) -> Expression {
        Expression {
            value_type,
            node: Rc::new(node),
        }
    }

    pub fn int(value: i64) -> Expression {
        Expression::new(ValueType::Int, Node::Int(value))
    }

    pub fn float(value: f64) -> Expression {
        Expression::new(ValueType::Float, Node::Float(value))
    }

    pub fn bool(value: bool) -> Expression {
        Expression::new(ValueType::Bool, Node::Bool(value))
    }

    /// A literal set of integers, e.g. `{1, 3, 5}`.
    pub fn int_set(values: impl IntoIterator<Item = i64>) -> Expression {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        values.dedup();
        Expression::new(ValueType::IntSet, Node::IntSet(values))
    }

    /// An array literal, used as the argument of functions and global constraints.
    pub(crate) fn array(elements: Vec<Expression>) -> Expression {
        let value_type = elements
            .iter()
            .map(Expression::value_type)
            .reduce(|lhs, rhs| if lhs == rhs { lhs } else { ValueType::arithmetic(lhs, rhs) })
            .unwrap_or(ValueType::Int);
        Expression::new(value_type, Node::Array(elements))
    }

    pub(crate) fn identifier(name: Rc<str>, value_type: ValueType) -> Expression {
        Expression::new(value_type, Node::Identifier(name))
    }

    pub(crate) fn call(
        value_type: ValueType,
        function: impl Into<String>,
        arguments: Vec<Expression>,
    ) -> Expression {
        Expression::new(
            value_type,
            Node::Call {
                function: function.into(),
                arguments,
            },
        )
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// False for `inf` and `NaN` literals, which have no MiniZinc spelling.
    pub(crate) fn is_finite(&self) -> bool {
        !matches!(self.node(), Node::Float(value) if !value.is_finite())
    }

    /// Interprets this expression as a condition if it is boolean-valued.
    pub fn as_condition(&self) -> Option<BoolExpression> {
        (self.value_type == ValueType::Bool).then(|| BoolExpression(self.clone()))
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::int(value)
    }
}

impl From<i32> for Expression {
    fn from(value: i32) -> Self {
        Expression::int(value.into())
    }
}

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        Expression::float(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::bool(value)
    }
}

impl From<Number> for Expression {
    fn from(value: Number) -> Self {
        match value {
            Number::Int(value) => Expression::int(value),
            Number::Float(value) => Expression::float(value),
        }
    }
}

impl From<&Expression> for Expression {
    fn from(value: &Expression) -> Self {
        value.clone()
    }
}

/// An [`Expression`] which is guaranteed to be boolean-valued.
///
/// Only boolean expressions are accepted as constraint bodies and as operands of the boolean
/// connectives.
#[derive(Clone, Debug, PartialEq)]
pub struct BoolExpression(Expression);

impl BoolExpression {
    pub(crate) fn new(node: Node) -> BoolExpression {
        BoolExpression(Expression::new(ValueType::Bool, node))
    }

    pub(crate) fn call(function: impl Into<String>, arguments: Vec<Expression>) -> BoolExpression {
        BoolExpression(Expression::call(ValueType::Bool, function, arguments))
    }

    /// A condition given as MiniZinc text, which is emitted without any validation.
    pub fn raw(text: impl Into<String>) -> BoolExpression {
        BoolExpression::new(Node::Raw(text.into()))
    }

    pub fn expression(&self) -> &Expression {
        &self.0
    }

    pub fn into_expression(self) -> Expression {
        self.0
    }
}

impl From<bool> for BoolExpression {
    fn from(value: bool) -> Self {
        BoolExpression::new(Node::Bool(value))
    }
}

impl From<BoolExpression> for Expression {
    fn from(value: BoolExpression) -> Self {
        value.0
    }
}

impl From<&BoolExpression> for Expression {
    fn from(value: &BoolExpression) -> Self {
        value.0.clone()
    }
}

impl TryFrom<Expression> for BoolExpression {
    type Error = ModelError;

    fn try_from(value: Expression) -> Result<Self, Self::Error> {
        value.into_condition().map_err(|found| ModelError::InvalidConditionKind {
            argument: "condition",
            found,
        })
    }
}

impl Display for BoolExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Values which can be used where a boolean condition is required.
///
/// This is implemented by [`BoolExpression`] and host booleans, which always succeed, and by
/// [`Expression`] and [`Variable`](crate::variables::Variable), which succeed only when they are
/// boolean-valued.
pub trait IntoCondition {
    /// Converts into a [`BoolExpression`], or returns the actual kind of the value.
    fn into_condition(self) -> Result<BoolExpression, ValueType>;
}

impl IntoCondition for BoolExpression {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        Ok(self)
    }
}

impl IntoCondition for &BoolExpression {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        Ok(self.clone())
    }
}

impl IntoCondition for bool {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        Ok(BoolExpression::from(self))
    }
}

impl IntoCondition for Expression {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        if self.value_type == ValueType::Bool {
            Ok(BoolExpression(self))
        } else {
            Err(self.value_type)
        }
    }
}

impl IntoCondition for &Expression {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        self.clone().into_condition()
    }
}
