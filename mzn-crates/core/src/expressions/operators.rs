//! Operator sugar for building expressions.
//!
//! The arithmetic operators and comparison methods delegate to the checked functions of the
//! parent module. Operator traits cannot return a [`Result`], so a kind mismatch (e.g. adding
//! a set variable to an integer) panics; use the checked functions when the kinds of the
//! operands are not known statically.
use std::ops::Add;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::BitXor;
use std::ops::Div;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Not;
use std::ops::Rem;
use std::ops::Sub;

use super::connectives::connect;
use super::BoolExpression;
use super::Connective;
use super::Expression;
use super::IntoCondition;
use super::Node;
use crate::error::ModelError;
use crate::variables::Variable;

fn expect_operands<T>(result: Result<T, ModelError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}

macro_rules! impl_arithmetic_operator {
    ($trait:ident, $method:ident, $function:path) => {
        impl<Rhs: Into<Expression>> $trait<Rhs> for Expression {
            type Output = Expression;

            fn $method(self, rhs: Rhs) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl<Rhs: Into<Expression>> $trait<Rhs> for &Expression {
            type Output = Expression;

            fn $method(self, rhs: Rhs) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl<Rhs: Into<Expression>> $trait<Rhs> for Variable {
            type Output = Expression;

            fn $method(self, rhs: Rhs) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl<Rhs: Into<Expression>> $trait<Rhs> for &Variable {
            type Output = Expression;

            fn $method(self, rhs: Rhs) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl_arithmetic_operator!(@number $trait, $method, $function, i64);
        impl_arithmetic_operator!(@number $trait, $method, $function, f64);
    };

    (@number $trait:ident, $method:ident, $function:path, $number:ty) => {
        impl $trait<Expression> for $number {
            type Output = Expression;

            fn $method(self, rhs: Expression) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl $trait<&Expression> for $number {
            type Output = Expression;

            fn $method(self, rhs: &Expression) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl $trait<Variable> for $number {
            type Output = Expression;

            fn $method(self, rhs: Variable) -> Expression {
                expect_operands($function(self, rhs))
            }
        }

        impl $trait<&Variable> for $number {
            type Output = Expression;

            fn $method(self, rhs: &Variable) -> Expression {
                expect_operands($function(self, rhs))
            }
        }
    };
}

impl_arithmetic_operator!(Add, add, super::add);
impl_arithmetic_operator!(Sub, sub, super::sub);
impl_arithmetic_operator!(Mul, mul, super::mul);
impl_arithmetic_operator!(Div, div, super::div);
impl_arithmetic_operator!(Rem, rem, super::modulo);

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        expect_operands(super::negate(self))
    }
}

impl Neg for &Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        expect_operands(super::negate(self))
    }
}

impl Neg for &Variable {
    type Output = Expression;

    fn neg(self) -> Expression {
        expect_operands(super::negate(self))
    }
}

macro_rules! impl_comparison_methods {
    ($type:ty) => {
        impl $type {
            /// `(self = rhs)`
            ///
            /// # Panics
            /// If exactly one of the operands is a set.
            pub fn equals(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::equals(self, rhs))
            }

            /// `(self != rhs)`
            ///
            /// # Panics
            /// If exactly one of the operands is a set.
            pub fn not_equals(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::not_equals(self, rhs))
            }

            /// `(self < rhs)`
            ///
            /// # Panics
            /// If one of the operands is a set.
            pub fn less_than(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::less_than(self, rhs))
            }

            /// `(self <= rhs)`
            ///
            /// # Panics
            /// If one of the operands is a set.
            pub fn less_than_or_equals(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::less_than_or_equals(self, rhs))
            }

            /// `(self > rhs)`
            ///
            /// # Panics
            /// If one of the operands is a set.
            pub fn greater_than(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::greater_than(self, rhs))
            }

            /// `(self >= rhs)`
            ///
            /// # Panics
            /// If one of the operands is a set.
            pub fn greater_than_or_equals(&self, rhs: impl Into<Expression>) -> BoolExpression {
                expect_operands(super::greater_than_or_equals(self, rhs))
            }
        }
    };
}

impl_comparison_methods!(Expression);
impl_comparison_methods!(Variable);

fn expect_condition(operand: impl IntoCondition) -> BoolExpression {
    match operand.into_condition() {
        Ok(condition) => condition,
        Err(found) => panic!(
            "{}",
            ModelError::InvalidConditionKind {
                argument: "operand",
                found
            }
        ),
    }
}

macro_rules! impl_connective_operator {
    ($type:ty, $trait:ident, $method:ident, $connective:expr) => {
        /// # Panics
        /// If one of the operands is not boolean-valued.
        impl<Rhs: IntoCondition> $trait<Rhs> for $type {
            type Output = BoolExpression;

            fn $method(self, rhs: Rhs) -> BoolExpression {
                connect(
                    $connective,
                    vec![expect_condition(self), expect_condition(rhs)],
                )
            }
        }
    };
}

macro_rules! impl_boolean_operators {
    ($($type:ty),+) => {
        $(
            impl_connective_operator!($type, BitAnd, bitand, Connective::And);
            impl_connective_operator!($type, BitOr, bitor, Connective::Or);
            impl_connective_operator!($type, BitXor, bitxor, Connective::Xor);

            /// # Panics
            /// If the operand is not boolean-valued.
            impl Not for $type {
                type Output = BoolExpression;

                fn not(self) -> BoolExpression {
                    BoolExpression::new(Node::Not(expect_condition(self).into_expression()))
                }
            }
        )+
    };
}

impl_boolean_operators!(BoolExpression, &BoolExpression, Variable, &Variable);

impl From<&BoolExpression> for BoolExpression {
    fn from(value: &BoolExpression) -> Self {
        value.clone()
    }
}
