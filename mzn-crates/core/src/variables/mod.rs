//! Decision variables, constants and indexed collections of variables.
//!
//! Variables are declared through a [`Model`](crate::Model), which validates their names and
//! domains. A [`Variable`] is a cheap handle to its declaration and can be used wherever an
//! [`Expression`] is expected; boolean variables can also be used as conditions.
mod constant;
mod domain;
mod indexed;

use std::fmt::Display;
use std::fmt::Formatter;
use std::rc::Rc;

pub use constant::Constant;
pub use constant::ConstantValue;
pub use constant::Scalar;
pub use domain::IntDomain;
pub use domain::VariableDefinition;
pub use domain::VariableKind;
pub(crate) use indexed::indexed_name;
pub use indexed::IndexKey;
pub use indexed::IndexedVariables;

use crate::expressions::BoolExpression;
use crate::expressions::Expression;
use crate::expressions::IntoCondition;
use crate::expressions::ValueType;

/// A declared decision variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    declaration: Rc<VariableDeclaration>,
}

#[derive(Debug, PartialEq)]
struct VariableDeclaration {
    name: Rc<str>,
    kind: VariableKind,
}

impl Variable {
    pub(crate) fn new(name: Rc<str>, kind: VariableKind) -> Variable {
        Variable {
            declaration: Rc::new(VariableDeclaration { name, kind }),
        }
    }

    /// The name under which the variable is declared, and under which its value is reported
    /// by a solver.
    pub fn name(&self) -> &str {
        &self.declaration.name
    }

    pub fn kind(&self) -> &VariableKind {
        &self.declaration.kind
    }

    pub fn value_type(&self) -> ValueType {
        self.declaration.kind.value_type()
    }

    /// A reference to this variable.
    pub fn expression(&self) -> Expression {
        Expression::identifier(Rc::clone(&self.declaration.name), self.value_type())
    }

    /// Returns the variable as a condition if it is boolean.
    pub fn as_condition(&self) -> Option<BoolExpression> {
        self.expression().as_condition()
    }

    /// The declaration item of this variable, e.g. `var 0..7: q_0;`.
    pub(crate) fn declaration(&self) -> String {
        let VariableDeclaration { name, kind } = self.declaration.as_ref();
        format!("var {kind}: {name};")
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.declaration.name)
    }
}

impl From<&Variable> for Expression {
    fn from(value: &Variable) -> Self {
        value.expression()
    }
}

impl From<Variable> for Expression {
    fn from(value: Variable) -> Self {
        value.expression()
    }
}

impl IntoCondition for &Variable {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        self.expression().into_condition()
    }
}

impl IntoCondition for Variable {
    fn into_condition(self) -> Result<BoolExpression, ValueType> {
        self.expression().into_condition()
    }
}
