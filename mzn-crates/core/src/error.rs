use thiserror::Error;

use crate::constraints::GlobalConstraint;
use crate::expressions::ValueType;
use crate::model::SolveCriteria;

/// Errors which can occur while building or generating a [`Model`](crate::Model).
///
/// All of them indicate a mistake by the caller; an operation which returns one of these errors
/// leaves the model unchanged.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("argument '{argument}' has kind '{found}', which is not a valid operand here")]
    InvalidOperandKind {
        argument: &'static str,
        found: ValueType,
    },

    #[error("argument '{argument}' has kind '{found}', but a boolean condition is required")]
    InvalidConditionKind {
        argument: &'static str,
        found: ValueType,
    },

    #[error("argument '{argument}' requires at least one operand")]
    EmptyOperandSequence { argument: &'static str },

    #[error("invalid domain for variable '{name}': {reason}")]
    InvalidDomainSpecification { name: String, reason: &'static str },

    #[error("cannot post {0} as a constraint")]
    InvalidConstraintInput(String),

    #[error("solve criteria '{criteria}' {reason}")]
    InvalidSolveCriteria {
        criteria: SolveCriteria,
        reason: &'static str,
    },

    #[error("no solve criteria has been set")]
    MissingSolveCriteria,

    #[error("invalid search annotation: {0}")]
    InvalidSearchAnnotation(String),

    #[error("'{0}' is not a valid variable choice")]
    InvalidVariableChoice(String),

    #[error("'{0}' is not a valid value choice")]
    InvalidValueChoice(String),

    #[error("a restart strategy requires a search annotation")]
    RestartWithoutSearch,

    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("identifier '{0}' is already declared")]
    DuplicateIdentifier(String),

    #[error("{constraint}: expected '{argument}' to have {expected} elements, got {actual}")]
    MismatchedLengths {
        constraint: GlobalConstraint,
        argument: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid index into '{name}': {reason}")]
    InvalidIndex { name: String, reason: String },

    #[error("invalid value for constant '{name}': {reason}")]
    InvalidConstantValue { name: String, reason: &'static str },

    #[error("failed to write model: {0}")]
    Io(#[from] std::io::Error),
}
