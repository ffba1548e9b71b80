//! Constraints which can be posted to a [`Model`].
//!
//! A constraint is either an arbitrary boolean expression or the invocation of a global
//! constraint such as [`all_different`]. Global constraints are defined in the MiniZinc
//! library, so a model which uses one also has to include its definition; the [`Model`] keeps
//! track of this when the constraint is posted.
//!
//! Constraints are added through [`Model::add_constraint`], which returns a
//! [`ConstraintPoster`]:
//! ```rust
//! # use mzn_core::Model;
//! # use mzn_core::constraints;
//! # use mzn_core::variables::VariableDefinition;
//! # fn main() -> Result<(), mzn_core::ModelError> {
//! let mut model = Model::default();
//! let queens = model.add_variables("q", 0..4, VariableDefinition::int().with_bounds(0, 3))?;
//!
//! model
//!     .add_constraint(constraints::all_different(queens.iter())?)
//!     .post()?;
//! model.add_constraint(queens[&0].less_than(&queens[&1])).post_redundant()?;
//! # Ok(())
//! # }
//! ```
mod constraint_poster;
mod global;

use std::fmt::Display;
use std::fmt::Formatter;

pub use constraint_poster::ConstraintPoster;
use enumset::EnumSetType;
pub use global::*;

use crate::error::ModelError;
use crate::expressions::BoolExpression;
use crate::expressions::Expression;
use crate::expressions::IntoCondition;
use crate::variables::Variable;
#[cfg(doc)]
use crate::Model;

/// The global constraints which can be posted; each requires the include of the file with the
/// same name.
///
/// The variants are ordered by name, which makes the order of the include items stable.
#[derive(Debug, EnumSetType, Hash)]
pub enum GlobalConstraint {
    AllDifferent,
    AllEqual,
    Among,
    ArgSort,
    Connected,
    Count,
    Decreasing,
    Diffn,
    Disjunctive,
    DisjunctiveStrict,
    Increasing,
    Reachable,
}

impl GlobalConstraint {
    /// The name of the predicate, e.g. `all_different`.
    pub fn name(self) -> String {
        use convert_case::Case;
        use convert_case::Casing;

        format!("{self:?}").to_case(Case::Snake)
    }

    /// The library file defining the predicate, e.g. `all_different.mzn`.
    pub fn include_file(self) -> String {
        format!("{}.mzn", self.name())
    }
}

impl Display for GlobalConstraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hints the solver about the propagation strength to use for a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropagationStrength {
    Bounds,
    BoundsZ,
    BoundsR,
    BoundsD,
    Domain,
    ValuePropagation,
}

impl Display for PropagationStrength {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let annotation = match self {
            PropagationStrength::Bounds => "bounds",
            PropagationStrength::BoundsZ => "boundsZ",
            PropagationStrength::BoundsR => "boundsR",
            PropagationStrength::BoundsD => "boundsD",
            PropagationStrength::Domain => "domain",
            PropagationStrength::ValuePropagation => "value_propagation",
        };
        write!(f, "{annotation}")
    }
}

/// A constraint item of a model.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    body: BoolExpression,
    global_constraint: Option<GlobalConstraint>,
    propagation: Option<PropagationStrength>,
    redundant: bool,
}

impl Constraint {
    pub fn new(body: BoolExpression) -> Constraint {
        Constraint {
            body,
            global_constraint: None,
            propagation: None,
            redundant: false,
        }
    }

    pub(crate) fn global(global_constraint: GlobalConstraint, arguments: Vec<Expression>) -> Self {
        Constraint {
            global_constraint: Some(global_constraint),
            ..Constraint::new(BoolExpression::call(global_constraint.name(), arguments))
        }
    }

    /// Annotates the constraint with a propagation strength, e.g. `:: domain`.
    pub fn with_propagation(mut self, strength: PropagationStrength) -> Self {
        self.propagation = Some(strength);
        self
    }

    /// Marks the constraint as redundant; it is then emitted as `redundant_constraint(...)`.
    pub fn mark_redundant(mut self) -> Self {
        self.redundant = true;
        self
    }

    pub fn body(&self) -> &BoolExpression {
        &self.body
    }

    pub fn global_constraint(&self) -> Option<GlobalConstraint> {
        self.global_constraint
    }

    pub fn propagation(&self) -> Option<PropagationStrength> {
        self.propagation
    }

    pub fn is_redundant(&self) -> bool {
        self.redundant
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let body = match self.propagation {
            Some(strength) => format!("{} :: {strength}", self.body),
            None => self.body.to_string(),
        };

        if self.redundant {
            write!(f, "constraint redundant_constraint({body});")
        } else {
            write!(f, "constraint {body};")
        }
    }
}

/// Values which can be posted as a constraint.
///
/// Boolean expressions, boolean variables and constraint records are accepted, as is MiniZinc
/// text which is posted verbatim. Expressions and variables of any other kind are rejected with
/// [`ModelError::InvalidConstraintInput`].
pub trait IntoConstraint {
    fn into_constraint(self) -> Result<Constraint, ModelError>;
}

impl IntoConstraint for Constraint {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        Ok(self)
    }
}

impl IntoConstraint for BoolExpression {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        Ok(Constraint::new(self))
    }
}

impl IntoConstraint for &BoolExpression {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        Ok(Constraint::new(self.clone()))
    }
}

impl IntoConstraint for bool {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        Ok(Constraint::new(self.into()))
    }
}

fn condition_constraint(value: impl IntoCondition) -> Result<Constraint, ModelError> {
    value.into_condition().map(Constraint::new).map_err(|found| {
        ModelError::InvalidConstraintInput(format!("an expression of kind '{found}'"))
    })
}

impl IntoConstraint for Expression {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        condition_constraint(self)
    }
}

impl IntoConstraint for &Expression {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        condition_constraint(self)
    }
}

impl IntoConstraint for &Variable {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        condition_constraint(self)
    }
}

impl IntoConstraint for Variable {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        condition_constraint(self)
    }
}

impl IntoConstraint for &str {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        if self.trim().is_empty() {
            return Err(ModelError::InvalidConstraintInput("empty text".to_owned()));
        }
        Ok(Constraint::new(BoolExpression::raw(self)))
    }
}

impl IntoConstraint for String {
    fn into_constraint(self) -> Result<Constraint, ModelError> {
        self.as_str().into_constraint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expressions::ValueType;

    #[test]
    fn global_constraint_names_are_snake_case() {
        assert_eq!("all_different", GlobalConstraint::AllDifferent.name());
        assert_eq!("arg_sort", GlobalConstraint::ArgSort.name());
        assert_eq!("diffn", GlobalConstraint::Diffn.name());
        assert_eq!(
            "disjunctive_strict.mzn",
            GlobalConstraint::DisjunctiveStrict.include_file()
        );
    }

    #[test]
    fn redundant_constraints_are_wrapped() {
        let constraint = "x > y".into_constraint().unwrap();

        assert_eq!("constraint x > y;", constraint.to_string());
        assert_eq!(
            "constraint redundant_constraint(x > y);",
            constraint.mark_redundant().to_string()
        );
    }

    #[test]
    fn propagation_annotations_follow_the_body() {
        let constraint = Constraint::global(
            GlobalConstraint::AllDifferent,
            vec![Expression::array(vec![1.into(), 2.into()])],
        )
        .with_propagation(PropagationStrength::Domain);

        assert_eq!(
            "constraint all_different([1, 2]) :: domain;",
            constraint.to_string()
        );
        assert_eq!(
            "constraint redundant_constraint(all_different([1, 2]) :: domain);",
            constraint.mark_redundant().to_string()
        );
    }

    #[test]
    fn only_conditions_are_accepted() {
        assert!(Expression::bool(true).into_constraint().is_ok());
        assert!(matches!(
            Expression::int(3).into_constraint(),
            Err(ModelError::InvalidConstraintInput(_))
        ));
        assert!(matches!(
            "  ".into_constraint(),
            Err(ModelError::InvalidConstraintInput(_))
        ));

        let x = Expression::identifier("x".into(), ValueType::Int);
        assert!((&x).into_constraint().is_err());
        assert!(x.greater_than(1).into_constraint().is_ok());
    }
}
