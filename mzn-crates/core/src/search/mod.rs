//! Search annotations which tell the solver in which order to branch on variables and values.
//!
//! Annotations are attached to a model with [`Model::set_search`](crate::Model::set_search); a
//! [`RestartStrategy`] can be attached alongside one with
//! [`Model::set_restart_strategy`](crate::Model::set_restart_strategy).
mod choices;
mod restart;

use std::fmt::Display;
use std::fmt::Formatter;

pub use choices::ValueChoice;
pub use choices::VariableChoice;
use itertools::Itertools;
pub use restart::RestartStrategy;

use crate::error::ModelError;
use crate::expressions::ValueType;
use crate::variables::Variable;

#[derive(Clone, Copy, Debug, PartialEq)]
enum SearchKind {
    Int,
    Bool,
    Set,
    Float { precision: f64 },
}

impl SearchKind {
    fn name(self) -> &'static str {
        match self {
            SearchKind::Int => "int_search",
            SearchKind::Bool => "bool_search",
            SearchKind::Set => "set_search",
            SearchKind::Float { .. } => "float_search",
        }
    }

    fn value_type(self) -> ValueType {
        match self {
            SearchKind::Int => ValueType::Int,
            SearchKind::Bool => ValueType::Bool,
            SearchKind::Set => ValueType::IntSet,
            SearchKind::Float { .. } => ValueType::Float,
        }
    }

    fn accepts(self, value_choice: ValueChoice) -> bool {
        match self {
            SearchKind::Int | SearchKind::Bool => true,
            SearchKind::Set => matches!(
                value_choice,
                ValueChoice::IndomainMin | ValueChoice::IndomainMax
            ),
            SearchKind::Float { .. } => matches!(
                value_choice,
                ValueChoice::IndomainSplit | ValueChoice::IndomainReverseSplit
            ),
        }
    }
}

/// Branches on a list of variables of one kind with a variable and a value selection heuristic.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchAnnotation {
    kind: SearchKind,
    variables: Vec<Variable>,
    variable_choice: VariableChoice,
    value_choice: ValueChoice,
}

impl SearchAnnotation {
    fn new<'a>(
        kind: SearchKind,
        variables: impl IntoIterator<Item = &'a Variable>,
        variable_choice: VariableChoice,
        value_choice: ValueChoice,
    ) -> Result<SearchAnnotation, ModelError> {
        let variables = variables.into_iter().cloned().collect::<Vec<_>>();
        if variables.is_empty() {
            return Err(ModelError::InvalidSearchAnnotation(format!(
                "{} requires at least one variable",
                kind.name()
            )));
        }

        if let Some(variable) = variables
            .iter()
            .find(|variable| variable.value_type() != kind.value_type())
        {
            return Err(ModelError::InvalidSearchAnnotation(format!(
                "variable '{}' of kind '{}' cannot be used in {}",
                variable.name(),
                variable.value_type(),
                kind.name()
            )));
        }

        if !kind.accepts(value_choice) {
            return Err(ModelError::InvalidValueChoice(format!(
                "{value_choice} in {}",
                kind.name()
            )));
        }

        Ok(SearchAnnotation {
            kind,
            variables,
            variable_choice,
            value_choice,
        })
    }

    /// `int_search(variables, variable_choice, value_choice)`
    pub fn int_search<'a>(
        variables: impl IntoIterator<Item = &'a Variable>,
        variable_choice: VariableChoice,
        value_choice: ValueChoice,
    ) -> Result<SearchAnnotation, ModelError> {
        SearchAnnotation::new(SearchKind::Int, variables, variable_choice, value_choice)
    }

    /// `bool_search(variables, variable_choice, value_choice)`
    pub fn bool_search<'a>(
        variables: impl IntoIterator<Item = &'a Variable>,
        variable_choice: VariableChoice,
        value_choice: ValueChoice,
    ) -> Result<SearchAnnotation, ModelError> {
        SearchAnnotation::new(SearchKind::Bool, variables, variable_choice, value_choice)
    }

    /// `set_search(variables, variable_choice, value_choice)`; only
    /// [`ValueChoice::IndomainMin`] and [`ValueChoice::IndomainMax`] apply to sets.
    pub fn set_search<'a>(
        variables: impl IntoIterator<Item = &'a Variable>,
        variable_choice: VariableChoice,
        value_choice: ValueChoice,
    ) -> Result<SearchAnnotation, ModelError> {
        SearchAnnotation::new(SearchKind::Set, variables, variable_choice, value_choice)
    }

    /// `float_search(variables, precision, variable_choice, value_choice)`; floats can only be
    /// branched on by splitting their domain.
    pub fn float_search<'a>(
        variables: impl IntoIterator<Item = &'a Variable>,
        precision: f64,
        variable_choice: VariableChoice,
        value_choice: ValueChoice,
    ) -> Result<SearchAnnotation, ModelError> {
        if precision.is_nan() || precision <= 0.0 {
            return Err(ModelError::InvalidSearchAnnotation(format!(
                "precision {precision} is not positive"
            )));
        }

        SearchAnnotation::new(
            SearchKind::Float { precision },
            variables,
            variable_choice,
            value_choice,
        )
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_choice(&self) -> VariableChoice {
        self.variable_choice
    }

    pub fn value_choice(&self) -> ValueChoice {
        self.value_choice
    }
}

impl Display for SearchAnnotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}([{}], ",
            self.kind.name(),
            self.variables.iter().join(", ")
        )?;
        if let SearchKind::Float { precision } = self.kind {
            write!(f, "{precision:?}, ")?;
        }
        write!(f, "{}, {})", self.variable_choice, self.value_choice)
    }
}

/// The search directive of a model: a single annotation, or annotations applied one after the
/// other.
#[derive(Clone, Debug, PartialEq)]
pub enum Search {
    Annotation(SearchAnnotation),
    Sequential(Vec<Search>),
}

impl Search {
    /// `seq_search([s1, s2, ...])`, which requires at least one search.
    pub fn sequential(
        searches: impl IntoIterator<Item = impl Into<Search>>,
    ) -> Result<Search, ModelError> {
        let searches = searches.into_iter().map(Into::into).collect::<Vec<_>>();
        if searches.is_empty() {
            return Err(ModelError::InvalidSearchAnnotation(
                "seq_search requires at least one search".to_owned(),
            ));
        }
        Ok(Search::Sequential(searches))
    }
}

impl From<SearchAnnotation> for Search {
    fn from(value: SearchAnnotation) -> Self {
        Search::Annotation(value)
    }
}

impl Display for Search {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Search::Annotation(annotation) => write!(f, "{annotation}"),
            Search::Sequential(searches) => {
                write!(f, "seq_search([{}])", searches.iter().join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::VariableDefinition;

    fn variable(name: &str, definition: VariableDefinition) -> Variable {
        Variable::new(name.into(), definition.resolve(name).unwrap())
    }

    fn int_variables() -> Vec<Variable> {
        ["q_0", "q_1"]
            .into_iter()
            .map(|name| variable(name, VariableDefinition::int().with_bounds(0, 7)))
            .collect()
    }

    #[test]
    fn int_search_renders_its_choices() {
        let search = SearchAnnotation::int_search(
            &int_variables(),
            VariableChoice::FirstFail,
            ValueChoice::IndomainMin,
        )
        .unwrap();

        assert_eq!(
            "int_search([q_0, q_1], first_fail, indomain_min)",
            search.to_string()
        );
    }

    #[test]
    fn variables_must_match_the_search_kind() {
        let result = SearchAnnotation::bool_search(
            &int_variables(),
            VariableChoice::InputOrder,
            ValueChoice::IndomainMax,
        );

        assert!(matches!(
            result,
            Err(ModelError::InvalidSearchAnnotation(_))
        ));
    }

    #[test]
    fn searches_require_variables() {
        let result = SearchAnnotation::int_search(
            &Vec::new(),
            VariableChoice::InputOrder,
            ValueChoice::IndomainMin,
        );

        assert!(matches!(
            result,
            Err(ModelError::InvalidSearchAnnotation(_))
        ));
    }

    #[test]
    fn float_search_only_splits() {
        let f = [variable("f", VariableDefinition::float().with_bounds(0, 1))];

        let search = SearchAnnotation::float_search(
            &f,
            0.001,
            VariableChoice::Smallest,
            ValueChoice::IndomainSplit,
        )
        .unwrap();
        assert_eq!(
            "float_search([f], 0.001, smallest, indomain_split)",
            search.to_string()
        );

        assert!(matches!(
            SearchAnnotation::float_search(
                &f,
                0.001,
                VariableChoice::Smallest,
                ValueChoice::IndomainMin
            ),
            Err(ModelError::InvalidValueChoice(_))
        ));
        assert!(SearchAnnotation::float_search(
            &f,
            0.0,
            VariableChoice::Smallest,
            ValueChoice::IndomainSplit
        )
        .is_err());
    }

    #[test]
    fn sequential_search_nests_annotations() {
        let b = [variable("b", VariableDefinition::bool())];
        let first = SearchAnnotation::int_search(
            &int_variables(),
            VariableChoice::DomWDeg,
            ValueChoice::IndomainRandom,
        )
        .unwrap();
        let second = SearchAnnotation::bool_search(
            &b,
            VariableChoice::InputOrder,
            ValueChoice::IndomainMax,
        )
        .unwrap();

        let search = Search::sequential([first, second]).unwrap();

        assert_eq!(
            "seq_search([int_search([q_0, q_1], dom_w_deg, indomain_random), \
             bool_search([b], input_order, indomain_max)])",
            search.to_string()
        );
        assert!(Search::sequential(Vec::<Search>::new()).is_err());
    }
}
