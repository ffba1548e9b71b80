mod serializer;

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use enumset::EnumSet;
use log::debug;
use log::trace;

use crate::basic_types::is_valid_identifier;
use crate::basic_types::HashSet;
use crate::constraints::Constraint;
use crate::constraints::ConstraintPoster;
use crate::constraints::GlobalConstraint;
use crate::constraints::IntoConstraint;
use crate::error::ModelError;
use crate::expressions::Expression;
use crate::search::RestartStrategy;
use crate::search::Search;
use crate::variables::indexed_name;
use crate::variables::Constant;
use crate::variables::ConstantValue;
use crate::variables::IndexKey;
use crate::variables::IndexedVariables;
use crate::variables::Variable;
use crate::variables::VariableDefinition;

/// What the solver is asked to do with the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveCriteria {
    /// Find any solution; takes no objective.
    Satisfy,
    /// Find a solution with the smallest objective value.
    Minimize,
    /// Find a solution with the largest objective value.
    Maximize,
}

impl Display for SolveCriteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveCriteria::Satisfy => write!(f, "satisfy"),
            SolveCriteria::Minimize => write!(f, "minimize"),
            SolveCriteria::Maximize => write!(f, "maximize"),
        }
    }
}

#[derive(Clone, Debug)]
struct Objective {
    criteria: SolveCriteria,
    expression: Option<Expression>,
}

/// A MiniZinc model under construction.
///
/// Declarations, constraints and the solve item are accumulated through the `add_*` and
/// `set_*` methods; every one of them either succeeds completely or leaves the model unchanged.
/// [`Model::generate`] then renders the model to MiniZinc text:
///
/// ```rust
/// # use mzn_core::Model;
/// # use mzn_core::variables::VariableDefinition;
/// # fn main() -> Result<(), mzn_core::ModelError> {
/// let mut model = Model::default();
/// let x = model.add_variable("x", VariableDefinition::int().with_bounds(1, 9))?;
/// let y = model.add_variable("y", VariableDefinition::int().with_bounds(1, 9))?;
///
/// model.add_constraint((&x * &y).equals(12)).post()?;
/// model.add_constraint(x.greater_than(&y)).post()?;
/// model.satisfy();
///
/// assert_eq!(
///     "var 1..9: x;\nvar 1..9: y;\nconstraint ((x * y) = 12);\nconstraint (x > y);\nsolve satisfy;\n",
///     model.generate()?
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Model {
    constants: Vec<Constant>,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    identifiers: HashSet<Rc<str>>,
    global_constraints: EnumSet<GlobalConstraint>,
    objective: Option<Objective>,
    search: Option<Search>,
    restart_strategy: Option<RestartStrategy>,
    generated: Option<String>,
}

impl Model {
    fn check_identifier(&self, name: &str) -> Result<(), ModelError> {
        if !is_valid_identifier(name) {
            return Err(ModelError::InvalidIdentifier(name.to_owned()));
        }
        if self.identifiers.contains(name) {
            return Err(ModelError::DuplicateIdentifier(name.to_owned()));
        }
        Ok(())
    }

    /// Declares a named constant, which is emitted as a parameter item, e.g. `int: n = 8;`.
    pub fn add_constant(
        &mut self,
        name: &str,
        value: impl Into<ConstantValue>,
    ) -> Result<Constant, ModelError> {
        self.check_identifier(name)?;

        let name: Rc<str> = name.into();
        let constant = Constant::new(Rc::clone(&name), value.into())?;

        let _ = self.identifiers.insert(name);
        self.constants.push(constant.clone());
        self.generated = None;
        Ok(constant)
    }

    /// Declares a decision variable.
    pub fn add_variable(
        &mut self,
        name: &str,
        definition: VariableDefinition,
    ) -> Result<Variable, ModelError> {
        self.check_identifier(name)?;

        let name: Rc<str> = name.into();
        let variable = Variable::new(Rc::clone(&name), definition.resolve(&name)?);

        let _ = self.identifiers.insert(name);
        self.variables.push(variable.clone());
        self.generated = None;
        Ok(variable)
    }

    /// Declares one variable with the given definition for every index.
    ///
    /// The variable for index `(0, 1)` under the base name `x` is named `x_0_1`; see
    /// [`IndexKey`].
    pub fn add_variables<Index: IndexKey>(
        &mut self,
        name: &str,
        indices: impl IntoIterator<Item = Index>,
        definition: VariableDefinition,
    ) -> Result<IndexedVariables<Index>, ModelError> {
        self.add_variables_with(name, indices, |_| definition.clone())
    }

    /// Declares one variable for every index, with a definition computed from the index.
    pub fn add_variables_with<Index: IndexKey>(
        &mut self,
        name: &str,
        indices: impl IntoIterator<Item = Index>,
        mut definition: impl FnMut(&Index) -> VariableDefinition,
    ) -> Result<IndexedVariables<Index>, ModelError> {
        if !is_valid_identifier(name) {
            return Err(ModelError::InvalidIdentifier(name.to_owned()));
        }

        let mut names = HashSet::default();
        let mut collection = IndexedVariables::default();
        for index in indices {
            let variable_name = indexed_name(name, &index);
            self.check_identifier(&variable_name)?;

            let variable_name: Rc<str> = variable_name.into();
            if !names.insert(Rc::clone(&variable_name)) {
                return Err(ModelError::DuplicateIdentifier(variable_name.to_string()));
            }

            let kind = definition(&index).resolve(&variable_name)?;
            collection.insert(index, Variable::new(variable_name, kind));
        }

        self.identifiers.extend(names);
        self.variables.extend(collection.iter().cloned());
        self.generated = None;
        Ok(collection)
    }

    /// Creates a [`ConstraintPoster`] for a single constraint.
    pub fn add_constraint(&mut self, constraint: impl IntoConstraint) -> ConstraintPoster<'_> {
        let constraint = constraint.into_constraint().map(|constraint| vec![constraint]);
        ConstraintPoster::new(self, constraint)
    }

    /// Creates a [`ConstraintPoster`] for a sequence of constraints, which are posted together
    /// or not at all.
    pub fn add_constraints<C: IntoConstraint>(
        &mut self,
        constraints: impl IntoIterator<Item = C>,
    ) -> ConstraintPoster<'_> {
        let constraints = constraints
            .into_iter()
            .map(IntoConstraint::into_constraint)
            .collect();
        ConstraintPoster::new(self, constraints)
    }

    pub(crate) fn register_constraints(&mut self, constraints: Vec<Constraint>) {
        for constraint in constraints {
            if let Some(global_constraint) = constraint.global_constraint() {
                if self.global_constraints.insert(global_constraint) {
                    trace!("including {}", global_constraint.include_file());
                }
            }
            trace!("posting {constraint}");
            self.constraints.push(constraint);
        }
        self.generated = None;
    }

    /// Sets what the solver should do with the model; a later call replaces an earlier one.
    ///
    /// Minimisation and maximisation require a numeric objective, satisfaction requires that
    /// there is none; otherwise [`ModelError::InvalidSolveCriteria`] is returned.
    pub fn set_solve_criteria(
        &mut self,
        criteria: SolveCriteria,
        objective: Option<Expression>,
    ) -> Result<(), ModelError> {
        let invalid = |reason| ModelError::InvalidSolveCriteria { criteria, reason };

        match (criteria, &objective) {
            (SolveCriteria::Satisfy, Some(_)) => return Err(invalid("does not take an objective")),
            (SolveCriteria::Minimize | SolveCriteria::Maximize, None) => {
                return Err(invalid("requires an objective"))
            }
            (_, Some(objective)) if !objective.value_type().is_scalar() => {
                return Err(invalid("requires a numeric objective"))
            }
            (_, Some(objective)) if !objective.is_finite() => {
                return Err(invalid("requires a finite objective"))
            }
            _ => {}
        }

        self.objective = Some(Objective {
            criteria,
            expression: objective,
        });
        self.generated = None;
        Ok(())
    }

    /// Asks the solver for any solution.
    pub fn satisfy(&mut self) {
        self.objective = Some(Objective {
            criteria: SolveCriteria::Satisfy,
            expression: None,
        });
        self.generated = None;
    }

    /// Asks the solver for a solution minimising `objective`.
    pub fn minimize(&mut self, objective: impl Into<Expression>) -> Result<(), ModelError> {
        self.set_solve_criteria(SolveCriteria::Minimize, Some(objective.into()))
    }

    /// Asks the solver for a solution maximising `objective`.
    pub fn maximize(&mut self, objective: impl Into<Expression>) -> Result<(), ModelError> {
        self.set_solve_criteria(SolveCriteria::Maximize, Some(objective.into()))
    }

    /// Sets the search annotation of the solve item, replacing an earlier one.
    pub fn set_search(&mut self, search: impl Into<Search>) {
        self.search = Some(search.into());
        self.generated = None;
    }

    /// Sets the restart strategy, which is emitted after the search annotation.
    ///
    /// A search annotation has to be set first; otherwise [`ModelError::RestartWithoutSearch`]
    /// is returned.
    pub fn set_restart_strategy(
        &mut self,
        restart_strategy: RestartStrategy,
    ) -> Result<(), ModelError> {
        if self.search.is_none() {
            return Err(ModelError::RestartWithoutSearch);
        }

        self.restart_strategy = Some(restart_strategy.validate()?);
        self.generated = None;
        Ok(())
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn solve_criteria(&self) -> Option<SolveCriteria> {
        self.objective.as_ref().map(|objective| objective.criteria)
    }

    pub fn objective(&self) -> Option<&Expression> {
        self.objective
            .as_ref()
            .and_then(|objective| objective.expression.as_ref())
    }

    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    pub fn restart_strategy(&self) -> Option<RestartStrategy> {
        self.restart_strategy
    }

    /// The global constraints used by the model, in the order of their include items.
    pub fn required_includes(&self) -> impl Iterator<Item = GlobalConstraint> + '_ {
        self.global_constraints.iter()
    }

    /// Renders the model to MiniZinc text without caching it.
    pub fn render(&self) -> Result<String, ModelError> {
        let Some(objective) = &self.objective else {
            return Err(ModelError::MissingSolveCriteria);
        };

        Ok(serializer::ModelText::new(self, objective).to_string())
    }

    /// Renders the model to MiniZinc text and caches the result.
    pub fn generate(&mut self) -> Result<&str, ModelError> {
        let text = self.render()?;
        debug!(
            "Generated model with {} variables and {} constraints",
            self.variables.len(),
            self.constraints.len()
        );
        Ok(self.generated.insert(text).as_str())
    }

    /// The text of the last generation, unless the model changed since.
    pub fn generated_text(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// The generated text, which is only rendered again if the model changed.
    pub fn text(&mut self) -> Result<&str, ModelError> {
        match self.generated.take() {
            Some(text) => Ok(self.generated.insert(text).as_str()),
            None => self.generate(),
        }
    }

    /// Writes the generated text to `path`.
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let text = self.text()?;

        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        debug!("Wrote model to {}", path.display());
        Ok(())
    }
}
