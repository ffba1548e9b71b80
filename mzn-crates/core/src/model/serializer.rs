use std::fmt::Display;
use std::fmt::Formatter;

use super::Model;
use super::Objective;

/// The MiniZinc text of a model.
///
/// Items are emitted in the order: includes, constants, variables, constraints and finally the
/// solve item. Within each group the order of insertion is kept; includes are ordered by name.
pub(super) struct ModelText<'model> {
    model: &'model Model,
    objective: &'model Objective,
}

impl<'model> ModelText<'model> {
    pub(super) fn new(model: &'model Model, objective: &'model Objective) -> Self {
        ModelText { model, objective }
    }
}

impl Display for ModelText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for global_constraint in self.model.required_includes() {
            writeln!(f, "include \"{}\";", global_constraint.include_file())?;
        }

        for constant in &self.model.constants {
            writeln!(f, "{}", constant.declaration())?;
        }

        for variable in &self.model.variables {
            writeln!(f, "{}", variable.declaration())?;
        }

        for constraint in &self.model.constraints {
            writeln!(f, "{constraint}")?;
        }

        write!(f, "solve")?;
        if let Some(search) = &self.model.search {
            write!(f, " :: {search}")?;
            if let Some(restart_strategy) = &self.model.restart_strategy {
                write!(f, " :: {restart_strategy}")?;
            }
        }
        write!(f, " {}", self.objective.criteria)?;
        if let Some(expression) = &self.objective.expression {
            write!(f, " {expression}")?;
        }
        writeln!(f, ";")
    }
}
