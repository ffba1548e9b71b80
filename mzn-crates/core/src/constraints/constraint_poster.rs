use log::warn;

use super::Constraint;
use crate::error::ModelError;
use crate::Model;

/// A structure which is responsible for adding [`Constraint`]s to a [`Model`]. For an example
/// on how to use this, see [`crate::constraints`].
///
/// The constraints are validated when the poster is created; posting either adds all of them or,
/// if any of them was invalid, none.
#[derive(Debug)]
pub struct ConstraintPoster<'model> {
    model: &'model mut Model,
    constraints: Option<Result<Vec<Constraint>, ModelError>>,
}

impl<'model> ConstraintPoster<'model> {
    pub(crate) fn new(
        model: &'model mut Model,
        constraints: Result<Vec<Constraint>, ModelError>,
    ) -> Self {
        ConstraintPoster {
            model,
            constraints: Some(constraints),
        }
    }

    /// Add the [`Constraint`]s to the [`Model`].
    ///
    /// This method returns the first [`ModelError`] encountered while normalising the
    /// constraints, in which case the model is left unchanged.
    pub fn post(self) -> Result<(), ModelError> {
        self.post_with(|constraint| constraint)
    }

    /// Add the [`Constraint`]s to the [`Model`] as redundant constraints; i.e. they are emitted
    /// as `redundant_constraint(c)`, which hints the solver that they do not change the set of
    /// solutions.
    pub fn post_redundant(self) -> Result<(), ModelError> {
        self.post_with(Constraint::mark_redundant)
    }

    fn post_with(
        mut self,
        transform: impl FnMut(Constraint) -> Constraint,
    ) -> Result<(), ModelError> {
        let Some(constraints) = self.constraints.take() else {
            return Ok(());
        };

        let constraints = constraints?.into_iter().map(transform).collect();
        self.model.register_constraints(constraints);
        Ok(())
    }
}

impl Drop for ConstraintPoster<'_> {
    fn drop(&mut self) {
        if self.constraints.is_some() {
            warn!("A constraint poster is never used, this is likely a mistake.");
        }
    }
}
