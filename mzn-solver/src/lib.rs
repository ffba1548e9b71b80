//! # mzn-solver
//! Builds MiniZinc models with [`mzn_core`] and solves them by handing the generated text to the
//! `minizinc` executable.
//!
//! Everything from [`mzn_core`] is re-exported, so this crate is the only dependency needed to
//! both describe and solve a model:
//! ```rust,no_run
//! # use mzn_solver::Model;
//! # use mzn_solver::minizinc::MiniZinc;
//! # use mzn_solver::variables::VariableDefinition;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = Model::default();
//! let x = model.add_variable("x", VariableDefinition::int().with_bounds(1, 10))?;
//! model.add_constraint(x.greater_than(7)).post()?;
//! model.maximize(&x)?;
//!
//! let result = MiniZinc::default().with_solver("gecode").solve(&mut model)?;
//! let best = result.best_solution().and_then(|solution| solution.int_value(&x));
//! assert_eq!(best, Some(10));
//! # Ok(())
//! # }
//! ```
pub mod minizinc;

pub use mzn_core::*;
