//! # mzn-core
//! Build MiniZinc models from Rust and render them to MiniZinc text.
//!
//! A [`Model`] accumulates
//! - constants ([`Model::add_constant`]),
//! - decision variables ([`Model::add_variable`], [`Model::add_variables`]),
//! - constraints ([`Model::add_constraint`]), built from [`expressions`] or taken from the
//!   global constraints in [`constraints`],
//! - a solve item ([`Model::set_solve_criteria`]) with an optional search annotation and restart
//!   strategy ([`search`]).
//!
//! [`Model::generate`] renders everything into a single MiniZinc program, which can then be
//! handed to a MiniZinc solver. This crate does not solve models itself.
//!
//! # Example
//! The classic integer factorisation example:
//! ```rust
//! # use mzn_core::Model;
//! # use mzn_core::variables::VariableDefinition;
//! # fn main() -> Result<(), mzn_core::ModelError> {
//! let mut model = Model::default();
//!
//! let x = model.add_variable("x", VariableDefinition::int().with_bounds(1, 99999999))?;
//! let y = model.add_variable("y", VariableDefinition::int().with_bounds(1, 99999999))?;
//!
//! model.add_constraint((&x * &y).equals(7829 * 6907)).post()?;
//! model.add_constraint(y.greater_than(1)).post()?;
//! model.add_constraint(x.greater_than(&y)).post()?;
//! model.satisfy();
//!
//! let text = model.generate()?;
//! assert!(text.contains("var 1..99999999: x;"));
//! assert!(text.contains("constraint ((x * y) = 54074903);"));
//! assert!(text.ends_with("solve satisfy;\n"));
//! # Ok(())
//! # }
//! ```
pub(crate) mod basic_types;
pub mod constraints;
mod error;
pub mod expressions;
mod model;
pub mod search;
pub mod variables;

pub use basic_types::is_valid_identifier;
pub use basic_types::Number;
pub use error::ModelError;
pub use model::Model;
pub use model::SolveCriteria;
