use mzn_solver::minizinc::MiniZincError;
use mzn_solver::ModelError;
use thiserror::Error;

pub(crate) type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub(crate) enum CliError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ModelError),
    #[error("Failed to solve the model, more details: {0}")]
    MiniZinc(#[from] MiniZincError),
}
