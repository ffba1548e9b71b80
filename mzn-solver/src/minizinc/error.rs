use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use mzn_core::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MiniZincError {
    #[error("the model could not be generated: {0}")]
    Model(#[from] ModelError),
    #[error("IO error while running MiniZinc, more details: {0}")]
    Io(#[from] std::io::Error),
    #[error("the MiniZinc executable '{}' could not be found", .0.display())]
    ExecutableNotFound(PathBuf),
    #[error("MiniZinc exited with {status}: {stderr}")]
    ProcessFailed { status: ExitStatus, stderr: String },
    #[error("MiniZinc did not terminate within {0:?}")]
    Timeout(Duration),
    #[error("the output of MiniZinc could not be parsed: {0}")]
    MalformedOutput(String),
}
