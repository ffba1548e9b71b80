//! Running generated models through the `minizinc` executable.
//!
//! [`MiniZinc`] writes the text of a [`Model`] to a temporary `.mzn` file, invokes MiniZinc on it
//! with `--output-mode dzn`, and parses the reported solutions into a [`SolveResult`].
mod error;
mod solutions;

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

pub use error::MiniZincError;
use log::debug;
use log::warn;
use mzn_core::Model;
pub use solutions::Solution;
pub use solutions::SolveResult;
pub use solutions::SolveStatus;
pub use solutions::Value;
use wait_timeout::ChildExt;

/// Time granted to MiniZinc on top of its own time limit before the process is killed.
const GRACE_PERIOD: Duration = Duration::from_secs(10);

static RUN_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Configuration of a MiniZinc invocation.
#[derive(Clone, Debug)]
pub struct MiniZinc {
    executable: PathBuf,
    solver: String,
    time_limit: Option<Duration>,
    all_solutions: bool,
    arguments: Vec<String>,
}

impl Default for MiniZinc {
    fn default() -> Self {
        MiniZinc {
            executable: PathBuf::from("minizinc"),
            solver: "gecode".to_owned(),
            time_limit: None,
            all_solutions: false,
            arguments: vec![],
        }
    }
}

impl MiniZinc {
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// The solver identifier passed to `--solver`, e.g. `gecode` or `chuffed`.
    pub fn with_solver(mut self, solver: impl Into<String>) -> Self {
        self.solver = solver.into();
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Report every solution of a satisfaction problem, or every improving solution of an
    /// optimisation problem.
    pub fn with_all_solutions(mut self, all_solutions: bool) -> Self {
        self.all_solutions = all_solutions;
        self
    }

    /// Passes an additional command line argument to MiniZinc.
    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn solver(&self) -> &str {
        &self.solver
    }

    /// Whether the configured executable can be started.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    /// Generates the text of `model` (reusing previously generated text) and solves it.
    pub fn solve(&self, model: &mut Model) -> Result<SolveResult, MiniZincError> {
        let files = RunFiles::new();
        std::fs::write(&files.model_file, model.text()?)?;

        let result = self.run(&files);

        if let Err(error) = files.cleanup() {
            warn!("Failed to remove temporary MiniZinc files: {error}");
        }

        result
    }

    fn run(&self, files: &RunFiles) -> Result<SolveResult, MiniZincError> {
        let mut command = self.command(&files.model_file);
        debug!("Running {command:?}");

        let spawned = command
            .stdin(Stdio::null())
            .stdout(File::create(&files.output_file)?)
            .stderr(File::create(&files.error_file)?)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(MiniZincError::ExecutableNotFound(self.executable.clone()));
            }
            Err(error) => return Err(error.into()),
        };

        let status = match self.time_limit {
            Some(time_limit) => {
                let deadline = time_limit + GRACE_PERIOD;
                match child.wait_timeout(deadline)? {
                    Some(status) => status,
                    None => {
                        child.kill()?;
                        let _ = child.wait()?;
                        return Err(MiniZincError::Timeout(deadline));
                    }
                }
            }
            None => child.wait()?,
        };

        let stderr = std::fs::read_to_string(&files.error_file)?;
        if !stderr.trim().is_empty() {
            warn!("MiniZinc reported: {}", stderr.trim());
        }

        if !status.success() {
            return Err(MiniZincError::ProcessFailed {
                status,
                stderr: stderr.trim().to_owned(),
            });
        }

        let stdout = std::fs::read_to_string(&files.output_file)?;
        let result = stdout
            .parse::<SolveResult>()
            .map_err(MiniZincError::MalformedOutput)?;
        debug!(
            "MiniZinc finished with status {} after {} solution(s)",
            result.status(),
            result.solutions().len()
        );

        Ok(result)
    }

    fn command(&self, model_file: &Path) -> Command {
        let mut command = Command::new(&self.executable);
        let _ = command
            .arg("--solver")
            .arg(&self.solver)
            .arg("--output-mode")
            .arg("dzn")
            .arg("--output-objective");

        if self.all_solutions {
            let _ = command.arg("-a");
        }

        if let Some(time_limit) = self.time_limit {
            let _ = command
                .arg("--time-limit")
                .arg(time_limit.as_millis().to_string());
        }

        let _ = command.args(&self.arguments).arg(model_file);
        command
    }
}

/// The files of a single run, unique per process and invocation.
#[derive(Debug)]
struct RunFiles {
    model_file: PathBuf,
    output_file: PathBuf,
    error_file: PathBuf,
}

impl RunFiles {
    fn new() -> RunFiles {
        let directory = std::env::temp_dir();
        let run = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
        let stem = format!("mzn-solver-{}-{run}", std::process::id());

        RunFiles {
            model_file: directory.join(format!("{stem}.mzn")),
            output_file: directory.join(format!("{stem}.out")),
            error_file: directory.join(format!("{stem}.err")),
        }
    }

    fn cleanup(&self) -> std::io::Result<()> {
        for file in [&self.model_file, &self.output_file, &self.error_file] {
            if file.is_file() {
                std::fs::remove_file(file)?;
            }
        }

        Ok(())
    }
}
