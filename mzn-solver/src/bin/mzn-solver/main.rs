mod demos;
mod result;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use demos::Demo;
use log::error;
use log::info;
use log::LevelFilter;
use mzn_solver::minizinc::MiniZinc;
use mzn_solver::minizinc::SolveResult;
use result::CliResult;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The demonstration model to build.
    #[arg(value_enum)]
    demo: Demo,

    /// The size of the demonstration, e.g. the number of queens.
    ///
    /// Ignored by the demonstrations with fixed data.
    #[arg(short = 'n', long)]
    size: Option<u32>,

    /// Write the generated model to this file instead of standard output.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Solve the generated model with MiniZinc and print the solutions.
    #[arg(short = 's', long)]
    solve: bool,

    /// The MiniZinc executable.
    #[arg(long, default_value = "minizinc")]
    minizinc: PathBuf,

    /// The identifier of the solver MiniZinc should use.
    #[arg(long, default_value = "gecode")]
    solver: String,

    /// Report all solutions of a satisfaction problem, or all improving solutions of an
    /// optimisation problem.
    #[arg(short = 'a', long = "all-solutions")]
    all_solutions: bool,

    /// The time limit given to MiniZinc, in milliseconds.
    #[arg(short = 't', long = "time-limit")]
    time_limit: Option<u64>,

    /// Log the generated model and the MiniZinc invocation.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();

    configure_logging(args.verbose);

    let mut model = args.demo.build(args.size)?;

    match &args.output {
        Some(path) => {
            model.write(path)?;
            info!("Wrote the model to {}", path.display());
        }
        None => print!("{}", model.text()?),
    }

    if !args.solve {
        return Ok(());
    }

    let mut minizinc = MiniZinc::default()
        .with_executable(&args.minizinc)
        .with_solver(&args.solver)
        .with_all_solutions(args.all_solutions);
    if let Some(milliseconds) = args.time_limit {
        minizinc = minizinc.with_time_limit(Duration::from_millis(milliseconds));
    }

    let result = minizinc.solve(&mut model)?;
    print_result(&result);

    Ok(())
}

fn print_result(result: &SolveResult) {
    for solution in result.solutions() {
        for (name, value) in solution.iter() {
            println!("{name} = {value};");
        }
        if let Some(objective) = solution.objective() {
            println!("% objective = {objective}");
        }
        println!("----------");
    }
    println!("% status: {}", result.status());
}
