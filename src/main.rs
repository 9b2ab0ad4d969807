//! Command-line entry point: solve a JSON scheduling problem and emit
//! a JSON report.

use std::path::PathBuf;
use std::process::ExitCode;
use std::{env, fs};

use shift_solver::demo_data;
use shift_solver::report::SolveReport;
use shift_solver::solver::solve;
use shift_solver::SchedulingProblem;

const USAGE: &str = "usage: shift-solver <problem.json> [--output <path>] | --demo [--output <path>]";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut demo = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => demo = true,
            "--output" => {
                let path = args.next().ok_or("--output requires a path")?;
                output = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if input.is_none() && !other.starts_with('-') => {
                input = Some(PathBuf::from(other));
            }
            other => return Err(format!("unexpected argument '{other}'\n{USAGE}").into()),
        }
    }

    let problem: SchedulingProblem = if demo {
        demo_data::minimal_problem()?
    } else {
        let path = input.ok_or(USAGE)?;
        let raw = fs::read_to_string(&path)?;
        serde_json::from_str(&raw)?
    };

    let result = solve(&problem)?;
    let report = SolveReport::new(&result, &problem)?;
    log::info!("{}", report.summary());

    let json = report.to_json_pretty()?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
