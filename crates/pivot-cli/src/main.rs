mod catalog;
mod render;

use clap::{Parser, Subcommand};
use pivot_simplex::{LpProblem, Simplex, SimplexError, Solution, SolutionStatus, Step, TableauSnapshot};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pivot")]
#[command(about = "Solve standard-form LPs with the tableau simplex method, one pivot at a time", long_about = None)]
struct Cli {
    /// Tolerance for sign tests on reduced costs and pivot entries
    #[arg(long, global = true, default_value_t = 1e-9)]
    tolerance: f64,
    /// Maximum number of pivots before giving up
    #[arg(long, global = true, default_value_t = 10000)]
    max_iterations: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem stored as JSON (coefficients, constraints, objective)
    Solve {
        /// The problem file
        file: PathBuf,
        /// Print every intermediate tableau
        #[arg(short, long)]
        trace: bool,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Step through a built-in example problem; lists them when no number is given
    Example {
        /// The example number, starting at 1
        number: Option<usize>,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let Cli {
        tolerance,
        max_iterations,
        command,
    } = Cli::parse();

    match command {
        Commands::Solve { file, trace, format } => {
            let problem = read_problem(&file);
            let mut simplex = build_simplex(&problem, tolerance, max_iterations);

            if format == "json" {
                let mut steps = Vec::new();
                let result = simplex.run_with(|step, snapshot| {
                    if trace {
                        steps.push(serde_json::json!({ "step": step, "tableau": snapshot }));
                    }
                });
                let solution = match result {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Solver error: {}", e);
                        std::process::exit(1);
                    }
                };
                let output = serde_json::json!({ "solution": solution, "trace": steps });
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error writing JSON: {}", e);
                        std::process::exit(1);
                    }
                }
                if solution.status == SolutionStatus::Unbounded {
                    std::process::exit(1);
                }
            } else {
                let solution = run_pretty(&mut simplex, trace);
                report(&solution);
            }
        }
        Commands::Example { number: None } => {
            for (i, (name, problem)) in catalog::examples().iter().enumerate() {
                println!(
                    "  {}  {} ({} variables, {} constraints)",
                    i + 1,
                    name,
                    problem.num_variables(),
                    problem.num_constraints()
                );
            }
        }
        Commands::Example { number: Some(number) } => {
            let Some((name, problem)) = catalog::example(number) else {
                eprintln!("No example {}; run `pivot example` to list them", number);
                std::process::exit(1);
            };
            println!("Example {}: {}", number, name);
            println!();

            let mut simplex = build_simplex(&problem, tolerance, max_iterations);
            let solution = run_pretty(&mut simplex, true);
            report(&solution);
        }
        Commands::Check { file } => {
            let source = read_source(&file);
            let problem = match parse_problem(&source) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            };

            match problem.validate() {
                Ok(()) => {
                    println!("✓ {} is valid", file.display());
                    println!("  {} variables", problem.num_variables());
                    println!("  {} constraints", problem.num_constraints());
                }
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn parse_problem(source: &str) -> Result<LpProblem, serde_json::Error> {
    serde_json::from_str(source)
}

fn read_source(file: &Path) -> String {
    match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_problem(file: &Path) -> LpProblem {
    let source = read_source(file);
    match parse_problem(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    }
}

fn configure(problem: &LpProblem, tolerance: f64, max_iterations: usize) -> Result<Simplex, SimplexError> {
    Ok(Simplex::from_problem(problem)?
        .with_tolerance(tolerance)?
        .with_max_iterations(max_iterations))
}

fn build_simplex(problem: &LpProblem, tolerance: f64, max_iterations: usize) -> Simplex {
    match configure(problem, tolerance, max_iterations) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid problem: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_pretty(simplex: &mut Simplex, trace: bool) -> Solution {
    let result = simplex.run_with(|step, snapshot| {
        if trace {
            print_step(step, snapshot);
        }
    });
    match result {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Solver error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_step(step: Step, snapshot: &TableauSnapshot) {
    println!("{}", render::describe_step(step, snapshot));
    println!("{}", render::render_tableau(snapshot));
}

fn report(solution: &Solution) {
    match solution.status {
        SolutionStatus::Optimal => {
            println!("Status: OPTIMAL");
            println!("Objective value: {}", render::format_number(solution.objective_value));
            println!("Pivots: {}", solution.iterations);
            println!();
            println!("Variables:");
            for (i, &value) in solution.values.iter().enumerate() {
                println!("  x{:<4} {:>12}", i + 1, render::format_number(value));
            }
        }
        SolutionStatus::Unbounded => {
            println!("Status: UNBOUNDED");
            println!("The objective can be increased without limit.");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_problem_json() {
        let source = r#"{
            "coefficients": [[1, 1], [1, -1]],
            "constraints": [4, 2],
            "objective": [3, 2]
        }"#;
        let problem = parse_problem(source).unwrap();

        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 2);
        assert_eq!(problem.coefficients[1], vec![1.0, -1.0]);

        let solution = Simplex::from_problem(&problem).unwrap().run().unwrap();
        assert!((solution.objective_value - 11.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_problem_rejects_missing_field() {
        assert!(parse_problem(r#"{ "objective": [1] }"#).is_err());
    }

    #[test]
    fn test_configure_rejects_bad_tolerance() {
        let (_, problem) = catalog::example(1).unwrap();

        assert!(matches!(configure(&problem, -1.0, 100), Err(SimplexError::InvalidTolerance(_))));
        assert!(matches!(configure(&problem, f64::NAN, 100), Err(SimplexError::InvalidTolerance(_))));

        let mut simplex = configure(&problem, 1e-6, 100).unwrap();
        assert!((simplex.run().unwrap().objective_value - 11.0).abs() < 1e-6);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["pivot", "solve", "lp.json", "--trace", "--tolerance", "1e-6"]).unwrap();
        assert_eq!(cli.tolerance, 1e-6);
        assert!(matches!(cli.command, Commands::Solve { trace: true, .. }));
    }
}
