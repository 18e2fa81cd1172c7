//! relsh CLI entry point.
//!
//! Usage:
//!   relsh                      # Interactive session
//!   relsh -c <line>            # Execute one line and exit
//!   relsh script.rsh           # Run a script, one line at a time

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use relsh_repl::Repl;

fn main() -> ExitCode {
    // Respects RUST_LOG.
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let args: Vec<String> = env::args().collect();
    let user = env::var("USER").unwrap_or_else(|_| "guest".to_string());

    match args.get(1).map(|s| s.as_str()) {
        None => {
            relsh_repl::run(&user)?;
            Ok(ExitCode::SUCCESS)
        }

        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }

        Some("--version" | "-V") => {
            println!("relsh {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }

        Some("-c") => {
            let line = args.get(2).context("-c requires a command argument")?;
            let mut repl = Repl::new(&user)?;
            match repl.process_line(line) {
                Ok(Some(output)) => {
                    println!("{output}");
                    Ok(ExitCode::SUCCESS)
                }
                Ok(None) => Ok(ExitCode::SUCCESS),
                Err(e) if Repl::is_exit(&e) => Ok(ExitCode::SUCCESS),
                Err(e) => Err(e),
            }
        }

        Some(path) if !path.starts_with('-') => run_script(&user, path),

        Some(unknown) => {
            eprintln!("unknown option: {unknown}");
            eprintln!("run 'relsh --help' for usage");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_help() {
    println!(
        r#"relsh v{}

Usage:
  relsh                  Interactive session
  relsh -c <line>        Execute one line and exit
  relsh <script.rsh>     Run a script file line by line

Options:
  -c <line>              Execute a command line and exit
  -h, --help             Show this help
  -V, --version          Show version

Inside a session, 'help' lists topics and 'exit' leaves."#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Run a script: one command per line, comments start with `//`.
/// Errors are reported and the script continues; the exit code reflects
/// whether every line succeeded.
fn run_script(user: &str, path: &str) -> Result<ExitCode> {
    let source =
        std::fs::read_to_string(path).with_context(|| format!("failed to read script: {path}"))?;

    let mut repl = Repl::new(user)?;
    let mut failed = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        match repl.process_line(trimmed) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => {
                if repl.last_line_failed() {
                    failed = true;
                }
            }
            Err(e) if Repl::is_exit(&e) => break,
            Err(e) => return Err(e),
        }
    }

    if failed {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
