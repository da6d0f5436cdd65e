use std::{
    env,
    io::{self, BufRead},
};

use shell_words::split;
use tracing::warn;

use crate::cli::context::AppContext;
use crate::errors::CliError;

/// How a run ended once start-up succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// A command failed; the error has already been printed.
    CommandFailed,
}

/// Runs the command given on the command line, or a script read from stdin when
/// there are no arguments.
pub fn run_cli() -> Result<RunOutcome, CliError> {
    let mut context = AppContext::new()?;
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        run_script(&mut context, io::stdin().lock())
    } else {
        Ok(run_args(&mut context, &args))
    }
}

fn run_args(context: &mut AppContext, args: &[String]) -> RunOutcome {
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match context.dispatch(&args[0], &rest) {
        Ok(()) | Err(CliError::ExitRequested) => RunOutcome::Success,
        Err(err) => {
            context.report_error(&err);
            RunOutcome::CommandFailed
        }
    }
}

/// Executes one command per line. Failing lines are reported and the script
/// continues; the outcome records whether any line failed.
pub fn run_script(context: &mut AppContext, input: impl BufRead) -> Result<RunOutcome, CliError> {
    let mut outcome = RunOutcome::Success;
    for line in input.lines() {
        if !context.running {
            break;
        }
        let line = line?;
        if let Err(err) = handle_line(context, &line) {
            context.report_error(&err);
            outcome = RunOutcome::CommandFailed;
        }
    }
    Ok(outcome)
}

fn handle_line(context: &mut AppContext, line: &str) -> Result<(), CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }
    let tokens = split(trimmed).map_err(|err| {
        warn!(line = trimmed, error = %err, "unparsable script line");
        CliError::usage(format!("Could not parse line: {err}"))
    })?;
    let Some((command, rest)) = tokens.split_first() else {
        return Ok(());
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match context.dispatch(command, &args) {
        Err(CliError::ExitRequested) => {
            context.running = false;
            Ok(())
        }
        other => other,
    }
}
