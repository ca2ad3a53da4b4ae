//! Running external note-creation programs.

use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Errors from running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}\nstderr: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Splits a configured command line on whitespace.
///
/// No shell quoting is interpreted: `notes new "daily log"` yields four
/// arguments.
pub fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}

/// Runs `argv[0]` with the remaining arguments and returns its standard
/// output with one trailing newline removed.
///
/// # Errors
///
/// Returns `ExecError::EmptyCommand` if `argv` is empty,
/// `ExecError::Spawn` if the program can't be started, and
/// `ExecError::Failed` (carrying captured stderr) on a nonzero exit.
pub fn run_capturing_stdout<S: AsRef<str>>(argv: &[S]) -> Result<String, ExecError> {
    let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;
    let program: &str = program.as_ref();
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();

    let output = Command::new(program)
        .args(&args)
        .output()
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(ExecError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.strip_suffix('\n').unwrap_or(&stdout).to_string())
}
