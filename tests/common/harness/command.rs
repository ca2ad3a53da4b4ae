//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Environment variables that would leak the caller's setup into a test run.
const ISOLATED_ENV: &[&str] = &[
    "STANDUP_JOURNAL_DIR",
    "STANDUP_STANDUP_DIR",
    "STANDUP_JOURNAL_CREATE_CMD",
    "STANDUP_STANDUP_CREATE_CMD",
    "STANDUP_STANDUP_WORK_DONE_SECTION",
    "RUST_LOG",
];

/// Fluent wrapper around `assert_cmd::Command` for the `standupnotes` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct NotesCommand {
    args: Vec<String>,
}

impl NotesCommand {
    /// Creates a new command for the `standupnotes` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd =
            Command::cargo_bin("standupnotes").expect("Failed to find standupnotes binary");
        for var in ISOLATED_ENV {
            cmd.env_remove(var);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `journal-work-done` command for `date`.
    pub fn journal_work_done(self, date: &str) -> Self {
        self.args(["journal-work-done", "--date", date])
    }

    /// Configures for the `standup-work-done` command for `date`.
    pub fn standup_work_done(self, date: &str) -> Self {
        self.args(["standup-work-done", "--date", date])
    }

    /// Configures for the `links` command.
    pub fn links(self, note_type: &str, date: &str) -> Self {
        self.args(["links", "--type", note_type, "--date", date])
    }

    /// Configures for the `fix-journal` command for `date`.
    pub fn fix_journal(self, date: &str) -> Self {
        self.args(["fix-journal", "--date", date])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NotesCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        NotesCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let cmd = NotesCommand::new().config(&path);
        let args = cmd.get_args();
        assert_eq!(args[0], "--config");
        assert_eq!(args[1], path.to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = NotesCommand::new()
            .journal_work_done("2024-03-04")
            .format_json();
        assert_eq!(
            cmd.get_args(),
            ["journal-work-done", "--date", "2024-03-04", "--format", "json"]
        );
    }
}
