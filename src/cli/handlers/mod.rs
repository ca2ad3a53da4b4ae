//! Command handlers for the CLI.

mod completions;
mod fix;
mod generate;
mod links;
mod work_done;


use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use crate::domain::{FrontMatter, NoteContent, NoteType};
use crate::infra::{
    SEARCH_WINDOW_DAYS, find_most_recent_note, read_note_text, run_capturing_stdout,
    split_command,
};
use crate::markdown::NoteParser;

// Re-export public items
pub use completions::handle_completions;
pub use fix::{fix_previous_links, handle_fix_journal};
pub use generate::{handle_generate_journal, handle_generate_standup, insert_work_done};
pub use links::handle_links;
pub use work_done::{handle_journal_work_done, handle_standup_work_done};

// Re-export for tests
#[cfg(test)]
pub(crate) use fix::fix_journal_impl;
#[cfg(test)]
pub(crate) use generate::{generate_journal_impl, generate_standup_impl};

// ===========================================
// Shared Utilities
// ===========================================

/// Today's date in local time.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A note read from disk and parsed.
#[derive(Debug)]
pub(crate) struct LoadedNote {
    pub path: PathBuf,
    pub text: String,
    pub content: NoteContent,
}

impl LoadedNote {
    /// File name of the note, e.g. `2024-03-04.md`.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Reads and parses the note at `path`.
pub(crate) fn load_note(path: &Path, note_type: NoteType, skip_text: &[String]) -> Result<LoadedNote> {
    let text = read_note_text(path)
        .with_context(|| format!("failed to read {} note", note_type))?;
    let content = NoteParser::new()
        .parse_note_content(&text, skip_text, note_type)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(LoadedNote {
        path: path.to_path_buf(),
        text,
        content,
    })
}

/// Finds the file name of the newest note in `dir` dated on or before `end`.
pub(crate) fn most_recent_note_name(
    dir: &Path,
    end: NaiveDate,
    note_type: NoteType,
) -> Result<Option<String>> {
    let name = find_most_recent_note(dir, end)
        .with_context(|| format!("failed to search {} notes", note_type))?;
    match &name {
        Some(name) => log::debug!("most recent {note_type} on or before {end}: {name}"),
        None => log::debug!("no {note_type} within {SEARCH_WINDOW_DAYS} days of {end}"),
    }
    Ok(name)
}

/// Loads the newest note in `dir` dated on or before `end`.
///
/// Fails if no note falls in the search window.
pub(crate) fn load_most_recent(
    dir: &Path,
    end: NaiveDate,
    note_type: NoteType,
    skip_text: &[String],
) -> Result<LoadedNote> {
    let Some(name) = most_recent_note_name(dir, end, note_type)? else {
        bail!(
            "no {} note found in {} within {} days of {}",
            note_type,
            dir.display(),
            SEARCH_WINDOW_DAYS,
            end
        );
    };
    log::info!("using {} note {}", note_type, name);
    load_note(&dir.join(name), note_type, skip_text)
}

/// Byte offset in the original note text where the parsed body begins.
///
/// Body offsets plus this value give file offsets.
pub(crate) fn body_offset(text: &str, front_matter: &FrontMatter) -> usize {
    let rest = text.get(front_matter.end..).unwrap_or("");
    front_matter.end + (rest.len() - rest.trim_start().len())
}

/// Creates a new note and returns its path.
pub(crate) trait NoteCreator {
    fn create(&self) -> Result<PathBuf>;
}

/// Creates notes by running an external command that prints the new path.
pub(crate) struct CommandCreator {
    command: String,
}

impl CommandCreator {
    /// Picks the command from the CLI override or the configured one.
    pub(crate) fn resolve(
        cli_override: Option<&String>,
        configured: Option<&String>,
        note_type: NoteType,
    ) -> Result<Self> {
        match cli_override.or(configured) {
            Some(command) if !command.trim().is_empty() => Ok(Self {
                command: command.clone(),
            }),
            _ => bail!("no command configured to create {} notes", note_type),
        }
    }
}

impl NoteCreator for CommandCreator {
    fn create(&self) -> Result<PathBuf> {
        let argv = split_command(&self.command);
        log::info!("running note command: {}", self.command);
        let stdout = run_capturing_stdout(&argv)
            .with_context(|| format!("note command failed: {}", self.command))?;

        let path = stdout.trim();
        if path.is_empty() {
            bail!("note command printed no path: {}", self.command);
        }
        Ok(PathBuf::from(path))
    }
}
