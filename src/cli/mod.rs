//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::NoteType;
use output::OutputFormat;

/// standupnotes - daily journal and standup note tooling
#[derive(Parser, Debug)]
#[command(name = "standupnotes", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ./.standupnotes.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Journal notes directory
    #[arg(long, global = true)]
    pub journal_dir: Option<PathBuf>,

    /// Standup notes directory
    #[arg(long, global = true)]
    pub standup_dir: Option<PathBuf>,

    /// Journal section holding work done (can be specified multiple times)
    #[arg(long = "journal-work-done-section", global = true, action = ArgAction::Append)]
    pub journal_work_done_sections: Vec<String>,

    /// Standup section receiving work done
    #[arg(long, global = true)]
    pub standup_work_done_section: Option<String>,

    /// Text to leave out of journal section content (can be specified multiple times)
    #[arg(long = "journal-skip-text", global = true, action = ArgAction::Append)]
    pub journal_skip_text: Vec<String>,

    /// Text to leave out of standup section content (can be specified multiple times)
    #[arg(long = "standup-skip-text", global = true, action = ArgAction::Append)]
    pub standup_skip_text: Vec<String>,

    /// Link titles that refer to the previous journal (can be specified multiple times)
    #[arg(long = "journal-link-previous-title", global = true, action = ArgAction::Append)]
    pub journal_link_previous_titles: Vec<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export work done from the journal for a given day
    ///
    /// If no journal exists for the day, the newest journal within the
    /// previous 30 days is used.
    JournalWorkDone(WorkDoneArgs),

    /// Export work done from the standup for a given day
    ///
    /// If no standup exists for the day, the newest standup within the
    /// previous 30 days is used.
    StandupWorkDone(WorkDoneArgs),

    /// List links to adjacent notes
    Links(LinksArgs),

    /// Create today's journal and point its previous-day links at the last journal
    GenerateJournal(GenerateArgs),

    /// Create today's standup and copy work done from the last journal into it
    GenerateStandup(GenerateArgs),

    /// Repair previous-day links in an existing journal
    FixJournal(FixArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `journal-work-done` and `standup-work-done` commands
#[derive(Parser, Debug)]
pub struct WorkDoneArgs {
    /// Date to print work done for (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `links` command
#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Kind of note to inspect
    #[arg(short = 't', long = "type", value_enum, default_value_t = NoteType::Journal)]
    pub note_type: NoteType,

    /// Date of the note (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `generate-journal` and `generate-standup` commands
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Command that creates the note and prints its path (overrides config)
    #[arg(long)]
    pub create_cmd: Option<String>,
}

/// Arguments for the `fix-journal` command
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Date of the journal to fix (YYYY-MM-DD, default today)
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
