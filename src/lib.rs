//! standupnotes - daily journal and standup note tooling

pub mod cli;
pub mod domain;
pub mod infra;
pub mod markdown;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::{Config, Settings},
    handlers::{
        handle_completions, handle_fix_journal, handle_generate_journal, handle_generate_standup,
        handle_journal_work_done, handle_links, handle_standup_work_done,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        return handle_completions(args);
    }

    let config = Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &config)?;
    log::debug!("resolved settings: {settings:?}");

    match &cli.command {
        Command::JournalWorkDone(args) => handle_journal_work_done(args, &settings),
        Command::StandupWorkDone(args) => handle_standup_work_done(args, &settings),
        Command::Links(args) => handle_links(args, &settings),
        Command::GenerateJournal(args) => handle_generate_journal(args, &settings),
        Command::GenerateStandup(args) => handle_generate_standup(args, &settings),
        Command::FixJournal(args) => handle_fix_journal(args, &settings),
        Command::Completions(args) => handle_completions(args),
    }
}

/// `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
