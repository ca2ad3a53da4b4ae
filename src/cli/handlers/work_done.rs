//! Work-done export handlers (journal-work-done, standup-work-done).

use anyhow::Result;
use chrono::Duration;

use super::{LoadedNote, load_most_recent, today};
use crate::cli::WorkDoneArgs;
use crate::cli::config::Settings;
use crate::cli::output::{Output, OutputFormat, SectionListing};
use crate::domain::{NoteType, Section};

pub fn handle_journal_work_done(args: &WorkDoneArgs, settings: &Settings) -> Result<()> {
    let date = args.date.unwrap_or_else(|| today() - Duration::days(1));
    let note = load_most_recent(
        &settings.journal_dir,
        date,
        NoteType::Journal,
        &settings.journal_skip_text,
    )?;

    let sections = note
        .content
        .sections_titled(&settings.journal_work_done_sections);
    print_sections(&note, &sections, args.format)
}

pub fn handle_standup_work_done(args: &WorkDoneArgs, settings: &Settings) -> Result<()> {
    let date = args.date.unwrap_or_else(today);
    let note = load_most_recent(
        &settings.standup_dir,
        date,
        NoteType::Standup,
        &settings.standup_skip_text,
    )?;

    let sections = note
        .content
        .sections_titled(std::slice::from_ref(&settings.standup_work_done_section));
    print_sections(&note, &sections, args.format)
}

fn print_sections(note: &LoadedNote, sections: &[&Section], format: OutputFormat) -> Result<()> {
    if sections.is_empty() {
        log::warn!("no work-done sections in {}", note.path.display());
    }

    match format {
        OutputFormat::Human => {
            for section in sections {
                println!("### {}", section.title);
                println!("{}", section.content);
            }
        }
        OutputFormat::Json => {
            let name = note.file_name();
            let listings: Vec<SectionListing> = sections
                .iter()
                .map(|s| SectionListing::new(&name, s))
                .collect();
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}
