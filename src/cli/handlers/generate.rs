//! Note generation handlers (generate-journal, generate-standup).

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;

use super::fix::rewrite_previous_links;
use super::{CommandCreator, NoteCreator, body_offset, load_note, most_recent_note_name, today};
use crate::cli::GenerateArgs;
use crate::cli::config::Settings;
use crate::domain::{NoteContent, NoteType, Section};
use crate::infra::write_note_text;

pub fn handle_generate_journal(args: &GenerateArgs, settings: &Settings) -> Result<()> {
    let creator = CommandCreator::resolve(
        args.create_cmd.as_ref(),
        settings.journal_create_cmd.as_ref(),
        NoteType::Journal,
    )?;
    let path = generate_journal_impl(settings, &creator, today())?;
    println!("{}", path.display());
    Ok(())
}

pub fn handle_generate_standup(args: &GenerateArgs, settings: &Settings) -> Result<()> {
    let creator = CommandCreator::resolve(
        args.create_cmd.as_ref(),
        settings.standup_create_cmd.as_ref(),
        NoteType::Standup,
    )?;
    let path = generate_standup_impl(settings, &creator, today())?;
    println!("{}", path.display());
    Ok(())
}

/// Creates the journal for `today` and points its previous-day links at
/// the newest earlier journal.
pub(crate) fn generate_journal_impl<C: NoteCreator>(
    settings: &Settings,
    creator: &C,
    today: NaiveDate,
) -> Result<PathBuf> {
    let previous = most_recent_note_name(
        &settings.journal_dir,
        today - Duration::days(1),
        NoteType::Journal,
    )?;

    let path = creator.create()?;
    log::info!("created journal {}", path.display());

    let Some(previous) = previous else {
        log::warn!("no earlier journal found; links left unchanged");
        return Ok(path);
    };

    let note = load_note(&path, NoteType::Journal, &settings.journal_skip_text)?;
    rewrite_previous_links(&note, &settings.journal_link_previous_titles, &previous)?;
    Ok(path)
}

/// Creates the standup for `today` and fills its work-done section from
/// the newest earlier journal.
pub(crate) fn generate_standup_impl<C: NoteCreator>(
    settings: &Settings,
    creator: &C,
    today: NaiveDate,
) -> Result<PathBuf> {
    let path = creator.create()?;
    log::info!("created standup {}", path.display());

    let Some(journal_name) = most_recent_note_name(
        &settings.journal_dir,
        today - Duration::days(1),
        NoteType::Journal,
    )?
    else {
        log::warn!("no earlier journal found; standup left unchanged");
        return Ok(path);
    };

    let journal = load_note(
        &settings.journal_dir.join(&journal_name),
        NoteType::Journal,
        &settings.journal_skip_text,
    )?;
    let work_done = journal
        .content
        .sections_titled(&settings.journal_work_done_sections);

    let standup = load_note(&path, NoteType::Standup, &settings.standup_skip_text)?;
    match insert_work_done(
        &standup.text,
        &standup.content,
        &settings.standup_work_done_section,
        &work_done,
    ) {
        Some(text) => {
            write_note_text(&path, &text)
                .with_context(|| format!("failed to update {}", path.display()))?;
            log::info!("copied work done from {}", journal_name);
        }
        None => log::debug!(
            "section '{}' missing or already filled in {}",
            settings.standup_work_done_section,
            path.display()
        ),
    }
    Ok(path)
}

/// Appends the content of `work_done` to the standup section titled
/// `section_title`.
///
/// Returns `None` when the section doesn't exist, already has content, or
/// there is nothing to copy. Prose paragraphs don't count as content, so a
/// prompt line under the heading stays above the inserted list.
pub fn insert_work_done(
    text: &str,
    standup: &NoteContent,
    section_title: &str,
    work_done: &[&Section],
) -> Option<String> {
    let section = standup.section(section_title)?;
    if !section.content.trim().is_empty() {
        return None;
    }

    let block: String = work_done
        .iter()
        .map(|s| s.content.as_str())
        .filter(|content| !content.trim().is_empty())
        .map(|content| {
            if content.ends_with('\n') {
                content.to_string()
            } else {
                format!("{content}\n")
            }
        })
        .collect();
    if block.is_empty() {
        return None;
    }

    let at = body_offset(text, &standup.front_matter) + section.content_end;
    let head = text.get(..at)?;
    let tail = text.get(at..)?;

    let separator = if head.ends_with("\n\n") {
        ""
    } else if head.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    };

    let mut out = String::with_capacity(text.len() + block.len() + 2);
    out.push_str(head);
    out.push_str(separator);
    out.push_str(&block);
    if !tail.trim().is_empty() {
        out.push('\n');
        out.push_str(tail);
    }
    Some(out)
}
