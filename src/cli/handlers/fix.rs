//! Previous-journal link repair (fix-journal).

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate};
use std::ops::Range;

use super::{LoadedNote, body_offset, load_note, most_recent_note_name, today};
use crate::cli::FixArgs;
use crate::cli::config::Settings;
use crate::domain::{NoteContent, NoteType};
use crate::infra::{SEARCH_WINDOW_DAYS, note_path_for_date, write_note_text};

pub fn handle_fix_journal(args: &FixArgs, settings: &Settings) -> Result<()> {
    let date = args.date.unwrap_or_else(today);
    let fixed = fix_journal_impl(settings, date)?;
    println!("Fixed {} links", fixed);
    Ok(())
}

/// Repairs the journal for exactly `date`. Returns the number of links fixed.
pub(crate) fn fix_journal_impl(settings: &Settings, date: NaiveDate) -> Result<usize> {
    let path = note_path_for_date(&settings.journal_dir, date);
    if !path.is_file() {
        bail!("no journal for {} at {}", date, path.display());
    }

    let Some(previous) = most_recent_note_name(
        &settings.journal_dir,
        date - Duration::days(1),
        NoteType::Journal,
    )?
    else {
        bail!(
            "no journal before {} within {} days in {}",
            date,
            SEARCH_WINDOW_DAYS,
            settings.journal_dir.display()
        );
    };

    let note = load_note(&path, NoteType::Journal, &settings.journal_skip_text)?;
    rewrite_previous_links(&note, &settings.journal_link_previous_titles, &previous)
}

/// Points the previous-journal links of `note` at `previous` and saves the
/// file if anything changed.
pub(crate) fn rewrite_previous_links(
    note: &LoadedNote,
    previous_titles: &[String],
    previous: &str,
) -> Result<usize> {
    let (text, fixed) = fix_previous_links(&note.text, &note.content, previous_titles, previous);
    if fixed > 0 {
        write_note_text(&note.path, &text)
            .with_context(|| format!("failed to update {}", note.path.display()))?;
        log::info!("fixed {} link(s) in {}", fixed, note.path.display());
    } else {
        log::debug!("no links to fix in {}", note.path.display());
    }
    Ok(fixed)
}

/// Rewrites journal links titled with one of `previous_titles` so they point
/// at `previous_name`.
///
/// `text` is the full note text `note` was parsed from. Only each link's own
/// destination is replaced. Links without an inline destination are logged
/// and left alone. Returns the new text and the number of links rewritten.
pub fn fix_previous_links(
    text: &str,
    note: &NoteContent,
    previous_titles: &[String],
    previous_name: &str,
) -> (String, usize) {
    let offset = body_offset(text, &note.front_matter);
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for link in note.adjacent_links.iter().filter(|link| {
        link.target_note_type == NoteType::Journal
            && previous_titles.iter().any(|title| *title == link.title)
            && link.target != previous_name
    }) {
        let range = link
            .target_range
            .as_ref()
            .map(|r| offset + r.start..offset + r.end)
            .filter(|r| text.get(r.clone()) == Some(link.target.as_str()));
        match range {
            Some(range) => ranges.push(range),
            None => log::warn!(
                "cannot locate the destination of [{}]({}); left unchanged",
                link.title,
                link.target
            ),
        }
    }

    let mut fixed = text.to_string();
    // Last link first so earlier offsets stay valid.
    for range in ranges.iter().rev() {
        fixed.replace_range(range.clone(), previous_name);
    }

    (fixed, ranges.len())
}
