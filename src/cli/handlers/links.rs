//! Adjacent link listing.

use anyhow::Result;

use super::{load_most_recent, today};
use crate::cli::LinksArgs;
use crate::cli::config::Settings;
use crate::cli::output::{LinkListing, Output, OutputFormat};
use crate::domain::NoteType;

pub fn handle_links(args: &LinksArgs, settings: &Settings) -> Result<()> {
    let date = args.date.unwrap_or_else(today);
    let (dir, skip_text) = match args.note_type {
        NoteType::Journal => (&settings.journal_dir, &settings.journal_skip_text),
        NoteType::Standup => (&settings.standup_dir, &settings.standup_skip_text),
    };

    let note = load_most_recent(dir, date, args.note_type, skip_text)?;
    let name = note.file_name();
    let body = &note.content.body;
    let listings: Vec<LinkListing> = note
        .content
        .adjacent_links
        .iter()
        .map(|link| LinkListing::new(&name, body, link))
        .collect();

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No adjacent links in {}.", name);
            } else {
                println!("{:<12}  {:<30}  {:>8}", "Title", "Target", "Type");
                println!("{:<12}  {:<30}  {:>8}", "-".repeat(12), "-".repeat(30), "-".repeat(8));
                for listing in &listings {
                    println!(
                        "{:<12}  {:<30}  {:>8}",
                        listing.title, listing.target, listing.target_type
                    );
                }
                println!();
                println!("{} link(s)", listings.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(listings))?);
        }
    }
    Ok(())
}
