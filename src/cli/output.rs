//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{AdjacentLink, NoteType, Section};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A section selected for export.
#[derive(Debug, Serialize)]
pub struct SectionListing {
    pub note: String,
    pub title: String,
    pub content: String,
}

impl SectionListing {
    pub fn new(note: &str, section: &Section) -> Self {
        Self {
            note: note.to_string(),
            title: section.title.clone(),
            content: section.content.clone(),
        }
    }
}

/// An adjacent link found in a note.
#[derive(Debug, Serialize)]
pub struct LinkListing {
    pub note: String,
    pub title: String,
    pub target: String,
    pub source_type: NoteType,
    pub target_type: NoteType,
    pub line: String,
}

impl LinkListing {
    pub fn new(note: &str, body: &str, link: &AdjacentLink) -> Self {
        Self {
            note: note.to_string(),
            title: link.title.clone(),
            target: link.target.clone(),
            source_type: link.source_note_type,
            target_type: link.target_note_type,
            line: body
                .get(link.link_start..link.link_end)
                .unwrap_or_default()
                .to_string(),
        }
    }
}
