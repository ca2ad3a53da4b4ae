//! Core types: NoteType, Section, AdjacentLink, NoteContent

mod content;
mod note_type;

pub use content::{AdjacentLink, FrontMatter, FrontMatterMeta, NoteContent, Section};
pub use note_type::{NoteType, ParseNoteTypeError};
