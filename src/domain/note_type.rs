//! The two parallel note series: journals and standups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of daily note a document belongs to.
///
/// Journals and standups live in sibling directories (`../journal/`,
/// `../standup/`) and link to each other by dated filename.
///
/// # Examples
///
/// ```
/// use standupnotes::domain::NoteType;
///
/// let kind: NoteType = "Standup".parse().unwrap();
/// assert_eq!(kind, NoteType::Standup);
/// assert_eq!(kind.paired(), NoteType::Journal);
/// assert_eq!(kind.to_string(), "standup");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Journal,
    Standup,
}

/// Error returned when parsing an unknown note type.
#[derive(Debug, Clone)]
pub struct ParseNoteTypeError(String);

impl fmt::Display for ParseNoteTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown note type '{}': expected 'journal' or 'standup'",
            self.0
        )
    }
}

impl std::error::Error for ParseNoteTypeError {}

impl NoteType {
    /// Returns the other note kind of the pair.
    pub fn paired(self) -> Self {
        match self {
            NoteType::Journal => NoteType::Standup,
            NoteType::Standup => NoteType::Journal,
        }
    }

    /// Returns the lowercase name, which is also the directory name used in
    /// relative links between the two series.
    pub fn as_str(self) -> &'static str {
        match self {
            NoteType::Journal => "journal",
            NoteType::Standup => "standup",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NoteType {
    type Err = ParseNoteTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "journal" => Ok(NoteType::Journal),
            "standup" => Ok(NoteType::Standup),
            _ => Err(ParseNoteTypeError(s.to_string())),
        }
    }
}
