//! Parse results: front matter, sections, adjacent links.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

use super::NoteType;

/// Location of the stripped preamble within the original note text.
///
/// Both offsets are zero when the note has no front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    /// Byte offset where the opening delimiter match begins.
    pub start: usize,
    /// Byte offset immediately after the closing delimiter line.
    pub end: usize,
    /// Metadata parsed from the preamble, if it was valid YAML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<FrontMatterMeta>,
}

impl FrontMatter {
    /// Returns true if a front-matter block was found.
    pub fn is_present(&self) -> bool {
        self.end > 0
    }
}

/// Structured metadata from the front-matter block.
///
/// Only `tags` is interpreted; every other key is kept as raw YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatterMeta {
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Accepts `tags: work` as well as `tags: [work, review]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(tag) => vec![tag],
        OneOrMany::Many(tags) => tags,
        OneOrMany::Null(()) => Vec::new(),
    })
}

/// A heading-delimited region of a note body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Text of the heading.
    pub title: String,
    /// Reconstructed content between this heading and the next.
    pub content: String,
    /// Byte offset in the body just after the heading line.
    pub content_start: usize,
    /// Byte offset in the body where the next heading starts (or body end).
    pub content_end: usize,
}

impl Section {
    /// Returns the raw body text this section covers.
    ///
    /// Returns an empty string if the offsets don't belong to `body`.
    pub fn source<'a>(&self, body: &'a str) -> &'a str {
        body.get(self.content_start..self.content_end).unwrap_or("")
    }
}

/// A link inside a note pointing to the previous or next dated note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjacentLink {
    /// Type of the note the link is written in.
    pub source_note_type: NoteType,
    /// Type of the note the link points to.
    pub target_note_type: NoteType,
    /// Visible text of the link.
    pub title: String,
    /// Destination exactly as written.
    pub target: String,
    /// Start of the line containing the link, as a body offset.
    pub link_start: usize,
    /// End of the line containing the link (exclusive, newline not included).
    pub link_end: usize,
    /// Body offsets of the destination inside the link's own source, when it
    /// is written inline. Reference-style links have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_range: Option<Range<usize>>,
}

/// Everything derived from one note.
///
/// All offsets in `sections` and `adjacent_links` are relative to `body`,
/// which is the text after the front matter with surrounding whitespace
/// trimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NoteContent {
    pub body: String,
    pub sections: Vec<Section>,
    pub adjacent_links: Vec<AdjacentLink>,
    pub front_matter: FrontMatter,
}

impl NoteContent {
    /// Returns the sections whose titles match any of `titles`, ignoring
    /// case, in document order.
    pub fn sections_titled<S: AsRef<str>>(&self, titles: &[S]) -> Vec<&Section> {
        let wanted: Vec<String> = titles.iter().map(|t| t.as_ref().to_lowercase()).collect();
        self.sections
            .iter()
            .filter(|s| wanted.contains(&s.title.to_lowercase()))
            .collect()
    }

    /// Returns the first section with the given title, ignoring case.
    pub fn section(&self, title: &str) -> Option<&Section> {
        let wanted = title.to_lowercase();
        self.sections
            .iter()
            .find(|s| s.title.to_lowercase() == wanted)
    }
}
