//! Markdown structure extraction for daily notes.
//!
//! Parsing runs in fixed stages over the same immutable body:
//! front matter is stripped, the remaining text is folded into a node tree,
//! and two independent passes derive the section list and the adjacent-link
//! list from that tree.

mod adjacent;
mod frontmatter;
mod sections;
mod tree;

pub use adjacent::AdjacencyRules;
pub use frontmatter::{body_after, strip_front_matter};
pub use sections::MAX_LIST_DEPTH;

use pulldown_cmark::Options;
use thiserror::Error;
use url::Url;

use crate::domain::{NoteContent, NoteType};

/// Errors that abort a parse. No partial result is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("list nesting too deep: maximum allowed is {max} levels")]
    ListNestingTooDeep { max: usize },

    #[error("malformed markdown event stream near byte {offset}")]
    UnbalancedEvents { offset: usize },
}

/// Parses note text into sections and adjacent links.
///
/// Holds only configuration that is fixed at construction (parser options and
/// the compiled link classification rules), so a single parser can be shared
/// and reused across notes.
///
/// # Example
///
/// ```
/// use standupnotes::domain::NoteType;
/// use standupnotes::markdown::NoteParser;
///
/// let text = "---\ntags: [daily]\n---\n# Done\n- fixed the build\n\n[Yesterday](2024-03-04.md)\n";
/// let note = NoteParser::new()
///     .parse_note_content(text, &[], NoteType::Journal)
///     .unwrap();
///
/// assert_eq!(note.sections[0].title, "Done");
/// assert_eq!(note.sections[0].content, "* fixed the build\n");
/// assert_eq!(note.adjacent_links[0].target, "2024-03-04.md");
/// ```
#[derive(Debug, Clone)]
pub struct NoteParser {
    options: Options,
    rules: AdjacencyRules,
}

impl NoteParser {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            rules: AdjacencyRules::new(),
        }
    }

    /// Parses one note.
    ///
    /// `skip_text` lists text runs to leave out of section content; matching
    /// is exact and case-sensitive. `note_type` is the kind of the note being
    /// parsed and drives adjacent-link classification.
    ///
    /// All offsets in the result are relative to `NoteContent::body`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::ListNestingTooDeep` if lists nest deeper than
    /// [`MAX_LIST_DEPTH`], or `ParseError::UnbalancedEvents` if the markdown
    /// tree can't be built.
    pub fn parse_note_content(
        &self,
        content: &str,
        skip_text: &[String],
        note_type: NoteType,
    ) -> Result<NoteContent, ParseError> {
        let front_matter = strip_front_matter(content);
        let body = body_after(content, &front_matter);

        let root = tree::build(body, self.options)?;
        let sections = sections::parse_sections(&root, body, skip_text)?;
        let adjacent_links = adjacent::parse_adjacent_links(&root, body, note_type, &self.rules);

        Ok(NoteContent {
            body: body.to_string(),
            sections,
            adjacent_links,
            front_matter,
        })
    }
}

impl Default for NoteParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true if `s` is an absolute URL with both a scheme and a host.
pub fn is_absolute_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JOURNAL: &str = r#"---
tags:
  - journal
---

[Previous](2024-03-03.md) | [Standup](../standup/2024-03-04.md)

# Worked on

- What did I work on today?
- reviewed [the RFC](https://example.com/rfc)
- paired on the parser
    - fixed list nesting

# Notes

Nothing much.
"#;

    fn skip() -> Vec<String> {
        vec!["What did I work on today?".to_string()]
    }

    #[test]
    fn parses_full_journal() {
        let note = NoteParser::new()
            .parse_note_content(JOURNAL, &skip(), NoteType::Journal)
            .unwrap();

        assert!(note.body.starts_with("[Previous]"));
        assert!(note.body.ends_with("Nothing much."));
        assert_eq!(note.front_matter.meta.as_ref().unwrap().tags, vec!["journal"]);

        let titles: Vec<_> = note.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Worked on", "Notes"]);
        assert_eq!(
            note.sections[0].content,
            "* \n* reviewed [the RFC](https://example.com/rfc)\n* paired on the parser\n    * fixed list nesting\n"
        );
        assert_eq!(note.sections[1].content, "");

        assert_eq!(note.adjacent_links.len(), 2);
        assert_eq!(note.adjacent_links[0].target_note_type, NoteType::Journal);
        assert_eq!(note.adjacent_links[1].target_note_type, NoteType::Standup);
    }

    #[test]
    fn offsets_are_relative_to_trimmed_body() {
        let note = NoteParser::new()
            .parse_note_content(JOURNAL, &[], NoteType::Journal)
            .unwrap();

        let link = &note.adjacent_links[0];
        assert_eq!(link.link_start, 0);
        assert_eq!(
            &note.body[link.link_start..link.link_end],
            "[Previous](2024-03-03.md) | [Standup](../standup/2024-03-04.md)"
        );

        let worked_on = &note.sections[0];
        assert!(
            worked_on
                .source(&note.body)
                .trim_start()
                .starts_with("- What did I work on today?")
        );
        assert_eq!(
            worked_on.content_end,
            note.body.find("# Notes").unwrap()
        );
    }

    #[test]
    fn nesting_error_aborts_whole_parse() {
        let text = "# Deep\n- a\n    - b\n        - c\n            - d\n\n[Next](2024-03-05.md)";
        let err = NoteParser::new()
            .parse_note_content(text, &[], NoteType::Standup)
            .unwrap_err();
        assert!(matches!(err, ParseError::ListNestingTooDeep { .. }));
    }

    #[test]
    fn parsing_is_repeatable() {
        let parser = NoteParser::new();
        let first = parser
            .parse_note_content(JOURNAL, &skip(), NoteType::Journal)
            .unwrap();
        let second = parser
            .parse_note_content(JOURNAL, &skip(), NoteType::Journal)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn note_without_front_matter_or_headings() {
        let note = NoteParser::new()
            .parse_note_content("  just text\n", &[], NoteType::Journal)
            .unwrap();
        assert_eq!(note.body, "just text");
        assert!(note.sections.is_empty());
        assert!(note.adjacent_links.is_empty());
        assert!(!note.front_matter.is_present());
    }

    #[test]
    fn absolute_url_detection() {
        assert!(is_absolute_url("https://example.com"));
        assert!(is_absolute_url("http://example.com/a/b?c=d"));
        assert!(!is_absolute_url("2024-03-04.md"));
        assert!(!is_absolute_url("../standup/2024-03-04.md"));
        assert!(!is_absolute_url("/abs/path.md"));
        assert!(!is_absolute_url("mailto:someone@example.com"));
        assert!(!is_absolute_url("file:///tmp/x.md"));
        assert!(!is_absolute_url(""));
    }
}
