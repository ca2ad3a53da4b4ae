//! Adjacent-link detection by dated filename conventions.
//!
//! Notes link to the previous or next note of the same series with a bare
//! `YYYY-MM-DD.md` filename, and to the other series (or, oddly, their own)
//! through a sibling directory: `../journal/...` or `../standup/...`.

use regex::Regex;
use std::ops::Range;

use super::is_absolute_url;
use super::tree::{self, Node, NodeKind, Visitor, WalkStatus};
use crate::domain::{AdjacentLink, NoteType};

/// Zero-padded year-month-day. Structural only: `2024-02-30` matches.
const DATE: &str = r"[0-9]{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12][0-9]|3[01])";

/// One row of the classification table.
#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    target: NoteType,
}

impl Rule {
    fn new(pattern: &str, target: NoteType) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("adjacency pattern is valid"),
            target,
        }
    }
}

/// Ordered classification rules per source note type.
///
/// Rules are evaluated top to bottom and the first match decides the target
/// note type. A destination matching no rule is not an adjacent link.
#[derive(Debug, Clone)]
pub struct AdjacencyRules {
    journal: Vec<Rule>,
    standup: Vec<Rule>,
}

impl AdjacencyRules {
    pub fn new() -> Self {
        let bare = format!(r"^{DATE}(?:\.md)?$");
        let journal_dir = format!(r"^\.\./journal/{DATE}(?:\.md)?$");
        let standup_dir = format!(r"^\.\./standup/{DATE}(?:\.md)?$");

        Self {
            journal: vec![
                Rule::new(&bare, NoteType::Journal),
                Rule::new(&journal_dir, NoteType::Journal),
                Rule::new(&standup_dir, NoteType::Standup),
            ],
            standup: vec![
                Rule::new(&bare, NoteType::Standup),
                Rule::new(&standup_dir, NoteType::Standup),
                Rule::new(&journal_dir, NoteType::Journal),
            ],
        }
    }

    fn rules_for(&self, source: NoteType) -> &[Rule] {
        match source {
            NoteType::Journal => &self.journal,
            NoteType::Standup => &self.standup,
        }
    }

    /// Returns the note type `dest` points to, if it is an adjacent-note
    /// destination for a note of type `source`.
    pub fn classify(&self, source: NoteType, dest: &str) -> Option<NoteType> {
        self.rules_for(source)
            .iter()
            .find(|rule| rule.pattern.is_match(dest))
            .map(|rule| rule.target)
    }
}

impl Default for AdjacencyRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects every adjacent link in the document, in document order.
///
/// Links whose first child isn't text, or whose line can't be located, are
/// skipped.
pub fn parse_adjacent_links(
    root: &Node,
    body: &str,
    source: NoteType,
    rules: &AdjacencyRules,
) -> Vec<AdjacentLink> {
    let mut collector = Collector {
        body,
        source,
        rules,
        links: Vec::new(),
    };
    match tree::walk(root, &mut collector) {
        Ok(()) => collector.links,
        Err(never) => match never {},
    }
}

struct Collector<'c> {
    body: &'c str,
    source: NoteType,
    rules: &'c AdjacencyRules,
    links: Vec<AdjacentLink>,
}

impl Collector<'_> {
    fn record(&mut self, link: &Node, dest: &str, ancestors: &[&Node]) {
        if is_absolute_url(dest) {
            return;
        }
        let Some(target) = self.rules.classify(self.source, dest) else {
            return;
        };
        let Some(title) = link.children.first().and_then(Node::as_text) else {
            return;
        };
        let Some(span) = enclosing_line(self.body, link, ancestors) else {
            return;
        };

        self.links.push(AdjacentLink {
            source_note_type: self.source,
            target_note_type: target,
            title: title.to_string(),
            target: dest.to_string(),
            link_start: span.start,
            link_end: span.end,
            target_range: destination_range(self.body, link, dest),
        });
    }
}

impl<'a> Visitor<'a> for Collector<'_> {
    type Error = std::convert::Infallible;

    fn enter(&mut self, node: &'a Node, ancestors: &[&'a Node]) -> Result<WalkStatus, Self::Error> {
        if let NodeKind::Link { dest } = &node.kind {
            self.record(node, dest, ancestors);
        }
        Ok(WalkStatus::Continue)
    }
}

/// Returns the source line of the innermost enclosing block that holds the
/// start of `link`, clipped to that block and excluding the line ending.
///
/// Inside a block quote the `>` markers are clipped from continuation lines
/// too, so every line of a quoted paragraph starts at its text.
fn enclosing_line(body: &str, link: &Node, ancestors: &[&Node]) -> Option<Range<usize>> {
    let block = ancestors.iter().rev().find(|n| n.kind.is_line_block())?;
    let at = link.range.start;
    if at > body.len() || !body.is_char_boundary(at) {
        return None;
    }

    let line_start = body[..at].rfind('\n').map_or(0, |i| i + 1);
    let line_end = body[at..].find('\n').map_or(body.len(), |i| at + i);
    let line_end = line_end
        .min(block.range.end)
        .min(body.len());
    let mut line_start = line_start.max(block.range.start);

    let quoted = ancestors.iter().any(|n| n.kind == NodeKind::BlockQuote);
    if quoted && line_start > block.range.start {
        let prefix = body.get(line_start..at)?;
        line_start += prefix.len() - prefix.trim_start_matches(['>', ' ', '\t']).len();
    }

    let line = body.get(line_start..line_end)?;
    let trimmed_end = line_start + line.trim_end_matches('\r').len();
    (line_start < trimmed_end).then_some(line_start..trimmed_end)
}

/// Locates `dest` in the inline source of `link`, after the `](` that closes
/// the link text. Reference-style links have no inline destination.
fn destination_range(body: &str, link: &Node, dest: &str) -> Option<Range<usize>> {
    let text_end = link
        .children
        .last()
        .map_or(link.range.start, |child| child.range.end);
    let source = body.get(text_end..link.range.end)?;
    let open = source.find("](")? + 2;
    let start = text_end + open + source[open..].find(dest)?;
    Some(start..start + dest.len())
}
