//! Heading-delimited section segmentation with content reconstruction.

use super::ParseError;
use super::is_absolute_url;
use super::tree::{self, Node, NodeKind, Visitor, WalkStatus};
use crate::domain::Section;

/// Deepest list nesting accepted before the parse is rejected.
pub const MAX_LIST_DEPTH: usize = 3;

const INDENT: &str = "    ";

/// Splits the document into sections, one per heading.
///
/// A document without headings yields no sections.
///
/// # Errors
///
/// Returns `ParseError::ListNestingTooDeep` if lists nest deeper than
/// [`MAX_LIST_DEPTH`]. No sections are returned in that case.
pub fn parse_sections(
    root: &Node,
    body: &str,
    skip_text: &[String],
) -> Result<Vec<Section>, ParseError> {
    let mut segmenter = Segmenter {
        body,
        skip_text,
        current: None,
        list_depth: 0,
        sections: Vec::new(),
    };
    tree::walk(root, &mut segmenter)?;

    if let Some(mut last) = segmenter.current.take() {
        last.content_end = body.len();
        segmenter.sections.push(last);
    }
    Ok(segmenter.sections)
}

struct Segmenter<'s> {
    body: &'s str,
    skip_text: &'s [String],
    current: Option<Section>,
    list_depth: usize,
    sections: Vec<Section>,
}

impl Segmenter<'_> {
    fn start_section(&mut self, heading: &Node) {
        if let Some(mut done) = self.current.take() {
            done.content_end = heading.range.start.max(done.content_start);
            self.sections.push(done);
        }

        self.current = Some(Section {
            title: heading.direct_text(),
            content: String::new(),
            content_start: line_end_after(self.body, heading.range.end),
            content_end: 0,
        });
    }

    fn content(&mut self) -> Option<&mut String> {
        self.current.as_mut().map(|s| &mut s.content)
    }

    fn push(&mut self, text: &str) {
        if let Some(content) = self.content() {
            content.push_str(text);
        }
    }

    /// Starts a new line unless nothing has been written yet.
    fn separate(&mut self) {
        if let Some(content) = self.content() {
            if !content.is_empty() {
                content.push('\n');
            }
        }
    }

    fn is_skipped(&self, text: &str) -> bool {
        text.is_empty() || self.skip_text.iter().any(|s| s == text)
    }
}

impl<'a> Visitor<'a> for Segmenter<'_> {
    type Error = ParseError;

    fn enter(&mut self, node: &'a Node, ancestors: &[&'a Node]) -> Result<WalkStatus, ParseError> {
        match &node.kind {
            NodeKind::Heading => {
                self.start_section(node);
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::CodeBlock { info } => {
                self.separate();
                self.push("```");
                self.push(info.as_deref().unwrap_or(""));
                self.push("\n");
            }
            NodeKind::BlockQuote => {
                self.separate();
                self.push("> ");
            }
            NodeKind::Text(text) => {
                if !in_paragraph_or_heading(ancestors) && !self.is_skipped(text) {
                    self.push(text);
                }
            }
            NodeKind::Code(code) => {
                self.push("`");
                self.push(code);
                self.push("`");
            }
            NodeKind::LineBreak => {
                if !in_paragraph_or_heading(ancestors) {
                    self.push(" ");
                }
            }
            NodeKind::Link { dest } if is_absolute_url(dest) => {
                let rendered = format!("[{}]({})", node.plain_text(), dest.trim());
                self.push(&rendered);
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::List => {
                self.list_depth += 1;
                if self.list_depth > MAX_LIST_DEPTH {
                    return Err(ParseError::ListNestingTooDeep {
                        max: MAX_LIST_DEPTH,
                    });
                }
            }
            NodeKind::Item => {
                self.separate();
                let level = self.list_depth.clamp(1, MAX_LIST_DEPTH);
                let marker = format!("{}* ", INDENT.repeat(level - 1));
                self.push(&marker);
            }
            _ => {}
        }
        Ok(WalkStatus::Continue)
    }

    fn exit(&mut self, node: &'a Node, _ancestors: &[&'a Node]) -> Result<(), ParseError> {
        match &node.kind {
            NodeKind::List => {
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.push("\n");
                }
            }
            NodeKind::CodeBlock { .. } => {
                if let Some(content) = self.content() {
                    if !content.ends_with('\n') {
                        content.push('\n');
                    }
                    content.push_str("```\n");
                }
            }
            NodeKind::BlockQuote => self.push("\n"),
            _ => {}
        }
        Ok(())
    }
}

fn in_paragraph_or_heading(ancestors: &[&Node]) -> bool {
    ancestors
        .last()
        .is_some_and(|parent| matches!(parent.kind, NodeKind::Paragraph | NodeKind::Heading))
}

/// Returns the offset just past the newline that ends the line containing
/// `end - 1`, or the body length if that line is the last one.
fn line_end_after(body: &str, end: usize) -> usize {
    let end = end.min(body.len());
    if end > 0 && body.as_bytes()[end - 1] == b'\n' {
        return end;
    }
    match body[end..].find('\n') {
        Some(offset) => end + offset + 1,
        None => body.len(),
    }
}
