//! Owned node tree built from the pulldown-cmark event stream.
//!
//! pulldown-cmark yields a flat stream of start/end/leaf events. The section
//! and link passes need parents and enclosing blocks, so the stream is folded
//! once into a tree whose nodes keep their byte range in the source.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};
use std::ops::Range;

use super::ParseError;

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    BlockQuote,
    /// Fenced blocks carry their info string; indented blocks carry `None`.
    CodeBlock { info: Option<String> },
    List,
    Item,
    Emphasis,
    Strong,
    Link { dest: String },
    Text(String),
    Code(String),
    LineBreak,
    /// Anything the passes don't care about (images, HTML, rules, footnotes,
    /// tables).
    Other,
}

impl NodeKind {
    /// Block-level nodes whose source lines can bound a link.
    pub fn is_line_block(&self) -> bool {
        matches!(self, NodeKind::Paragraph | NodeKind::Heading | NodeKind::Item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: Range<usize>,
    pub children: Vec<Node>,
}

impl Node {
    fn new(kind: NodeKind, range: Range<usize>) -> Self {
        Self {
            kind,
            range,
            children: Vec::new(),
        }
    }

    /// Returns the text of this node if it is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenates the text of the direct text children.
    pub fn direct_text(&self) -> String {
        self.children.iter().filter_map(Node::as_text).collect()
    }

    /// Concatenates all text and inline code below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::Code(text) => out.push_str(text),
            _ => self.children.iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// Parses `source` into a tree rooted at a `Document` node spanning the
/// whole input.
///
/// # Errors
///
/// Returns `ParseError::UnbalancedEvents` if the event stream closes a node
/// that was never opened or ends with nodes still open.
pub fn build(source: &str, options: Options) -> Result<Node, ParseError> {
    let mut stack = vec![Node::new(NodeKind::Document, 0..source.len())];

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        match event {
            Event::Start(tag) => stack.push(Node::new(kind_for(tag), range)),
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(ParseError::UnbalancedEvents {
                        offset: range.start,
                    });
                }
                if let Some(node) = stack.pop() {
                    attach(&mut stack, node);
                }
            }
            Event::Text(text) => push_text(&mut stack, text.into_string(), range),
            Event::Code(code) => {
                attach(&mut stack, Node::new(NodeKind::Code(code.into_string()), range))
            }
            Event::SoftBreak | Event::HardBreak => {
                attach(&mut stack, Node::new(NodeKind::LineBreak, range))
            }
            _ => attach(&mut stack, Node::new(NodeKind::Other, range)),
        }
    }

    if stack.len() != 1 {
        return Err(ParseError::UnbalancedEvents {
            offset: source.len(),
        });
    }
    stack.pop().ok_or(ParseError::UnbalancedEvents { offset: 0 })
}

fn kind_for(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading(..) => NodeKind::Heading,
        Tag::BlockQuote => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::CodeBlock {
            info: Some(info.into_string()),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::CodeBlock { info: None },
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::Item,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Link(_, dest, _) => NodeKind::Link {
            dest: dest.into_string(),
        },
        _ => NodeKind::Other,
    }
}

fn attach(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Appends text, merging with an immediately preceding text sibling.
///
/// pulldown-cmark splits a run of text at characters that might have started
/// inline markup; merging restores one node per run.
fn push_text(stack: &mut [Node], text: String, range: Range<usize>) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(last) = parent.children.last_mut() {
        if let NodeKind::Text(existing) = &mut last.kind {
            existing.push_str(&text);
            last.range.end = last.range.end.max(range.end);
            return;
        }
    }
    parent.children.push(Node::new(NodeKind::Text(text), range));
}

/// Whether to descend into a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    SkipChildren,
}

/// Callbacks for a depth-first, pre-order walk.
///
/// `ancestors` lists the enclosing nodes from the root down to the parent.
/// `exit` is called for every entered node, including ones whose children
/// were skipped.
pub trait Visitor<'a> {
    type Error;

    fn enter(&mut self, node: &'a Node, ancestors: &[&'a Node]) -> Result<WalkStatus, Self::Error>;

    fn exit(&mut self, _node: &'a Node, _ancestors: &[&'a Node]) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walks `root` in document order. The first error stops the walk.
pub fn walk<'a, V: Visitor<'a>>(root: &'a Node, visitor: &mut V) -> Result<(), V::Error> {
    let mut ancestors = Vec::new();
    walk_node(root, &mut ancestors, visitor)
}

fn walk_node<'a, V: Visitor<'a>>(
    node: &'a Node,
    ancestors: &mut Vec<&'a Node>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    if visitor.enter(node, ancestors)? == WalkStatus::Continue {
        ancestors.push(node);
        for child in &node.children {
            walk_node(child, ancestors, visitor)?;
        }
        ancestors.pop();
    }
    visitor.exit(node, ancestors)
}
