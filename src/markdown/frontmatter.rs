//! Front-matter stripping for dash-delimited note preambles.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::{FrontMatter, FrontMatterMeta};

/// Matches the first block bounded by two dash-only lines.
///
/// Multi-line mode, so `^`/`$` anchor at line boundaries and the block may
/// appear after leading blank lines. The inner span is lazy: the block ends at
/// the first dash-only line after the opening one.
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^\s*-+\s*$(.*?)^\s*-+\s*$").expect("front matter regex is valid")
});

/// Locates the front-matter block in `content`.
///
/// Returns `FrontMatter::default()` (both offsets zero) if no block exists,
/// in which case the whole text is body.
///
/// # Format
/// ```text
/// ---
/// tags: [work]
/// ---
/// # Body starts here
/// ```
///
/// Only the first block is honored. A later dash-only line in the body (a
/// horizontal rule, say) is left alone. Conversely, a note without front
/// matter whose body has two horizontal rules loses everything up to the
/// second one.
pub fn strip_front_matter(content: &str) -> FrontMatter {
    let Some(caps) = FRONT_MATTER.captures(content) else {
        return FrontMatter::default();
    };

    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let meta = caps.get(1).and_then(|inner| parse_meta(inner.as_str()));

    FrontMatter {
        start: whole.start,
        end: whole.end,
        meta,
    }
}

/// Returns the trimmed body that follows `front_matter`.
pub fn body_after<'a>(content: &'a str, front_matter: &FrontMatter) -> &'a str {
    content.get(front_matter.end..).unwrap_or("").trim()
}

fn parse_meta(yaml: &str) -> Option<FrontMatterMeta> {
    if yaml.trim().is_empty() {
        return None;
    }
    serde_yaml::from_str(yaml).ok()
}
