//! Builder for dated test notes.

#![allow(dead_code)]

use chrono::NaiveDate;

/// Builder for journal or standup note text.
///
/// Renders optional front matter, one line of links, then one `#` section
/// per call to [`TestNote::section`].
#[derive(Debug)]
pub struct TestNote {
    date: NaiveDate,
    tags: Vec<String>,
    links: Vec<(String, String)>,
    sections: Vec<(String, Vec<String>)>,
    body: Option<String>,
}

impl TestNote {
    /// Creates a note for `date` (`YYYY-MM-DD`).
    pub fn new(date: &str) -> Self {
        Self {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("Invalid test date"),
            tags: Vec::new(),
            links: Vec::new(),
            sections: Vec::new(),
            body: None,
        }
    }

    /// Creates a note for a date value.
    pub fn on(date: NaiveDate) -> Self {
        Self::new(&date.format("%Y-%m-%d").to_string())
    }

    /// Adds a front-matter tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds a link to the header line.
    pub fn link(mut self, title: impl Into<String>, target: impl Into<String>) -> Self {
        self.links.push((title.into(), target.into()));
        self
    }

    /// Adds a section with one bullet per item.
    pub fn section(mut self, title: impl Into<String>, items: &[&str]) -> Self {
        self.sections.push((
            title.into(),
            items.iter().map(|item| item.to_string()).collect(),
        ));
        self
    }

    /// Replaces everything after the front matter with raw text.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the note's file name.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.date.format("%Y-%m-%d"))
    }

    /// Renders the note text.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.tags.is_empty() {
            out.push_str("---\ntags:\n");
            for tag in &self.tags {
                out.push_str(&format!("  - {}\n", tag));
            }
            out.push_str("---\n\n");
        }

        if let Some(body) = &self.body {
            out.push_str(body);
            return out;
        }

        if !self.links.is_empty() {
            let links: Vec<String> = self
                .links
                .iter()
                .map(|(title, target)| format!("[{}]({})", title, target))
                .collect();
            out.push_str(&links.join(" | "));
            out.push_str("\n\n");
        }

        for (title, items) in &self.sections {
            out.push_str(&format!("# {}\n\n", title));
            for item in items {
                out.push_str(&format!("- {}\n", item));
            }
            if !items.is_empty() {
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_file_name() {
        assert_eq!(TestNote::new("2024-03-04").file_name(), "2024-03-04.md");
    }

    #[test]
    fn test_note_renders_all_parts() {
        let note = TestNote::new("2024-03-04")
            .tag("journal")
            .link("Yesterday", "2024-03-03.md")
            .link("Standup", "../standup/2024-03-04.md")
            .section("Done", &["one", "two"])
            .section("Notes", &[]);

        assert_eq!(
            note.render(),
            "---\ntags:\n  - journal\n---\n\n\
             [Yesterday](2024-03-03.md) | [Standup](../standup/2024-03-04.md)\n\n\
             # Done\n\n- one\n- two\n\n\
             # Notes\n\n"
        );
    }

    #[test]
    fn test_note_raw_body() {
        let note = TestNote::new("2024-03-04").body("plain text\n");
        assert_eq!(note.render(), "plain text\n");
    }
}
