//! Google-style Docstring Parsing
//!
//! Turns a raw docstring into an ordered list of named sections:
//!
//! - `Description`: free text outside any section
//! - `Args` / `Keyword Args` / `Attributes`: named entries with optional types
//! - `Returns` / `Yields` / `Raises`: typed entries
//! - everything else (`Examples`, `Notes`, ...): text
//!
//! Parsing is strict about entry syntax in named sections; callers decide
//! how to degrade when it fails.

mod google;

use thiserror::Error;

use crate::types::{DocEntry, SectionContent};

pub const DESCRIPTION: &str = "Description";
pub const ARGS: &str = "Args";
pub const EXAMPLES: &str = "Examples";

const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocstringError {
    #[error("malformed entry in {section} section at line {line}: '{text}'")]
    MalformedEntry {
        section: String,
        line: usize,
        text: String,
    },

    #[error("unbalanced brackets in type of '{name}' in {section} section at line {line}")]
    UnbalancedType {
        section: String,
        name: String,
        line: usize,
    },
}

/// A named section as returned by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSection {
    pub name: String,
    pub content: SectionContent,
}

/// Parsed docstring: sections in the order they first appear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocstring {
    sections: Vec<ParsedSection>,
}

impl ParsedDocstring {
    pub fn new(sections: Vec<ParsedSection>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&SectionContent> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.content)
    }

    pub fn description(&self) -> Option<&str> {
        match self.get(DESCRIPTION) {
            Some(SectionContent::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Entries of the `Args` section (empty when undocumented)
    pub fn args(&self) -> &[DocEntry] {
        match self.get(ARGS) {
            Some(SectionContent::Entries(entries)) => entries,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedSection> {
        self.sections.iter()
    }
}

/// Parse a raw docstring.
///
/// The input is cleaned first, so raw source text between the quotes can be
/// passed directly.
pub fn parse(docstring: &str) -> Result<ParsedDocstring, DocstringError> {
    let cleaned = cleandoc(docstring);
    if cleaned.is_empty() {
        return Ok(ParsedDocstring::default());
    }
    google::parse_sections(&cleaned).map(ParsedDocstring::new)
}

/// Normalize docstring indentation the way `inspect.cleandoc` does.
pub fn cleandoc(raw: &str) -> String {
    let lines: Vec<String> = raw
        .lines()
        .map(|l| expand_tabs(l.trim_end_matches('\r')))
        .collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim_start().to_string()
            } else {
                l.get(margin..).unwrap_or("").trim_end().to_string()
            }
        })
        .collect();

    while cleaned.first().is_some_and(|l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().is_some_and(|l| l.trim().is_empty()) {
        cleaned.pop();
    }

    cleaned.join("\n")
}

fn expand_tabs(line: &str) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - (out.chars().count() % TAB_WIDTH);
            out.extend(std::iter::repeat_n(' ', pad));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Leading-space count (tabs are already expanded)
pub(crate) fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleandoc_removes_common_indent() {
        let raw = "Summary line.\n\n    Details here.\n      Indented more.\n    ";
        assert_eq!(
            cleandoc(raw),
            "Summary line.\n\nDetails here.\n  Indented more."
        );
    }

    #[test]
    fn test_cleandoc_strips_blank_edges() {
        assert_eq!(cleandoc("\n\n    Text.\n\n"), "Text.");
        assert_eq!(cleandoc("   "), "");
    }

    #[test]
    fn test_cleandoc_expands_tabs() {
        assert_eq!(cleandoc("Head\n\tBody"), "Head\nBody");
    }

    #[test]
    fn test_parse_empty_docstring() {
        let parsed = parse("").unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed.description(), None);
        assert!(parsed.args().is_empty());
    }

    #[test]
    fn test_parse_description_only() {
        let parsed = parse("Add two numbers.\n\n    Longer explanation.").unwrap();
        assert_eq!(
            parsed.description(),
            Some("Add two numbers.\n\nLonger explanation.")
        );
    }
}
