//! Section splitting and entry parsing for Google-style docstrings.

use regex::Regex;
use std::sync::LazyLock;

use super::{DESCRIPTION, DocstringError, ParsedSection, indent_of};
use crate::types::{DocEntry, SectionContent};

static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z ]*?)\s*:\s*$").expect("section header regex")
});

/// How a section body is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    /// `name (type): description` entries
    Named,
    /// One `type: description` entry
    Returns,
    /// One `Type: description` entry per line
    Raises,
    Text,
}

fn canonical_section(name: &str) -> Option<(&'static str, SectionKind)> {
    let canonical = match name.to_lowercase().as_str() {
        "args" | "arguments" | "parameters" | "params" => ("Args", SectionKind::Named),
        "keyword args" | "keyword arguments" | "kwargs" => ("Keyword Args", SectionKind::Named),
        "other parameters" => ("Other Parameters", SectionKind::Named),
        "attributes" => ("Attributes", SectionKind::Named),
        "returns" | "return" => ("Returns", SectionKind::Returns),
        "yields" | "yield" => ("Yields", SectionKind::Returns),
        "raises" | "raise" | "except" | "exceptions" => ("Raises", SectionKind::Raises),
        "examples" | "example" => ("Examples", SectionKind::Text),
        "notes" | "note" => ("Notes", SectionKind::Text),
        "warnings" | "warning" => ("Warnings", SectionKind::Text),
        "references" => ("References", SectionKind::Text),
        "see also" => ("See Also", SectionKind::Text),
        "todo" => ("Todo", SectionKind::Text),
        "methods" => ("Methods", SectionKind::Text),
        _ => return None,
    };
    Some(canonical)
}

struct OpenSection<'a> {
    name: &'static str,
    kind: SectionKind,
    indent: usize,
    /// (1-based line number, raw line)
    lines: Vec<(usize, &'a str)>,
}

/// Split cleaned docstring text into sections.
pub(super) fn parse_sections(text: &str) -> Result<Vec<ParsedSection>, DocstringError> {
    let mut sections: Vec<ParsedSection> = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    let mut open: Option<OpenSection<'_>> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        if let Some(current) = open.as_mut() {
            if line.trim().is_empty() || indent_of(line) > current.indent {
                current.lines.push((line_no, line));
                continue;
            }
        }

        if let Some((name, kind)) = header_of(line) {
            if let Some(done) = open.take() {
                close_section(done, &mut sections)?;
            }
            open = Some(OpenSection {
                name,
                kind,
                indent: indent_of(line),
                lines: Vec::new(),
            });
            continue;
        }

        // Dedented free text after a section joins the description
        if let Some(done) = open.take() {
            close_section(done, &mut sections)?;
        }
        description.push(line);
    }

    if let Some(done) = open.take() {
        close_section(done, &mut sections)?;
    }

    let description = description.join("\n").trim().to_string();
    if !description.is_empty() {
        sections.insert(
            0,
            ParsedSection {
                name: DESCRIPTION.to_string(),
                content: SectionContent::Text(description),
            },
        );
    }

    Ok(sections)
}

fn header_of(line: &str) -> Option<(&'static str, SectionKind)> {
    let caps = RE_HEADER.captures(line)?;
    canonical_section(caps.get(1)?.as_str())
}

fn close_section(
    section: OpenSection<'_>,
    sections: &mut Vec<ParsedSection>,
) -> Result<(), DocstringError> {
    let body = dedent(&section.lines);
    let content = match section.kind {
        SectionKind::Named => SectionContent::Entries(parse_named_entries(section.name, &body)?),
        SectionKind::Returns => SectionContent::Entries(parse_returns(&body)),
        SectionKind::Raises => SectionContent::Entries(parse_raises(&body)),
        SectionKind::Text => SectionContent::Text(
            body.iter()
                .map(|(_, l)| l.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    };

    if let Some(existing) = sections.iter_mut().find(|s| s.name == section.name) {
        match (&mut existing.content, content) {
            (SectionContent::Entries(old), SectionContent::Entries(new)) => old.extend(new),
            (SectionContent::Text(old), SectionContent::Text(new)) => {
                if !new.is_empty() {
                    if !old.is_empty() {
                        old.push_str("\n\n");
                    }
                    old.push_str(&new);
                }
            }
            _ => {}
        }
        return Ok(());
    }

    sections.push(ParsedSection {
        name: section.name.to_string(),
        content,
    });
    Ok(())
}

/// Remove the common indentation and the blank lines around the body.
fn dedent(lines: &[(usize, &str)]) -> Vec<(usize, String)> {
    let margin = lines
        .iter()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(_, l)| indent_of(l))
        .min()
        .unwrap_or(0);

    let mut body: Vec<(usize, String)> = lines
        .iter()
        .map(|(n, l)| (*n, l.get(margin..).unwrap_or("").trim_end().to_string()))
        .collect();

    while body.first().is_some_and(|(_, l)| l.is_empty()) {
        body.remove(0);
    }
    while body.last().is_some_and(|(_, l)| l.is_empty()) {
        body.pop();
    }
    body
}

/// Append a continuation line to an entry description.
fn continue_description(description: &mut String, line: &str, paragraph_break: bool) {
    if description.is_empty() {
        description.push_str(line);
    } else if paragraph_break {
        description.push_str("\n\n");
        description.push_str(line);
    } else {
        description.push(' ');
        description.push_str(line);
    }
}

fn parse_named_entries(
    section: &str,
    body: &[(usize, String)],
) -> Result<Vec<DocEntry>, DocstringError> {
    let mut entries: Vec<DocEntry> = Vec::new();
    let mut pending_break = false;

    for (line_no, line) in body {
        if line.is_empty() {
            pending_break = true;
            continue;
        }

        if indent_of(line) > 0 {
            let Some(last) = entries.last_mut() else {
                return Err(DocstringError::MalformedEntry {
                    section: section.to_string(),
                    line: *line_no,
                    text: line.trim().to_string(),
                });
            };
            continue_description(&mut last.description, line.trim(), pending_break);
            pending_break = false;
            continue;
        }

        pending_break = false;
        entries.push(parse_entry_head(section, *line_no, line)?);
    }

    Ok(entries)
}

/// Parse `name (type): description` / `name: description`.
fn parse_entry_head(section: &str, line_no: usize, line: &str) -> Result<DocEntry, DocstringError> {
    let malformed = || DocstringError::MalformedEntry {
        section: section.to_string(),
        line: line_no,
        text: line.trim().to_string(),
    };

    let stars = line.len() - line.trim_start_matches('*').len();
    if stars > 2 {
        return Err(malformed());
    }
    let ident_len = line[stars..]
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(line.len() - stars);
    if ident_len == 0 {
        return Err(malformed());
    }
    let name = &line[..stars + ident_len];
    let mut rest = line[stars + ident_len..].trim_start();

    let mut entry_type = None;
    if rest.starts_with('(') {
        let close = matching_paren(rest).ok_or_else(|| DocstringError::UnbalancedType {
            section: section.to_string(),
            name: name.to_string(),
            line: line_no,
        })?;
        let ty = rest[1..close].trim();
        if !ty.is_empty() {
            entry_type = Some(ty.to_string());
        }
        rest = rest[close + 1..].trim_start();
    }

    let description = rest.strip_prefix(':').ok_or_else(malformed)?.trim();

    Ok(DocEntry {
        name: Some(name.to_string()),
        entry_type,
        description: description.to_string(),
    })
}

/// Index of the parenthesis closing the one at index 0.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return (c == ')').then_some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split `type: description` at the first colon outside brackets.
fn split_type_prefix(line: &str) -> Option<(&str, &str)> {
    let mut depth = 0i32;
    for (i, c) in line.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            ':' if depth == 0 => {
                let ty = line[..i].trim();
                if ty.is_empty() {
                    return None;
                }
                return Some((ty, line[i + 1..].trim()));
            }
            _ => {}
        }
    }
    None
}

fn parse_returns(body: &[(usize, String)]) -> Vec<DocEntry> {
    let Some((_, first)) = body.first() else {
        return Vec::new();
    };

    let (entry_type, head) = match split_type_prefix(first) {
        Some((ty, desc)) => (Some(ty.to_string()), desc.to_string()),
        None => (None, first.trim().to_string()),
    };

    let mut description = head;
    let mut pending_break = false;
    for (_, line) in &body[1..] {
        if line.is_empty() {
            pending_break = true;
            continue;
        }
        continue_description(&mut description, line.trim(), pending_break);
        pending_break = false;
    }

    vec![DocEntry {
        name: None,
        entry_type,
        description,
    }]
}

fn parse_raises(body: &[(usize, String)]) -> Vec<DocEntry> {
    let mut entries: Vec<DocEntry> = Vec::new();

    for (_, line) in body {
        if line.is_empty() {
            continue;
        }
        if indent_of(line) > 0
            && let Some(last) = entries.last_mut()
        {
            continue_description(&mut last.description, line.trim(), false);
            continue;
        }

        let entry = match split_type_prefix(line) {
            Some((ty, desc)) => DocEntry {
                name: None,
                entry_type: Some(ty.to_string()),
                description: desc.to_string(),
            },
            None => DocEntry {
                name: None,
                entry_type: Some(line.trim().to_string()),
                description: String::new(),
            },
        };
        entries.push(entry);
    }

    entries
}
