//! MDX-compatible Markdown rendering.
//!
//! Prose (descriptions, parameter types) is escaped so MDX does not read it
//! as JSX; section bodies go into fenced blocks verbatim.

use super::Renderer;
use crate::config::OutputFormat;
use crate::docstring::EXAMPLES;
use crate::types::{MemberRecord, ModuleName, ModuleRecord, Parameter, Result};

/// Backslash-escape `<`, `>` and `=` unless already escaped.
pub fn escape_special(text: Option<&str>) -> Option<String> {
    let text = text?;
    let mut out = String::with_capacity(text.len());
    let mut backslashes = 0usize;

    for c in text.chars() {
        if matches!(c, '<' | '>' | '=') && backslashes % 2 == 0 {
            out.push('\\');
        }
        out.push(c);
        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }

    Some(out)
}

fn escape(text: &str) -> String {
    escape_special(Some(text)).unwrap_or_default()
}

/// Backtick fence one longer than any backtick run in `content`, at least 3.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    "`".repeat((longest + 1).max(3))
}

fn fenced(lang: &str, content: &str) -> String {
    let fence = fence_for(content);
    format!("{fence}{lang}\n{content}\n{fence}")
}

/// Fence a section body; `Examples` is tagged as Python.
pub fn format_section_content(name: &str, content: &str) -> String {
    let lang = if name == EXAMPLES { "python" } else { "" };
    fenced(lang, content)
}

fn render_parameter(param: &Parameter) -> String {
    let mut line = format!("- **{}**", param.name);

    let qualifiers: Vec<String> = param
        .param_type
        .as_deref()
        .map(escape)
        .into_iter()
        .chain(param.default.as_ref().map(|d| format!("default: `{}`", d)))
        .collect();
    if !qualifiers.is_empty() {
        line.push_str(&format!(" ({})", qualifiers.join(", ")));
    }

    if let Some(desc) = param.description.as_deref() {
        line.push_str(": ");
        line.push_str(&escape(desc));
    }
    line
}

/// One member block: anchor, heading, signature, prose, sections.
pub fn render_member(module: &ModuleName, member: &MemberRecord) -> String {
    let mut blocks = vec![
        format!(
            "<a id=\"{}\"></a>\n\n## {} `{}`",
            module.anchor_id(&member.name),
            member.kind,
            member.name
        ),
        fenced("python", &member.display_signature),
    ];

    if let Some(desc) = member.description.as_deref() {
        blocks.push(escape(desc));
    }

    if !member.signature.params.is_empty() {
        let params = member
            .signature
            .params
            .iter()
            .map(render_parameter)
            .collect::<Vec<_>>()
            .join("\n");
        blocks.push(format!("**Parameters**\n\n{}", params));
    }

    for section in &member.sections {
        blocks.push(format!(
            "**{}**\n\n{}",
            section.name,
            format_section_content(&section.name, &section.content.to_plain_text())
        ));
    }

    blocks.join("\n\n")
}

/// Renders a module as a single Markdown page.
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn render_module(&self, record: &ModuleRecord) -> Result<String> {
        let module = ModuleName::new(record.module_name.as_str());
        let mut blocks = vec![format!("# {}", record.module_name)];

        if let Some(desc) = record.description.as_deref() {
            blocks.push(escape(desc));
        }

        blocks.extend(record.members.iter().map(|m| render_member(&module, m)));

        let mut page = blocks.join("\n\n");
        page.push('\n');
        Ok(page)
    }
}
