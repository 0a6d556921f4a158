//! Section Reconciliation
//!
//! Merges a parsed docstring with the parameters read from the signature
//! into a normalized `MemberRecord`.

use crate::analyzer::parser::Definition;
use crate::analyzer::signature;
use crate::docstring::{self, ARGS, DESCRIPTION, ParsedDocstring};
use crate::types::{MemberKind, MemberRecord, Parameter, Section, Signature};

/// Everything known about a member apart from its docstring.
#[derive(Debug, Clone)]
pub struct MemberSource {
    pub name: String,
    pub kind: MemberKind,
    pub params: Vec<Parameter>,
    pub return_type: Option<String>,
    pub display_signature: String,
    pub source_line: u32,
    pub source_code: Option<String>,
}

impl MemberSource {
    pub fn from_definition(def: &Definition, include_source: bool) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind,
            params: signature::extract(def),
            return_type: def.return_type.clone(),
            display_signature: signature::render_signature(def),
            source_line: def.source_line,
            source_code: include_source
                .then(|| def.source_code.clone())
                .filter(|code| !code.is_empty()),
        }
    }
}

/// Parse a docstring, degrading to no sections when it is malformed.
pub fn parse_or_empty(docstring: Option<&str>, owner: &str) -> ParsedDocstring {
    let Some(raw) = docstring else {
        return ParsedDocstring::default();
    };

    match docstring::parse(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(object = %owner, error = %e, "Error parsing docstring");
            ParsedDocstring::default()
        }
    }
}

/// Attach documented descriptions (and declared types) to signature
/// parameters. Documented names missing from the signature are dropped.
pub fn merge_parameters(params: Vec<Parameter>, parsed: &ParsedDocstring) -> Vec<Parameter> {
    let documented = parsed.args();

    params
        .into_iter()
        .map(|mut param| {
            if let Some(entry) = documented
                .iter()
                .find(|e| e.name.as_deref() == Some(param.name.as_str()))
            {
                if entry.entry_type.is_some() {
                    param.param_type = entry.entry_type.clone();
                }
                if !entry.description.is_empty() {
                    param.description = Some(entry.description.clone());
                }
            }
            param
        })
        .collect()
}

/// Build the normalized record for one member.
pub fn reconcile(source: MemberSource, parsed: &ParsedDocstring) -> MemberRecord {
    let description = parsed
        .description()
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    let sections = parsed
        .iter()
        .filter(|s| s.name != DESCRIPTION && s.name != ARGS)
        .filter(|s| !s.content.is_empty())
        .map(|s| Section {
            name: s.name.clone(),
            content: s.content.clone(),
        })
        .collect();

    MemberRecord {
        signature: Signature {
            name: source.name.clone(),
            params: merge_parameters(source.params, parsed),
            return_type: source.return_type,
        },
        name: source.name,
        kind: source.kind,
        display_signature: source.display_signature,
        description,
        sections,
        source_line: source.source_line,
        source_code: source.source_code,
    }
}

/// Full member pipeline: signature extraction, docstring parsing, merge.
pub fn build_member(def: &Definition, include_source: bool) -> MemberRecord {
    let parsed = parse_or_empty(def.docstring.as_deref(), &def.name);
    reconcile(MemberSource::from_definition(def, include_source), &parsed)
}
