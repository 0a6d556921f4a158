//! Documentation Records
//!
//! Normalized records produced by the section reconciler and consumed by the
//! format renderers. Serialization of these types is the JSON payload of the
//! TSX pages, so absent optional fields are skipped rather than written as
//! `null`.

use serde::{Deserialize, Serialize};

/// A single documented parameter.
///
/// Name, type and default come from the signature; description (and
/// possibly a more specific type) from the docstring `Args` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: None,
            default: None,
            description: None,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = Some(param_type.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Class,
    Function,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Class => write!(f, "class"),
            MemberKind::Function => write!(f, "function"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
}

/// One entry of a structured docstring section (`Returns`, `Raises`,
/// `Attributes`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    pub description: String,
}

impl DocEntry {
    /// Flatten to a single line: `name (type): description`,
    /// `type: description`, or just the description.
    pub fn to_line(&self) -> String {
        let head = match (&self.name, &self.entry_type) {
            (Some(name), Some(ty)) => Some(format!("{} ({})", name, ty)),
            (Some(name), None) => Some(name.clone()),
            (None, Some(ty)) => Some(ty.clone()),
            (None, None) => None,
        };
        match head {
            Some(head) if self.description.is_empty() => head,
            Some(head) => format!("{}: {}", head, self.description),
            None => self.description.clone(),
        }
    }
}

/// Section body: free text or a list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    Entries(Vec<DocEntry>),
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            SectionContent::Text(text) => text.trim().is_empty(),
            SectionContent::Entries(entries) => entries
                .iter()
                .all(|e| e.name.is_none() && e.entry_type.is_none() && e.description.is_empty()),
        }
    }

    /// Plain-text rendering used inside fenced blocks.
    pub fn to_plain_text(&self) -> String {
        match self {
            SectionContent::Text(text) => text.clone(),
            SectionContent::Entries(entries) => entries
                .iter()
                .map(DocEntry::to_line)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub content: SectionContent,
}

/// Normalized documentation for one class or function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MemberKind,
    pub signature: Signature,
    /// `name(params) -> return` as written in source; not part of the payload
    #[serde(skip)]
    pub display_signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
    pub source_line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
}

/// Documentation for one module file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(rename = "moduleName")]
    pub module_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub members: Vec<MemberRecord>,
}
