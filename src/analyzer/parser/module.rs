//! Parsed module model: the static counterpart of a live module namespace.

use std::collections::BTreeMap;

use crate::types::MemberKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Regular,
    /// `*args`
    VarPositional,
    /// `**kwargs`
    VarKeyword,
    /// Bare `*`
    KeywordSeparator,
    /// Bare `/`
    PositionalSeparator,
}

/// A parameter exactly as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter {
    pub name: String,
    pub kind: ParamKind,
    pub annotation: Option<String>,
    pub default: Option<String>,
}

impl RawParameter {
    pub fn regular(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Regular,
            annotation: None,
            default: None,
        }
    }

    pub fn separator(kind: ParamKind) -> Self {
        Self {
            name: String::new(),
            kind,
            annotation: None,
            default: None,
        }
    }

    /// Source-like rendering: `*args: int`, `x: str = 'a'`, `*`
    pub fn render(&self) -> String {
        let name = match self.kind {
            ParamKind::Regular => self.name.clone(),
            ParamKind::VarPositional => format!("*{}", self.name),
            ParamKind::VarKeyword => format!("**{}", self.name),
            ParamKind::KeywordSeparator => return "*".to_string(),
            ParamKind::PositionalSeparator => return "/".to_string(),
        };
        match (&self.annotation, &self.default) {
            (Some(ty), Some(default)) => format!("{}: {} = {}", name, ty, default),
            (Some(ty), None) => format!("{}: {}", name, ty),
            (None, Some(default)) => format!("{}={}", name, default),
            (None, None) => name,
        }
    }
}

/// A top-level class or function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub kind: MemberKind,
    pub docstring: Option<String>,
    /// Decorator expressions without the leading `@`
    pub decorators: Vec<String>,
    /// Line of the first decorator, or of the `def`/`class` keyword
    pub source_line: u32,
    pub source_code: String,
    /// Function parameters, or the class's `__init__` parameters including
    /// the bound first one. `None` when no parameter list could be read (or a
    /// class defines no `__init__`).
    pub parameters: Option<Vec<RawParameter>>,
    pub return_type: Option<String>,
    /// Annotated class-level fields, in declaration order
    pub fields: Vec<RawParameter>,
}

impl Definition {
    pub fn is_dataclass(&self) -> bool {
        self.decorators.iter().any(|d| {
            let callee = d.split('(').next().unwrap_or(d).trim();
            callee == "dataclass" || callee == "dataclasses.dataclass"
        })
    }
}

/// What a top-level name is bound to at the end of the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Defined(Definition),
    Imported { module: String },
    Assigned,
}

/// Static view of a module: its docstring and final top-level namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedModule {
    pub path: String,
    pub docstring: Option<String>,
    pub namespace: BTreeMap<String, Binding>,
}

impl ParsedModule {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            docstring: None,
            namespace: BTreeMap::new(),
        }
    }

    /// Bind a name; later bindings replace earlier ones.
    pub fn bind(&mut self, name: impl Into<String>, binding: Binding) {
        self.namespace.insert(name.into(), binding);
    }

    /// Definitions made in this module, sorted by name
    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.namespace.values().filter_map(|b| match b {
            Binding::Defined(def) => Some(def),
            _ => None,
        })
    }
}
