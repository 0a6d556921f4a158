//! Signature Extraction
//!
//! Derives documented parameters from a definition the way
//! `inspect.signature` would see it: class signatures come from `__init__`
//! (or dataclass fields) with `self` bound, and variadic catch-alls are left
//! out because they have no fixed documentation slot.

use super::parser::{Definition, ParamKind, RawParameter};
use crate::types::{MemberKind, Parameter};

/// Parameters as the callable's signature exposes them, separators and
/// variadics included. `None` when the signature cannot be determined.
fn signature_parameters(def: &Definition) -> Option<Vec<RawParameter>> {
    match def.kind {
        MemberKind::Function => def.parameters.clone(),
        MemberKind::Class => match &def.parameters {
            // Drop the bound instance parameter
            Some(init) => Some(init.iter().skip(1).cloned().collect()),
            None if def.is_dataclass() => Some(def.fields.clone()),
            None => Some(Vec::new()),
        },
    }
}

/// Ordered documentable parameters of a definition.
///
/// Returns an empty list when the signature cannot be read.
pub fn extract(def: &Definition) -> Vec<Parameter> {
    let Some(params) = signature_parameters(def) else {
        tracing::debug!(name = %def.name, "Signature unavailable, no parameters extracted");
        return Vec::new();
    };

    params
        .into_iter()
        .filter(|p| p.kind == ParamKind::Regular && !p.name.is_empty())
        .map(|p| Parameter {
            name: p.name,
            param_type: p.annotation,
            default: p.default,
            description: None,
        })
        .collect()
}

/// Human-readable `name(params) -> return` rendering, or the bare name when
/// the signature cannot be read.
pub fn render_signature(def: &Definition) -> String {
    let Some(params) = signature_parameters(def) else {
        return def.name.clone();
    };

    let rendered = params
        .iter()
        .map(RawParameter::render)
        .collect::<Vec<_>>()
        .join(", ");

    match (&def.kind, &def.return_type) {
        (MemberKind::Function, Some(ret)) => format!("{}({}) -> {}", def.name, rendered, ret),
        _ => format!("{}({})", def.name, rendered),
    }
}
