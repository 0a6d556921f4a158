//! Member Collection
//!
//! Selects the documentable classes and functions of a module: names bound
//! by a definition in the module itself. Imported names (re-exports) and
//! names rebound by assignment are never documentable.

use super::parser::{Definition, ParsedModule};
use crate::types::MemberKind;

fn documentable<'a>(
    module: &'a ParsedModule,
    exclude_private: bool,
) -> impl Iterator<Item = &'a Definition> {
    module
        .definitions()
        .filter(move |def| !(exclude_private && def.name.starts_with('_')))
}

/// Classes and functions defined in `module`, each sorted by name.
pub fn collect_members(
    module: &ParsedModule,
    exclude_private: bool,
) -> (Vec<&Definition>, Vec<&Definition>) {
    documentable(module, exclude_private).partition(|def| def.kind == MemberKind::Class)
}

pub fn has_documentable_members(module: &ParsedModule, exclude_private: bool) -> bool {
    documentable(module, exclude_private).next().is_some()
}
