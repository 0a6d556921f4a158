pub mod error;
pub mod record;

pub use error::{DocError, ErrorScope, Result, ResultExt};
pub use record::*;

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;

/// Type-safe wrapper for dotted Python module names (`pkg.sub.mod`)
///
/// Prevents accidental mixing of module names with file paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Dotted components in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Name of a direct child module
    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}.{}", self.0, segment))
    }

    /// Check if any component is private (leading underscore)
    pub fn has_private_segment(&self) -> bool {
        self.segments().any(|s| s.starts_with('_'))
    }

    /// HTML anchor id for a member of this module
    pub fn anchor_id(&self, member: &str) -> String {
        format!("{}-{}", self.0.replace('.', "-"), member).to_lowercase()
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ModuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ModuleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
