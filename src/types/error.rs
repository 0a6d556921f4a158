//! Unified Error Type System
//!
//! Centralized error types for the documentation generator.
//!
//! ## Failure Scopes
//!
//! A docstring that fails to parse never surfaces here; the generator
//! degrades that one object to empty sections.
//!
//! - **File**: a module file cannot be read, parsed, rendered or written
//!   (logged, file skipped)
//! - **Package**: the package cannot be located (fatal to the run)
//!
//! No variant is retried; every error is either skipped or fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Scope an error is confined to, used by the orchestrator to decide
/// whether the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// One module file
    File,
    /// The whole package
    Package,
}

impl std::fmt::Display for ErrorScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "FILE"),
            Self::Package => write!(f, "PACKAGE"),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Package '{name}' not found under {}", searched.display())]
    PackageNotFound { name: String, searched: PathBuf },

    #[error("'{name}' is not a package: {} has no __init__.py", path.display())]
    NotAPackage { name: String, path: PathBuf },

    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    #[error("{context}: {message}")]
    Context { context: String, message: String },
}

pub type Result<T> = std::result::Result<T, DocError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl DocError {
    /// Create a parse error for a source file
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Scope this error is confined to
    pub fn scope(&self) -> ErrorScope {
        match self {
            Self::PackageNotFound { .. } | Self::NotAPackage { .. } | Self::Config(_) => {
                ErrorScope::Package
            }
            _ => ErrorScope::File,
        }
    }

    /// Check if the run may continue after this error
    pub fn is_recoverable(&self) -> bool {
        self.scope() != ErrorScope::Package
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| DocError::Context {
            context: f().into(),
            message: e.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_scope_display() {
        assert_eq!(ErrorScope::File.to_string(), "FILE");
        assert_eq!(ErrorScope::Package.to_string(), "PACKAGE");
    }

    #[test]
    fn test_package_errors_are_fatal() {
        let err = DocError::PackageNotFound {
            name: "pkg".to_string(),
            searched: PathBuf::from("src/pkg"),
        };
        assert_eq!(err.scope(), ErrorScope::Package);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_file_errors_are_recoverable() {
        let err = DocError::parse("pkg/mod.py", "syntax error at line 3");
        assert_eq!(err.scope(), ErrorScope::File);
        assert!(err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "Parse error in pkg/mod.py: syntax error at line 3"
        );

        let io = DocError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(io.scope(), ErrorScope::File);
    }

    #[test]
    fn test_with_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.with_context_fn(|| "Writing page").unwrap_err();
        assert_eq!(err.to_string(), "Writing page: denied");
    }
}
