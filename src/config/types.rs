//! Configuration Types
//!
//! Documentation run settings with defaults, plus the CLI override layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{discovery, render};
use crate::types::{DocError, Result};

/// Output page format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON data embedded in a TSX page component
    #[default]
    Tsx,
    /// MDX-compatible Markdown
    Markdown,
}

impl OutputFormat {
    /// File name written into each module's output directory
    pub fn page_file_name(&self) -> &'static str {
        match self {
            OutputFormat::Tsx => render::TSX_PAGE_FILE,
            OutputFormat::Markdown => render::MARKDOWN_PAGE_FILE,
        }
    }

    pub fn progress_label(&self) -> &'static str {
        match self {
            OutputFormat::Tsx => "Generating TSX",
            OutputFormat::Markdown => "Generating Markdown",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsx => write!(f, "tsx"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsx" => Ok(OutputFormat::Tsx),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: tsx, markdown",
                s
            )),
        }
    }
}

/// Settings for one documentation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationConfig {
    /// Dotted name of the package to document
    pub package_name: String,

    /// Root directory pages are written under
    pub output_dir: PathBuf,

    /// Skip modules and members whose names start with `_`
    pub exclude_private: bool,

    pub format: OutputFormat,

    /// Directory the package is resolved against
    pub source_root: PathBuf,

    /// Glob patterns (relative to the package directory) to skip
    pub exclude: Vec<String>,

    /// Import path of the TSX `ModuleDoc` component
    pub components_import_path: String,

    /// Embed member source code in records
    pub include_source: bool,

    /// Emit pages for files that back only `__init__` modules
    pub document_init_modules: bool,
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            output_dir: PathBuf::from(discovery::DEFAULT_OUTPUT_DIR),
            exclude_private: false,
            format: OutputFormat::default(),
            source_root: PathBuf::from(discovery::DEFAULT_SOURCE_ROOT),
            exclude: vec![],
            components_import_path: render::DEFAULT_COMPONENTS_IMPORT.to_string(),
            include_source: true,
            document_init_modules: false,
        }
    }
}

impl DocumentationConfig {
    pub fn new(package_name: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_name: package_name.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_exclude_private(mut self, exclude_private: bool) -> Self {
        self.exclude_private = exclude_private;
        self
    }

    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.source_root = source_root.into();
        self
    }

    /// Validate configuration values.
    /// Returns `DocError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.package_name.is_empty() {
            return Err(DocError::Config("package_name must not be empty".to_string()));
        }

        if !self.package_name.split('.').all(is_identifier) {
            return Err(DocError::Config(format!(
                "package_name must be a dotted Python identifier, got '{}'",
                self.package_name
            )));
        }

        if self.components_import_path.trim().is_empty() {
            return Err(DocError::Config(
                "components_import_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Values supplied on the command line. Unset fields leave lower layers
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_private: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocumentationConfig::default();
        assert_eq!(config.format, OutputFormat::Tsx);
        assert_eq!(config.source_root, PathBuf::from("."));
        assert_eq!(config.components_import_path, "@/components/DocComponents");
        assert!(config.include_source);
        assert!(!config.document_init_modules);
        assert!(!config.exclude_private);
    }

    #[test]
    fn test_validate_package_name() {
        assert!(DocumentationConfig::new("pkg", "out").validate().is_ok());
        assert!(DocumentationConfig::new("pkg.sub_2", "out").validate().is_ok());

        for bad in ["", "my-pkg", "pkg.", "2pkg", "pkg..sub"] {
            let err = DocumentationConfig::new(bad, "out").validate().unwrap_err();
            assert!(matches!(err, DocError::Config(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_validate_import_path() {
        let mut config = DocumentationConfig::new("pkg", "out");
        config.components_import_path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::Tsx.page_file_name(), "page.tsx");
        assert_eq!(OutputFormat::Markdown.page_file_name(), "page.md");
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("html".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_overrides_skip_unset() {
        let overrides = ConfigOverrides {
            package_name: Some("pkg".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&overrides).unwrap();
        assert_eq!(json, serde_json::json!({ "package_name": "pkg" }));
    }
}
