//! docpages - Python API Documentation Pages
//!
//! Generates one documentation page per module file of a Python package
//! from Google-style docstrings, reading the source statically with
//! tree-sitter (nothing is imported or executed).
//!
//! ## Output Formats
//!
//! - **TSX**: a Next.js `page.tsx` embedding the module record as JSON
//! - **Markdown**: an MDX-compatible `page.md`
//!
//! ## Quick Start
//!
//! ```ignore
//! use docpages::{DocumentationConfig, OutputFormat, generate_documentation};
//!
//! let config = DocumentationConfig::new("mypkg", "docs/api")
//!     .with_source_root("src")
//!     .with_format(OutputFormat::Markdown);
//! let summary = generate_documentation(config)?;
//! println!("{} pages written", summary.written);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: Package walking, Python parsing, signatures, members
//! - [`docstring`]: Google-style docstring parser
//! - [`generator`]: Reconciliation and the per-file pipeline
//! - [`render`]: TSX and Markdown page renderers
//! - [`config`]: Layered configuration

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod docstring;
pub mod generator;
pub mod render;
pub mod types;

// Configuration
pub use config::{ConfigLoader, ConfigOverrides, DocumentationConfig, OutputFormat};

// Error Types
pub use types::error::{DocError, ErrorScope, Result, ResultExt};

// Records
pub use types::{MemberKind, MemberRecord, ModuleName, ModuleRecord, Parameter, Section, SectionContent};

// Pipeline
pub use generator::{GenerationContext, RunSummary, generate_documentation};
pub use render::{Renderer, create_renderer};
