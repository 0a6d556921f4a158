//! Configuration Management
//!
//! Hierarchical resolution for a documentation run:
//! 1. Built-in defaults
//! 2. Project config (docpages.toml)
//! 3. Environment variables (DOCPAGES_*)
//! 4. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
