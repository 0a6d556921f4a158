//! Code Analyzer Module
//!
//! Static analysis of a Python package:
//! - Package walking with import-rule awareness
//! - Module parsing (namespace, definitions, docstrings)
//! - Signature extraction and member collection

pub mod members;
pub mod parser;
pub mod scanner;
pub mod signature;

pub use members::{collect_members, has_documentable_members};
pub use scanner::{DiscoveredModule, ModuleFile, PackageWalker};
