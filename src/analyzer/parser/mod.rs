//! Python Source Parser
//!
//! Tree-sitter based static reading of Python modules. A parsed module
//! exposes its namespace (names bound by definitions, imports, and
//! assignments) so documentable members can be told apart from re-exports.
//!
//! ```rust,ignore
//! use docpages::analyzer::parser::create_parser;
//!
//! let parser = create_parser()?;
//! let module = parser.parse("pkg/core.py", content)?;
//! ```

pub mod module;
pub mod python;
pub mod traits;

pub use module::{Binding, Definition, ParamKind, ParsedModule, RawParameter};
pub use python::PythonParser;
pub use traits::{
    ModuleParser, create_ts_parser, first_error_node, get_node_position, get_node_text,
    named_children, start_line,
};

use crate::types::Result;

/// Create the default module parser.
pub fn create_parser() -> Result<Box<dyn ModuleParser>> {
    Ok(Box::new(PythonParser::new()?))
}
