//! TSX page rendering.
//!
//! The module record is embedded as 2-space-indented JSON in a page that
//! hands it to the shared documentation component.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::Renderer;
use crate::config::OutputFormat;
use crate::constants::render::JSON_INDENT;
use crate::types::{DocError, ModuleRecord, Result};

/// Renders a Next.js page that feeds the module record to `<ModuleDoc />`.
pub struct TsxRenderer {
    import_path: String,
}

impl TsxRenderer {
    pub fn new(import_path: impl Into<String>) -> Self {
        Self {
            import_path: import_path.into(),
        }
    }

    fn to_json(record: &ModuleRecord) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
        record.serialize(&mut ser)?;

        String::from_utf8(buf).map_err(|e| DocError::Context {
            context: format!("serializing {}", record.module_name),
            message: e.to_string(),
        })
    }
}

impl Renderer for TsxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Tsx
    }

    fn render_module(&self, record: &ModuleRecord) -> Result<String> {
        let json = Self::to_json(record)?;

        Ok(format!(
            "import {{ ModuleDoc }} from '{}';\n\n\
             // Data structure extracted from Python docstrings\n\
             const moduleData = {};\n\n\
             export default function Page() {{\n  \
             return <ModuleDoc {{...moduleData}} />;\n\
             }}\n",
            self.import_path, json
        ))
    }
}
