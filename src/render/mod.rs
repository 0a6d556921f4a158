//! Page Renderers
//!
//! Turn a `ModuleRecord` into the text of one output page.
//!
//! | Format   | Page        | Payload                                |
//! |----------|-------------|----------------------------------------|
//! | TSX      | `page.tsx`  | JSON record passed to `<ModuleDoc />`  |
//! | Markdown | `page.md`   | MDX-safe Markdown with fenced sections |

mod markdown;
mod tsx;

pub use markdown::{MarkdownRenderer, escape_special, format_section_content};
pub use tsx::TsxRenderer;

use crate::config::{DocumentationConfig, OutputFormat};
use crate::types::{ModuleRecord, Result};

pub trait Renderer: Send + Sync {
    fn format(&self) -> OutputFormat;

    fn render_module(&self, record: &ModuleRecord) -> Result<String>;
}

/// Create the renderer for the configured output format.
pub fn create_renderer(config: &DocumentationConfig) -> Box<dyn Renderer> {
    match config.format {
        OutputFormat::Tsx => Box::new(TsxRenderer::new(&config.components_import_path)),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_renderer() {
        let config = DocumentationConfig::new("pkg", "out");
        assert_eq!(create_renderer(&config).format(), OutputFormat::Tsx);

        let config = config.with_format(OutputFormat::Markdown);
        assert_eq!(create_renderer(&config).format(), OutputFormat::Markdown);
    }
}
