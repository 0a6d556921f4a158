//! Documentation Generation
//!
//! Drives one run over a package:
//!
//! ```text
//! locate → discover → group by file → per file:
//!     read → parse → collect members → reconcile → render → write
//! ```
//!
//! Files are independent. A failure in one file is logged and counted; only
//! package-level failures (missing or non-package directory, invalid
//! configuration) abort the run.

pub mod reconcile;

use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

use crate::analyzer::parser::{ModuleParser, ParsedModule, create_parser};
use crate::analyzer::scanner::{ModuleFile, PackageWalker, group_by_file, resolve_output_path};
use crate::analyzer::{collect_members, has_documentable_members};
use crate::config::DocumentationConfig;
use crate::render::{Renderer, create_renderer};
use crate::types::{DocError, ModuleName, ModuleRecord, Result, ResultExt};

pub use reconcile::{MemberSource, build_member, merge_parameters, parse_or_empty, reconcile};

/// Per-file counts for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File backs only `__init__` modules
    InitModule,
    NoMembers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    Skipped(SkipReason),
}

/// Everything a run needs, passed explicitly.
pub struct GenerationContext {
    config: DocumentationConfig,
    renderer: Box<dyn Renderer>,
    parser: Box<dyn ModuleParser>,
    progress: ProgressBar,
}

impl GenerationContext {
    pub fn new(config: DocumentationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            renderer: create_renderer(&config),
            parser: create_parser()?,
            progress: ProgressBar::hidden(),
            config,
        })
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_parser(mut self, parser: Box<dyn ModuleParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn config(&self) -> &DocumentationConfig {
        &self.config
    }

    /// Document every module file of the configured package.
    pub fn run(&self) -> Result<RunSummary> {
        let walker = PackageWalker::new(&self.config.source_root, self.config.package_name.as_str())
            .with_exclude_private(self.config.exclude_private)
            .with_exclude(self.config.exclude.clone());

        let modules = walker.discover_modules().inspect_err(|e| {
            tracing::error!(package = %self.config.package_name, error = %e, "Error processing package");
        })?;

        fs::create_dir_all(&self.config.output_dir).map_err(|e| DocError::Write {
            path: self.config.output_dir.clone(),
            reason: e.to_string(),
        })?;

        let files = group_by_file(modules);
        self.progress.set_length(files.len() as u64);

        let mut summary = RunSummary::default();
        for file in &files {
            self.progress
                .set_message(file.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default());

            match self.process_module_file(file) {
                Ok(FileOutcome::Written(path)) => {
                    tracing::debug!(file = %file.path.display(), output = %path.display(), "Wrote page");
                    summary.written += 1;
                }
                Ok(FileOutcome::Skipped(reason)) => {
                    tracing::debug!(file = %file.path.display(), ?reason, "Skipped file");
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::error!(file = %file.path.display(), scope = %e.scope(), error = %e, "Error processing file");
                    summary.failed += 1;
                }
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        tracing::info!(
            package = %self.config.package_name,
            written = summary.written,
            skipped = summary.skipped,
            failed = summary.failed,
            "Documentation generated"
        );
        Ok(summary)
    }

    /// Render and write the page for one source file.
    pub fn process_module_file(&self, file: &ModuleFile) -> Result<FileOutcome> {
        if file.is_init() && !self.config.document_init_modules {
            return Ok(FileOutcome::Skipped(SkipReason::InitModule));
        }
        let Some(canonical) = file.canonical() else {
            return Ok(FileOutcome::Skipped(SkipReason::NoMembers));
        };

        let path_str = file.path.to_string_lossy();
        let content = fs::read_to_string(&file.path)
            .with_context_fn(|| format!("reading {}", path_str))?;
        let module = self.parser.parse(&path_str, &content)?;

        if !has_documentable_members(&module, self.config.exclude_private) {
            return Ok(FileOutcome::Skipped(SkipReason::NoMembers));
        }

        let record = self.build_module_record(&canonical.name, &module);
        let page = self.renderer.render_module(&record)?;

        let output = resolve_output_path(
            &canonical.name,
            &self.config.output_dir,
            self.renderer.format().page_file_name(),
        );
        write_page(&output, &page)?;

        Ok(FileOutcome::Written(output))
    }

    /// Module record with members sorted by name.
    pub fn build_module_record(&self, name: &ModuleName, module: &ParsedModule) -> ModuleRecord {
        let (classes, functions) = collect_members(module, self.config.exclude_private);

        let mut defs: Vec<_> = classes.into_iter().chain(functions).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));

        let members = defs
            .into_iter()
            .map(|def| build_member(def, self.config.include_source))
            .collect();

        let description = parse_or_empty(module.docstring.as_deref(), name.as_str())
            .description()
            .map(str::to_string);

        ModuleRecord {
            module_name: name.to_string(),
            description,
            members,
        }
    }
}

fn write_page(path: &std::path::Path, page: &str) -> Result<()> {
    let to_write_error = |e: std::io::Error| DocError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, page).map_err(to_write_error)
}

/// Run documentation generation for `config` without progress output.
pub fn generate_documentation(config: DocumentationConfig) -> Result<RunSummary> {
    GenerationContext::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parser::PythonParser;
    use crate::config::OutputFormat;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    const GOOD: &str = r#""""Geometry helpers."""

class Circle:
    """A circle.

    Args:
        radius (float): Circle radius.
    """

    def __init__(self, radius: float = 1.0):
        self.radius = radius


def area(shape) -> float:
    """Compute an area.

    Args:
        shape: Shape to measure.

    Returns:
        float: The area.
    """
"#;

    fn fixture() -> (TempDir, TempDir) {
        let src = TempDir::new().unwrap();
        let root = src.path();
        write(root, "pkg/__init__.py", "from .geometry import Circle\n");
        write(root, "pkg/geometry.py", GOOD);
        write(root, "pkg/broken.py", "def oops(:\n    pass\n");
        write(root, "pkg/constants.py", "PI = 3.14\n");
        write(root, "pkg/sub/__init__.py", "");
        write(root, "pkg/sub/tools.py", "def _hidden():\n    pass\n\ndef shown():\n    pass\n");
        (src, TempDir::new().unwrap())
    }

    fn config(src: &TempDir, out: &TempDir, format: OutputFormat) -> DocumentationConfig {
        DocumentationConfig::new("pkg", out.path())
            .with_source_root(src.path())
            .with_format(format)
    }

    #[test]
    fn test_failing_module_does_not_abort_run() {
        let (src, out) = fixture();
        let summary = generate_documentation(config(&src, &out, OutputFormat::Tsx)).unwrap();

        assert!(out.path().join("geometry/page.tsx").is_file());
        assert!(out.path().join("sub/tools/page.tsx").is_file());
        assert!(!out.path().join("broken").exists());
        assert!(!out.path().join("constants").exists());
        assert!(!out.path().join("page.tsx").exists());

        assert_eq!(summary.written, 2);
        assert_eq!(summary.failed, 1);
        // pkg/__init__.py, pkg/sub/__init__.py, constants.py
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.total(), 6);
    }

    #[test]
    fn test_tsx_page_contents() {
        let (src, out) = fixture();
        generate_documentation(config(&src, &out, OutputFormat::Tsx)).unwrap();

        let page = fs::read_to_string(out.path().join("geometry/page.tsx")).unwrap();
        assert!(page.contains("\"moduleName\": \"pkg.geometry\""));
        assert!(page.contains("\"description\": \"Geometry helpers.\""));
        assert!(page.find("\"name\": \"Circle\"").unwrap() < page.find("\"name\": \"area\"").unwrap());
        assert!(page.contains("\"description\": \"Circle radius.\""));
        assert!(page.contains("\"source_code\": \"class Circle:"));
    }

    #[test]
    fn test_markdown_excluding_private() {
        let (src, out) = fixture();
        let cfg = config(&src, &out, OutputFormat::Markdown).with_exclude_private(true);
        let summary = generate_documentation(cfg).unwrap();

        assert_eq!(summary.written, 2);
        let page = fs::read_to_string(out.path().join("sub/tools/page.md")).unwrap();
        assert!(page.starts_with("# pkg.sub.tools\n"));
        assert!(page.contains("## function `shown`"));
        assert!(!page.contains("_hidden"));
    }

    #[test]
    fn test_init_modules_opt_in() {
        let (src, out) = fixture();
        write(src.path(), "pkg/__init__.py", "def setup():\n    pass\n");
        let mut cfg = config(&src, &out, OutputFormat::Tsx);
        cfg.document_init_modules = true;

        generate_documentation(cfg).unwrap();
        let page = fs::read_to_string(out.path().join("page.tsx")).unwrap();
        assert!(page.contains("\"moduleName\": \"pkg\""));
    }

    #[test]
    fn test_missing_package_is_fatal() {
        let (src, out) = fixture();
        let cfg = DocumentationConfig::new("nothere", out.path()).with_source_root(src.path());

        let err = generate_documentation(cfg).unwrap_err();
        assert!(!err.is_recoverable());
    }

    struct RejectingParser {
        inner: PythonParser,
        reject: &'static str,
    }

    impl ModuleParser for RejectingParser {
        fn parse(&self, path: &str, content: &str) -> Result<ParsedModule> {
            if path.ends_with(self.reject) {
                return Err(DocError::parse(path, "rejected"));
            }
            self.inner.parse(path, content)
        }
    }

    #[test]
    fn test_parser_failure_is_per_file() {
        let (src, out) = fixture();
        let ctx = GenerationContext::new(config(&src, &out, OutputFormat::Markdown))
            .unwrap()
            .with_parser(Box::new(RejectingParser {
                inner: PythonParser::new().unwrap(),
                reject: "geometry.py",
            }));

        let summary = ctx.run().unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(summary.failed, 2);
        assert!(!out.path().join("geometry").exists());
        assert!(out.path().join("sub/tools/page.md").is_file());
    }
}
