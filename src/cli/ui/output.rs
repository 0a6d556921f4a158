use console::style;

use crate::generator::RunSummary;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), message);
    }

    /// Final line of a run
    pub fn summary(&self, package: &str, summary: &RunSummary) {
        let line = summary_line(package, summary);
        if summary.failed > 0 {
            self.warning(&line);
        } else {
            self.success(&line);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

fn summary_line(package: &str, summary: &RunSummary) -> String {
    format!(
        "{}: {} written, {} skipped, {} failed",
        package, summary.written, summary.skipped, summary.failed
    )
}
