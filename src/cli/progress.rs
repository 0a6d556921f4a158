//! Progress Reporting
//!
//! One bar per run, advanced once per module file.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::config::OutputFormat;

const TEMPLATE: &str = "{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress bar labelled for `format`. Length is set once files are known.
pub fn file_progress(format: OutputFormat) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    bar.set_style(
        ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.set_prefix(format.progress_label());
    bar
}
