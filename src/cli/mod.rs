//! Command-Line Entry Points
//!
//! Both binaries share one argument surface and differ only in the output
//! format they fix.

pub mod progress;
pub mod ui;

use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigLoader, ConfigOverrides, OutputFormat};
use crate::generator::GenerationContext;
use ui::Output;

#[derive(Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Dotted name of the package to document
    #[arg(long)]
    pub package_name: String,

    /// Directory the pages are written under
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Skip modules and members whose names start with an underscore
    #[arg(long)]
    pub exclude_private: bool,
}

impl Args {
    pub fn into_overrides(self, format: OutputFormat) -> ConfigOverrides {
        ConfigOverrides {
            package_name: Some(self.package_name),
            output_dir: Some(self.output_dir),
            // An absent flag leaves the file/env value in place
            exclude_private: self.exclude_private.then_some(true),
            format: Some(format),
        }
    }
}

fn about(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Tsx => "Generate TSX documentation pages from Google-style Python docstrings",
        OutputFormat::Markdown => {
            "Generate Markdown documentation pages from Google-style Python docstrings"
        }
    }
}

/// Parse arguments for the binary `name`, exiting on usage errors.
pub fn parse_args(name: &'static str, format: OutputFormat) -> Args {
    let matches = Args::command().name(name).about(about(format)).get_matches();
    Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Set up panic handler for graceful error reporting
pub fn setup_panic_handler(name: &'static str) {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31m{} encountered an unexpected error:\x1b[0m", name);
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn execute(args: Args, format: OutputFormat) -> anyhow::Result<()> {
    let config = ConfigLoader::load(args.into_overrides(format))?;
    let package = config.package_name.clone();

    let ctx = GenerationContext::new(config)?.with_progress(progress::file_progress(format));
    let summary = ctx.run()?;

    Output::new().summary(&package, &summary);
    Ok(())
}

/// Shared `main` for both binaries. Per-file failures do not affect the
/// exit status; configuration and package-level failures do.
pub fn run(name: &'static str, format: OutputFormat) -> ExitCode {
    setup_panic_handler(name);
    let args = parse_args(name, format);
    init_tracing();

    match execute(args, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
