use std::process::ExitCode;

use docpages::cli;
use docpages::config::OutputFormat;

fn main() -> ExitCode {
    cli::run("docstring2tsx", OutputFormat::Tsx)
}
