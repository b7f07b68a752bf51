//! CLI argument definitions using clap derive

use clap::Parser;

use crate::cli::commands::check::CheckArgs;

#[derive(Parser)]
#[command(name = "jintest")]
#[command(author, version, about = "Validate and render Jinja2 templates")]
#[command(
    long_about = "Lint a Jinja2 template for syntax and brace-balance errors, render it with JSON data, and check the structure of the rendered output."
)]
pub struct Cli {
    #[command(flatten)]
    pub check: CheckArgs,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,
}

impl GlobalOpts {
    /// Default log filter for these options; `RUST_LOG` takes precedence
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
