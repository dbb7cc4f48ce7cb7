use std::path::PathBuf;

use clap::Parser;

/// S-Tran: a web browser that translates page text in place.
#[derive(Parser, Debug)]
#[command(name = "stran", version, about)]
pub struct Args {
    /// Page to open in the first window instead of the configured home page.
    pub url: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// tracing filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
