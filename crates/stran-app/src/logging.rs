//! Tracing subscriber setup.

use stran_config::schema::LogLevel;
use tracing_subscriber::EnvFilter;

const FALLBACK_DIRECTIVE: &str = "stran=info";

/// The filter directive for this run. A bare level from the command line
/// or the config file applies to the `stran` crates only; anything
/// containing `=` is taken as a full directive.
pub fn directive(cli: Option<&str>, configured: LogLevel) -> String {
    match cli.map(str::trim).filter(|s| !s.is_empty()) {
        Some(d) if d.contains('=') => d.to_string(),
        Some(level) => format!("stran={level}"),
        None => format!("stran={}", configured.as_directive()),
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `directive`.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|e| {
            eprintln!("invalid log directive '{directive}' ({e}), using {FALLBACK_DIRECTIVE}");
            EnvFilter::new(FALLBACK_DIRECTIVE)
        });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
