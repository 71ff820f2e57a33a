//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Default log level for the given CLI verbosity
///
/// `RUST_LOG`, when set, takes precedence over this.
pub const fn default_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_CRATE_NAME"),
            default_level(verbosity, quiet)
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
