//! Logging setup on top of `tracing`.
//!
//! Logs go to stderr so stdout stays clean for tables and JSON.
//!
//! Level selection, first match wins:
//! 1. `-v` / `-vv`: debug / trace for this crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for this crate, warnings for dependencies
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[must_use]
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    match (verbose, quiet) {
        (0, true) => EnvFilter::new("error"),
        (0, false) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,swift_module_graph=info")),
        (1, _) => EnvFilter::new("warn,swift_module_graph=debug"),
        _ => EnvFilter::new("info,swift_module_graph=trace"),
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logger(verbose: u8, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && std::env::var_os("NO_COLOR").is_none())
        .compact();

    let _ = tracing_subscriber::registry().with(build_filter(verbose, quiet)).with(fmt_layer).try_init();
}
