use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber. Logs go to stderr so `--print` output
/// on stdout stays clean.
pub fn init_logger() {
    // Optionally allow RUST_LOG to override levels
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .with(filter)
        .try_init();
}
