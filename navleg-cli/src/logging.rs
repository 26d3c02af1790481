//! Logging setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Build the filter used by the subscriber.
///
/// `RUST_LOG` wins when set; otherwise the requested level applies to the
/// library and the binary, both of which log under the `navleg` target.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("navleg={level}")))
}

/// Install a `fmt` subscriber writing to stderr.
pub fn init(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
