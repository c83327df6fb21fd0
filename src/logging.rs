use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber for a binary.
///
/// Output goes to stderr so it never mixes with rendered score sheets.
/// Calling this twice is harmless.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
