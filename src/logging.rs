use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber for standalone binaries.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Calling this more
/// than once is harmless; later installs are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
