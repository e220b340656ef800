use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for the hosting process.
///
/// Call once at startup; filter via `RUST_LOG`.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
