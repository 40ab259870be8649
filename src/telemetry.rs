use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "quote_recorder=info";

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
/// Logs go to stderr so stdout stays free for the run summary.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
