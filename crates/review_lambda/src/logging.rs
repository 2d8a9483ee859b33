use tracing_subscriber::EnvFilter;

/// JSON lines on stdout for CloudWatch, filtered by `RUST_LOG` (default `info`).
pub fn init_json_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_current_span(false)
        .init();
}
