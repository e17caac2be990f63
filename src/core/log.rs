// Define a new module for logging initialization
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. The crate and HTTP traces log at `info`,
/// or `debug` when `verbose` is set. A valid `RUST_LOG` replaces these
/// directives entirely.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}

fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return filter;
    }

    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(format!("warn,fxform={level},tower_http={level}"))
}
