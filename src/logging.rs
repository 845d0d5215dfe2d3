//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize tracing from config.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `mealplanner=<level>`
/// followed by `extra_directives` (comma separated, may be empty).
/// Output goes to stderr so command output on stdout stays clean.
pub fn init_logging(config: &LoggingConfig, extra_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config, extra_directives)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn default_directives(config: &LoggingConfig, extra: &str) -> String {
    if extra.is_empty() {
        format!("mealplanner={}", config.level)
    } else {
        format!("mealplanner={},{}", config.level, extra)
    }
}
