//! Subscriber setup: `RUST_LOG` wins, otherwise the configured level with
//! transport crates held at `warn`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls", "tower_http"];

fn build_filter(log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{module}=warn"));
    }
    EnvFilter::new(directives)
}

/// Install the global subscriber. `log_format` is "json" or "pretty".
pub fn init_logging(log_level: &str, log_format: &str) {
    let subscriber = tracing_subscriber::registry().with(build_filter(log_level));

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::info!(log_level, log_format, "logging initialized");
}
