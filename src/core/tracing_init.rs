use crate::core::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const FALLBACK_LEVEL: &str = "info";

/// Connection-level chatter from the upstream HTTP clients, capped at `warn`
const QUIET_DEPENDENCIES: &[&str] = &["hyper=warn", "hyper_util=warn", "reqwest=warn", "cookie_store=warn"];

/// Filter directives for a configured level: the level applies to the
/// dashboard itself while the HTTP client stack stays at `warn` unless the
/// level is stricter.
pub fn default_directives(level: &str) -> String {
    let level = level.trim();
    let level = if level.is_empty() { FALLBACK_LEVEL } else { level };

    if level.eq_ignore_ascii_case("error") {
        return level.to_string();
    }

    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_DEPENDENCIES.iter().map(|d| d.to_string()));
    directives.join(",")
}

fn build_filter(level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::try_new(default_directives(level)).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using '{}'", level, FALLBACK_LEVEL);
        EnvFilter::new(default_directives(FALLBACK_LEVEL))
    })
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = build_filter(&config.level);

    if config.console || config.format == "console" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_ansi(true),
            )
            .init();
    } else {
        // One flat object per line so `service` and `error` sit beside `message`
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init();
    }
}
