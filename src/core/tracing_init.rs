use crate::core::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber on stderr, leaving stdout to the console.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(env_filter);

    if human_readable(config) {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).with_current_span(true))
            .init();
    }
}

fn human_readable(config: &LoggingConfig) -> bool {
    config.console || config.format.eq_ignore_ascii_case("console")
}
