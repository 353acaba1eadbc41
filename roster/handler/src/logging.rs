//! Log output for the server.
//!
//! Events are filtered with `RUST_LOG` when it is set and with the configured
//! directives otherwise, then written either as flattened JSON lines or in the
//! multi-line pretty format meant for terminals.

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// # Arguments
///
/// - `directives` - Filter used when `RUST_LOG` is unset or invalid.
/// - `pretty` - Pretty output instead of JSON.
pub fn setup_logging(directives: &str, pretty: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(directives));

    if pretty {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_timer(UtcTime::rfc_3339()),
            )
            .init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_timer(UtcTime::rfc_3339()),
            )
            .init()
    }
}

fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}
