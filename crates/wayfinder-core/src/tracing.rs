use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize JSON stdout tracing. Call once at service startup.
///
/// `RUST_LOG` wins when set; otherwise `default_directives` is used
/// (e.g. `"wayfinder_api=info,tower_http=info"`).
/// Later calls are ignored.
pub fn init_tracing(default_directives: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(true))
        .try_init();
}
