use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g. `savings_tracker=info`)
/// is used. Only the first call has any effect, and a subscriber installed elsewhere
/// is left in place.
pub fn init_tracing(default_directive: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let _ = fmt().with_env_filter(filter).try_init();
        tracing::info!("Savings Tracker tracing initialized.");
    });
}
