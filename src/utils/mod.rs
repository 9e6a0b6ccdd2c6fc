use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "accounts_core=info";

/// Installs a global fmt subscriber honoring `RUST_LOG`, defaulting to `accounts_core=info`.
///
/// Leaves an already installed subscriber in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt().with_env_filter(filter).try_init();
    });
}
