pub mod format;
pub mod persistence;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "fintrack_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    init_tracing_with(None);
}

/// Same as [`init_tracing`], with an extra filter directive (e.g. from config).
pub fn init_tracing_with(directive: Option<&str>) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        let mut rejected = Vec::new();
        for raw in std::iter::once(DEFAULT_DIRECTIVE).chain(directive) {
            match raw.parse::<Directive>() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(err) => rejected.push((raw.to_string(), err.to_string())),
            }
        }

        let _ = fmt().with_env_filter(filter).try_init();
        for (directive, error) in rejected {
            tracing::warn!(%directive, %error, "ignoring invalid log directive");
        }
    });
}

pub use format::format_amount;
