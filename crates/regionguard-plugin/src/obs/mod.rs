//! Observability: tracing setup and in-process counters.
//!
//! Counters are plain atomics keyed by label set and rendered in Prometheus
//! text format on demand.

pub mod metrics;

pub use metrics::Metrics;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
