//! Diagnostic tracing for the command-line front end.
//!
//! Diagnostics go to stderr and are controlled by `RUST_LOG`; query results
//! on stdout are never affected.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber.
///
/// Lines carry level and message only. A second call is a no-op.
///
/// ```bash
/// RUST_LOG=distro_info_db=debug distro-info ubuntu --lts
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}
