//! Tracing subscriber setup for the binary.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Install a compact fmt subscriber. `RUST_LOG` wins over `level`; later calls
/// do nothing.
pub fn init(level: &str) {
	INIT.get_or_init(|| {
		let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
		tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
	});
}
