// Copyright 2023 Ulvetanna Inc.

/// Installs a global `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_tracing() {
	use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
