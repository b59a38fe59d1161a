//! Diagnostics for the viewer, written to stderr.
//!
//! Filtered by `RUST_LOG` (default `warn`), e.g.
//! `RUST_LOG=conway=debug,life_viewer=info cargo run -p life_viewer`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
