//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries
//! - Respect `RUST_LOG` when set, fall back to caller-supplied directives
//!
//! # Design Decisions
//! - Library code only emits `tracing` events; subscribers are installed
//!   by the binary, never by the library

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_directives` is used when `RUST_LOG` is absent, e.g.
/// `"origin_gateway=info"`.
pub fn init(default_directives: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
