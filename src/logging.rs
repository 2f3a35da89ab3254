//! Tracing subscriber construction.
//!
//! The subscriber is returned as a [`Dispatch`] rather than installed
//! globally; `main` attaches it to the run future with
//! [`WithSubscriber`](tracing::instrument::WithSubscriber).

use tracing::Dispatch;
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Build the log dispatcher. `RUST_LOG` wins over `default_level`.
pub fn dispatch(default_level: &str) -> Dispatch {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .finish();
    Dispatch::new(subscriber)
}
