//! Test utilities for armsynth
//!
//! This module provides shared fixtures and logging setup for unit and
//! integration tests.
//!
//! - [`fixtures::TreeFixture`] - ready-made construct trees (network stacks,
//!   web apps, dependency cycles)
//! - [`fixtures::ConfigFixture`] - sample `armsynth.toml` contents
//! - [`init_test_logging`] - one-time tracing setup
//!
//! # Example
//!
//! ```rust,no_run
//! use armsynth::test_utils::{TreeFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let fixture = TreeFixture::web_app();
//! assert_eq!(fixture.tree.len(), 2);
//! ```

pub mod fixtures;

pub use fixtures::{ConfigFixture, TreeFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set, that level is used;
/// otherwise `RUST_LOG` is honored when present and logging stays off when it
/// is not.
///
/// To enable logging in tests via environment variable:
/// ```bash
/// RUST_LOG=armsynth=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_ansi(true)
            .try_init();
    });
}
