//! Unit test suite for armsynth
//!
//! Focused tests of single components through the public API.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod config_tests;
mod expression_tests;
