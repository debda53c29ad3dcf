//! Shared test utilities used across barriers crates.
//!
//! [`recording`] captures spans and events emitted during a test so suites
//! can assert instrumentation; [`ci`] holds environment-driven run profiles.

pub mod ci;
pub mod recording;
