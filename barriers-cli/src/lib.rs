//! Support library for the `barriers` binary.
//!
//! Exposes the command pipeline and logging setup so tests and doctests can
//! drive a full analysis without spawning a subprocess.

pub mod cli;
pub mod logging;
