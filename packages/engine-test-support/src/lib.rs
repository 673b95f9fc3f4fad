//! Shared helpers for the engine's integration tests.
//!
//! - [`test_logging`]: one-time tracing subscriber for test binaries
//! - [`env_guard`]: scoped environment variables for config tests

pub mod env_guard;
pub mod test_logging;
