//! Logging setup for the strategy service.
//!
//! Configures a `tracing-subscriber` pipeline with either human-readable or
//! JSON output and an `EnvFilter` derived from the configured level.

pub mod tracing;

pub use crate::tracing::{init_tracing, TracingConfig};
