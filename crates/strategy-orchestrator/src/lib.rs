//! Lazy loading and selection of strategy implementations.
//!
//! The orchestrator takes a resolved strategy key, finds (or falls back to
//! the default) deferred implementation, and exposes it to the caller. Loads
//! are single-flight per entry: the loader runs at most once, concurrent
//! callers share the in-flight load, and the settled value or error is kept
//! for the life of the process.
//!
//! # Components
//!
//! - `deferred`: the per-entry cache and its `LoadState` machine
//! - `orchestrator`: construction from a registry, `select` and `render`

pub mod deferred;
pub mod orchestrator;

pub use deferred::{DeferredImplementation, LoadState, SharedLoad};
pub use orchestrator::Orchestrator;
