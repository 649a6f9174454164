//! Static strategy catalogue.
//!
//! The registry maps each `(module, action)` pair to a set of named
//! strategies, each backed by a deferred loader, plus the default strategy
//! for the action. It is supplied wholesale at start-up and never mutated.

pub mod config;
pub mod registry;

pub use config::{ActionConfig, ModuleConfig, StrategyDefinition};
pub use registry::{Registry, RegistryBuilder};
