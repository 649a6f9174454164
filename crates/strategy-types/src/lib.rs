//! Shared types for the fleet strategy resolution system.
//!
//! This crate defines the vocabulary used by every other crate in the
//! workspace: the closed set of modules and actions, strategy names and the
//! helpers that normalise them, the deferred loader abstraction, the
//! client-side resolution result, and the error taxonomy.

pub mod errors;
pub mod loader;
pub mod modules;
pub mod resolved;
pub mod strategy;

pub use errors::*;
pub use loader::*;
pub use modules::*;
pub use resolved::*;
pub use strategy::*;
