//! Fleet strategy service.
//!
//! Wires the built-in fleet catalogue, the tenant configuration and the
//! resolver/orchestrator pair into a single service, and provides the
//! command-line interface around it.
//!
//! # Components
//!
//! - `catalog`: modules, actions and strategies shipped with the application
//! - `cli`: command-line definitions
//! - `service`: resolution, rendering and tenant validation

pub mod catalog;
pub mod cli;
pub mod service;

pub use catalog::{fleet_registry, Screen};
pub use service::{
	CatalogEntry, ClientReport, IgnoredPreference, RenderOutcome, RenderReport, StrategyService,
	ValidationReport,
};
