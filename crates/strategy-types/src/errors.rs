//! Error types for strategy resolution.
//!
//! Configuration errors are programmer errors: a call site asked for a
//! module, action or strategy the registry does not know. They are returned
//! immediately and never retried. Tenant-driven mismatches are reported as
//! data through [`StrategyMismatch`] so the caller can degrade gracefully.
//! Loader failures are terminal for the affected implementation only.

use crate::modules::{Action, Module};
use crate::strategy::{format_available, StrategyName};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StrategyError>;

/// Static mismatch between the registry and its callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
	#[error("Unknown module: {0}")]
	UnknownModule(String),

	#[error("Unknown action: {0}")]
	UnknownAction(String),

	#[error("Module not registered: {0}")]
	ModuleNotRegistered(Module),

	#[error("Action {action} not registered for module {module}")]
	ActionNotRegistered { module: Module, action: Action },

	#[error("No strategies registered for module {0}")]
	NoStrategies(Module),

	#[error("Default strategy '{default}' is not among the strategies of {module}/{action}")]
	DefaultNotRegistered {
		module: Module,
		action: Action,
		default: StrategyName,
	},

	#[error("Module {0} registered more than once")]
	DuplicateModule(Module),

	#[error(
		"Strategy '{requested}' for {module}/{action} could not be resolved (default '{default}' also missing)"
	)]
	StrategyUnresolved {
		module: Module,
		action: Action,
		requested: StrategyName,
		default: StrategyName,
	},
}

/// Failure reported by a deferred loader.
///
/// Cloneable so every caller sharing an in-flight load observes the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct LoadError(String);

impl LoadError {
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}

	pub fn message(&self) -> &str {
		&self.0
	}
}

/// Errors surfaced by the registry, resolver and orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
	#[error("Configuration error: {0}")]
	Configuration(#[from] ConfigurationError),

	#[error("Failed to load strategy '{strategy}' for {module}/{action}: {source}")]
	LoadFailure {
		module: Module,
		action: Action,
		strategy: StrategyName,
		#[source]
		source: LoadError,
	},
}

impl StrategyError {
	pub fn is_configuration(&self) -> bool {
		matches!(self, StrategyError::Configuration(_))
	}
}

/// A tenant-configured strategy key that the action does not implement.
///
/// The message names the key, the module/action pair and every available
/// key, sorted, so it is actionable straight from the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error(
	"Strategy '{requested}' is not implemented for {module}/{action}; available strategies: {}",
	format_available(.available)
)]
pub struct StrategyMismatch {
	pub requested: StrategyName,
	pub module: Module,
	pub action: Action,
	/// Sorted ascending.
	pub available: Vec<StrategyName>,
}

impl StrategyMismatch {
	pub fn new(
		requested: StrategyName,
		module: Module,
		action: Action,
		mut available: Vec<StrategyName>,
	) -> Self {
		available.sort();
		Self {
			requested,
			module,
			action,
			available,
		}
	}

	pub fn message(&self) -> String {
		self.to_string()
	}
}
