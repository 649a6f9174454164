//! Server-mode resolution.
//!
//! Server-rendered pages resolve once per request with whatever preference
//! is available synchronously. A preference is advisory: an unknown key is
//! ignored in favour of the action's default.

use strategy_registry::Registry;
use strategy_types::{Action, Module, Result, StrategyName};
use tracing::debug;

/// Optional inputs to [`resolve_strategy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
	pub preferred: Option<StrategyName>,
}

impl ResolveOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn preferred(mut self, preferred: impl Into<StrategyName>) -> Self {
		self.preferred = Some(preferred.into());
		self
	}
}

/// Picks the strategy for `module`/`action`.
///
/// Returns `options.preferred` verbatim when the action implements it, and
/// the action's default otherwise.
///
/// # Errors
///
/// Returns a configuration error if the module or action is not registered.
pub fn resolve_strategy<T>(
	registry: &Registry<T>,
	module: Module,
	action: Action,
	options: &ResolveOptions,
) -> Result<StrategyName> {
	let config = registry.require_action_config(module, action)?;

	if let Some(preferred) = &options.preferred {
		if config.contains(preferred.as_str()) {
			debug!("Using preferred strategy '{}' for {}/{}", preferred, module, action);
			return Ok(preferred.clone());
		}
		debug!(
			"Preferred strategy '{}' not implemented for {}/{}, using default '{}'",
			preferred,
			module,
			action,
			config.default_strategy()
		);
	}

	Ok(config.default_strategy().clone())
}

#[cfg(test)]
mod tests {
	use super::*;
	use strategy_registry::{ActionConfig, ModuleConfig};
	use strategy_types::{ConfigurationError, ReadyLoader, StrategyError};

	fn registry() -> Registry<&'static str> {
		Registry::builder()
			.module(
				Module::Vehicles,
				ModuleConfig::new()
					.with_action(
						Action::Index,
						ActionConfig::new("base").with_strategy("base", ReadyLoader::new("table")),
					)
					.with_action(
						Action::Create,
						ActionConfig::new("simple")
							.with_strategy("base", ReadyLoader::new("form"))
							.with_strategy("simple", ReadyLoader::new("short form"))
							.with_strategy("wizard", ReadyLoader::new("steps")),
					),
			)
			.build()
			.unwrap()
	}

	#[test]
	fn test_default_without_preference() {
		let registry = registry();
		for (module, action, config) in registry.entries() {
			let resolved = resolve_strategy(&registry, module, action, &ResolveOptions::new()).unwrap();
			assert_eq!(&resolved, config.default_strategy());
		}
	}

	#[test]
	fn test_valid_preference_returned() {
		let registry = registry();
		for preferred in ["base", "simple", "wizard"] {
			let options = ResolveOptions::new().preferred(preferred);
			let resolved =
				resolve_strategy(&registry, Module::Vehicles, Action::Create, &options).unwrap();
			assert_eq!(resolved, preferred);
		}
	}

	#[test]
	fn test_invalid_preference_falls_back() {
		let registry = registry();
		let options = ResolveOptions::new().preferred("kanban");
		let resolved =
			resolve_strategy(&registry, Module::Vehicles, Action::Create, &options).unwrap();
		assert_eq!(resolved, "simple");

		let resolved = resolve_strategy(&registry, Module::Vehicles, Action::Index, &options).unwrap();
		assert_eq!(resolved, "base");
	}

	#[test]
	fn test_unregistered_module() {
		let registry = registry();
		let result = resolve_strategy(&registry, Module::Drivers, Action::Index, &ResolveOptions::new());
		assert_eq!(
			result,
			Err(StrategyError::Configuration(
				ConfigurationError::ModuleNotRegistered(Module::Drivers)
			))
		);
	}

	#[test]
	fn test_unregistered_action() {
		let registry = registry();
		let result = resolve_strategy(
			&registry,
			Module::Vehicles,
			Action::Edit,
			&ResolveOptions::new().preferred("base"),
		);
		assert!(matches!(
			result,
			Err(StrategyError::Configuration(
				ConfigurationError::ActionNotRegistered { .. }
			))
		));
	}
}
