//! The process-wide strategy catalogue.
//!
//! A `Registry` is built once from a complete declarative description and is
//! read-only afterwards. It is shared by `Arc` and handed explicitly to the
//! resolvers and the orchestrator, so tests can supply fabricated catalogues.
//!
//! # Thread Safety
//!
//! The registry has no interior mutability. It is `Send + Sync` whenever the
//! implementation type is, and concurrent reads need no synchronisation.

use crate::config::{ActionConfig, ModuleConfig};
use std::collections::HashMap;
use std::fmt;
use strategy_types::{Action, ConfigurationError, Module, Result, StrategyError};
use tracing::{debug, info};

/// Catalogue of modules, their actions and the strategies of each action.
pub struct Registry<T> {
	modules: HashMap<Module, ModuleConfig<T>>,
}

impl<T> Registry<T> {
	/// Builds a registry from a complete set of module configurations.
	///
	/// # Errors
	///
	/// Returns `ConfigurationError::DefaultNotRegistered` if any action's
	/// default strategy is not one of its strategies.
	pub fn new(modules: HashMap<Module, ModuleConfig<T>>) -> Result<Self> {
		for (module, config) in &modules {
			for (action, action_config) in config.actions() {
				if !action_config.has_valid_default() {
					return Err(ConfigurationError::DefaultNotRegistered {
						module: *module,
						action: *action,
						default: action_config.default_strategy().clone(),
					}
					.into());
				}
			}
		}

		let registry = Self { modules };
		info!(
			"Strategy registry built with {} modules and {} actions",
			registry.modules.len(),
			registry.entries().count()
		);
		Ok(registry)
	}

	pub fn builder() -> RegistryBuilder<T> {
		RegistryBuilder::new()
	}

	pub fn get_module_config(&self, module: Module) -> Option<&ModuleConfig<T>> {
		self.modules.get(&module)
	}

	pub fn get_action_config(&self, module: Module, action: Action) -> Option<&ActionConfig<T>> {
		self.get_module_config(module)
			.and_then(|config| config.action(action))
	}

	/// Like [`Registry::get_action_config`], but reports which half of the
	/// pair is missing.
	pub fn require_action_config(&self, module: Module, action: Action) -> Result<&ActionConfig<T>> {
		let module_config = self
			.get_module_config(module)
			.ok_or(ConfigurationError::ModuleNotRegistered(module))?;

		module_config.action(action).ok_or_else(|| {
			debug!("Action {} requested for module {} but not registered", action, module);
			StrategyError::from(ConfigurationError::ActionNotRegistered { module, action })
		})
	}

	/// Registered modules, sorted.
	pub fn modules(&self) -> Vec<Module> {
		let mut modules: Vec<Module> = self.modules.keys().copied().collect();
		modules.sort();
		modules
	}

	/// Every registered `(module, action, config)` triple, sorted by module
	/// then action.
	pub fn entries(&self) -> impl Iterator<Item = (Module, Action, &ActionConfig<T>)> {
		let mut entries: Vec<(Module, Action, &ActionConfig<T>)> = self
			.modules
			.iter()
			.flat_map(|(module, config)| {
				config
					.actions()
					.map(move |(action, action_config)| (*module, *action, action_config))
			})
			.collect();
		entries.sort_by_key(|(module, action, _)| (*module, *action));
		entries.into_iter()
	}
}

impl<T> fmt::Debug for Registry<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("modules", &self.modules())
			.finish()
	}
}

/// Collects module configurations before validating them as a whole.
pub struct RegistryBuilder<T> {
	modules: HashMap<Module, ModuleConfig<T>>,
	duplicate: Option<Module>,
}

impl<T> RegistryBuilder<T> {
	pub fn new() -> Self {
		Self {
			modules: HashMap::new(),
			duplicate: None,
		}
	}

	pub fn module(mut self, module: Module, config: ModuleConfig<T>) -> Self {
		if self.modules.insert(module, config).is_some() && self.duplicate.is_none() {
			self.duplicate = Some(module);
		}
		self
	}

	/// # Errors
	///
	/// Returns `ConfigurationError::DuplicateModule` if a module was supplied
	/// twice, or any error from [`Registry::new`].
	pub fn build(self) -> Result<Registry<T>> {
		if let Some(module) = self.duplicate {
			return Err(ConfigurationError::DuplicateModule(module).into());
		}
		Registry::new(self.modules)
	}
}

impl<T> Default for RegistryBuilder<T> {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use strategy_types::ReadyLoader;

	fn vehicles_module() -> ModuleConfig<&'static str> {
		ModuleConfig::new()
			.with_action(
				Action::Index,
				ActionConfig::new("base").with_strategy("base", ReadyLoader::new("list")),
			)
			.with_action(
				Action::Create,
				ActionConfig::new("base")
					.with_strategy("base", ReadyLoader::new("form"))
					.with_strategy("simple", ReadyLoader::new("short form")),
			)
	}

	#[test]
	fn test_lookup() {
		let registry = Registry::builder()
			.module(Module::Vehicles, vehicles_module())
			.build()
			.unwrap();

		assert!(registry.get_module_config(Module::Vehicles).is_some());
		assert!(registry.get_module_config(Module::Drivers).is_none());

		let create = registry
			.get_action_config(Module::Vehicles, Action::Create)
			.unwrap();
		assert_eq!(create.default_strategy(), "base");
		assert_eq!(create.strategy_names(), vec!["base", "simple"]);

		assert!(registry
			.get_action_config(Module::Vehicles, Action::Edit)
			.is_none());
	}

	#[test]
	fn test_require_action_config_errors() {
		let registry = Registry::builder()
			.module(Module::Vehicles, vehicles_module())
			.build()
			.unwrap();

		let result = registry.require_action_config(Module::Drivers, Action::Index);
		assert_eq!(
			result.unwrap_err(),
			StrategyError::Configuration(ConfigurationError::ModuleNotRegistered(
				Module::Drivers
			))
		);

		let result = registry.require_action_config(Module::Vehicles, Action::Edit);
		assert!(matches!(
			result,
			Err(StrategyError::Configuration(
				ConfigurationError::ActionNotRegistered {
					module: Module::Vehicles,
					action: Action::Edit,
				}
			))
		));
	}

	#[test]
	fn test_invalid_default_rejected() {
		let module = ModuleConfig::new().with_action(
			Action::Create,
			ActionConfig::new("wizard").with_strategy("base", ReadyLoader::new("form")),
		);
		let result = Registry::builder().module(Module::Vehicles, module).build();

		if let Err(StrategyError::Configuration(ConfigurationError::DefaultNotRegistered {
			module,
			action,
			default,
		})) = result
		{
			assert_eq!(module, Module::Vehicles);
			assert_eq!(action, Action::Create);
			assert_eq!(default, "wizard");
		} else {
			panic!("Expected DefaultNotRegistered error");
		}
	}

	#[test]
	fn test_duplicate_module_rejected() {
		let result = Registry::builder()
			.module(Module::Vehicles, vehicles_module())
			.module(Module::Vehicles, vehicles_module())
			.build();
		assert!(matches!(
			result,
			Err(StrategyError::Configuration(ConfigurationError::DuplicateModule(
				Module::Vehicles
			)))
		));
	}

	#[test]
	fn test_entries_sorted() {
		let registry = Registry::builder()
			.module(Module::Vehicles, vehicles_module())
			.module(
				Module::Drivers,
				ModuleConfig::new().with_action(
					Action::Index,
					ActionConfig::new("base").with_strategy("base", ReadyLoader::new("drivers")),
				),
			)
			.build()
			.unwrap();

		let pairs: Vec<(Module, Action)> = registry
			.entries()
			.map(|(module, action, _)| (module, action))
			.collect();
		assert_eq!(
			pairs,
			vec![
				(Module::Vehicles, Action::Index),
				(Module::Vehicles, Action::Create),
				(Module::Drivers, Action::Index),
			]
		);
		assert_eq!(registry.modules(), vec![Module::Vehicles, Module::Drivers]);
	}
}
