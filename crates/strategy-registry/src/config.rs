//! Declarative catalogue entries: module → action → strategies.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use strategy_types::{Action, LoadFuture, StrategyLoader, StrategyName};

/// One implementation variant, referenced through its deferred loader.
pub struct StrategyDefinition<T> {
	loader: Arc<dyn StrategyLoader<T>>,
}

impl<T> StrategyDefinition<T> {
	pub fn new<L>(loader: L) -> Self
	where
		L: StrategyLoader<T> + 'static,
	{
		Self {
			loader: Arc::new(loader),
		}
	}

	/// Shared handle to the loader, for callers that wrap it in their own cache.
	pub fn loader(&self) -> Arc<dyn StrategyLoader<T>> {
		self.loader.clone()
	}

	/// Invokes the loader directly, bypassing any memoization.
	pub fn load(&self) -> LoadFuture<T> {
		self.loader.load()
	}
}

impl<T> Clone for StrategyDefinition<T> {
	fn clone(&self) -> Self {
		Self {
			loader: self.loader.clone(),
		}
	}
}

impl<T> fmt::Debug for StrategyDefinition<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StrategyDefinition").finish_non_exhaustive()
	}
}

/// Strategies available to one action, plus the one used by default.
///
/// The default must name one of the strategies; [`crate::Registry`] rejects
/// configurations where it does not.
pub struct ActionConfig<T> {
	default_strategy: StrategyName,
	strategies: HashMap<StrategyName, StrategyDefinition<T>>,
}

impl<T> ActionConfig<T> {
	pub fn new(default_strategy: impl Into<StrategyName>) -> Self {
		Self {
			default_strategy: default_strategy.into(),
			strategies: HashMap::new(),
		}
	}

	/// Adds a strategy backed by `loader`. A later entry with the same name
	/// replaces the earlier one.
	pub fn with_strategy<L>(self, name: impl Into<StrategyName>, loader: L) -> Self
	where
		L: StrategyLoader<T> + 'static,
	{
		self.with_definition(name, StrategyDefinition::new(loader))
	}

	pub fn with_definition(
		mut self,
		name: impl Into<StrategyName>,
		definition: StrategyDefinition<T>,
	) -> Self {
		self.strategies.insert(name.into(), definition);
		self
	}

	pub fn default_strategy(&self) -> &StrategyName {
		&self.default_strategy
	}

	pub fn contains(&self, name: &str) -> bool {
		self.strategies.contains_key(name)
	}

	pub fn strategy(&self, name: &str) -> Option<&StrategyDefinition<T>> {
		self.strategies.get(name)
	}

	pub fn strategies(&self) -> impl Iterator<Item = (&StrategyName, &StrategyDefinition<T>)> {
		self.strategies.iter()
	}

	/// Strategy names sorted ascending.
	pub fn strategy_names(&self) -> Vec<StrategyName> {
		let mut names: Vec<StrategyName> = self.strategies.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn is_empty(&self) -> bool {
		self.strategies.is_empty()
	}

	pub(crate) fn has_valid_default(&self) -> bool {
		self.strategies.contains_key(&self.default_strategy)
	}
}

impl<T> fmt::Debug for ActionConfig<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionConfig")
			.field("default_strategy", &self.default_strategy)
			.field("strategies", &self.strategy_names())
			.finish()
	}
}

/// Actions of one module.
pub struct ModuleConfig<T> {
	actions: HashMap<Action, ActionConfig<T>>,
}

impl<T> ModuleConfig<T> {
	pub fn new() -> Self {
		Self {
			actions: HashMap::new(),
		}
	}

	pub fn with_action(mut self, action: Action, config: ActionConfig<T>) -> Self {
		self.actions.insert(action, config);
		self
	}

	pub fn action(&self, action: Action) -> Option<&ActionConfig<T>> {
		self.actions.get(&action)
	}

	pub fn actions(&self) -> impl Iterator<Item = (&Action, &ActionConfig<T>)> {
		self.actions.iter()
	}

	/// True when no action of this module has any strategy.
	pub fn has_no_strategies(&self) -> bool {
		self.actions.values().all(ActionConfig::is_empty)
	}
}

impl<T> Default for ModuleConfig<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for ModuleConfig<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut actions: Vec<_> = self.actions.iter().collect();
		actions.sort_by_key(|(action, _)| **action);
		f.debug_map().entries(actions).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use strategy_types::ReadyLoader;

	#[test]
	fn test_strategy_names_sorted() {
		let config = ActionConfig::new("base")
			.with_strategy("wizard", ReadyLoader::new(1u8))
			.with_strategy("base", ReadyLoader::new(2u8))
			.with_strategy("simple", ReadyLoader::new(3u8));

		let names = config.strategy_names();
		assert_eq!(names, vec!["base", "simple", "wizard"]);
		assert!(config.has_valid_default());
	}

	#[test]
	fn test_default_must_be_registered() {
		let config = ActionConfig::new("wizard").with_strategy("base", ReadyLoader::new(1u8));
		assert!(!config.has_valid_default());
		assert!(config.contains("base"));
		assert!(!config.contains("wizard"));
	}

	#[test]
	fn test_module_without_strategies() {
		let module: ModuleConfig<u8> = ModuleConfig::new();
		assert!(module.has_no_strategies());

		let module = module.with_action(
			Action::Index,
			ActionConfig::new("base").with_strategy("base", ReadyLoader::new(1u8)),
		);
		assert!(!module.has_no_strategies());
	}
}
