//! Selects and renders deferred strategy implementations.

use crate::deferred::{DeferredImplementation, LoadState};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use strategy_registry::Registry;
use strategy_types::{Action, ConfigurationError, Module, Result, StrategyName};
use tracing::{debug, warn};

type StrategyMap<T> = HashMap<StrategyName, Arc<DeferredImplementation<T>>>;

/// Owns one [`DeferredImplementation`] per registered strategy and hands
/// out the same instance for every request, so each loader runs at most once
/// per process.
pub struct Orchestrator<T> {
	registry: Arc<Registry<T>>,
	deferred: HashMap<Module, HashMap<Action, StrategyMap<T>>>,
}

impl<T: Send + Sync + 'static> Orchestrator<T> {
	/// Wraps every loader known to `registry`. Nothing is loaded yet.
	pub fn new(registry: Arc<Registry<T>>) -> Self {
		let mut deferred: HashMap<Module, HashMap<Action, StrategyMap<T>>> = HashMap::new();

		for module in registry.modules() {
			deferred.entry(module).or_default();
		}

		for (module, action, config) in registry.entries() {
			let strategies = config
				.strategies()
				.map(|(name, definition)| {
					let entry = DeferredImplementation::new(
						module,
						action,
						name.clone(),
						definition.loader(),
					);
					(name.clone(), Arc::new(entry))
				})
				.collect();

			deferred
				.entry(module)
				.or_default()
				.insert(action, strategies);
		}

		debug!("Orchestrator wrapped loaders for {} modules", deferred.len());
		Self { registry, deferred }
	}

	pub fn registry(&self) -> &Arc<Registry<T>> {
		&self.registry
	}

	/// Returns the deferred implementation for `strategy_key`, falling back to
	/// the action's default when the key is unknown.
	///
	/// # Errors
	///
	/// Returns a configuration error when the module is not registered, has
	/// no strategies, does not register `action`, or when neither the key
	/// nor the default resolves.
	pub fn select(
		&self,
		module: Module,
		action: Action,
		strategy_key: &str,
	) -> Result<Arc<DeferredImplementation<T>>> {
		let actions = self
			.deferred
			.get(&module)
			.ok_or(ConfigurationError::ModuleNotRegistered(module))?;

		if actions.values().all(HashMap::is_empty) {
			return Err(ConfigurationError::NoStrategies(module).into());
		}

		let strategies = actions
			.get(&action)
			.ok_or(ConfigurationError::ActionNotRegistered { module, action })?;

		if let Some(entry) = strategies.get(strategy_key) {
			return Ok(entry.clone());
		}

		let default = self.registry.require_action_config(module, action)?.default_strategy();
		if let Some(entry) = strategies.get(default) {
			warn!(
				"Strategy '{}' not registered for {}/{}, using default '{}'",
				strategy_key, module, action, default
			);
			return Ok(entry.clone());
		}

		Err(ConfigurationError::StrategyUnresolved {
			module,
			action,
			requested: StrategyName::from(strategy_key),
			default: default.clone(),
		}
		.into())
	}

	/// Selects and waits for the implementation.
	///
	/// # Errors
	///
	/// Configuration errors from [`Orchestrator::select`], or
	/// `StrategyError::LoadFailure` if the loader rejected.
	pub async fn render(&self, module: Module, action: Action, strategy_key: &str) -> Result<Arc<T>> {
		self.select(module, action, strategy_key)?.get().await
	}

	/// Load state of every entry, sorted by module, action and strategy.
	pub fn load_states(&self) -> Vec<(Module, Action, StrategyName, LoadState)> {
		let mut states: Vec<_> = self
			.deferred
			.iter()
			.flat_map(|(module, actions)| {
				actions.iter().flat_map(move |(action, strategies)| {
					strategies
						.iter()
						.map(move |(name, entry)| (*module, *action, name.clone(), entry.state()))
				})
			})
			.collect();
		states.sort_by(|a, b| (a.0, a.1, &a.2).cmp(&(b.0, b.1, &b.2)));
		states
	}
}

impl<T> fmt::Debug for Orchestrator<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Orchestrator")
			.field("registry", &self.registry)
			.finish_non_exhaustive()
	}
}
