//! Memoized client resolution.
//!
//! Reactive callers re-ask for a result on every render. The memo keeps the
//! last snapshot and result per `(module, action)` and only recomputes when
//! the snapshot changes.

use crate::client::{resolve_client_strategy, PermissionSnapshot};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use strategy_registry::Registry;
use strategy_types::{Action, Module, ResolvedStrategy};
use tracing::trace;

struct MemoEntry {
	snapshot: PermissionSnapshot,
	result: ResolvedStrategy,
}

/// Client resolver that reuses its last result while inputs are unchanged.
pub struct MemoizedResolver<T> {
	registry: Arc<Registry<T>>,
	entries: DashMap<(Module, Action), MemoEntry>,
	computations: AtomicUsize,
}

impl<T> MemoizedResolver<T> {
	pub fn new(registry: Arc<Registry<T>>) -> Self {
		Self {
			registry,
			entries: DashMap::new(),
			computations: AtomicUsize::new(0),
		}
	}

	pub fn resolve(
		&self,
		module: Module,
		action: Action,
		snapshot: &PermissionSnapshot,
	) -> ResolvedStrategy {
		if let Some(entry) = self.entries.get(&(module, action)) {
			if entry.snapshot == *snapshot {
				trace!("Memo hit for {}/{}", module, action);
				return entry.result.clone();
			}
		}

		let result = resolve_client_strategy(&self.registry, module, action, snapshot);
		self.computations.fetch_add(1, Ordering::Relaxed);
		self.entries.insert(
			(module, action),
			MemoEntry {
				snapshot: snapshot.clone(),
				result: result.clone(),
			},
		);
		result
	}

	/// Number of times a result was actually derived rather than reused.
	pub fn computations(&self) -> usize {
		self.computations.load(Ordering::Relaxed)
	}

	pub fn registry(&self) -> &Arc<Registry<T>> {
		&self.registry
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use strategy_registry::{ActionConfig, ModuleConfig};
	use strategy_types::ReadyLoader;

	fn resolver() -> MemoizedResolver<&'static str> {
		let registry = Registry::builder()
			.module(
				Module::Vehicles,
				ModuleConfig::new().with_action(
					Action::Index,
					ActionConfig::new("base")
						.with_strategy("base", ReadyLoader::new("table"))
						.with_strategy("map", ReadyLoader::new("map")),
				),
			)
			.build()
			.unwrap();
		MemoizedResolver::new(Arc::new(registry))
	}

	#[test]
	fn test_reuses_result_for_same_inputs() {
		let resolver = resolver();
		let snapshot = PermissionSnapshot::active(Some("map"));

		let first = resolver.resolve(Module::Vehicles, Action::Index, &snapshot);
		let second = resolver.resolve(Module::Vehicles, Action::Index, &snapshot);

		assert_eq!(first, second);
		assert_eq!(resolver.computations(), 1);
	}

	#[test]
	fn test_recomputes_on_input_change() {
		let resolver = resolver();

		let pending = resolver.resolve(Module::Vehicles, Action::Index, &PermissionSnapshot::pending());
		assert_eq!(pending, ResolvedStrategy::Loading);

		let ready =
			resolver.resolve(Module::Vehicles, Action::Index, &PermissionSnapshot::active(None));
		assert_eq!(ready, ResolvedStrategy::Ready("base".into()));

		let switched = resolver.resolve(
			Module::Vehicles,
			Action::Index,
			&PermissionSnapshot::active(Some("map")),
		);
		assert_eq!(switched, ResolvedStrategy::Ready("map".into()));
		assert_eq!(resolver.computations(), 3);
	}

	#[test]
	fn test_pairs_are_memoized_independently() {
		let resolver = resolver();
		let snapshot = PermissionSnapshot::active(None);

		resolver.resolve(Module::Vehicles, Action::Index, &snapshot);
		resolver.resolve(Module::Vehicles, Action::Create, &snapshot);
		resolver.resolve(Module::Vehicles, Action::Index, &snapshot);

		assert_eq!(resolver.computations(), 2);
	}
}
