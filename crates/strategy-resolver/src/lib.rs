//! Strategy resolution for server- and client-rendered callers.
//!
//! Both modes read the same immutable [`Registry`]:
//!
//! - `server`: synchronous, preference is advisory and falls back to the
//!   action's default.
//! - `client`: depends on tenant permission state and yields a four-way
//!   [`ResolvedStrategy`]; an unknown tenant key is an error, not a fallback.
//! - `memo` and `watch`: recomputation helpers for reactive callers.

use std::sync::Arc;
use strategy_registry::Registry;
use strategy_types::{Action, Module, ResolvedStrategy, Result, StrategyName};

pub mod client;
pub mod memo;
pub mod server;
pub mod watch;

pub use client::{resolve_client_strategy, PermissionSnapshot, PermissionSource};
pub use memo::MemoizedResolver;
pub use server::{resolve_strategy, ResolveOptions};
pub use watch::{watch_strategy, StrategyWatch};

/// Resolver bound to one registry.
pub struct StrategyResolver<T> {
	registry: Arc<Registry<T>>,
}

impl<T> StrategyResolver<T> {
	pub fn new(registry: Arc<Registry<T>>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &Arc<Registry<T>> {
		&self.registry
	}

	/// Server-mode resolution; see [`resolve_strategy`].
	pub fn resolve(
		&self,
		module: Module,
		action: Action,
		options: &ResolveOptions,
	) -> Result<StrategyName> {
		resolve_strategy(&self.registry, module, action, options)
	}

	/// Client-mode resolution from an explicit snapshot.
	pub fn resolve_client(
		&self,
		module: Module,
		action: Action,
		snapshot: &PermissionSnapshot,
	) -> ResolvedStrategy {
		resolve_client_strategy(&self.registry, module, action, snapshot)
	}

	/// Client-mode resolution reading the current state of `source`.
	pub fn resolve_for<P>(&self, module: Module, action: Action, source: &P) -> ResolvedStrategy
	where
		P: PermissionSource + ?Sized,
	{
		self.resolve_client(module, action, &source.snapshot(module))
	}
}

impl<T> Clone for StrategyResolver<T> {
	fn clone(&self) -> Self {
		Self {
			registry: self.registry.clone(),
		}
	}
}
