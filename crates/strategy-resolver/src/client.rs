//! Client-mode resolution.
//!
//! Runs against live tenant permission state and produces a four-way
//! [`ResolvedStrategy`]. Unlike the server resolver it never falls back to the
//! action's default: a tenant-configured key is authoritative, so an unknown
//! key is reported as a mismatch for the caller to surface.

use strategy_registry::Registry;
use strategy_types::{
	normalize_strategy_key, Action, Module, ResolvedStrategy, StrategyMismatch,
};
use tracing::{debug, warn};

/// The external signals client resolution depends on, captured at one point
/// in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSnapshot {
	pub permissions_ready: bool,
	pub module_active: bool,
	pub tenant_default_strategy: Option<String>,
}

impl PermissionSnapshot {
	/// Snapshot taken before permission data has arrived.
	pub fn pending() -> Self {
		Self::default()
	}

	/// Snapshot for a loaded, active module with an optional tenant key.
	pub fn active(tenant_default_strategy: Option<&str>) -> Self {
		Self {
			permissions_ready: true,
			module_active: true,
			tenant_default_strategy: tenant_default_strategy.map(str::to_string),
		}
	}

	/// Snapshot for a loaded module the tenant has disabled.
	pub fn inactive() -> Self {
		Self {
			permissions_ready: true,
			module_active: false,
			tenant_default_strategy: None,
		}
	}
}

/// Read-only view of tenant permission infrastructure.
pub trait PermissionSource: Send + Sync {
	fn permissions_ready(&self) -> bool;

	fn is_module_active(&self, module: Module) -> bool;

	fn default_strategy_key(&self, module: Module) -> Option<String>;

	fn snapshot(&self, module: Module) -> PermissionSnapshot {
		PermissionSnapshot {
			permissions_ready: self.permissions_ready(),
			module_active: self.is_module_active(module),
			tenant_default_strategy: self.default_strategy_key(module),
		}
	}
}

/// Derives the client-side resolution result for `module`/`action`.
///
/// A module or action missing from the registry behaves like an action with
/// no strategies, so it yields a mismatch rather than a panic.
pub fn resolve_client_strategy<T>(
	registry: &Registry<T>,
	module: Module,
	action: Action,
	snapshot: &PermissionSnapshot,
) -> ResolvedStrategy {
	if !snapshot.permissions_ready {
		return ResolvedStrategy::Loading;
	}

	if !snapshot.module_active {
		debug!("Module {} inactive for tenant", module);
		return ResolvedStrategy::Inactive;
	}

	let candidate = normalize_strategy_key(snapshot.tenant_default_strategy.as_deref());
	let config = registry.get_action_config(module, action);

	match config {
		Some(config) if config.contains(candidate.as_str()) => {
			debug!("Resolved strategy '{}' for {}/{}", candidate, module, action);
			ResolvedStrategy::Ready(candidate)
		}
		_ => {
			let available = config.map(|c| c.strategy_names()).unwrap_or_default();
			let mismatch = StrategyMismatch::new(candidate, module, action, available);
			warn!("{}", mismatch);
			ResolvedStrategy::Error(mismatch)
		}
	}
}
