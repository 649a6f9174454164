//! Strategy service: one registry, one orchestrator, one tenant.

use serde::Serialize;
use std::sync::Arc;
use strategy_config::{TenantConfig, TenantPermissions};
use strategy_orchestrator::{LoadState, Orchestrator};
use strategy_registry::Registry;
use strategy_resolver::{PermissionSource, ResolveOptions, StrategyResolver};
use strategy_types::{
	Action, Module, ResolvedStrategy, Result, StrategyMismatch, StrategyName,
};
use tracing::{debug, info, instrument, warn};

use crate::catalog::{fleet_registry, Screen};

/// One registered action, as listed by `catalog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
	pub module: Module,
	pub action: Action,
	pub default_strategy: StrategyName,
	pub strategies: Vec<StrategyName>,
}

/// Outcome of rendering an action for the current tenant.
#[derive(Debug, Clone)]
pub enum RenderOutcome<T> {
	/// Tenant permissions are not available yet.
	Pending,
	/// The module is disabled for this tenant.
	Inactive,
	Mismatch(StrategyMismatch),
	Rendered {
		strategy: StrategyName,
		implementation: Arc<T>,
	},
}

impl<T> RenderOutcome<T> {
	/// Serializable view, printed by `render --json`.
	pub fn report(&self) -> RenderReport<'_, T> {
		match self {
			RenderOutcome::Pending => RenderReport::Pending,
			RenderOutcome::Inactive => RenderReport::Inactive,
			RenderOutcome::Mismatch(mismatch) => RenderReport::Mismatch {
				error: mismatch.message(),
				available: &mismatch.available,
			},
			RenderOutcome::Rendered {
				strategy,
				implementation,
			} => RenderReport::Rendered {
				strategy,
				implementation: implementation.as_ref(),
			},
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderReport<'a, T> {
	Pending,
	Inactive,
	Mismatch {
		error: String,
		available: &'a [StrategyName],
	},
	Rendered {
		strategy: &'a StrategyName,
		implementation: &'a T,
	},
}

/// Client-mode result as printed by `client --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientReport {
	pub module: Module,
	pub action: Action,
	pub status: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub strategy: Option<StrategyName>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ClientReport {
	pub fn new(module: Module, action: Action, resolved: &ResolvedStrategy) -> Self {
		Self {
			module,
			action,
			status: resolved.status(),
			strategy: resolved.strategy().cloned(),
			error: match resolved {
				ResolvedStrategy::Error(mismatch) => Some(mismatch.message()),
				_ => None,
			},
		}
	}
}

/// A configured server-side hint the catalogue cannot honour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredPreference {
	pub module: Module,
	pub action: Action,
	pub preferred: StrategyName,
	pub fallback: StrategyName,
}

/// Tenant configuration checked against the catalogue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
	pub mismatches: Vec<StrategyMismatch>,
	pub ignored_preferences: Vec<IgnoredPreference>,
}

impl ValidationReport {
	/// Mismatches break client rendering; ignored preferences only warn.
	pub fn is_clean(&self) -> bool {
		self.mismatches.is_empty()
	}
}

pub struct StrategyService<T = Screen> {
	tenant: String,
	resolver: StrategyResolver<T>,
	orchestrator: Orchestrator<T>,
	permissions: TenantPermissions,
}

impl StrategyService<Screen> {
	/// Service over the built-in fleet catalogue.
	pub fn from_config(config: &TenantConfig) -> Result<Self> {
		let registry = Arc::new(fleet_registry()?);
		Ok(Self::new(
			config.tenant.name.clone(),
			registry,
			TenantPermissions::from_config(config),
		))
	}
}

impl<T: Send + Sync + 'static> StrategyService<T> {
	pub fn new(
		tenant: impl Into<String>,
		registry: Arc<Registry<T>>,
		permissions: TenantPermissions,
	) -> Self {
		let tenant = tenant.into();
		info!(tenant = %tenant, modules = registry.modules().len(), "Strategy service ready");
		Self {
			tenant,
			resolver: StrategyResolver::new(registry.clone()),
			orchestrator: Orchestrator::new(registry),
			permissions,
		}
	}

	pub fn tenant(&self) -> &str {
		&self.tenant
	}

	pub fn registry(&self) -> &Arc<Registry<T>> {
		self.resolver.registry()
	}

	pub fn catalog(&self) -> Vec<CatalogEntry> {
		self.registry()
			.entries()
			.map(|(module, action, config)| CatalogEntry {
				module,
				action,
				default_strategy: config.default_strategy().clone(),
				strategies: config.strategy_names(),
			})
			.collect()
	}

	/// Server-mode resolution. `preferred` overrides the tenant's configured
	/// hint for this action.
	#[instrument(skip(self), fields(tenant = %self.tenant))]
	pub fn resolve(
		&self,
		module: Module,
		action: Action,
		preferred: Option<&str>,
	) -> Result<StrategyName> {
		let options = match preferred {
			Some(key) => ResolveOptions::new().preferred(key),
			None => self.permissions.resolve_options(module, action),
		};
		self.resolver.resolve(module, action, &options)
	}

	/// Client-mode resolution against the tenant's permission state.
	pub fn resolve_client(&self, module: Module, action: Action) -> ResolvedStrategy {
		let resolved = self.resolver.resolve_for(module, action, &self.permissions);
		debug!(%module, %action, status = resolved.status(), "Client resolution");
		resolved
	}

	/// Loads the implementation for `module`/`action`.
	///
	/// Without `strategy`, the key comes from client-mode resolution and a
	/// tenant mismatch is returned as [`RenderOutcome::Mismatch`]. With an
	/// explicit `strategy`, an unknown key falls back to the action's
	/// default.
	///
	/// # Errors
	///
	/// Configuration errors for unregistered modules or actions, and
	/// `StrategyError::LoadFailure` when the loader rejects.
	#[instrument(skip(self), fields(tenant = %self.tenant))]
	pub async fn render(
		&self,
		module: Module,
		action: Action,
		strategy: Option<&str>,
	) -> Result<RenderOutcome<T>> {
		let key = match strategy {
			Some(key) => StrategyName::from(key.trim()),
			None => match self.resolve_client(module, action) {
				ResolvedStrategy::Loading => return Ok(RenderOutcome::Pending),
				ResolvedStrategy::Inactive => return Ok(RenderOutcome::Inactive),
				ResolvedStrategy::Error(mismatch) => {
					warn!("{}", mismatch);
					return Ok(RenderOutcome::Mismatch(mismatch));
				}
				ResolvedStrategy::Ready(key) => key,
			},
		};

		let entry = self.orchestrator.select(module, action, key.as_str())?;
		let implementation = entry.get().await?;
		Ok(RenderOutcome::Rendered {
			strategy: entry.strategy().clone(),
			implementation,
		})
	}

	/// Checks every active module's actions against the tenant's default
	/// key and configured hints.
	pub fn validate(&self) -> ValidationReport {
		let mut report = ValidationReport::default();

		for (module, action, config) in self.registry().entries() {
			if !self.permissions.is_module_active(module) {
				continue;
			}

			if let ResolvedStrategy::Error(mismatch) = self.resolve_client(module, action) {
				report.mismatches.push(mismatch);
			}

			if let Some(preferred) = self.permissions.preferred(module, action) {
				if !config.contains(preferred.as_str()) {
					report.ignored_preferences.push(IgnoredPreference {
						module,
						action,
						preferred,
						fallback: config.default_strategy().clone(),
					});
				}
			}
		}

		report
	}

	pub fn load_states(&self) -> Vec<(Module, Action, StrategyName, LoadState)> {
		self.orchestrator.load_states()
	}
}
