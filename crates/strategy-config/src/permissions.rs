//! Tenant permission state derived from configuration.

use crate::types::{ModuleSettings, TenantConfig};
use std::collections::HashMap;
use strategy_resolver::{PermissionSource, ResolveOptions};
use strategy_types::{Action, Module, StrategyName};

/// [`PermissionSource`] backed by a loaded tenant configuration.
///
/// Modules absent from the configuration are active and carry no tenant
/// strategy key.
#[derive(Debug, Clone)]
pub struct TenantPermissions {
	ready: bool,
	modules: HashMap<Module, ModuleSettings>,
}

impl TenantPermissions {
	pub fn from_config(config: &TenantConfig) -> Self {
		Self {
			ready: true,
			modules: config.modules.clone(),
		}
	}

	/// Permissions that have not been loaded yet.
	pub fn pending() -> Self {
		Self {
			ready: false,
			modules: HashMap::new(),
		}
	}

	/// Advisory server-side hint for `module`/`action`, if configured.
	pub fn preferred(&self, module: Module, action: Action) -> Option<StrategyName> {
		self.modules
			.get(&module)
			.and_then(|settings| settings.preferred.get(&action))
			.map(|key| StrategyName::from(key.trim()))
	}

	/// Server-mode options carrying the configured hint.
	pub fn resolve_options(&self, module: Module, action: Action) -> ResolveOptions {
		ResolveOptions {
			preferred: self.preferred(module, action),
		}
	}
}

impl PermissionSource for TenantPermissions {
	fn permissions_ready(&self) -> bool {
		self.ready
	}

	fn is_module_active(&self, module: Module) -> bool {
		self.modules
			.get(&module)
			.map(|settings| settings.active)
			.unwrap_or(true)
	}

	fn default_strategy_key(&self, module: Module) -> Option<String> {
		self.modules
			.get(&module)
			.and_then(|settings| settings.default_strategy.clone())
	}
}

impl From<&TenantConfig> for TenantPermissions {
	fn from(config: &TenantConfig) -> Self {
		Self::from_config(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ConfigLoader;
	use strategy_resolver::PermissionSnapshot;

	fn permissions() -> TenantPermissions {
		let config = ConfigLoader::from_toml(
			r#"
[tenant]
name = "acme"

[modules.vehicles]
default_strategy = "wizard"

[modules.vehicles.preferred]
index = " cards "

[modules.drivers]
active = false
"#,
		)
		.unwrap();
		TenantPermissions::from_config(&config)
	}

	#[test]
	fn test_snapshot_from_config() {
		let permissions = permissions();
		assert_eq!(
			permissions.snapshot(Module::Vehicles),
			PermissionSnapshot::active(Some("wizard"))
		);
		assert_eq!(
			permissions.snapshot(Module::Drivers),
			PermissionSnapshot::inactive()
		);
		assert_eq!(
			permissions.snapshot(Module::Maintenance),
			PermissionSnapshot::active(None)
		);
	}

	#[test]
	fn test_pending_permissions() {
		let permissions = TenantPermissions::pending();
		assert!(!permissions.snapshot(Module::Vehicles).permissions_ready);
	}

	#[test]
	fn test_preferred_hint() {
		let permissions = permissions();
		assert_eq!(
			permissions.preferred(Module::Vehicles, Action::Index),
			Some(StrategyName::from("cards"))
		);
		assert_eq!(permissions.preferred(Module::Vehicles, Action::Create), None);
		assert_eq!(
			permissions.resolve_options(Module::Drivers, Action::Index),
			ResolveOptions::new()
		);
	}
}
