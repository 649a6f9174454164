//! Tenant configuration types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strategy_types::{Action, Module};

/// Complete tenant configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TenantConfig {
	/// Tenant identity
	pub tenant: TenantSettings,
	/// Logging settings
	#[serde(default)]
	pub logging: LoggingConfig,
	/// Per-module settings; modules not listed are active with no tenant key
	#[serde(default)]
	pub modules: HashMap<Module, ModuleSettings>,
}

/// Tenant identity
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TenantSettings {
	/// Tenant name, used in log output
	pub name: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
	/// Log level (trace, debug, info, warn, error)
	#[serde(default = "default_log_level")]
	pub level: String,
	/// Emit JSON lines instead of human-readable output
	#[serde(default)]
	pub json: bool,
}

/// Settings for one module
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModuleSettings {
	/// Whether the module is enabled for this tenant
	#[serde(default = "default_active")]
	pub active: bool,
	/// Tenant-selected strategy, authoritative for client resolution
	#[serde(default)]
	pub default_strategy: Option<String>,
	/// Advisory per-action hints for server resolution
	#[serde(default)]
	pub preferred: HashMap<Action, String>,
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_log_level() -> String {
	"info".to_string()
}

fn default_active() -> bool {
	true
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			json: false,
		}
	}
}

impl Default for ModuleSettings {
	fn default() -> Self {
		Self {
			active: default_active(),
			default_strategy: None,
			preferred: HashMap::new(),
		}
	}
}

/// Default configuration
impl Default for TenantConfig {
	fn default() -> Self {
		Self {
			tenant: TenantSettings {
				name: "default".to_string(),
			},
			logging: LoggingConfig::default(),
			modules: HashMap::new(),
		}
	}
}

impl TenantConfig {
	pub fn module(&self, module: Module) -> Option<&ModuleSettings> {
		self.modules.get(&module)
	}
}
