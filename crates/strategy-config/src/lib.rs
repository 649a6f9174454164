//! Tenant configuration for strategy resolution.
//!
//! Loads the tenant file (TOML, JSON or YAML), applies `STRATEGY_*`
//! environment overrides, validates it, and exposes the result as a
//! [`PermissionSource`](strategy_resolver::PermissionSource).

use thiserror::Error;

pub mod loader;
pub mod permissions;
pub mod types;

pub use loader::{load_config, ConfigLoader, CONFIG_FILE_ENV};
pub use permissions::TenantPermissions;
pub use types::{LoggingConfig, ModuleSettings, TenantConfig, TenantSettings};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("Validation error: {0}")]
	Validation(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
