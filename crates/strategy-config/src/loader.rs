//! Configuration loading from files and environment.

use crate::types::{TenantConfig, LOG_LEVELS};
use crate::ConfigError;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_FILE_ENV: &str = "STRATEGY_CONFIG";

const ENV_PREFIX: &str = "STRATEGY_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file, choosing the format by extension
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<TenantConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.display().to_string()),
			_ => ConfigError::Io(e),
		})?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
		};

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<TenantConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::Parse(format!("TOML: {}", e)))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<TenantConfig, ConfigError> {
		serde_json::from_str(contents).map_err(|e| ConfigError::Parse(format!("JSON: {}", e)))
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<TenantConfig, ConfigError> {
		serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(format!("YAML: {}", e)))
	}

	/// Load from an optional file, then apply environment overrides
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<TenantConfig, ConfigError> {
		let mut config = if let Some(path) = file_path {
			Self::from_file(path)?
		} else {
			TenantConfig::default()
		};

		Self::apply_overrides(&mut config, |key| std::env::var(key).ok());

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Apply `STRATEGY_*` overrides read through `lookup`
	pub fn apply_overrides<F>(config: &mut TenantConfig, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(level) = lookup(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
			debug!("Overriding log level from environment");
			config.logging.level = level;
		}

		if let Some(name) = lookup(&format!("{}TENANT_NAME", ENV_PREFIX)) {
			debug!("Overriding tenant name from environment");
			config.tenant.name = name;
		}

		if let Some(json) = lookup(&format!("{}LOG_JSON", ENV_PREFIX)) {
			let json = json.trim().to_ascii_lowercase();
			config.logging.json = matches!(json.as_str(), "1" | "true" | "yes");
		}
	}

	/// Validate configuration
	pub fn validate_config(config: &TenantConfig) -> Result<(), ConfigError> {
		if config.tenant.name.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Tenant name must not be empty".to_string(),
			));
		}

		let level = config.logging.level.to_ascii_lowercase();
		if !LOG_LEVELS.contains(&level.as_str()) {
			return Err(ConfigError::Validation(format!(
				"Unknown log level '{}', expected one of: {}",
				config.logging.level,
				LOG_LEVELS.join(", ")
			)));
		}

		for (module, settings) in &config.modules {
			for (action, preferred) in &settings.preferred {
				if preferred.trim().is_empty() {
					return Err(ConfigError::Validation(format!(
						"Preferred strategy for {}/{} must not be blank",
						module, action
					)));
				}
			}
		}

		Ok(())
	}
}

/// Load configuration from standard locations
pub fn load_config() -> Result<TenantConfig, ConfigError> {
	// Check for config file in order:
	// 1. Environment variable STRATEGY_CONFIG
	// 2. ./config/tenant.toml
	// 3. ./tenant.toml
	// 4. Default config with env overrides

	if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
		return ConfigLoader::from_env_and_file(Some(Path::new(&path)));
	}

	let paths = ["./config/tenant.toml", "./tenant.toml"];

	for path in &paths {
		if Path::new(path).exists() {
			return ConfigLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	ConfigLoader::from_env_and_file(None)
}
