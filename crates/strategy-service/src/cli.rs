//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strategy_config::LoggingConfig;
use strategy_monitoring::TracingConfig;
use strategy_types::{Action, Module};

#[derive(Parser, Debug)]
#[command(name = "fleet-strategy")]
#[command(about = "Resolve and load fleet UI strategies for a tenant", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to the tenant configuration file
	#[arg(short, long, env = "STRATEGY_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long, env = "STRATEGY_LOG_LEVEL")]
	pub log_level: Option<String>,

	/// Emit logs as JSON
	#[arg(long)]
	pub json_logs: bool,

	/// Debug logging with thread ids, source locations and span events
	#[arg(short, long)]
	pub verbose: bool,

	/// Print command output as JSON
	#[arg(long, global = true)]
	pub json: bool,

	#[command(subcommand)]
	pub command: Command,
}

impl Args {
	/// Logging setup from the flags, falling back to the tenant's `[logging]`
	/// section.
	pub fn tracing_config(&self, logging: &LoggingConfig) -> Result<TracingConfig, String> {
		let json = self.json_logs || logging.json;
		if self.verbose {
			return Ok(TracingConfig::debug().with_json_format(json));
		}

		let base = if json {
			TracingConfig::production()
		} else {
			TracingConfig::new()
		};
		base.with_level_str(self.log_level.as_deref().unwrap_or(&logging.level))
	}
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// List every registered module, action and strategy
	Catalog,

	/// Resolve a strategy the way the server does
	Resolve {
		module: Module,
		action: Action,

		/// Preferred strategy; unknown keys fall back to the default
		#[arg(short, long)]
		preferred: Option<String>,
	},

	/// Resolve a strategy from the tenant's permission state
	Client { module: Module, action: Action },

	/// Resolve and load the implementation for an action
	Render {
		module: Module,
		action: Action,

		/// Load this strategy instead of the tenant's
		#[arg(short, long)]
		strategy: Option<String>,
	},

	/// Check the tenant configuration against the catalogue
	Validate,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_render() {
		let args = Args::try_parse_from([
			"fleet-strategy",
			"--json",
			"render",
			"vehicles",
			"Create",
			"--strategy",
			"simple",
		])
		.unwrap();

		assert!(args.json);
		if let Command::Render {
			module,
			action,
			strategy,
		} = args.command
		{
			assert_eq!(module, Module::Vehicles);
			assert_eq!(action, Action::Create);
			assert_eq!(strategy.as_deref(), Some("simple"));
		} else {
			panic!("Expected render command");
		}
	}

	#[test]
	fn test_tracing_config_from_flags() {
		let logging = LoggingConfig {
			level: "warn".to_string(),
			json: false,
		};

		let args = Args::try_parse_from(["fleet-strategy", "catalog"]).unwrap();
		let config = args.tracing_config(&logging).unwrap();
		assert_eq!(config.level, tracing::Level::WARN);
		assert!(!config.json_format);

		let args =
			Args::try_parse_from(["fleet-strategy", "--json-logs", "-l", "error", "catalog"])
				.unwrap();
		let config = args.tracing_config(&logging).unwrap();
		assert_eq!(config.level, tracing::Level::ERROR);
		assert!(config.json_format);
		assert!(!config.respect_env_filter);

		let args = Args::try_parse_from(["fleet-strategy", "-v", "catalog"]).unwrap();
		let config = args.tracing_config(&logging).unwrap();
		assert_eq!(config.level, tracing::Level::DEBUG);
		assert!(config.with_file_and_line);

		let args = Args::try_parse_from(["fleet-strategy", "-l", "loud", "catalog"]).unwrap();
		assert!(args.tracing_config(&logging).is_err());
	}

	#[test]
	fn test_rejects_unknown_module() {
		assert!(Args::try_parse_from(["fleet-strategy", "client", "invoices", "index"]).is_err());
	}
}
