//! Configuration validation utility
//!
//! Usage: cargo run --bin validate-config config/tenant.toml

use std::env;
use std::process;

use strategy_config::ConfigLoader;

fn main() {
	let args: Vec<String> = env::args().collect();

	if args.len() != 2 {
		eprintln!("Usage: {} <config-file>", args[0]);
		process::exit(1);
	}

	let config_path = &args[1];

	println!("Validating configuration file: {}", config_path);

	match ConfigLoader::from_file(config_path) {
		Ok(config) => {
			println!("Configuration is valid");
			println!("Tenant: {}", config.tenant.name);
			println!("Log level: {}", config.logging.level);

			let mut modules: Vec<_> = config.modules.iter().collect();
			modules.sort_by_key(|(module, _)| **module);
			for (module, settings) in modules {
				println!(
					"Module {}: active={}, default_strategy={}",
					module,
					settings.active,
					settings.default_strategy.as_deref().unwrap_or("(unset)")
				);
			}
		}
		Err(e) => {
			eprintln!("Configuration validation failed:");
			eprintln!("{}", e);
			process::exit(1);
		}
	}
}
