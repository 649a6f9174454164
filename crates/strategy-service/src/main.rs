use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::json;
use strategy_config::{load_config, ConfigLoader};
use strategy_monitoring::init_tracing;
use strategy_service::cli::{Args, Command};
use strategy_service::{ClientReport, RenderOutcome, StrategyService};
use strategy_types::{format_available, ResolvedStrategy};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => ConfigLoader::from_env_and_file(Some(path.as_path()))
			.with_context(|| format!("Failed to load configuration from {}", path.display()))?,
		None => load_config().context("Failed to load configuration")?,
	};

	let tracing_config = args.tracing_config(&config.logging).map_err(|e| anyhow!(e))?;
	init_tracing(tracing_config).map_err(|e| anyhow!("{}", e))?;
	info!(tenant = %config.tenant.name, "Configuration loaded");

	let service = StrategyService::from_config(&config).context("Failed to build strategy catalogue")?;

	match args.command {
		Command::Catalog => catalog(&service, args.json),
		Command::Resolve {
			module,
			action,
			preferred,
		} => {
			let strategy = service.resolve(module, action, preferred.as_deref())?;
			if args.json {
				print_json(&json!({ "module": module, "action": action, "strategy": strategy }))
			} else {
				println!("{}/{}: {}", module, action, strategy);
				Ok(())
			}
		}
		Command::Client { module, action } => {
			let resolved = service.resolve_client(module, action);
			if args.json {
				return print_json(&ClientReport::new(module, action, &resolved));
			}
			match resolved {
				ResolvedStrategy::Ready(strategy) => println!("{}/{}: {}", module, action, strategy),
				ResolvedStrategy::Error(mismatch) => println!("{}/{}: error: {}", module, action, mismatch),
				other => println!("{}/{}: {}", module, action, other.status()),
			}
			Ok(())
		}
		Command::Render {
			module,
			action,
			strategy,
		} => {
			let outcome = match service.render(module, action, strategy.as_deref()).await {
				Ok(outcome) => outcome,
				Err(e) if e.is_configuration() => {
					bail!("{}; run `fleet-strategy catalog` to list registered actions", e)
				}
				Err(e) => {
					return Err(e).with_context(|| format!("Failed to render {}/{}", module, action))
				}
			};

			if args.json {
				print_json(&outcome.report())?;
			}
			match outcome {
				RenderOutcome::Rendered {
					strategy,
					implementation,
				} => {
					if !args.json {
						println!(
							"{}/{}: {} -> {}",
							module, action, strategy, implementation.component
						);
					}
					Ok(())
				}
				RenderOutcome::Pending => bail!("Tenant permissions are not loaded"),
				RenderOutcome::Inactive => {
					bail!("Module {} is not active for tenant {}", module, service.tenant())
				}
				RenderOutcome::Mismatch(mismatch) => Err(anyhow!(mismatch)),
			}
		}
		Command::Validate => validate(&service, args.json),
	}
}

fn catalog(service: &StrategyService, as_json: bool) -> Result<()> {
	let entries = service.catalog();
	if as_json {
		return print_json(&entries);
	}

	for entry in entries {
		println!(
			"{}/{} (default: {}): {}",
			entry.module,
			entry.action,
			entry.default_strategy,
			format_available(&entry.strategies)
		);
	}
	Ok(())
}

fn validate(service: &StrategyService, as_json: bool) -> Result<()> {
	let report = service.validate();

	for ignored in &report.ignored_preferences {
		warn!(
			"Preferred strategy '{}' for {}/{} is not registered; '{}' will be used",
			ignored.preferred, ignored.module, ignored.action, ignored.fallback
		);
	}

	if as_json {
		print_json(&report)?;
	} else {
		for mismatch in &report.mismatches {
			println!("{}", mismatch);
		}
	}

	if !report.is_clean() {
		bail!(
			"Tenant '{}' has {} unresolvable strategy configuration(s)",
			service.tenant(),
			report.mismatches.len()
		);
	}

	if !as_json {
		println!("Tenant '{}' is consistent with the catalogue", service.tenant());
	}
	Ok(())
}

fn print_json<S: serde::Serialize + ?Sized>(value: &S) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}
