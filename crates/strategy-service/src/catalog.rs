//! Built-in fleet catalogue.
//!
//! Every strategy resolves to a [`Screen`], a description of the page
//! component that implements it. Rendering the component is the front end's
//! concern; this service only decides which one.

use serde::Serialize;
use std::sync::Arc;
use strategy_registry::{ActionConfig, ModuleConfig, Registry};
use strategy_types::{Action, LoadResult, Module, Result, StrategyLoader};

/// A loaded strategy implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
	pub module: Module,
	pub action: Action,
	pub strategy: String,
	pub component: &'static str,
}

fn screen(
	module: Module,
	action: Action,
	strategy: &'static str,
	component: &'static str,
) -> impl StrategyLoader<Screen> {
	move || async move {
		let loaded: LoadResult<Screen> = Ok(Arc::new(Screen {
			module,
			action,
			strategy: strategy.to_string(),
			component,
		}));
		loaded
	}
}

/// Catalogue shipped with the fleet application.
pub fn fleet_registry() -> Result<Registry<Screen>> {
	use Action::*;
	use Module::*;

	Registry::builder()
		.module(
			Vehicles,
			ModuleConfig::new()
				.with_action(
					Index,
					ActionConfig::new("base")
						.with_strategy("base", screen(Vehicles, Index, "base", "VehicleTable"))
						.with_strategy("cards", screen(Vehicles, Index, "cards", "VehicleCardGrid")),
				)
				.with_action(
					Create,
					ActionConfig::new("base")
						.with_strategy("base", screen(Vehicles, Create, "base", "VehicleForm"))
						.with_strategy(
							"simple",
							screen(Vehicles, Create, "simple", "VehicleQuickForm"),
						),
				)
				.with_action(
					Show,
					ActionConfig::new("base")
						.with_strategy("base", screen(Vehicles, Show, "base", "VehicleDetail")),
				)
				.with_action(
					Edit,
					ActionConfig::new("base")
						.with_strategy("base", screen(Vehicles, Edit, "base", "VehicleForm"))
						.with_strategy(
							"simple",
							screen(Vehicles, Edit, "simple", "VehicleQuickForm"),
						),
				),
		)
		.module(
			Drivers,
			ModuleConfig::new()
				.with_action(
					Index,
					ActionConfig::new("base")
						.with_strategy("base", screen(Drivers, Index, "base", "DriverTable")),
				)
				.with_action(
					Create,
					ActionConfig::new("base")
						.with_strategy("base", screen(Drivers, Create, "base", "DriverForm")),
				)
				.with_action(
					Show,
					ActionConfig::new("base")
						.with_strategy("base", screen(Drivers, Show, "base", "DriverProfile")),
				),
		)
		.module(
			Maintenance,
			ModuleConfig::new()
				.with_action(
					Index,
					ActionConfig::new("base")
						.with_strategy("base", screen(Maintenance, Index, "base", "ServiceLog"))
						.with_strategy(
							"calendar",
							screen(Maintenance, Index, "calendar", "ServiceCalendar"),
						),
				)
				.with_action(
					Create,
					ActionConfig::new("base")
						.with_strategy("base", screen(Maintenance, Create, "base", "WorkOrderForm"))
						.with_strategy(
							"wizard",
							screen(Maintenance, Create, "wizard", "WorkOrderWizard"),
						),
				),
		)
		.build()
}
