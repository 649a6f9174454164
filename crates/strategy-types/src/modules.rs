//! Module and action identifiers.
//!
//! Both sets are closed and known at build time, so they are modelled as
//! enums rather than free-form strings. Only strategy names stay data-driven,
//! since those come from tenant configuration.
//!
//! Parsing is case-insensitive everywhere: command-line arguments go through
//! `FromStr` and configuration keys deserialize through the same path.

use crate::errors::ConfigurationError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A business area of the fleet application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
	Vehicles,
	Drivers,
	Maintenance,
}

impl Module {
	pub const ALL: [Module; 3] = [Module::Vehicles, Module::Drivers, Module::Maintenance];

	pub fn as_str(&self) -> &'static str {
		match self {
			Module::Vehicles => "vehicles",
			Module::Drivers => "drivers",
			Module::Maintenance => "maintenance",
		}
	}
}

impl fmt::Display for Module {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Module {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let key = s.trim();
		Module::ALL
			.into_iter()
			.find(|module| module.as_str().eq_ignore_ascii_case(key))
			.ok_or_else(|| ConfigurationError::UnknownModule(s.to_string()))
	}
}

/// An operation within a module. Which actions a module supports is decided
/// by the registry, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	/// List records.
	Index,
	/// Create a record.
	Create,
	/// Show a single record.
	Show,
	/// Edit a record.
	Edit,
}

impl Action {
	pub const ALL: [Action; 4] = [Action::Index, Action::Create, Action::Show, Action::Edit];

	pub fn as_str(&self) -> &'static str {
		match self {
			Action::Index => "index",
			Action::Create => "create",
			Action::Show => "show",
			Action::Edit => "edit",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Action {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let key = s.trim();
		Action::ALL
			.into_iter()
			.find(|action| action.as_str().eq_ignore_ascii_case(key))
			.ok_or_else(|| ConfigurationError::UnknownAction(s.to_string()))
	}
}

impl<'de> Deserialize<'de> for Module {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer)?
			.parse()
			.map_err(de::Error::custom)
	}
}

impl<'de> Deserialize<'de> for Action {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer)?
			.parse()
			.map_err(de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_module_parse() {
		assert_eq!("vehicles".parse::<Module>().unwrap(), Module::Vehicles);
		assert_eq!(" Drivers ".parse::<Module>().unwrap(), Module::Drivers);

		let result = "invoices".parse::<Module>();
		if let Err(ConfigurationError::UnknownModule(name)) = result {
			assert_eq!(name, "invoices");
		} else {
			panic!("Expected UnknownModule error");
		}
	}

	#[test]
	fn test_action_parse() {
		assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
		assert!(matches!(
			"archive".parse::<Action>(),
			Err(ConfigurationError::UnknownAction(_))
		));
	}

	#[test]
	fn test_serde_names_match_display() {
		for module in Module::ALL {
			let json = serde_json::to_string(&module).unwrap();
			assert_eq!(json, format!("\"{}\"", module));
		}
		for action in Action::ALL {
			let json = serde_json::to_string(&action).unwrap();
			assert_eq!(json, format!("\"{}\"", action));
		}
	}

	#[test]
	fn test_deserialize_matches_from_str() {
		let module: Module = serde_json::from_str("\"Vehicles\"").unwrap();
		assert_eq!(module, Module::Vehicles);
		let action: Action = serde_json::from_str("\" EDIT\"").unwrap();
		assert_eq!(action, Action::Edit);

		let err = serde_json::from_str::<Module>("\"invoices\"").unwrap_err();
		assert!(err.to_string().contains("invoices"));
	}
}
