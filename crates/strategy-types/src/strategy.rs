//! Strategy names and the helpers that normalise them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Strategy used when a tenant has not configured one.
pub const FALLBACK_STRATEGY: &str = "base";

/// Placeholder printed when an action has no strategies at all.
pub const NO_STRATEGIES: &str = "(none)";

/// Name of one implementation variant for a module/action pair,
/// e.g. `base`, `wizard` or `simple`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyName(String);

impl StrategyName {
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for StrategyName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for StrategyName {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for StrategyName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for StrategyName {
	fn from(name: &str) -> Self {
		Self(name.to_string())
	}
}

impl From<String> for StrategyName {
	fn from(name: String) -> Self {
		Self(name)
	}
}

impl PartialEq<str> for StrategyName {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for StrategyName {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}

/// Normalises a tenant-provided strategy key.
///
/// Surrounding whitespace is trimmed; an absent or blank key becomes
/// [`FALLBACK_STRATEGY`].
pub fn normalize_strategy_key(key: Option<&str>) -> StrategyName {
	match key.map(str::trim) {
		Some(trimmed) if !trimmed.is_empty() => StrategyName::from(trimmed),
		_ => StrategyName::from(FALLBACK_STRATEGY),
	}
}

/// Renders a list of strategy keys for diagnostics: sorted ascending and
/// comma separated, or [`NO_STRATEGIES`] when empty.
pub fn format_available<I, S>(keys: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut keys: Vec<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
	if keys.is_empty() {
		return NO_STRATEGIES.to_string();
	}
	keys.sort();
	keys.join(", ")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_absent_and_blank() {
		assert_eq!(normalize_strategy_key(None), FALLBACK_STRATEGY);
		assert_eq!(normalize_strategy_key(Some("")), FALLBACK_STRATEGY);
		assert_eq!(normalize_strategy_key(Some("   ")), FALLBACK_STRATEGY);
	}

	#[test]
	fn test_normalize_trims() {
		assert_eq!(normalize_strategy_key(Some("  wizard\n")), "wizard");
	}

	#[test]
	fn test_format_available_sorted() {
		assert_eq!(format_available(["simple", "base", "wizard"]), "base, simple, wizard");
	}

	#[test]
	fn test_format_available_empty() {
		assert_eq!(format_available(Vec::<String>::new()), NO_STRATEGIES);
	}

	#[test]
	fn test_strategy_name_is_transparent() {
		let name = StrategyName::from("wizard");
		assert_eq!(serde_json::to_string(&name).unwrap(), "\"wizard\"");
	}
}
