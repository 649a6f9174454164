//! Client-side resolution result.

use crate::errors::StrategyMismatch;
use crate::strategy::StrategyName;

/// Outcome of resolving a strategy against live tenant permission state.
///
/// The result is a pure derivation of its inputs and is recomputed whenever
/// they change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedStrategy {
	/// Permission data has not arrived yet.
	Loading,
	/// The module is disabled for the current tenant.
	Inactive,
	/// Resolution succeeded.
	Ready(StrategyName),
	/// The tenant-configured key is not implemented for the action.
	Error(StrategyMismatch),
}

impl ResolvedStrategy {
	pub fn is_ready(&self) -> bool {
		matches!(self, ResolvedStrategy::Ready(_))
	}

	pub fn strategy(&self) -> Option<&StrategyName> {
		match self {
			ResolvedStrategy::Ready(strategy) => Some(strategy),
			_ => None,
		}
	}

	/// Short status label, used in log fields and CLI output.
	pub fn status(&self) -> &'static str {
		match self {
			ResolvedStrategy::Loading => "loading",
			ResolvedStrategy::Inactive => "inactive",
			ResolvedStrategy::Ready(_) => "ready",
			ResolvedStrategy::Error(_) => "error",
		}
	}
}
