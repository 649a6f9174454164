//! Push-based client resolution.
//!
//! Permission state arrives asynchronously. [`watch_strategy`] subscribes to
//! snapshot updates and republishes the derived result whenever it changes,
//! so a reactive caller can simply observe the output channel.

use crate::client::{resolve_client_strategy, PermissionSnapshot};
use std::sync::Arc;
use strategy_registry::Registry;
use strategy_types::{Action, Module, ResolvedStrategy};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Output side of a running watch.
pub struct StrategyWatch {
	receiver: watch::Receiver<ResolvedStrategy>,
	handle: JoinHandle<()>,
}

impl StrategyWatch {
	pub fn receiver(&self) -> watch::Receiver<ResolvedStrategy> {
		self.receiver.clone()
	}

	pub fn current(&self) -> ResolvedStrategy {
		self.receiver.borrow().clone()
	}

	/// Waits until the derived result satisfies `predicate`.
	pub async fn wait_for<F>(&mut self, predicate: F) -> Option<ResolvedStrategy>
	where
		F: FnMut(&ResolvedStrategy) -> bool,
	{
		self.receiver
			.wait_for(predicate)
			.await
			.ok()
			.map(|value| (*value).clone())
	}
}

impl Drop for StrategyWatch {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

/// Starts re-deriving the result for `module`/`action` on every snapshot
/// change. Must be called from within a tokio runtime.
///
/// The background task stops when the snapshot sender is dropped or the
/// returned watch is dropped.
pub fn watch_strategy<T: 'static>(
	registry: Arc<Registry<T>>,
	module: Module,
	action: Action,
	mut inputs: watch::Receiver<PermissionSnapshot>,
) -> StrategyWatch {
	let initial = {
		let snapshot = inputs.borrow_and_update();
		resolve_client_strategy(&registry, module, action, &snapshot)
	};
	let (sender, receiver) = watch::channel(initial);

	let handle = tokio::spawn(async move {
		while inputs.changed().await.is_ok() {
			let snapshot = inputs.borrow_and_update().clone();
			let result = resolve_client_strategy(&registry, module, action, &snapshot);

			let changed = sender.send_if_modified(|current| {
				if *current == result {
					false
				} else {
					*current = result;
					true
				}
			});
			if changed {
				debug!("Strategy for {}/{} now {}", module, action, sender.borrow().status());
			}
		}
		debug!("Permission input closed for {}/{}", module, action);
	});

	StrategyWatch { receiver, handle }
}
