//! Single-flight deferred implementations.
//!
//! Each registered `(module, action, strategy)` gets one
//! [`DeferredImplementation`]. The first request invokes the loader and
//! stores the resulting future as a shared handle; every later or concurrent
//! request awaits that same handle. The loader is therefore invoked at most
//! once and all callers observe the same value or error.
//!
//! State per entry only moves forward:
//! `NotRequested -> Loading -> {Loaded | LoadFailed}`.

use futures::future::{FutureExt, Shared};
use std::fmt;
use std::sync::{Arc, OnceLock};
use strategy_types::{
	Action, LoadError, LoadFuture, LoadResult, Module, StrategyError, StrategyLoader, StrategyName,
};
use tracing::{debug, error, info};

/// Progress of one deferred implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
	NotRequested,
	Loading,
	Loaded,
	LoadFailed,
}

impl fmt::Display for LoadState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			LoadState::NotRequested => "not-requested",
			LoadState::Loading => "loading",
			LoadState::Loaded => "loaded",
			LoadState::LoadFailed => "load-failed",
		};
		f.write_str(label)
	}
}

/// Shared handle to an in-flight or settled load.
pub type SharedLoad<T> = Shared<LoadFuture<T>>;

/// A strategy implementation that is loaded on first use and cached for the
/// lifetime of the process.
pub struct DeferredImplementation<T> {
	module: Module,
	action: Action,
	strategy: StrategyName,
	loader: Arc<dyn StrategyLoader<T>>,
	load: OnceLock<SharedLoad<T>>,
}

impl<T: Send + Sync + 'static> DeferredImplementation<T> {
	pub fn new(
		module: Module,
		action: Action,
		strategy: StrategyName,
		loader: Arc<dyn StrategyLoader<T>>,
	) -> Self {
		Self {
			module,
			action,
			strategy,
			loader,
			load: OnceLock::new(),
		}
	}

	pub fn module(&self) -> Module {
		self.module
	}

	pub fn action(&self) -> Action {
		self.action
	}

	pub fn strategy(&self) -> &StrategyName {
		&self.strategy
	}

	/// Returns the shared load, invoking the loader if this is the first
	/// request.
	pub fn load(&self) -> SharedLoad<T> {
		self.load
			.get_or_init(|| {
				info!(
					"Loading strategy '{}' for {}/{}",
					self.strategy, self.module, self.action
				);
				self.loader.load().shared()
			})
			.clone()
	}

	/// Waits for the implementation, starting the load if needed.
	///
	/// # Errors
	///
	/// Returns `StrategyError::LoadFailure` if the loader rejected. The
	/// failure is terminal: later calls return the same error without
	/// invoking the loader again.
	pub async fn get(&self) -> Result<Arc<T>, StrategyError> {
		self.load().await.map_err(|source| self.load_failure(source))
	}

	/// Settled result, if any, without starting or driving the load.
	pub fn peek(&self) -> Option<LoadResult<T>> {
		self.load.get().and_then(|shared| shared.peek().cloned())
	}

	pub fn state(&self) -> LoadState {
		match self.load.get() {
			None => LoadState::NotRequested,
			Some(shared) => match shared.peek() {
				None => LoadState::Loading,
				Some(Ok(_)) => LoadState::Loaded,
				Some(Err(_)) => LoadState::LoadFailed,
			},
		}
	}

	/// Starts the load on the current tokio runtime without waiting for it.
	///
	/// Returns `false` when there is no runtime to run on; the load then
	/// starts on the first [`get`](Self::get) instead.
	pub fn prefetch(&self) -> bool {
		let Ok(runtime) = tokio::runtime::Handle::try_current() else {
			debug!(
				"No runtime, skipping prefetch of '{}' for {}/{}",
				self.strategy, self.module, self.action
			);
			return false;
		};

		if self.load.get().is_some() {
			return true;
		}

		let load = self.load();
		let module = self.module;
		let action = self.action;
		let strategy = self.strategy.clone();
		runtime.spawn(async move {
			match load.await {
				Ok(_) => debug!("Prefetched strategy '{}' for {}/{}", strategy, module, action),
				Err(e) => error!(
					"Prefetch of strategy '{}' for {}/{} failed: {}",
					strategy, module, action, e
				),
			}
		});
		true
	}

	fn load_failure(&self, source: LoadError) -> StrategyError {
		error!(
			"Strategy '{}' for {}/{} failed to load: {}",
			self.strategy, self.module, self.action, source
		);
		StrategyError::LoadFailure {
			module: self.module,
			action: self.action,
			strategy: self.strategy.clone(),
			source,
		}
	}
}

impl<T> fmt::Debug for DeferredImplementation<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DeferredImplementation")
			.field("module", &self.module)
			.field("action", &self.action)
			.field("strategy", &self.strategy)
			.field("requested", &self.load.get().is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use tokio::sync::oneshot;

	fn counting_loader(
		calls: Arc<AtomicUsize>,
		result: LoadResult<String>,
	) -> Arc<dyn StrategyLoader<String>> {
		Arc::new(move || {
			calls.fetch_add(1, Ordering::SeqCst);
			let result = result.clone();
			async move { result }
		})
	}

	fn deferred(loader: Arc<dyn StrategyLoader<String>>) -> DeferredImplementation<String> {
		DeferredImplementation::new(Module::Vehicles, Action::Index, "base".into(), loader)
	}

	#[tokio::test]
	async fn test_loader_invoked_once() {
		let calls = Arc::new(AtomicUsize::new(0));
		let entry = deferred(counting_loader(calls.clone(), Ok(Arc::new("table".into()))));

		assert_eq!(entry.state(), LoadState::NotRequested);
		let first = entry.get().await.unwrap();
		let second = entry.get().await.unwrap();

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(entry.state(), LoadState::Loaded);
	}

	#[tokio::test]
	async fn test_concurrent_requests_share_in_flight_load() {
		let calls = Arc::new(AtomicUsize::new(0));
		let (tx, rx) = oneshot::channel::<String>();
		let rx = Arc::new(std::sync::Mutex::new(Some(rx)));

		let loader_calls = calls.clone();
		let loader: Arc<dyn StrategyLoader<String>> = Arc::new(move || {
			loader_calls.fetch_add(1, Ordering::SeqCst);
			let rx = rx.lock().unwrap().take();
			async move {
				match rx {
					Some(rx) => rx
						.await
						.map(Arc::new)
						.map_err(|_| LoadError::new("sender dropped")),
					None => Err(LoadError::new("loader invoked twice")),
				}
			}
		});
		let entry = Arc::new(deferred(loader));

		let mut handles = Vec::new();
		for _ in 0..8 {
			let entry = entry.clone();
			handles.push(tokio::spawn(async move { entry.get().await }));
		}

		tokio::task::yield_now().await;
		assert_eq!(entry.peek(), None);
		tx.send("table".to_string()).unwrap();

		let mut values = Vec::new();
		for handle in handles {
			values.push(handle.await.unwrap().unwrap());
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
		assert_eq!(*values[0], "table");
	}

	#[tokio::test]
	async fn test_failure_is_terminal() {
		let calls = Arc::new(AtomicUsize::new(0));
		let entry = deferred(counting_loader(
			calls.clone(),
			Err(LoadError::new("chunk failed to load")),
		));

		for _ in 0..3 {
			let err = entry.get().await.unwrap_err();
			if let StrategyError::LoadFailure {
				module,
				strategy,
				source,
				..
			} = err
			{
				assert_eq!(module, Module::Vehicles);
				assert_eq!(strategy, "base");
				assert_eq!(source.message(), "chunk failed to load");
			} else {
				panic!("Expected LoadFailure");
			}
		}

		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(entry.state(), LoadState::LoadFailed);
	}

	#[tokio::test]
	async fn test_prefetch_starts_load() {
		let calls = Arc::new(AtomicUsize::new(0));
		let entry = deferred(counting_loader(calls.clone(), Ok(Arc::new("table".into()))));

		assert!(entry.prefetch());
		assert!(entry.prefetch());
		assert_ne!(entry.state(), LoadState::NotRequested);

		let value = entry.get().await.unwrap();
		assert_eq!(*value, "table");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_prefetch_without_runtime_is_skipped() {
		let calls = Arc::new(AtomicUsize::new(0));
		let entry = deferred(counting_loader(calls.clone(), Ok(Arc::new("table".into()))));

		assert!(!entry.prefetch());
		assert_eq!(entry.state(), LoadState::NotRequested);
		assert_eq!(calls.load(Ordering::SeqCst), 0);

		let runtime = tokio::runtime::Builder::new_current_thread()
			.build()
			.unwrap();
		let value = runtime.block_on(entry.get()).unwrap();
		assert_eq!(*value, "table");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_state_labels() {
		assert_eq!(LoadState::NotRequested.to_string(), "not-requested");
		assert_eq!(LoadState::LoadFailed.to_string(), "load-failed");
	}
}
