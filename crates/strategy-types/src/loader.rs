//! Deferred loader abstraction.
//!
//! A loader is a zero-argument operation that asynchronously produces an
//! implementation. Loaders may be invoked more than once without harm, but
//! the orchestrator memoizes the first invocation and never calls them again.

use crate::errors::LoadError;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// Result of a single load.
pub type LoadResult<T> = Result<Arc<T>, LoadError>;

/// Future returned by a loader. It owns everything it needs so it can be
/// shared between callers.
pub type LoadFuture<T> = BoxFuture<'static, LoadResult<T>>;

/// Produces an implementation on demand.
pub trait StrategyLoader<T>: Send + Sync {
	fn load(&self) -> LoadFuture<T>;
}

impl<T, F, Fut> StrategyLoader<T> for F
where
	F: Fn() -> Fut + Send + Sync,
	Fut: Future<Output = LoadResult<T>> + Send + 'static,
{
	fn load(&self) -> LoadFuture<T> {
		Box::pin(self())
	}
}

/// Loader that hands out an already-built implementation.
pub struct ReadyLoader<T> {
	value: Arc<T>,
}

impl<T> ReadyLoader<T> {
	pub fn new(value: T) -> Self {
		Self {
			value: Arc::new(value),
		}
	}
}

impl<T: Send + Sync + 'static> StrategyLoader<T> for ReadyLoader<T> {
	fn load(&self) -> LoadFuture<T> {
		let value = self.value.clone();
		Box::pin(async move { Ok(value) })
	}
}
