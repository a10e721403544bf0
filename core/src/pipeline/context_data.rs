// core/src/pipeline/context_data.rs

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared, lockable state threaded through every handler of a pipeline run.
///
/// Guards returned by [`ContextData::read`] and [`ContextData::write`] are
/// blocking locks and must be dropped before any `.await`.
#[derive(Debug)]
pub struct ContextData<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> ContextData<T> {
  pub fn new(data: T) -> Self {
    ContextData(Arc::new(RwLock::new(data)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  /// Takes the inner value out once the run is over and no other handle is alive.
  /// Returns `self` back if another clone still exists.
  pub fn try_into_inner(self) -> Result<T, Self> {
    Arc::try_unwrap(self.0).map(RwLock::into_inner).map_err(ContextData)
  }
}

impl<T: Send + Sync + 'static> Clone for ContextData<T> {
  fn clone(&self) -> Self {
    ContextData(Arc::clone(&self.0))
  }
}
