//! A lock-guarded store for loaders that run in parallel.

use crate::config::Config;
use crate::error::ConfigError;
use crate::fqdn::Fqdn;
use confgraph_types::Resource;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a [`Config`] behind a mutex.
///
/// Every operation takes the lock for its own duration only, so a duplicate
/// check and the insert that follows it happen atomically.
///
/// # Example
///
/// ```
/// use confgraph_config::SharedConfig;
/// use confgraph_types::{TYPE_VARIABLE, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// let shared = SharedConfig::default();
///
/// let loader = shared.clone();
/// std::thread::spawn(move || {
///     let variable = registry.create(TYPE_VARIABLE, "region").unwrap();
///     loader.add(variable).unwrap();
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(shared.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedConfig {
    inner: Arc<Mutex<Config>>,
}

impl SharedConfig {
    /// Wraps an existing store.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
        }
    }

    /// Adds a resource under the lock.
    ///
    /// # Errors
    ///
    /// As [`Config::add`].
    pub fn add(&self, resource: Box<dyn Resource>) -> Result<(), ConfigError> {
        self.inner.lock().add(resource)
    }

    /// Removes the resource at `fqdn` under the lock.
    ///
    /// # Errors
    ///
    /// As [`Config::remove_address`].
    pub fn remove(&self, fqdn: &Fqdn) -> Result<Box<dyn Resource>, ConfigError> {
        self.inner.lock().remove_address(fqdn)
    }

    /// Returns the number of stored resources.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.lock().count()
    }

    /// Runs `f` with shared access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&Config) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Config) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwraps the store, or takes its contents when other handles are
    /// still alive. Those handles are left holding an empty store.
    #[must_use]
    pub fn into_inner(self) -> Config {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => core::mem::take(&mut *shared.lock()),
        }
    }
}

impl From<Config> for SharedConfig {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
