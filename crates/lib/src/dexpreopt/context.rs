use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::{ConfigError, GlobalConfig};
use crate::error::DeriveError;
use crate::util::hash::{Hashable, ObjectHash};
use crate::util::once::OnceCache;

/// Identity of a memoised derivation.
///
/// The configuration hash scopes every entry to the configuration it was
/// derived from, so one cache can serve several contexts safely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
  pub config: ObjectHash,
  pub name: &'static str,
}

pub type DerivationCache = OnceCache<CacheKey>;

/// A typed name for a memoised derivation.
pub struct OnceKey<T> {
  name: &'static str,
  _marker: PhantomData<fn() -> T>,
}

impl<T> OnceKey<T> {
  pub const fn new(name: &'static str) -> Self {
    Self {
      name,
      _marker: PhantomData,
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

/// Everything a derivation needs: the global configuration and the cache
/// shared by all build actions of one invocation.
///
/// Cloning is cheap and clones share the cache.
#[derive(Debug, Clone)]
pub struct DexpreoptContext {
  config: Arc<GlobalConfig>,
  config_hash: ObjectHash,
  cache: Arc<DerivationCache>,
}

impl DexpreoptContext {
  /// Creates a context with a fresh cache.
  pub fn new(config: GlobalConfig) -> Result<Self, ConfigError> {
    Self::with_cache(config, Arc::new(DerivationCache::new()))
  }

  /// Creates a context that stores its results in an existing cache.
  pub fn with_cache(config: GlobalConfig, cache: Arc<DerivationCache>) -> Result<Self, ConfigError> {
    let config_hash = config.compute_hash().map_err(ConfigError::Hash)?;
    Ok(Self {
      config: Arc::new(config),
      config_hash,
      cache,
    })
  }

  pub fn config(&self) -> &GlobalConfig {
    &self.config
  }

  pub fn config_hash(&self) -> &ObjectHash {
    &self.config_hash
  }

  pub fn cache(&self) -> &Arc<DerivationCache> {
    &self.cache
  }

  /// Runs `factory` the first time `key` is requested for this configuration.
  pub fn once<T, F>(&self, key: &OnceKey<T>, factory: F) -> Arc<T>
  where
    T: Send + Sync + 'static,
    F: FnOnce() -> T,
  {
    self.cache.get_or_compute(self.cache_key(key), factory)
  }

  /// Like [`once`](Self::once) for fallible derivations. A failure is
  /// memoised too, so the factory still runs only once.
  pub fn try_once<T, F>(&self, key: &OnceKey<Result<Arc<T>, DeriveError>>, factory: F) -> Result<Arc<T>, DeriveError>
  where
    T: Send + Sync + 'static,
    F: FnOnce() -> Result<T, DeriveError>,
  {
    let result = self.once(key, || factory().map(Arc::new));
    (*result).clone()
  }

  fn cache_key<T>(&self, key: &OnceKey<T>) -> CacheKey {
    CacheKey {
      config: self.config_hash.clone(),
      name: key.name,
    }
  }
}
