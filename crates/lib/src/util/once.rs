//! Single-flight memoisation cache.
//!
//! [`OnceCache`] computes a value at most once per key and hands every caller
//! the same shared [`Arc`]. Callers racing on a key that has not been computed
//! yet block until the one running factory finishes, so nobody ever observes a
//! partially built value.
//!
//! The key map is only locked long enough to find or create a slot; factories
//! run outside that lock, so a factory may itself query the cache for other
//! keys. Re-entering the cache for the *same* key from inside its factory
//! deadlocks.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::trace;

type Value = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceLock<Value>>;

/// A keyed cache whose values are each computed exactly once.
///
/// Slots are keyed by `(K, TypeId)` so that the same key used with two
/// different value types yields two independent slots.
pub struct OnceCache<K> {
  slots: Mutex<HashMap<(K, TypeId), Slot>>,
}

impl<K> Default for OnceCache<K> {
  fn default() -> Self {
    Self {
      slots: Mutex::new(HashMap::new()),
    }
  }
}

impl<K> std::fmt::Debug for OnceCache<K> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OnceCache").field("slots", &self.slots.lock().len()).finish()
  }
}

impl<K> OnceCache<K>
where
  K: Eq + Hash + std::fmt::Debug,
{
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the value stored for `key`, running `factory` if there is none yet.
  ///
  /// `factory` is invoked at most once per key for the lifetime of the cache,
  /// even when many threads ask for the same key at the same time.
  pub fn get_or_compute<T, F>(&self, key: K, factory: F) -> Arc<T>
  where
    T: Send + Sync + 'static,
    F: FnOnce() -> T,
  {
    let slot = self.slot::<T>(key);
    let value = slot.get_or_init(|| Arc::new(factory()) as Value);
    Arc::clone(value)
      .downcast::<T>()
      .unwrap_or_else(|_| unreachable!("slot is keyed by the value's TypeId"))
  }

  /// Returns the stored value for `key` without computing it.
  pub fn get<T>(&self, key: K) -> Option<Arc<T>>
  where
    T: Send + Sync + 'static,
  {
    let slot = self.slots.lock().get(&(key, TypeId::of::<T>())).cloned()?;
    let value = slot.get()?;
    Arc::clone(value).downcast::<T>().ok()
  }

  /// Number of keys that have been requested so far.
  pub fn len(&self) -> usize {
    self.slots.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn slot<T: 'static>(&self, key: K) -> Slot {
    let mut slots = self.slots.lock();
    let map_key = (key, TypeId::of::<T>());
    if let Some(slot) = slots.get(&map_key) {
      trace!(key = ?map_key.0, "once cache hit");
      return Arc::clone(slot);
    }
    trace!(key = ?map_key.0, "once cache miss");
    let slot = Slot::default();
    slots.insert(map_key, Arc::clone(&slot));
    slot
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Barrier;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::thread;

  #[test]
  fn computes_once_per_key() {
    let cache = OnceCache::new();
    let calls = AtomicUsize::new(0);

    let first = cache.get_or_compute("key", || {
      calls.fetch_add(1, Ordering::SeqCst);
      vec![1, 2, 3]
    });
    let second = cache.get_or_compute("key", || {
      calls.fetch_add(1, Ordering::SeqCst);
      vec![4, 5, 6]
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*second, vec![1, 2, 3]);
  }

  #[test]
  fn distinct_keys_are_independent() {
    let cache = OnceCache::new();
    let a = cache.get_or_compute("a", || 1u32);
    let b = cache.get_or_compute("b", || 2u32);
    assert_eq!((*a, *b), (1, 2));
    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn same_key_different_types_do_not_collide() {
    let cache = OnceCache::new();
    let number = cache.get_or_compute("key", || 7u64);
    let text = cache.get_or_compute("key", || String::from("seven"));
    assert_eq!(*number, 7);
    assert_eq!(*text, "seven");
  }

  #[test]
  fn get_does_not_compute() {
    let cache = OnceCache::new();
    assert!(cache.get::<u32>("missing").is_none());
    cache.get_or_compute("present", || 3u32);
    assert_eq!(cache.get::<u32>("present").as_deref(), Some(&3));
  }

  #[test]
  fn factory_may_query_other_keys() {
    let cache = OnceCache::new();
    let outer = cache.get_or_compute("outer", || *cache.get_or_compute("inner", || 20u32) + 1);
    assert_eq!(*outer, 21);
  }

  #[test]
  fn concurrent_callers_share_one_computation() {
    const THREADS: usize = 32;

    let cache = OnceCache::new();
    let calls = AtomicUsize::new(0);
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<Vec<String>>> = thread::scope(|s| {
      let handles: Vec<_> = (0..THREADS)
        .map(|_| {
          s.spawn(|| {
            barrier.wait();
            cache.get_or_compute("classpath", || {
              calls.fetch_add(1, Ordering::SeqCst);
              thread::sleep(std::time::Duration::from_millis(20));
              vec!["/system/framework/framework.jar".to_string()]
            })
          })
        })
        .collect();
      handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(results.len(), THREADS);
    for result in &results {
      assert!(Arc::ptr_eq(result, &results[0]));
    }
  }
}
