//! Character cache registry: partial index -> shared `PartialPoseCache`.
//!
//! Fetch-or-create happens under one lock, so concurrent callers asking for the
//! same index all receive the same instance.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hashbrown::HashMap;
use log::debug;

use crate::partial::PartialPoseCache;
use crate::vector::APPROX_EPSILON;

#[derive(Debug)]
pub struct CacheRegistry {
    epsilon: f32,
    inner: Mutex<HashMap<usize, Arc<PartialPoseCache>>>,
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new(APPROX_EPSILON)
    }
}

impl CacheRegistry {
    /// `epsilon` is handed to every cache this registry creates.
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<usize, Arc<PartialPoseCache>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cache for `index`, creating it if this is the first request.
    pub fn fetch_or_create(&self, index: usize) -> Arc<PartialPoseCache> {
        let mut guard = self.lock();
        let epsilon = self.epsilon;
        guard
            .entry(index)
            .or_insert_with(|| {
                debug!("creating pose cache for partial {index}");
                Arc::new(PartialPoseCache::with_epsilon(index, epsilon))
            })
            .clone()
    }

    pub fn get(&self, index: usize) -> Option<Arc<PartialPoseCache>> {
        self.lock().get(&index).cloned()
    }

    /// Drop every cache. Holders of an `Arc` keep a detached instance that no
    /// later fetch will return.
    pub fn clear(&self) {
        let mut guard = self.lock();
        if !guard.is_empty() {
            debug!("clearing {} pose caches", guard.len());
        }
        guard.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn fetch_or_create_reuses_instance() {
        let reg = CacheRegistry::default();
        let a = reg.fetch_or_create(1);
        let b = reg.fetch_or_create(1);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.index(), 1);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn clear_detaches_existing_instances() {
        let reg = CacheRegistry::default();
        let before = reg.fetch_or_create(0);
        reg.clear();
        assert!(reg.is_empty());
        assert!(reg.get(0).is_none());
        let after = reg.fetch_or_create(0);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn concurrent_fetch_yields_one_instance() {
        const THREADS: usize = 16;
        let reg = CacheRegistry::default();
        let barrier = Barrier::new(THREADS);

        let caches: Vec<Arc<PartialPoseCache>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        reg.fetch_or_create(3)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(reg.len(), 1);
        let winner = reg.get(3).unwrap();
        assert!(caches.iter().all(|c| Arc::ptr_eq(c, &winner)));
    }
}
