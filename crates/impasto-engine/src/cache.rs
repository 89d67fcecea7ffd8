//! Result cache with single-flight computation claims.
//!
//! A [`ComputeCache`] stores finished results and tracks computations that
//! are still in flight. Claiming a key answers one of three ways: the value
//! is already cached, someone else is computing it, or the caller has just
//! become responsible for computing it. At most one computation per key runs
//! at a time; every other interested party gets a receiver that resolves
//! when the first one finishes.
//!
//! The party that computes holds a [`CacheSlot`]. Fulfilling the slot stores
//! the value and wakes every waiter; dropping it unfulfilled releases the
//! key so a later claim can try again, and resolves the waiters as
//! abandoned. Either way the key never stays pending forever.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::oneshot;

use crate::error::EngineError;

/// Receiver half of a pending computation's completion channel.
pub type ResultReceiver<V> = oneshot::Receiver<Result<Arc<V>, EngineError>>;

type Waiter<V> = oneshot::Sender<Result<Arc<V>, EngineError>>;

struct State<K, V> {
    results: HashMap<K, Arc<V>>,
    pending: HashMap<K, Vec<Waiter<V>>>,
}

/// Each update under the lock is a single map operation, so a poisoned
/// guard still protects a consistent state.
fn lock_state<K, V>(state: &Mutex<State<K, V>>) -> MutexGuard<'_, State<K, V>> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Outcome of [`ComputeCache::claim`].
pub enum Claim<K: Eq + Hash, V> {
    /// The value was already cached.
    Ready(Arc<V>),
    /// Another party is computing this key; the receiver resolves when it
    /// finishes.
    Wait(ResultReceiver<V>),
    /// The caller is now responsible for computing this key. The receiver
    /// resolves when the slot is fulfilled, like any other waiter's.
    Compute(ResultReceiver<V>, CacheSlot<K, V>),
}

/// Exclusive right to fulfill a pending cache key.
///
/// Hold it for the duration of the computation and call
/// [`fulfill`](Self::fulfill) with the result. If the slot is dropped
/// instead, the key's pending entry is removed and its waiters resolve as
/// abandoned.
pub struct CacheSlot<K: Eq + Hash, V> {
    state: Arc<Mutex<State<K, V>>>,
    key: Option<K>,
}

impl<K: Eq + Hash, V> CacheSlot<K, V> {
    /// Stores `value` under the slot's key and wakes every waiter.
    ///
    /// Returns the shared handle now held by the cache.
    pub fn fulfill(mut self, value: V) -> Arc<V> {
        let value = Arc::new(value);
        if let Some(key) = self.key.take() {
            let waiters = {
                let mut state = lock_state(&self.state);
                let waiters = state.pending.remove(&key).unwrap_or_default();
                state.results.insert(key, Arc::clone(&value));
                waiters
            };
            for waiter in waiters {
                // A waiter may have lost interest; delivery is best-effort.
                let _ = waiter.send(Ok(Arc::clone(&value)));
            }
        }
        value
    }
}

impl<K: Eq + Hash, V> Drop for CacheSlot<K, V> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            // Dropping the waiters' senders resolves them as abandoned.
            lock_state(&self.state).pending.remove(&key);
        }
    }
}

/// Keyed store of computed values with pending-computation tracking.
pub struct ComputeCache<K, V> {
    state: Arc<Mutex<State<K, V>>>,
}

impl<K, V> ComputeCache<K, V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                results: HashMap::new(),
                pending: HashMap::new(),
            })),
        }
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        lock_state(&self.state).results.len()
    }

    /// Whether no results are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock_state(&self.state).results.is_empty()
    }

    /// Number of keys with a computation currently in flight.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        lock_state(&self.state).pending.len()
    }
}

impl<K: Clone + Eq + Hash, V> ComputeCache<K, V> {
    /// Looks up `key` or registers interest in it.
    ///
    /// Exactly one claimant per key receives [`Claim::Compute`] until that
    /// slot is fulfilled or dropped.
    #[must_use]
    pub fn claim(&self, key: &K) -> Claim<K, V> {
        let mut state = lock_state(&self.state);
        if let Some(value) = state.results.get(key) {
            return Claim::Ready(Arc::clone(value));
        }
        let (sender, receiver) = oneshot::channel();
        if let Some(waiters) = state.pending.get_mut(key) {
            waiters.push(sender);
            return Claim::Wait(receiver);
        }
        state.pending.insert(key.clone(), vec![sender]);
        drop(state);
        let slot = CacheSlot {
            state: Arc::clone(&self.state),
            key: Some(key.clone()),
        };
        Claim::Compute(receiver, slot)
    }

    /// Returns the cached value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        lock_state(&self.state).results.get(key).cloned()
    }

    /// Removes every cached result whose key matches `condition` and
    /// returns how many were removed.
    ///
    /// In-flight computations are not touched; they complete and store
    /// their result as usual.
    pub fn invalidate_where<F>(&self, mut condition: F) -> usize
    where
        F: FnMut(&K) -> bool,
    {
        let mut state = lock_state(&self.state);
        let before = state.results.len();
        state.results.retain(|key, _| !condition(key));
        before - state.results.len()
    }
}

impl<K, V> Default for ComputeCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for ComputeCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock_state(&self.state);
        f.debug_struct("ComputeCache")
            .field("results", &state.results.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn compute_slot(cache: &ComputeCache<u32, String>, key: u32) -> CacheSlot<u32, String> {
        match cache.claim(&key) {
            Claim::Compute(_, slot) => slot,
            Claim::Ready(_) | Claim::Wait(_) => panic!("expected a compute claim"),
        }
    }

    // --- claim state machine tests ---

    #[test]
    fn first_claim_is_compute() {
        let cache = ComputeCache::<u32, String>::new();

        let claim = cache.claim(&1);
        assert!(matches!(claim, Claim::Compute(..)));
        assert_eq!(cache.pending_len(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn claims_while_pending_wait() {
        let cache = ComputeCache::<u32, String>::new();
        let _slot = compute_slot(&cache, 1);

        assert!(matches!(cache.claim(&1), Claim::Wait(_)));
        assert!(matches!(cache.claim(&1), Claim::Wait(_)));
        assert_eq!(cache.pending_len(), 1);
    }

    #[test]
    fn claim_after_fulfill_is_ready() {
        let cache = ComputeCache::<u32, String>::new();
        let slot = compute_slot(&cache, 1);
        slot.fulfill(String::from("value"));

        match cache.claim(&1) {
            Claim::Ready(value) => assert_eq!(*value, "value"),
            Claim::Wait(_) | Claim::Compute(..) => panic!("expected a cache hit"),
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.pending_len(), 0);
    }

    #[test]
    fn distinct_keys_compute_independently() {
        let cache = ComputeCache::<u32, String>::new();
        let _first = compute_slot(&cache, 1);

        let second = cache.claim(&2);
        assert!(matches!(second, Claim::Compute(..)));
        assert_eq!(cache.pending_len(), 2);
    }

    // --- fulfillment tests ---

    #[test]
    fn fulfill_wakes_every_waiter_with_the_same_allocation() {
        let cache = ComputeCache::<u32, String>::new();
        let (own_receiver, slot) = match cache.claim(&1) {
            Claim::Compute(receiver, slot) => (receiver, slot),
            Claim::Ready(_) | Claim::Wait(_) => panic!("expected a compute claim"),
        };
        let Claim::Wait(other_receiver) = cache.claim(&1) else {
            panic!("expected a waiting claim");
        };

        let stored = slot.fulfill(String::from("value"));

        let own = own_receiver.blocking_recv().unwrap().unwrap();
        let other = other_receiver.blocking_recv().unwrap().unwrap();
        assert!(Arc::ptr_eq(&own, &stored));
        assert!(Arc::ptr_eq(&other, &stored));
    }

    #[test]
    fn fulfill_returns_the_cached_handle() {
        let cache = ComputeCache::<u32, String>::new();
        let slot = compute_slot(&cache, 1);

        let stored = slot.fulfill(String::from("value"));

        assert!(Arc::ptr_eq(&stored, &cache.get(&1).unwrap()));
    }

    #[test]
    fn waiters_on_other_threads_receive_the_result() {
        let cache = Arc::new(ComputeCache::<u32, String>::new());
        let slot = match cache.claim(&1) {
            Claim::Compute(_, slot) => slot,
            Claim::Ready(_) | Claim::Wait(_) => panic!("expected a compute claim"),
        };

        let waiter = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || match cache.claim(&1) {
                Claim::Ready(value) => (*value).clone(),
                Claim::Wait(receiver) => (*receiver.blocking_recv().unwrap().unwrap()).clone(),
                Claim::Compute(..) => panic!("key should already be pending or cached"),
            })
        };
        // The waiter may claim before or after fulfillment; both paths end
        // at the same value.
        slot.fulfill(String::from("value"));

        assert_eq!(waiter.join().unwrap(), "value");
    }

    // --- abandonment tests ---

    #[test]
    fn dropped_slot_resolves_waiters_as_abandoned() {
        let cache = ComputeCache::<u32, String>::new();
        let (own_receiver, slot) = match cache.claim(&1) {
            Claim::Compute(receiver, slot) => (receiver, slot),
            Claim::Ready(_) | Claim::Wait(_) => panic!("expected a compute claim"),
        };
        let Claim::Wait(other_receiver) = cache.claim(&1) else {
            panic!("expected a waiting claim");
        };

        drop(slot);

        assert!(own_receiver.blocking_recv().is_err());
        assert!(other_receiver.blocking_recv().is_err());
        assert_eq!(cache.pending_len(), 0);
    }

    #[test]
    fn dropped_slot_releases_the_key_for_a_new_claim() {
        let cache = ComputeCache::<u32, String>::new();
        drop(compute_slot(&cache, 1));

        let slot = compute_slot(&cache, 1);
        slot.fulfill(String::from("second try"));

        assert_eq!(*cache.get(&1).unwrap(), "second try");
    }

    #[test]
    fn at_most_one_computation_per_key() {
        let cache = Arc::new(ComputeCache::<u32, ()>::new());
        let computes = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let computes = Arc::clone(&computes);
                std::thread::spawn(move || match cache.claim(&1) {
                    Claim::Compute(_, slot) => {
                        computes.fetch_add(1, Ordering::SeqCst);
                        slot.fulfill(())
                    }
                    Claim::Ready(value) => value,
                    Claim::Wait(receiver) => receiver.blocking_recv().unwrap().unwrap(),
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(computes.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    // --- invalidation tests ---

    #[test]
    fn invalidate_where_removes_matching_results() {
        let cache = ComputeCache::<u32, String>::new();
        compute_slot(&cache, 1).fulfill(String::from("one"));
        compute_slot(&cache, 2).fulfill(String::from("two"));
        compute_slot(&cache, 3).fulfill(String::from("three"));

        let removed = cache.invalidate_where(|key| *key >= 2);

        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&2).is_none());
    }

    #[test]
    fn invalidation_does_not_touch_inflight_computations() {
        let cache = ComputeCache::<u32, String>::new();
        let slot = compute_slot(&cache, 1);

        assert_eq!(cache.invalidate_where(|_| true), 0);
        assert_eq!(cache.pending_len(), 1);

        slot.fulfill(String::from("landed after invalidation"));
        assert!(cache.get(&1).is_some());
    }

    #[test]
    fn refulfilled_key_replaces_the_invalidated_value() {
        let cache = ComputeCache::<u32, String>::new();
        compute_slot(&cache, 1).fulfill(String::from("stale"));
        cache.invalidate_where(|key| *key == 1);

        compute_slot(&cache, 1).fulfill(String::from("fresh"));

        assert_eq!(*cache.get(&1).unwrap(), "fresh");
    }
}
