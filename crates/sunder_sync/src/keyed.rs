//! # Keyed Mutex
//!
//! A registry handing out one asynchronous lock per opaque key.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 KeyedMutex                   │
//! │                                              │
//! │  ┌────────────────────────────────────────┐  │
//! │  │ parking_lot::Mutex<HashMap<K, Lock>>   │  │
//! │  │ (held for find-or-insert ONLY)         │  │
//! │  └───────┬──────────────┬─────────────────┘  │
//! │          ▼              ▼                    │
//! │   ┌────────────┐ ┌────────────┐              │
//! │   │ tokio lock │ │ tokio lock │  ...         │
//! │   │ key "a"    │ │ key "b"    │              │
//! │   └────────────┘ └────────────┘              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! The table lock closes the find-or-insert race: two concurrent first
//! callers for the same key always receive the same lock instance. A naive
//! check-then-insert would let each install its own lock and both "win".

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

/// A registry of asynchronous locks, one per key.
///
/// Equal keys always resolve to the same lock instance for the lifetime of
/// the registry; distinct keys never block each other beyond the
/// constant-time table step. Waiters on one key are queued FIFO by the
/// underlying tokio mutex, so no waiter starves.
///
/// The table grows monotonically and never evicts. This is fine for a
/// bounded key space (one lock per zone id, one per directory name); do not
/// feed it attacker-controlled keys.
pub struct KeyedMutex<K> {
    /// Key to lock table. The outer mutex guards insertion only.
    locks: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> KeyedMutex<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty registry. Locks are created on first use of a key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the lock for `key`, creating it if absent.
    ///
    /// The table lock is held only for this lookup-or-insert, never across
    /// a caller's critical section.
    fn lock_for(&self, key: &K) -> Arc<AsyncMutex<()>> {
        let mut table = self.locks.lock();
        if let Some(lock) = table.get(key) {
            return Arc::clone(lock);
        }
        let lock = Arc::new(AsyncMutex::new(()));
        table.insert(key.clone(), Arc::clone(&lock));
        tracing::trace!(keys = table.len(), "created lock for new key");
        lock
    }

    /// Runs `task` while holding the lock for `key`.
    ///
    /// At most one task body executes for a given key at any instant,
    /// across all callers. The lock is held across any suspension points
    /// inside `task`, so a slow task stalls every other task on the same
    /// key - and nothing else.
    ///
    /// The lock is released on every exit path: normal return, panic, and
    /// cancellation of the returned future. Task errors are the task's own
    /// business; return a `Result` and it propagates verbatim.
    pub async fn run_exclusive<T, F, Fut>(&self, key: K, task: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let lock = self.lock_for(&key);
        let _guard = lock.lock_owned().await;
        task().await
    }

    /// Number of keys that have been locked at least once.
    ///
    /// Entries are never removed, so this only grows.
    #[must_use]
    pub fn lock_count(&self) -> usize {
        self.locks.lock().len()
    }
}

impl<K> Default for KeyedMutex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for KeyedMutex<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedMutex")
            .field("keys", &self.locks.lock().len())
            .finish()
    }
}
