//! # SUNDER Sync
//!
//! Per-key asynchronous mutual exclusion.
//!
//! ## Design Principles
//!
//! 1. **Partitioned**: equal keys share one lock, distinct keys never contend
//! 2. **Guarded**: callers run closures under a lock, they never hold one
//! 3. **Leak-proof**: every exit path (return, panic, cancellation) releases
//!
//! ## Core Components
//!
//! - `KeyedMutex`: lazily-populated table of per-key async locks
//!
//! ## Example
//!
//! ```rust,ignore
//! use sunder_sync::KeyedMutex;
//!
//! let sync = KeyedMutex::new();
//! let value = sync
//!     .run_exclusive("zone_map", || async {
//!         // at most one task is ever in here for "zone_map"
//!         42
//!     })
//!     .await;
//! assert_eq!(value, 42);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod keyed;

pub use keyed::KeyedMutex;
