//! # SUNDER World
//!
//! The simulated world: metadata, the save record boundary, and a zone
//! directory that guarantees one canonical `Zone` per id under any amount
//! of concurrency.
//!
//! ## Design Principles
//!
//! 1. **Guarded**: every zone map access runs under the directory's lock
//! 2. **Privileged**: only a Host-authority caller may create zones
//! 3. **Recoverable**: unsupported save versions disable entry, not the process
//!
//! ## Core Components
//!
//! - `World`: owns the zone directory and the flat save record fields
//! - `Zone`: one logical dimension, seed derived from the world seed
//! - `ZoneLoader`: collaborator told about new zones and save cascades
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sunder_world::{World, ZoneAuthority};
//!
//! let world = Arc::new(World::create(
//!     "My World", "42", "sunder:highlands", &mut generator, loader,
//! ));
//! let zone = world.zone_or_create("sunder:luna", ZoneAuthority::Host).await;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod seed;
pub mod world;
pub mod zone;

pub use error::{WorldError, WorldResult};
pub use world::{World, WorldRecord, ZoneAuthority, LATEST_REGION_FILE_VERSION};
pub use zone::{Zone, ZoneLoader};
