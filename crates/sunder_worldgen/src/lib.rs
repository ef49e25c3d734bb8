//! # SUNDER Worldgen
//!
//! Zone generators and the registry that hands them out.
//!
//! ## Design Principles
//!
//! 1. **Lazy**: the registry populates itself on first access, exactly once
//! 2. **Ordered**: registration order defines save-key iteration order
//! 3. **Deterministic**: same seed always produces the same spawn points
//!
//! ## Core Components
//!
//! - `ZoneGenerator`: the contract a world generator satisfies
//! - `GeneratorRegistry`: save-key to factory mapping, populated once
//! - Built-in generators: highlands, islands, luna, flat
//!
//! ## Example
//!
//! ```rust,ignore
//! use sunder_worldgen::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::new();
//! let generator = registry.create("sunder:flat", 42).await?;
//! assert_eq!(generator.display_name(), "Flat");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod builtin;
pub mod error;
pub mod generator;
pub mod registry;

pub use builtin::{FlatGenerator, HighlandsGenerator, IslandsGenerator, LunaGenerator};
pub use error::{WorldGenError, WorldGenResult};
pub use generator::{SpawnPoint, ZoneGenerator, CHUNK_WIDTH};
pub use registry::{GeneratorFactory, GeneratorRegistry};
