//! # World Error Types
//!
//! All errors that can occur while loading or running a world.

use thiserror::Error;

/// Errors that can occur in the world layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The save record was written by a newer game than this one.
    ///
    /// Recovered locally: the world is marked non-enterable and the rest
    /// of the record is still read.
    #[error("attempted to load world \"{name}\" with file version {version} but can only support worlds up to file version 2")]
    UnsupportedVersion {
        /// Display name of the world being loaded.
        name: String,
        /// The version found in the record.
        version: i64,
    },
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
