//! # Worldgen Error Types
//!
//! All errors that can occur in the generator registry.

use thiserror::Error;

/// Errors that can occur in the generator registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldGenError {
    /// No generator is registered under the requested save key.
    #[error("could not find zone generator for save key: {0}")]
    UnknownGenerator(String),

    /// A factory produced a generator the registry cannot accept.
    #[error("zone generator \"{name}\" cannot be registered: {reason}")]
    InvalidFactory {
        /// Display name of the offending generator.
        name: String,
        /// What the factory got wrong.
        reason: String,
    },

    /// Two different generators claimed the same save key.
    #[error("save key {save_key} already registered to \"{existing}\", refusing \"{incoming}\"")]
    ConflictingRegistration {
        /// The contested save key.
        save_key: String,
        /// Display name of the generator already holding the key.
        existing: String,
        /// Display name of the generator that lost.
        incoming: String,
    },
}

/// Result type for worldgen operations.
pub type WorldGenResult<T> = Result<T, WorldGenError>;
