//! # Zones
//!
//! One `Zone` per logical dimension of a world, plus the loader
//! collaborator that gets told about them.

use std::sync::Arc;

use crate::seed::string_hash;

/// One dimension of a world.
///
/// The zone directory in [`crate::World`] guarantees at most one `Zone`
/// instance exists per id, so identity comparisons on the `Arc` are
/// meaningful.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    zone_id: String,
    zone_seed: i64,
    generator_save_key: Option<String>,
}

impl Zone {
    /// Creates a zone, deriving its seed from the world seed and its id.
    #[must_use]
    pub fn new(world_seed: i64, zone_id: &str, generator_save_key: Option<&str>) -> Self {
        Self {
            zone_id: zone_id.to_string(),
            zone_seed: world_seed.wrapping_add(string_hash(zone_id)),
            generator_save_key: generator_save_key.map(str::to_string),
        }
    }

    /// The id this zone is filed under in the directory.
    #[must_use]
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Seed driving generation inside this zone.
    #[must_use]
    pub fn zone_seed(&self) -> i64 {
        self.zone_seed
    }

    /// Save key of the generator that shapes this zone, if one was chosen.
    ///
    /// Lazily created zones have none until loaded from disk.
    #[must_use]
    pub fn generator_save_key(&self) -> Option<&str> {
        self.generator_save_key.as_deref()
    }
}

/// Collaborator notified about zone lifecycle events.
///
/// `register` fires exactly once per newly created zone, from inside the
/// directory's critical section. Implementations must NOT call back into
/// the zone directory for the same id - the directory lock is held and
/// the call would deadlock.
pub trait ZoneLoader: Send + Sync {
    /// A zone was just created and inserted into the directory.
    fn register(&self, zone: &Arc<Zone>);

    /// The owning world is writing its save record; persist this zone.
    fn save(&self, zone: &Zone);
}
