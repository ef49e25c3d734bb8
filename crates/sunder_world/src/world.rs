//! # World
//!
//! World metadata, the flat save record boundary, and the zone directory.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                       World                        │
//! │                                                    │
//! │  metadata: name / seed / ticks / can_enter         │
//! │                                                    │
//! │  KeyedMutex ── "zone_map" ──┐                      │
//! │                             ▼                      │
//! │            ┌──────────────────────────────┐        │
//! │            │ zone_map: id -> Arc<Zone>    │        │
//! │            │ (touched ONLY under the key) │        │
//! │            └──────────────┬───────────────┘        │
//! │                           │ create                 │
//! │                           ▼                        │
//! │                 ZoneLoader::register               │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! Every read-modify-write of the zone map runs inside
//! `run_exclusive("zone_map", ..)`. Creation is deliberately serialized
//! against lookups: constructing a zone has an externally visible side
//! effect (loader registration) that cannot be discarded, so optimistic
//! construction is off the table. One canonical `Arc<Zone>` per id, ever.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde_json::Value;
use sunder_sync::KeyedMutex;
use sunder_worldgen::{GeneratorRegistry, WorldGenResult, ZoneGenerator};

use crate::error::WorldError;
use crate::seed;
use crate::zone::{Zone, ZoneLoader};

/// Highest region file version this build can read.
pub const LATEST_REGION_FILE_VERSION: i64 = 2;

/// The directory's designated key. Fixed: one lock guards the whole map.
const ZONE_MAP_KEY: &str = "zone_map";

/// Longest display name shown before truncation.
const DISPLAY_NAME_MAX: usize = 25;

/// The flat key/value record worlds are saved to and loaded from.
pub type WorldRecord = serde_json::Map<String, Value>;

/// Whether a caller is allowed to create zones that do not exist yet.
///
/// An explicit capability, passed per call. Reading the directory needs no
/// authority; populating it does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneAuthority {
    /// The hosting side. May create missing zones.
    Host,
    /// A connected guest. Sees only zones the host has created.
    Guest,
}

impl ZoneAuthority {
    /// Whether this authority may create directory entries.
    #[must_use]
    pub fn can_create(self) -> bool {
        matches!(self, Self::Host)
    }
}

/// A running world: metadata plus the guarded zone directory.
pub struct World {
    display_name: Option<String>,
    folder_name: String,
    default_zone_id: String,
    world_seed: i64,
    world_created_epoch_ms: i64,
    last_played_epoch_ms: i64,
    current_tick: i64,
    can_enter: bool,
    /// Zone directory. Never touched outside `run_exclusive(ZONE_MAP_KEY, ..)`.
    zone_map: Mutex<HashMap<String, Arc<Zone>>>,
    sync: KeyedMutex<&'static str>,
    loader: Arc<dyn ZoneLoader>,
}

impl World {
    /// Creates a new world with its default zone installed.
    ///
    /// `seed_text` is the player's input: numeric text is the seed, other
    /// text is hashed, empty text draws a random seed. The generator is
    /// seeded for the default zone and the loader hears about that zone
    /// exactly once.
    pub fn create(
        display_name: &str,
        seed_text: &str,
        default_zone_id: &str,
        generator: &mut dyn ZoneGenerator,
        loader: Arc<dyn ZoneLoader>,
    ) -> Self {
        let world_seed = seed::seed_from_text(seed_text).unwrap_or_else(seed::random_seed);
        let mut world = Self::bare(loader, world_seed);
        world.display_name = Some(display_name.to_string());
        world.folder_name = file_safe_name(display_name);
        world.default_zone_id = default_zone_id.to_string();

        generator.set_seed(world_seed.wrapping_add(seed::string_hash(default_zone_id)));
        let zone = Arc::new(Zone::new(
            world_seed,
            default_zone_id,
            Some(generator.save_key()),
        ));
        world.zone_map.get_mut().insert(default_zone_id.to_string(), Arc::clone(&zone));
        world.loader.register(&zone);

        let now = epoch_millis();
        world.world_created_epoch_ms = now;
        world.last_played_epoch_ms = now;
        tracing::info!(name = display_name, seed = world_seed, "created new world");
        world
    }

    /// Restores a world from a save record.
    ///
    /// See [`read`](Self::read) for version handling.
    pub fn load(fields: &WorldRecord, loader: Arc<dyn ZoneLoader>) -> Self {
        let mut world = Self::bare(loader, 0);
        world.read(fields);
        world
    }

    fn bare(loader: Arc<dyn ZoneLoader>, world_seed: i64) -> Self {
        Self {
            display_name: None,
            folder_name: String::new(),
            default_zone_id: String::new(),
            world_seed,
            world_created_epoch_ms: 0,
            last_played_epoch_ms: 0,
            current_tick: 0,
            can_enter: true,
            zone_map: Mutex::new(HashMap::new()),
            sync: KeyedMutex::new(),
            loader,
        }
    }

    /// Display name, falling back to the folder name, truncated for menus.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = self.display_name.as_deref().unwrap_or(&self.folder_name);
        if name.chars().count() > DISPLAY_NAME_MAX {
            let prefix: String = name.chars().take(DISPLAY_NAME_MAX - 3).collect();
            return format!("{prefix}...");
        }
        name.to_string()
    }

    /// File-safe folder name this world saves under.
    #[must_use]
    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    /// Id of the zone players enter first.
    #[must_use]
    pub fn default_zone_id(&self) -> &str {
        &self.default_zone_id
    }

    /// The seed all zone seeds derive from.
    #[must_use]
    pub fn world_seed(&self) -> i64 {
        self.world_seed
    }

    /// Current simulation tick.
    #[must_use]
    pub fn current_tick(&self) -> i64 {
        self.current_tick
    }

    /// Replaces the simulation tick (the tick loop owns advancement).
    pub fn set_current_tick(&mut self, tick: i64) {
        self.current_tick = tick;
    }

    /// In-world day number, starting at day 1.
    ///
    /// One tick is 50ms of world time; a full day-night cycle is 1920
    /// world seconds.
    #[must_use]
    pub fn day_number(&self) -> i64 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let world_seconds = (self.current_tick as f64 * 0.05) as i64;
        world_seconds.div_euclid(1920) + 1
    }

    /// Whether players may enter this world.
    ///
    /// False after reading a record from a newer game version, or when the
    /// default zone's generator is not registered.
    ///
    /// # Errors
    ///
    /// Propagates a registry initialization failure.
    pub async fn can_enter(&self, registry: &GeneratorRegistry) -> WorldGenResult<bool> {
        Ok(self.can_enter && registry.has(&self.default_zone_id).await?)
    }

    /// Looks up a zone without creating it. Pure read under the lock.
    pub async fn zone_if_exists(&self, zone_id: &str) -> Option<Arc<Zone>> {
        self.sync
            .run_exclusive(ZONE_MAP_KEY, || async {
                self.zone_map.lock().get(zone_id).cloned()
            })
            .await
    }

    /// Returns the zone for `zone_id`, creating it if absent and allowed.
    ///
    /// Absence is re-checked under the lock, so N concurrent callers get
    /// the same `Arc` and the loader fires once. Without Host authority an
    /// absent id yields `None` - not being allowed to create is a normal
    /// outcome, not an error.
    pub async fn zone_or_create(
        &self,
        zone_id: &str,
        authority: ZoneAuthority,
    ) -> Option<Arc<Zone>> {
        self.sync
            .run_exclusive(ZONE_MAP_KEY, || async {
                if let Some(zone) = self.zone_map.lock().get(zone_id) {
                    return Some(Arc::clone(zone));
                }
                if !authority.can_create() {
                    return None;
                }
                let zone = Arc::new(Zone::new(self.world_seed, zone_id, None));
                self.zone_map
                    .lock()
                    .insert(zone_id.to_string(), Arc::clone(&zone));
                self.loader.register(&zone);
                tracing::info!(zone_id, "created zone");
                Some(zone)
            })
            .await
    }

    /// The default zone, created on first entry by the host.
    pub async fn default_zone(&self, authority: ZoneAuthority) -> Option<Arc<Zone>> {
        let default_zone_id = self.default_zone_id.clone();
        self.zone_or_create(&default_zone_id, authority).await
    }

    /// Point-in-time snapshot of every zone.
    ///
    /// Taken under the lock; the lock is NOT held while the caller
    /// iterates the result.
    pub async fn zones(&self) -> Vec<Arc<Zone>> {
        self.sync
            .run_exclusive(ZONE_MAP_KEY, || async {
                self.zone_map.lock().values().cloned().collect()
            })
            .await
    }

    /// Point-in-time snapshot of every zone id.
    pub async fn zone_ids(&self) -> Vec<String> {
        self.sync
            .run_exclusive(ZONE_MAP_KEY, || async {
                self.zone_map.lock().keys().cloned().collect()
            })
            .await
    }

    /// Writes this world into a flat save record and cascades a save of
    /// every zone through the loader.
    pub async fn write(&self, fields: &mut WorldRecord) {
        fields.insert(
            "latestRegionFileVersion".to_string(),
            Value::from(LATEST_REGION_FILE_VERSION),
        );
        fields.insert(
            "lastSavedVersion".to_string(),
            Value::from(env!("CARGO_PKG_VERSION")),
        );
        fields.insert(
            "defaultZoneId".to_string(),
            Value::from(self.default_zone_id.clone()),
        );
        fields.insert(
            "worldDisplayName".to_string(),
            self.display_name.clone().map_or(Value::Null, Value::from),
        );
        fields.insert("worldSeed".to_string(), Value::from(self.world_seed));
        fields.insert(
            "worldCreatedEpochMillis".to_string(),
            Value::from(self.world_created_epoch_ms),
        );
        fields.insert(
            "lastPlayedEpochMillis".to_string(),
            Value::from(self.last_played_epoch_ms),
        );
        fields.insert("worldTick".to_string(), Value::from(self.current_tick));

        for zone in self.zones().await {
            self.loader.save(&zone);
        }
    }

    /// Reads world fields back from a flat save record.
    ///
    /// Missing fields fall back to defaults. A record with a region file
    /// version above [`LATEST_REGION_FILE_VERSION`] marks the world
    /// non-enterable and is logged; the rest of the record is still read.
    pub fn read(&mut self, fields: &WorldRecord) {
        self.can_enter = true;
        let version = fields
            .get("latestRegionFileVersion")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        self.default_zone_id = fields
            .get("defaultZoneId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        self.display_name = fields
            .get("worldDisplayName")
            .and_then(Value::as_str)
            .map(str::to_string);
        self.world_seed = fields
            .get("worldSeed")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        self.current_tick = fields
            .get("worldTick")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        self.world_created_epoch_ms = fields
            .get("worldCreatedEpochMillis")
            .and_then(Value::as_i64)
            .unwrap_or(0);
        self.last_played_epoch_ms = fields
            .get("lastPlayedEpochMillis")
            .and_then(Value::as_i64)
            .unwrap_or(0);

        if version > LATEST_REGION_FILE_VERSION {
            let error = WorldError::UnsupportedVersion {
                name: self.display_name(),
                version,
            };
            tracing::error!(%error, "world cannot be entered");
            self.can_enter = false;
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("display_name", &self.display_name)
            .field("default_zone_id", &self.default_zone_id)
            .field("world_seed", &self.world_seed)
            .field("can_enter", &self.can_enter)
            .finish_non_exhaustive()
    }
}

/// Milliseconds since the unix epoch, saturating instead of panicking.
fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

/// Strips characters that are unsafe in folder names.
fn file_safe_name(desired: &str) -> String {
    desired
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullLoader;

    impl ZoneLoader for NullLoader {
        fn register(&self, _zone: &Arc<Zone>) {}
        fn save(&self, _zone: &Zone) {}
    }

    fn test_world() -> World {
        let mut generator = sunder_worldgen::FlatGenerator::default();
        World::create(
            "Test World",
            "42",
            "sunder:flat",
            &mut generator,
            Arc::new(NullLoader),
        )
    }

    #[test]
    fn test_numeric_seed_text() {
        let world = test_world();
        assert_eq!(world.world_seed(), 42);
    }

    #[test]
    fn test_display_name_truncation() {
        let mut world = test_world();
        world.display_name = Some("A".repeat(30));
        let shown = world.display_name();
        assert_eq!(shown.chars().count(), DISPLAY_NAME_MAX);
        assert!(shown.ends_with("..."));

        world.display_name = Some("Short".to_string());
        assert_eq!(world.display_name(), "Short");
    }

    #[test]
    fn test_display_name_falls_back_to_folder() {
        let mut world = test_world();
        world.display_name = None;
        assert_eq!(world.display_name(), "Test World");
    }

    #[test]
    fn test_day_number() {
        let mut world = test_world();
        assert_eq!(world.day_number(), 1);
        // 1920 world seconds = one full cycle = 38400 ticks.
        world.set_current_tick(38400);
        assert_eq!(world.day_number(), 2);
    }

    #[test]
    fn test_file_safe_name() {
        assert_eq!(file_safe_name("My World: Reborn?"), "My World_ Reborn_");
    }
}
