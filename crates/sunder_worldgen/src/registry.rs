//! # Generator Registry
//!
//! Save-key to factory mapping, populated lazily and exactly once.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               GeneratorRegistry                  │
//! │                                                  │
//! │  AtomicBool initialized  ── unguarded fast path  │
//! │          │ miss                                  │
//! │          ▼                                       │
//! │  KeyedMutex("generator_registry")                │
//! │          │ re-check, populate, set flag          │
//! │          ▼                                       │
//! │  RwLock<RegistryInner>                           │
//! │    factories / ordered keys / display names      │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! The initialized flag is only ever set AFTER the populate step completes
//! and releases the inner write lock (Release store, Acquire load). No
//! reader can observe the flag set while the map is partial.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use sunder_sync::KeyedMutex;

use crate::builtin::{FlatGenerator, HighlandsGenerator, IslandsGenerator, LunaGenerator};
use crate::error::{WorldGenError, WorldGenResult};
use crate::generator::ZoneGenerator;

/// Zero-argument constructor for one generator kind.
///
/// A plain function pointer: the factory can never smuggle in state, which
/// is what makes registry instances interchangeable and re-creation cheap.
pub type GeneratorFactory = fn() -> Box<dyn ZoneGenerator>;

/// The key guarding the one-time populate step.
const REGISTRY_KEY: &str = "generator_registry";

/// Mutable interior of the registry. Read-mostly after population.
struct RegistryInner {
    /// Save key to factory.
    factories: HashMap<String, GeneratorFactory>,
    /// Save keys in registration order. Defines iteration order.
    ordered_keys: Vec<String>,
    /// Save key to human-readable name.
    display_names: HashMap<String, String>,
}

/// Registry of zone generator factories.
///
/// Created empty; the built-in generator set is installed on first access
/// by whichever caller gets there first, under a lock, exactly once. Pass
/// the registry to the components that need it - there is no process-wide
/// instance.
pub struct GeneratorRegistry {
    sync: KeyedMutex<&'static str>,
    initialized: AtomicBool,
    inner: RwLock<RegistryInner>,
}

impl GeneratorRegistry {
    /// Creates an empty, uninitialized registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sync: KeyedMutex::new(),
            initialized: AtomicBool::new(false),
            inner: RwLock::new(RegistryInner {
                factories: HashMap::new(),
                ordered_keys: Vec::new(),
                display_names: HashMap::new(),
            }),
        }
    }

    /// Installs the built-in generator set if nobody has yet.
    ///
    /// Unguarded fast path when already populated; otherwise acquires the
    /// registry lock, re-checks, populates, and only then sets the flag.
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::InvalidFactory`] or
    /// [`WorldGenError::ConflictingRegistration`] if a built-in factory is
    /// broken. That is a startup-class failure, not something to swallow.
    pub async fn ensure_initialized(&self) -> WorldGenResult<()> {
        if self.initialized.load(Ordering::Acquire) {
            return Ok(());
        }
        self.sync
            .run_exclusive(REGISTRY_KEY, || async {
                if self.initialized.load(Ordering::Acquire) {
                    return Ok(());
                }
                {
                    let mut inner = self.inner.write();
                    register_locked(&mut inner, make_highlands)?;
                    register_locked(&mut inner, make_islands)?;
                    register_locked(&mut inner, make_luna)?;
                    register_locked(&mut inner, make_flat)?;
                }
                self.initialized.store(true, Ordering::Release);
                tracing::debug!("zone generator registry populated");
                Ok(())
            })
            .await
    }

    /// Registers an additional generator factory.
    ///
    /// Idempotent for a repeat registration of the same generator.
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::InvalidFactory`] for an unusable factory
    /// (empty save key) and [`WorldGenError::ConflictingRegistration`]
    /// when a different generator already holds the save key.
    pub async fn register(&self, factory: GeneratorFactory) -> WorldGenResult<()> {
        self.ensure_initialized().await?;
        self.sync
            .run_exclusive(REGISTRY_KEY, || async {
                let mut inner = self.inner.write();
                register_locked(&mut inner, factory)
            })
            .await
    }

    /// Instantiates, seeds, and prepares the generator for `save_key`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldGenError::UnknownGenerator`] if no factory is
    /// registered under `save_key`, or an initialization error.
    pub async fn create(
        &self,
        save_key: &str,
        zone_seed: i64,
    ) -> WorldGenResult<Box<dyn ZoneGenerator>> {
        self.ensure_initialized().await?;
        let factory = self
            .inner
            .read()
            .factories
            .get(save_key)
            .copied()
            .ok_or_else(|| WorldGenError::UnknownGenerator(save_key.to_string()))?;
        let mut generator = factory();
        generator.set_seed(zone_seed);
        generator.create();
        Ok(generator)
    }

    /// Whether a generator is registered under `save_key`.
    ///
    /// # Errors
    ///
    /// Returns an initialization error if the first-time populate fails.
    pub async fn has(&self, save_key: &str) -> WorldGenResult<bool> {
        self.ensure_initialized().await?;
        Ok(self.inner.read().factories.contains_key(save_key))
    }

    /// Snapshot of all save keys, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an initialization error if the first-time populate fails.
    pub async fn save_keys(&self) -> WorldGenResult<Vec<String>> {
        self.ensure_initialized().await?;
        Ok(self.inner.read().ordered_keys.clone())
    }

    /// Human-readable name registered under `save_key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an initialization error if the first-time populate fails.
    pub async fn display_name(&self, save_key: &str) -> WorldGenResult<Option<String>> {
        self.ensure_initialized().await?;
        Ok(self.inner.read().display_names.get(save_key).cloned())
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("initialized", &self.initialized.load(Ordering::Acquire))
            .field("keys", &self.inner.read().ordered_keys)
            .finish()
    }
}

/// Validates and inserts one factory. Caller holds the registry lock.
fn register_locked(inner: &mut RegistryInner, factory: GeneratorFactory) -> WorldGenResult<()> {
    let probe = factory();
    let save_key = probe.save_key();
    if save_key.is_empty() {
        return Err(WorldGenError::InvalidFactory {
            name: probe.display_name().to_string(),
            reason: "empty save key".to_string(),
        });
    }
    if let Some(existing) = inner.display_names.get(save_key) {
        if existing == probe.display_name() {
            // Same generator registered twice: a no-op.
            return Ok(());
        }
        return Err(WorldGenError::ConflictingRegistration {
            save_key: save_key.to_string(),
            existing: existing.clone(),
            incoming: probe.display_name().to_string(),
        });
    }
    inner
        .display_names
        .insert(save_key.to_string(), probe.display_name().to_string());
    inner.ordered_keys.push(save_key.to_string());
    inner.factories.insert(save_key.to_string(), factory);
    tracing::debug!(save_key, name = probe.display_name(), "registered zone generator");
    Ok(())
}

fn make_highlands() -> Box<dyn ZoneGenerator> {
    Box::new(HighlandsGenerator::default())
}

fn make_islands() -> Box<dyn ZoneGenerator> {
    Box::new(IslandsGenerator::default())
}

fn make_luna() -> Box<dyn ZoneGenerator> {
    Box::new(LunaGenerator::default())
}

fn make_flat() -> Box<dyn ZoneGenerator> {
    Box::new(FlatGenerator::default())
}
