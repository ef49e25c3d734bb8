//! # Zone Directory Integration Test
//!
//! Proves the directory's identity guarantee: one canonical zone per id
//! under concurrent creation, loader fired exactly once, creation gated on
//! authority, and the save record boundary behaving under version skew.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;
use sunder_world::{World, WorldRecord, Zone, ZoneAuthority, ZoneLoader};
use sunder_worldgen::{FlatGenerator, GeneratorRegistry};

/// Loader that counts lifecycle callbacks.
#[derive(Default)]
struct CountingLoader {
    registered: AtomicUsize,
    saved: AtomicUsize,
}

impl ZoneLoader for CountingLoader {
    fn register(&self, _zone: &Arc<Zone>) {
        self.registered.fetch_add(1, Ordering::SeqCst);
    }
    fn save(&self, _zone: &Zone) {
        self.saved.fetch_add(1, Ordering::SeqCst);
    }
}

fn world_with_loader(loader: Arc<CountingLoader>) -> World {
    let mut generator = FlatGenerator::default();
    World::create("Test World", "42", "sunder:flat", &mut generator, loader)
}

/// Test: N concurrent creates for one absent id yield one zone, one
/// loader callback, and identical `Arc`s for every caller.
#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_create_is_exactly_once() {
    const TASKS: usize = 16;

    let loader = Arc::new(CountingLoader::default());
    let world = Arc::new(world_with_loader(Arc::clone(&loader)));
    // The default zone fired one registration already.
    assert_eq!(loader.registered.load(Ordering::SeqCst), 1);

    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let world = Arc::clone(&world);
        handles.push(tokio::spawn(async move {
            world
                .zone_or_create("sunder:luna", ZoneAuthority::Host)
                .await
                .expect("host can create")
        }));
    }

    let mut zones = Vec::new();
    for handle in handles {
        zones.push(handle.await.unwrap());
    }
    for pair in zones.windows(2) {
        assert!(Arc::ptr_eq(&pair[0], &pair[1]), "two distinct zones created");
    }

    assert_eq!(loader.registered.load(Ordering::SeqCst), 2);
    assert_eq!(world.zone_ids().await.len(), 2);
}

/// Test: a guest cannot create, and the miss leaves no trace.
#[tokio::test]
async fn test_guest_cannot_create() {
    let loader = Arc::new(CountingLoader::default());
    let world = world_with_loader(Arc::clone(&loader));

    let zone = world.zone_or_create("sunder:luna", ZoneAuthority::Guest).await;
    assert!(zone.is_none());
    assert_eq!(world.zone_ids().await, vec!["sunder:flat".to_string()]);
    assert_eq!(loader.registered.load(Ordering::SeqCst), 1);

    // Guests still see zones the host created.
    let existing = world
        .zone_or_create("sunder:flat", ZoneAuthority::Guest)
        .await;
    assert!(existing.is_some());
}

/// Test: lookups return the canonical instance or nothing.
#[tokio::test]
async fn test_zone_if_exists() {
    let loader = Arc::new(CountingLoader::default());
    let world = world_with_loader(loader);

    let default_zone = world.zone_if_exists("sunder:flat").await.unwrap();
    assert_eq!(default_zone.zone_id(), "sunder:flat");
    assert_eq!(default_zone.generator_save_key(), Some("sunder:flat"));
    assert!(world.zone_if_exists("sunder:luna").await.is_none());

    let again = world.zone_if_exists("sunder:flat").await.unwrap();
    assert!(Arc::ptr_eq(&default_zone, &again));
}

/// Test: the default zone resolves through the same create path.
#[tokio::test]
async fn test_default_zone() {
    let loader = Arc::new(CountingLoader::default());
    let world = world_with_loader(loader);

    let zone = world.default_zone(ZoneAuthority::Guest).await.unwrap();
    assert_eq!(zone.zone_id(), "sunder:flat");
}

/// Test: writing fills the record schema and saves every zone once.
#[tokio::test]
async fn test_write_cascades_saves() {
    let loader = Arc::new(CountingLoader::default());
    let world = world_with_loader(Arc::clone(&loader));
    world
        .zone_or_create("sunder:luna", ZoneAuthority::Host)
        .await
        .unwrap();

    let mut fields = WorldRecord::new();
    world.write(&mut fields).await;

    assert_eq!(fields.get("latestRegionFileVersion"), Some(&Value::from(2)));
    assert_eq!(fields.get("defaultZoneId"), Some(&Value::from("sunder:flat")));
    assert_eq!(fields.get("worldDisplayName"), Some(&Value::from("Test World")));
    assert_eq!(fields.get("worldSeed"), Some(&Value::from(42)));
    assert_eq!(fields.get("worldTick"), Some(&Value::from(0)));
    assert!(fields.contains_key("lastSavedVersion"));
    assert!(fields.contains_key("worldCreatedEpochMillis"));
    assert!(fields.contains_key("lastPlayedEpochMillis"));

    assert_eq!(loader.saved.load(Ordering::SeqCst), 2);
}

/// Test: a record from the future disables entry instead of crashing.
#[tokio::test]
async fn test_unsupported_version_blocks_entry() {
    let registry = GeneratorRegistry::new();

    let mut fields = WorldRecord::new();
    fields.insert("latestRegionFileVersion".to_string(), Value::from(3));
    fields.insert("defaultZoneId".to_string(), Value::from("sunder:flat"));
    fields.insert("worldDisplayName".to_string(), Value::from("Future World"));
    fields.insert("worldSeed".to_string(), Value::from(7));
    fields.insert("worldTick".to_string(), Value::from(100));

    let world = World::load(&fields, Arc::new(CountingLoader::default()));
    // The record is still read in full.
    assert_eq!(world.world_seed(), 7);
    assert_eq!(world.current_tick(), 100);
    assert!(!world.can_enter(&registry).await.unwrap());
}

/// Test: a current-version record round-trips and stays enterable.
#[tokio::test]
async fn test_supported_version_roundtrip() {
    let registry = GeneratorRegistry::new();
    let loader = Arc::new(CountingLoader::default());
    let world = world_with_loader(Arc::clone(&loader));

    let mut fields = WorldRecord::new();
    world.write(&mut fields).await;

    let restored = World::load(&fields, loader);
    assert_eq!(restored.world_seed(), world.world_seed());
    assert_eq!(restored.default_zone_id(), "sunder:flat");
    assert_eq!(restored.display_name(), "Test World");
    assert!(restored.can_enter(&registry).await.unwrap());
}

/// Test: entry also requires a registered generator for the default zone.
#[tokio::test]
async fn test_unknown_default_generator_blocks_entry() {
    let registry = GeneratorRegistry::new();

    let mut fields = WorldRecord::new();
    fields.insert("latestRegionFileVersion".to_string(), Value::from(2));
    fields.insert("defaultZoneId".to_string(), Value::from("mod:gone"));

    let world = World::load(&fields, Arc::new(CountingLoader::default()));
    assert!(!world.can_enter(&registry).await.unwrap());
}
