//! # Zone Generator Contract
//!
//! The interface every world generator satisfies, plus seeded spawn-point
//! selection shared by all of them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Width of one chunk column in blocks.
pub const CHUNK_WIDTH: u32 = 16;

/// A candidate spawn location on the horizontal plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpawnPoint {
    /// East-west offset from the zone origin.
    pub x: f32,
    /// North-south offset from the zone origin.
    pub z: f32,
}

/// A world generator for one kind of zone.
///
/// Implementors must be zero-argument constructible (`Default`) so the
/// registry can stamp out fresh instances from a plain factory function.
/// The registry seeds each instance and calls [`create`](Self::create)
/// before handing it to a caller.
pub trait ZoneGenerator: Send + Sync {
    /// Stable identifier this generator is saved and looked up under.
    fn save_key(&self) -> &'static str;

    /// Human-readable name shown in world creation menus.
    fn display_name(&self) -> &'static str;

    /// The seed driving all generation in this instance.
    fn seed(&self) -> i64;

    /// Replaces the seed. Called once by the registry before `create`.
    fn set_seed(&mut self, seed: i64);

    /// Post-seed setup hook. Most generators need none.
    fn create(&mut self) {}

    /// Y level players respawn at when no bed-equivalent exists.
    fn default_respawn_y(&self) -> i32;

    /// Picks a spawn candidate for the given attempt number.
    ///
    /// Deterministic per `(seed, attempt)`: the rng is reseeded from both,
    /// so retrying attempt 3 always yields the same point. Later attempts
    /// search farther from the origin.
    fn spawn_point(&self, attempt: u32) -> SpawnPoint {
        #[allow(clippy::cast_sign_loss)]
        let mut rng =
            ChaCha8Rng::seed_from_u64(self.seed().wrapping_add(i64::from(attempt)) as u64);
        #[allow(clippy::cast_precision_loss)]
        let max_dist = 5000.0 + attempt as f32 * 100.0;
        let dist = rng.gen::<f32>() * max_dist;
        let dx = rng.gen::<f32>();
        let dz = rng.gen::<f32>();
        let len = (dx * dx + dz * dz).sqrt();
        if len <= f32::EPSILON {
            return SpawnPoint { x: dist, z: 0.0 };
        }
        SpawnPoint {
            x: dx / len * dist,
            z: dz / len * dist,
        }
    }
}
