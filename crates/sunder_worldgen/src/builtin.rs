//! # Built-In Generators
//!
//! The fixed generator set every SUNDER server ships with. Terrain math
//! lives behind the boundary; what matters here is the save key, the name,
//! and where players come back to life.

use crate::generator::ZoneGenerator;

/// Rolling highland terrain. The default for new worlds.
#[derive(Debug, Default)]
pub struct HighlandsGenerator {
    seed: i64,
}

impl ZoneGenerator for HighlandsGenerator {
    fn save_key(&self) -> &'static str {
        "sunder:highlands"
    }

    fn display_name(&self) -> &'static str {
        "Highlands"
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn default_respawn_y(&self) -> i32 {
        160
    }
}

/// Scattered islands over open water.
#[derive(Debug, Default)]
pub struct IslandsGenerator {
    seed: i64,
}

impl ZoneGenerator for IslandsGenerator {
    fn save_key(&self) -> &'static str {
        "sunder:islands"
    }

    fn display_name(&self) -> &'static str {
        "Islands"
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn default_respawn_y(&self) -> i32 {
        96
    }
}

/// Airless cratered wasteland.
#[derive(Debug, Default)]
pub struct LunaGenerator {
    seed: i64,
}

impl ZoneGenerator for LunaGenerator {
    fn save_key(&self) -> &'static str {
        "sunder:luna"
    }

    fn display_name(&self) -> &'static str {
        "Luna"
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn default_respawn_y(&self) -> i32 {
        110
    }
}

/// Perfectly flat build surface.
#[derive(Debug, Default)]
pub struct FlatGenerator {
    seed: i64,
}

impl ZoneGenerator for FlatGenerator {
    fn save_key(&self) -> &'static str {
        "sunder:flat"
    }

    fn display_name(&self) -> &'static str {
        "Flat"
    }

    fn seed(&self) -> i64 {
        self.seed
    }

    fn set_seed(&mut self, seed: i64) {
        self.seed = seed;
    }

    fn default_respawn_y(&self) -> i32 {
        12
    }
}
