//! Shared random source for decorative visuals.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// RNG used by every regenerate-on-mount visual (stars, streaks, surface details).
///
/// Seeded from the settings file when a seed is configured, otherwise from entropy.
#[derive(Resource, Deref, DerefMut)]
pub struct VisualRng(pub ChaCha8Rng);

impl VisualRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        info!("Visual RNG seed: {}", seed);
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
