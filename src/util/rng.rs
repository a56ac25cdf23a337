//! Scene RNG construction.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// A reproducible generator for `Some(seed)`, an OS-seeded one otherwise.
#[must_use]
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}
