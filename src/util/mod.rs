//! Shared utilities: tolerance-aware scalar math, frame timing and scene
//! RNG setup.

/// Frame clock with delta-time capping and FPS smoothing.
pub mod frame_timing;
/// Epsilon comparisons, clamping predicates, angle wrapping.
pub mod math;
/// Seeded or OS-seeded scene random generators.
pub mod rng;
