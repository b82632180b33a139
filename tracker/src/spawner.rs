//! Pseudorandom target placement.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::target::PaintingArea;

/// Draws the next target center inside the painting area.
///
/// Positions are reduced by modulo, which inherits the generator's modulo
/// bias. Good enough for a game; a controlled experiment would use a
/// predetermined position list instead. The random source is injectable so
/// tests can supply a deterministic generator.
#[derive(Debug)]
pub struct TargetSpawner<R: RngCore> {
    rng: R,
}

impl TargetSpawner<StdRng> {
    /// Seeds from the system clock, once per process. Deliberately
    /// low-quality, non-cryptographic seeding.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Self::new(StdRng::seed_from_u64(nanos))
    }
}

impl<R: RngCore> TargetSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Next center in `[0, width) x [0, height)`. No minimum-distance
    /// constraint: consecutive targets may coincide or overlap.
    pub fn next_center(&mut self, area: PaintingArea) -> (i32, i32) {
        let x = self.rng.next_u32() % area.width;
        let y = self.rng.next_u32() % area.height;
        (x as i32, y as i32)
    }
}
