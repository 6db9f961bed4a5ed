// Prelude module for target-dependent helpers

// PI constant
pub use core::f32::consts::PI;

/// Seedable pseudo-random source used for tone pitches and note layouts.
///
/// Backed by `SmallRng` on desktop targets and `fastrand` on wasm32, where
/// `rand` has no entropy source without extra configuration.
#[derive(Debug, Clone)]
pub struct Dice {
    #[cfg(not(target_arch = "wasm32"))]
    rng: rand::rngs::SmallRng,
    #[cfg(target_arch = "wasm32")]
    rng: fastrand::Rng,
}

#[cfg(not(target_arch = "wasm32"))]
impl Dice {
    pub fn seeded(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self {
            rng: rand::rngs::SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Uniform sample in `[min, max)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        use rand::Rng;
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

#[cfg(target_arch = "wasm32")]
impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Uniform sample in `[min, max)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        // f32() is in [0, 1); rounding can still land on max for wide ranges
        let value = self.rng.f32() * (max - min) + min;
        if value >= max {
            min
        } else {
            value
        }
    }
}

impl Dice {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}
