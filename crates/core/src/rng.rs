//! RNG module - seeded pseudo-random source
//!
//! A small LCG that is fully deterministic for a given seed. The host seeds it
//! once at startup; every consumer (board generation, apple kinematics) takes
//! it by `&mut` so a fixed seed reproduces a board and its fall trajectories.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniform value in [min, max] (inclusive)
    pub fn next_between(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_range(max - min + 1)
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits fit the f32 mantissa exactly.
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform float in [range.0, range.1)
    pub fn next_f32_in(&mut self, range: (f32, f32)) -> f32 {
        range.0 + (range.1 - range.0) * self.next_f32()
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_between_covers_range_inclusive() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 10];
        for _ in 0..2000 {
            let v = rng.next_between(1, 9);
            assert!((1..=9).contains(&v));
            seen[v as usize] = true;
        }
        assert!(seen[1..=9].iter().all(|&s| s), "every value 1..=9 should appear");
    }

    #[test]
    fn test_next_f32_in_stays_in_range() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            let v = rng.next_f32_in((-300.0, 300.0));
            assert!((-300.0..300.0).contains(&v));
        }
    }

    #[test]
    fn test_reseed_from_state_continues_sequence() {
        let mut rng = SimpleRng::new(42);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.seed());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }
}
