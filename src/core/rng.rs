//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ for fast, high-quality, deterministic randomness.
//! Given the same seed, produces an identical sequence on all platforms,
//! which makes scripted demo runs and respawn-heavy tests reproducible.

use serde::{Deserialize, Serialize};

use super::vec2::Vec2;

/// Deterministic PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use fingergun::core::rng::GameRng;
///
/// let mut rng = GameRng::new(12345);
/// let a = rng.next_u64();
/// let mut replay = GameRng::new(12345);
/// assert_eq!(replay.next_u64(), a);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameRng {
    state: [u64; 2],
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Xorshift state must never be all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random `f32` in `[0, 1)`.
    ///
    /// Uses the upper 24 bits so every representable output is exact.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        const SCALE: f32 = 1.0 / (1u32 << 24) as f32;
        ((self.next_u64() >> 40) as u32) as f32 * SCALE
    }

    /// Generate a random `f32` in `[min, max)`.
    #[inline]
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Generate a random position inside `width x height` with `margin`
    /// pixels of clearance from every edge.
    pub fn position_with_margin(&mut self, width: f32, height: f32, margin: f32) -> Vec2 {
        Vec2::new(
            self.next_f32_range(margin, width - margin),
            self.next_f32_range(margin, height - margin),
        )
    }

    /// Generate a random unit direction vector (uniform angle).
    pub fn unit_direction(&mut self) -> Vec2 {
        let angle = self.next_f32_range(0.0, std::f32::consts::TAU);
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Generate a random velocity: uniform direction, speed in `[min, max)`.
    pub fn velocity_in_range(&mut self, min_speed: f32, max_speed: f32) -> Vec2 {
        let speed = self.next_f32_range(min_speed, max_speed);
        self.unit_direction().scale(speed)
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = GameRng::new(12345);
        let mut rng2 = GameRng::new(54321);

        // Very unlikely to match
        assert_ne!(rng1.next_u64(), rng2.next_u64());
    }

    #[test]
    fn test_next_f32_range_bounds() {
        let mut rng = GameRng::new(1234);

        for _ in 0..1000 {
            let v = rng.next_f32_range(50.0, 150.0);
            assert!((50.0..150.0).contains(&v));
        }

        // Degenerate range collapses to min
        assert_eq!(rng.next_f32_range(5.0, 5.0), 5.0);
    }

    #[test]
    fn test_position_with_margin() {
        let mut rng = GameRng::new(7777);

        for _ in 0..200 {
            let p = rng.position_with_margin(640.0, 480.0, 50.0);
            assert!(p.x >= 50.0 && p.x < 590.0);
            assert!(p.y >= 50.0 && p.y < 430.0);
        }
    }

    #[test]
    fn test_unit_direction_is_unit() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            let d = rng.unit_direction();
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_velocity_speed_range() {
        let mut rng = GameRng::new(99);

        for _ in 0..200 {
            let v = rng.velocity_in_range(50.0, 150.0);
            let speed = v.length();
            assert!(speed >= 50.0 - 1e-3 && speed < 150.0 + 1e-3);
        }
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = GameRng::new(5555);

        for _ in 0..50 {
            rng.next_u64();
        }

        let saved = rng.state();
        let next_values: Vec<u64> = (0..10).map(|_| rng.next_u64()).collect();

        rng.set_state(saved);
        for expected in next_values {
            assert_eq!(rng.next_u64(), expected);
        }
    }
}
