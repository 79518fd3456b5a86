//! RNG module - uniform color draws
//!
//! One seedable LCG backs every random decision in the core: sequence growth,
//! AI error rolls, AI turn delays. A fixed seed therefore reproduces a full
//! session deterministically, which the integration tests rely on.

use tui_simon_types::{Color, COLOR_COUNT};

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
    /// Multiply-shift instead of modulo: the low bits of an LCG cycle with a
    /// short period, so `state % 4` would repeat every four draws.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Generate random value in [min, max]
    pub fn next_between(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_range(max - min + 1)
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Current state (for restarting with the same draw stream)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

/// Uniform color generator for sequence growth
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    rng: SimpleRng,
}

impl SequenceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next color, uniform over the four pads
    ///
    /// Draws are independent; no de-dup against the previous element.
    pub fn next(&mut self) -> Color {
        Color::from_index(self.rng.next_range(COLOR_COUNT as u32) as usize)
    }

    pub fn rng_mut(&mut self) -> &mut SimpleRng {
        &mut self.rng
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
