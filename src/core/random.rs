//! Two independent randomness sources
//!
//! - `tie_break`: pure hash of (x, y, parity). Decides which lateral
//!   direction a cell tries first; identical inputs always give the same bit.
//! - `Dice`: a real RNG for the probabilistic rules (burn-out, smoke, dissipation).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Multiplicative xor-shift mix of cell coordinates and tick parity.
#[inline]
pub fn mix(x: i32, y: i32, parity: u32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x27D4_EB2D)
        ^ (y as u32).wrapping_mul(0x1656_67B1)
        ^ parity.wrapping_mul(0x9E37_79B9);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297A_2D39);
    h ^= h >> 15;
    h
}

/// `true` = try the left side (-1) first
#[inline]
pub fn tie_break(x: i32, y: i32, parity: u32) -> bool {
    mix(x, y, parity) & 1 == 1
}

/// Ordered lateral offsets for a symmetric choice at (x, y)
#[inline]
pub fn lateral_order(x: i32, y: i32, parity: u32) -> (i32, i32) {
    if tie_break(x, y, parity) { (-1, 1) } else { (1, -1) }
}

/// RNG for the probabilistic material rules
pub struct Dice {
    rng: SmallRng,
}

impl Dice {
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Seeded from the platform's entropy source
    pub fn from_entropy() -> Self {
        Self::seeded(entropy_seed())
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }

    /// `true` with probability `p` (p <= 0 never, p >= 1 always)
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.rng.gen::<f32>() < p
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    rand::random()
}
