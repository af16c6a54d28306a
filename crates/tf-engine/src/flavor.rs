//! Decorative numbers for generated text.
//!
//! Nothing produced here is computed from the form; the values only make reports
//! look busy. Injecting the source lets tests pin every draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of cosmetic numbers (percentages, counts, currency amounts).
pub trait FlavorSource: Send {
    /// Whole percentage in `lo..=hi`.
    fn percent(&mut self, lo: u32, hi: u32) -> u32;

    /// Integer count in `lo..=hi`.
    fn count(&mut self, lo: u64, hi: u64) -> u64;

    /// Amount with two decimals in `lo..hi`.
    fn amount(&mut self, lo: f64, hi: f64) -> f64;

    /// Index into a list of length `len` (`len` > 0).
    fn pick(&mut self, len: usize) -> usize;
}

/// Seeded pseudo-random flavor.
pub struct SeededFlavor {
    rng: StdRng,
}

impl SeededFlavor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is set, entropy otherwise.
    pub fn from_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }
}

impl FlavorSource for SeededFlavor {
    fn percent(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.gen_range(lo.min(hi)..=hi.max(lo))
    }

    fn count(&mut self, lo: u64, hi: u64) -> u64 {
        self.rng.gen_range(lo.min(hi)..=hi.max(lo))
    }

    fn amount(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        let raw = self.rng.gen_range(lo..hi);
        (raw * 100.0).round() / 100.0
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Always returns the lower bound. For tests and snapshot-stable output.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedFlavor;

impl FlavorSource for FixedFlavor {
    fn percent(&mut self, lo: u32, _hi: u32) -> u32 {
        lo
    }

    fn count(&mut self, lo: u64, _hi: u64) -> u64 {
        lo
    }

    fn amount(&mut self, lo: f64, _hi: f64) -> f64 {
        lo
    }

    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}
