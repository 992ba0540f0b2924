//! Seeded level PRNG
//!
//! A sine-based recurrence: every draw evaluates `sin(seed) * 10000`, keeps the
//! fractional part, then bumps the seed by one. It is not a good generator,
//! but it is trivially portable, which is what reproducible level layouts need.

use serde::{Deserialize, Serialize};

/// Deterministic pseudo-random source keyed by a per-level seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeededRandom {
    seed: f64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed: seed as f64 }
    }

    /// Current internal seed (advances by one per draw)
    pub fn seed(&self) -> f64 {
        self.seed
    }

    /// Next float in [0, 1)
    pub fn next(&mut self) -> f64 {
        let x = self.seed.sin() * 10000.0;
        self.seed += 1.0;
        let frac = x - x.floor();
        // floor() can round the fraction up to exactly 1.0 for tiny negatives
        if frac >= 1.0 { 0.0 } else { frac }
    }

    /// Float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (self.next() * (max - min) as f64) as f32
    }

    /// Integer in [min, max); returns `min` for an empty range
    pub fn range_int(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = (max - min) as f64;
        let offset = (self.next() * span).floor() as i64;
        min + offset.min(max - min - 1)
    }

    /// Index in [0, len)
    pub fn index(&mut self, len: usize) -> usize {
        self.range_int(0, len as i64) as usize
    }

    /// Coin flip with the given probability of `true`
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next() < probability
    }

    /// Fisher-Yates shuffle, walking from the back
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
