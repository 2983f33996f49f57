//! Randomness
//!
//! Every random draw the kiosk makes (scanned product, scale target, card
//! approval, order number) goes through a [`RandomSource`] so runs can be
//! reproduced and tests can script outcomes.

use std::collections::VecDeque;

#[cfg(test)]
use mockall::automock;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A source of uniformly distributed values in `[0, 1)`.
#[cfg_attr(test, automock)]
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Pick an index in `0..len` uniformly. Returns `None` for an empty range.
pub fn pick_index<R: RandomSource + ?Sized>(random: &mut R, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let unit = random.next_unit().clamp(0.0, 1.0);

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "unit is clamped to [0, 1] and len is a small collection size"
    )]
    let index = (unit * len as f64).floor() as usize;

    Some(index.min(len - 1))
}

/// Seeded pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a reproducible source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed sequence of values, then repeats the fallback.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    /// Create a scripted source. Once `values` runs out, `fallback` is returned.
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }

    /// Queue more values.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}
