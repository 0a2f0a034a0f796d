//! Random sources for the price simulation.
//!
//! The simulation never reaches for ambient randomness; callers pass a
//! `RandomSource` explicitly:
//! - `SeededSource` re-seeds a `StdRng` with `seed + day` at the start of every
//!   simulated day, so day `d` of a run depends only on `(seed, d)` and the
//!   prices fed into it.
//! - `EntropySource` is OS-seeded once and ignores day boundaries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform randomness with day boundaries.
pub trait RandomSource {
    /// Called once before the draws of simulated day `day`.
    fn begin_day(&mut self, day: usize);

    /// Uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Deterministic source: every day restarts from `StdRng::seed_from_u64(seed + day)`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: StdRng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn begin_day(&mut self, day: usize) {
        self.rng = StdRng::seed_from_u64(self.seed.wrapping_add(day as u64));
    }

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Non-deterministic source seeded from OS entropy.
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn begin_day(&mut self, _day: usize) {}

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Pick a source from an optional seed. `None` means entropy.
pub fn source_for(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededSource::new(seed)),
        None => Box::new(EntropySource::new()),
    }
}

/// Replays a fixed list of draws, cycling. Day boundaries are ignored.
#[cfg(test)]
pub(crate) struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            pos: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn begin_day(&mut self, _day: usize) {}

    fn next_unit(&mut self) -> f64 {
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_days_are_reproducible() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        a.begin_day(3);
        b.begin_day(3);
        assert_eq!(a.next_unit(), b.next_unit());
        assert_eq!(a.next_unit(), b.next_unit());
    }

    #[test]
    fn day_restart_ignores_earlier_draws() {
        let mut a = SeededSource::new(7);
        a.begin_day(0);
        for _ in 0..10 {
            a.next_unit();
        }
        a.begin_day(1);
        let after_many = a.next_unit();

        let mut b = SeededSource::new(7);
        b.begin_day(1);
        assert_eq!(after_many, b.next_unit());
    }

    #[test]
    fn seed_plus_day_aliases() {
        // (seed 42, day 1) and (seed 43, day 0) draw the same stream.
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(43);
        a.begin_day(1);
        b.begin_day(0);
        assert_eq!(a.next_unit(), b.next_unit());
    }

    #[test]
    fn draws_are_unit_interval() {
        let mut src = EntropySource::new();
        for day in 0..100 {
            src.begin_day(day);
            let v = src.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn source_for_picks_mode() {
        let mut seeded = source_for(Some(1));
        let mut again = source_for(Some(1));
        seeded.begin_day(0);
        again.begin_day(0);
        assert_eq!(seeded.next_unit(), again.next_unit());
    }
}
