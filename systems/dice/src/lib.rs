#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dice and the injectable random sources behind them.
//!
//! Every random draw the engine makes, whether a die face or a wormhole
//! displacement, goes through a single [`RandomSource`] supplied by the host.
//! Tests substitute [`SeededSource`] or [`ScriptedSource`] to assert exact
//! sequences; production hosts use [`EntropySource`].

use std::{collections::VecDeque, fmt};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tilequest_core::{ConfigError, Result};

/// Number of faces on every die.
pub const DIE_FACES: i32 = 6;

/// Uniform integer generator consumed by the engine.
pub trait RandomSource: fmt::Debug {
    /// Draws a value uniformly from the inclusive range `low..=high`.
    ///
    /// Ranges where `high < low` collapse to `low`.
    fn roll_between(&mut self, low: i32, high: i32) -> i32;
}

/// Reproducible source seeded from a single integer.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a source whose sequence depends only on `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Source backed by operating-system entropy.
#[derive(Debug)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Creates a source seeded from the operating system.
    #[must_use]
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
    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Source that replays a fixed list of values.
///
/// Each value is clamped into the requested range. Once the list is
/// exhausted every draw returns the range's lower bound.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: VecDeque<i32>,
}

impl ScriptedSource {
    /// Creates a source that yields `values` in order.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn roll_between(&mut self, low: i32, high: i32) -> i32 {
        match self.values.pop_front() {
            Some(value) if high > low => value.clamp(low, high),
            _ => low,
        }
    }
}

/// Single six-sided die.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Die;

impl Die {
    /// Rolls the die, producing a face in `1..=6`.
    pub fn roll(self, source: &mut dyn RandomSource) -> u32 {
        source
            .roll_between(1, DIE_FACES)
            .clamp(1, DIE_FACES)
            .unsigned_abs()
    }
}

/// Set of identical dice rolled together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    count: u32,
}

impl Dice {
    /// Creates a set of `count` dice; at least one die is required.
    pub fn new(count: u32) -> Result<Self> {
        if count == 0 {
            return Err(ConfigError::ZeroDice.into());
        }
        Ok(Self { count })
    }

    /// Number of dice in the set.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Smallest and largest total the set can produce.
    #[must_use]
    pub const fn range(&self) -> (u32, u32) {
        (self.count, self.count.saturating_mul(DIE_FACES.unsigned_abs()))
    }

    /// Rolls every die independently and returns the sum of the faces.
    pub fn roll(&self, source: &mut dyn RandomSource) -> u32 {
        (0..self.count).map(|_| Die.roll(&mut *source)).sum()
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self { count: 1 }
    }
}

/// Rolls `count` dice once.
pub fn roll(count: u32, source: &mut dyn RandomSource) -> Result<u32> {
    Dice::new(count).map(|dice| dice.roll(source))
}

#[cfg(test)]
mod tests {
    use tilequest_core::EngineError;

    use super::*;

    #[test]
    fn zero_dice_are_rejected() {
        assert_eq!(
            Dice::new(0),
            Err(EngineError::InvalidConfiguration(ConfigError::ZeroDice))
        );
        let mut source = SeededSource::new(1);
        assert!(roll(0, &mut source).is_err());
    }

    #[test]
    fn seeded_sources_repeat_their_sequence() {
        let dice = Dice::new(3).expect("three dice");
        let mut first = SeededSource::new(0x5eed);
        let mut second = SeededSource::new(0x5eed);

        let a: Vec<u32> = (0..64).map(|_| dice.roll(&mut first)).collect();
        let b: Vec<u32> = (0..64).map(|_| dice.roll(&mut second)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn scripted_sources_replay_then_fall_back_to_the_floor() {
        let mut source = ScriptedSource::new([4, 9, -3]);
        assert_eq!(Die.roll(&mut source), 4);
        assert_eq!(Die.roll(&mut source), 6);
        assert_eq!(Die.roll(&mut source), 1);
        assert_eq!(source.roll_between(-15, 20), -15);
    }

    #[test]
    fn totals_sum_every_face() {
        let dice = Dice::new(3).expect("three dice");
        let mut source = ScriptedSource::new([6, 6, 5]);
        assert_eq!(dice.roll(&mut source), 17);
    }

    #[test]
    fn every_face_is_reachable() {
        let mut source = SeededSource::new(7);
        let mut seen = [false; 6];
        for _ in 0..1_000 {
            let face = Die.roll(&mut source);
            seen[(face - 1) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn collapsed_ranges_return_the_lower_bound() {
        let mut source = SeededSource::new(3);
        assert_eq!(source.roll_between(5, 5), 5);
        assert_eq!(source.roll_between(5, 2), 5);
    }

    #[test]
    fn entropy_sources_stay_in_range() {
        let mut source = EntropySource::default();
        for _ in 0..100 {
            let value = source.roll_between(-15, 20);
            assert!((-15..=20).contains(&value));
        }
    }
}
