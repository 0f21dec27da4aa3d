//! Questions and the per-level configuration they are drawn from

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A multiplication problem `a × b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// Multiplier (the level's table)
    pub a: u32,
    /// Multiplicand
    pub b: u32,
}

impl Question {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// The expected answer (widened so any level's table fits)
    pub fn answer(&self) -> u64 {
        u64::from(self.a) * u64::from(self.b)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.a, self.b)
    }
}

/// Which pool a slot in the level draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intention {
    /// Must use the level's top multiplier
    Top,
    /// Any multiplier unlocked so far
    Any,
}

/// Level shape, derived purely from the level number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    pub question_count: u32,
    pub min_multiplier: u32,
    pub max_multiplier: u32,
}

impl LevelConfig {
    /// Configuration for a 1-based level. Level 0 is treated as level 1.
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let question_count = (level - 1)
            .saturating_mul(QUESTIONS_PER_LEVEL_STEP)
            .saturating_add(BASE_QUESTION_COUNT)
            .min(MAX_QUESTION_COUNT);
        Self {
            question_count,
            min_multiplier: MIN_MULTIPLIER,
            max_multiplier: level.saturating_add(1),
        }
    }

    /// Questions that must come from the top multiplier (rounded up)
    pub fn mandatory_top_count(&self) -> u32 {
        self.question_count.div_ceil(3)
    }

    /// Draw uniformly from the pool an intention names: the top table alone,
    /// or every `(a, b)` with `a` in the unlocked range. Pools are never built,
    /// so the cost does not grow with the level.
    pub fn sample<R: Rng + ?Sized>(&self, intention: Intention, rng: &mut R) -> Question {
        let a = match intention {
            Intention::Top => self.max_multiplier,
            Intention::Any => rng.random_range(self.min_multiplier..=self.max_multiplier),
        };
        let b = rng.random_range(MIN_MULTIPLICAND..=MAX_MULTIPLICAND);
        Question::new(a, b)
    }
}
