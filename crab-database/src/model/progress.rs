use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const CATCH_COIN_RANGE: RangeInclusive<u64> = 5..=15;
pub const CATCH_XP_RANGE: RangeInclusive<u64> = 1..=3;
/// Experience needed per level; the threshold for level `n` is `n * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u64 = 10;

/// A user's persistent catch progression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    #[serde(rename = "crabs_caught", default)]
    pub catches: u64,
    #[serde(rename = "crab_coins", default)]
    pub coins: u64,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default = "first_level")]
    pub level: u64,
    #[serde(default)]
    pub xp: u64,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            catches: 0,
            coins: 0,
            inventory: Vec::new(),
            level: 1,
            xp: 0,
        }
    }
}

impl UserProgress {
    pub fn xp_threshold(&self) -> u64 {
        self.level.max(1) * XP_PER_LEVEL
    }

    /// Apply one catch. Returns `true` when the catch caused a level-up.
    ///
    /// Reaching the threshold bumps the level and resets experience to zero;
    /// any overflow past the threshold is dropped.
    pub fn apply_catch(&mut self, reward: CatchReward) -> bool {
        self.level = self.level.max(1);
        self.catches = self.catches.saturating_add(1);
        self.coins = self.coins.saturating_add(reward.coins);
        self.xp = self.xp.saturating_add(reward.xp);

        if self.xp >= self.xp_threshold() {
            self.level += 1;
            self.xp = 0;
            return true;
        }

        false
    }
}

/// Coins and experience granted for one catch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatchReward {
    pub coins: u64,
    pub xp: u64,
}

impl CatchReward {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            coins: rng.gen_range(CATCH_COIN_RANGE),
            xp: rng.gen_range(CATCH_XP_RANGE),
        }
    }
}

fn first_level() -> u64 {
    1
}
