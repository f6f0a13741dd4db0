use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Probability, SlotProbability};
use crate::errors::GameError;

/// Presentation sub-kind of a winning draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum WinKind {
    /// Straight win: the matching line is shown immediately
    Default,
    /// Fake win: a near-miss reel is shown before the true win is revealed
    FakeWin,
}

/// Presentation sub-kind of a losing draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum LoseKind {
    /// Plain loss
    Default,
    /// Fake lose: a near-miss reel with no follow-up win
    FakeLose,
}

/// Outcome of one lottery draw: the result plus how it is presented.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum LotteryResult {
    Win(WinKind),
    Lose(LoseKind),
}

impl LotteryResult {
    pub fn is_win(&self) -> bool {
        matches!(self, LotteryResult::Win(_))
    }
}

/// Draws win/lose outcomes against the configured per-mode probabilities.
/// Owns its own ChaCha20 stream so sessions replay deterministically
/// from a seed.
#[derive(Debug)]
pub struct Lottery {
    probability: Probability,
    rng: ChaCha20Rng,
}

impl Lottery {
    pub fn new_with_seed(probability: Probability, seed: u64) -> Self {
        Self {
            probability,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Independent uniform samples on [0, 1): one for win/lose, one for
    /// the fake-presentation downgrade of whichever side was drawn.
    fn draw(&mut self, p: &SlotProbability) -> LotteryResult {
        if self.rng.random::<f64>() < p.win {
            if self.rng.random::<f64>() < p.fake_win {
                LotteryResult::Win(WinKind::FakeWin)
            } else {
                LotteryResult::Win(WinKind::Default)
            }
        } else if self.rng.random::<f64>() < p.fake_lose {
            LotteryResult::Lose(LoseKind::FakeLose)
        } else {
            LotteryResult::Lose(LoseKind::Default)
        }
    }

    /// Draw with the normal-mode odds.
    pub fn draw_normal(&mut self) -> LotteryResult {
        let p = self.probability.normal;
        self.draw(&p)
    }

    /// Draw with the rush-mode odds.
    pub fn draw_rush(&mut self) -> LotteryResult {
        let p = self.probability.rush;
        self.draw(&p)
    }

    /// Draw the rush-continuation lottery for the given streak. The base
    /// win probability is scaled by the configured decay function; a product
    /// above 1.0 is a contract violation of that function and fails without
    /// drawing.
    pub fn draw_rush_continue(&mut self, streak: u32) -> Result<LotteryResult, GameError> {
        let base = self.probability.rush_continue;
        let adjusted_win = base.win * (self.probability.rush_continue_fn)(streak);
        if adjusted_win > 1.0 {
            return Err(GameError::ProbabilityOutOfRange {
                streak,
                value: adjusted_win,
            });
        }
        let p = SlotProbability {
            win: adjusted_win,
            ..base
        };
        Ok(self.draw(&p))
    }
}
