use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::lottery::{LoseKind, LotteryResult, WinKind};

/// Number of symbols shown on a spin by default.
pub const DEFAULT_REEL_LEN: usize = 3;

/// One reel symbol from the fixed catalog.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Seven,
    Bar,
    Bell,
    Cherry,
    Melon,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Symbol::Seven => "7",
            Symbol::Bar => "BAR",
            Symbol::Bell => "BELL",
            Symbol::Cherry => "CHERRY",
            Symbol::Melon => "MELON",
        };
        write!(f, "{}", s)
    }
}

pub fn all_symbols() -> [Symbol; 5] {
    [
        Symbol::Seven,
        Symbol::Bar,
        Symbol::Bell,
        Symbol::Cherry,
        Symbol::Melon,
    ]
}

/// Visible outcome of one spin. `bonus` is present only for a fake win:
/// the true winning line revealed after the near miss.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SlotOutput {
    pub primary: Vec<Symbol>,
    pub bonus: Option<Vec<Symbol>>,
}

/// Turns a lottery outcome into concrete reel symbols.
/// Owns its own ChaCha20 stream, separate from the lottery's, so reel
/// cosmetics never perturb the odds.
#[derive(Debug)]
pub struct SlotProducer {
    symbols: Vec<Symbol>,
    reel_len: usize,
    rng: ChaCha20Rng,
}

impl SlotProducer {
    /// Producer over the full catalog with the default reel length.
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            symbols: all_symbols().to_vec(),
            reel_len: DEFAULT_REEL_LEN,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Producer with a custom reel length. The lose renderer splits the
    /// reel into two non-empty runs, so lengths below 2 are rejected.
    pub fn with_reel_len(reel_len: usize, seed: u64) -> Result<Self, ConfigError> {
        if reel_len < 2 {
            return Err(ConfigError::new(vec![format!(
                "reel length must be >= 2, got {}",
                reel_len
            )]));
        }
        Ok(Self {
            symbols: all_symbols().to_vec(),
            reel_len,
            rng: ChaCha20Rng::seed_from_u64(seed),
        })
    }

    pub fn reel_len(&self) -> usize {
        self.reel_len
    }

    fn pick(&mut self, pool: &[Symbol]) -> Symbol {
        pool[self.rng.random_range(0..pool.len())]
    }

    /// A true matching line: one symbol repeated across the reel.
    pub fn produce_win(&mut self) -> Vec<Symbol> {
        let i = self.rng.random_range(0..self.symbols.len());
        vec![self.symbols[i]; self.reel_len]
    }

    /// A losing reel that can never read as a matching line: symbols are
    /// sampled from two disjoint catalog groups, at least one from each,
    /// then shuffled.
    pub fn produce_lose(&mut self) -> Vec<Symbol> {
        let mut catalog = self.symbols.clone();
        catalog.shuffle(&mut self.rng);
        let cut = self.rng.random_range(1..catalog.len());
        let (group1, group2) = catalog.split_at(cut);
        let group1 = group1.to_vec();
        let group2 = group2.to_vec();

        let cnt1 = self.rng.random_range(1..self.reel_len);
        let mut reel = Vec::with_capacity(self.reel_len);
        for _ in 0..cnt1 {
            reel.push(self.pick(&group1));
        }
        for _ in cnt1..self.reel_len {
            reel.push(self.pick(&group2));
        }
        reel.shuffle(&mut self.rng);
        reel
    }

    /// A near miss: matching outer symbols around a differing middle one.
    /// Always three symbols, whatever the configured reel length.
    pub fn produce_fake_lose(&mut self) -> Vec<Symbol> {
        let len = self.symbols.len();
        let i = self.rng.random_range(0..len);
        let step = if self.rng.random::<bool>() { 1 } else { len - 1 };
        let j = (i + step) % len;
        vec![self.symbols[i], self.symbols[j], self.symbols[i]]
    }

    /// Render an outcome: a fake win shows the near miss first and carries
    /// the revealed winning line as the bonus reel.
    pub fn produce(&mut self, result: &LotteryResult) -> SlotOutput {
        match result {
            LotteryResult::Win(WinKind::Default) => SlotOutput {
                primary: self.produce_win(),
                bonus: None,
            },
            LotteryResult::Win(WinKind::FakeWin) => SlotOutput {
                primary: self.produce_fake_lose(),
                bonus: Some(self.produce_win()),
            },
            LotteryResult::Lose(LoseKind::Default) => SlotOutput {
                primary: self.produce_lose(),
                bonus: None,
            },
            LotteryResult::Lose(LoseKind::FakeLose) => SlotOutput {
                primary: self.produce_fake_lose(),
                bonus: None,
            },
        }
    }
}
