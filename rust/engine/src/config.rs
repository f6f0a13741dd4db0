use thiserror::Error;

/// Ball economy parameters for a play session.
/// All counts are immutable once the config is built.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BallsConfig {
    /// Balls handed to the player when a session starts (must be > 0)
    pub init_balls: u32,
    /// Balls awarded on every winning lottery
    pub incremental_balls: u32,
    /// Extra balls added to the rush pool on entering or continuing rush
    pub incremental_rush: u32,
}

/// Win/lose odds for one lottery mode.
/// Each field is a probability in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlotProbability {
    /// Chance the draw is a win
    pub win: f64,
    /// Chance a win is presented as a near miss first (fake win)
    pub fake_win: f64,
    /// Chance a loss is presented as a near miss (fake lose)
    pub fake_lose: f64,
}

/// Multiplier applied to the rush-continuation win probability,
/// a pure function of the current streak length (1-based).
pub type RushContinueFn = fn(u32) -> f64;

/// The three per-mode probability triples plus the continuation decay.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Probability {
    /// Odds while in normal play
    pub normal: SlotProbability,
    /// Odds while in rush
    pub rush: SlotProbability,
    /// Base odds for the rush-continuation draw (win is scaled by the decay)
    pub rush_continue: SlotProbability,
    /// Decay multiplier for the continuation win probability
    pub rush_continue_fn: RushContinueFn,
}

/// Complete, validated parameter bundle for one game.
/// Built once, never mutated; invalid parameters abort game construction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Config {
    pub balls: BallsConfig,
    pub probability: Probability,
    /// Chance a launched ball lands in the start pocket and triggers a lottery
    pub start_hole_probability: f64,
}

/// Aggregate of every validation failure found in a [`Config`].
/// Reported once as a batch; construction aborts on the first failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid configuration: {}", .issues.join("; "))]
pub struct ConfigError {
    issues: Vec<String>,
}

impl ConfigError {
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

fn check_probability(issues: &mut Vec<String>, name: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        issues.push(format!("{} must be within [0, 1], got {}", name, value));
    }
}

fn check_slot_probability(issues: &mut Vec<String>, mode: &str, p: &SlotProbability) {
    check_probability(issues, &format!("{}.win", mode), p.win);
    check_probability(issues, &format!("{}.fake_win", mode), p.fake_win);
    check_probability(issues, &format!("{}.fake_lose", mode), p.fake_lose);
}

/// Default continuation decay: geometric, `0.6^(n-1)` for streak `n`.
pub fn geometric_decay(streak: u32) -> f64 {
    0.6_f64.powi(streak.saturating_sub(1) as i32)
}

impl Config {
    /// Validate the whole bundle, collecting every violation before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        if self.balls.init_balls == 0 {
            issues.push("init_balls must be > 0".to_string());
        }
        check_slot_probability(&mut issues, "normal", &self.probability.normal);
        check_slot_probability(&mut issues, "rush", &self.probability.rush);
        check_slot_probability(&mut issues, "rush_continue", &self.probability.rush_continue);
        check_probability(
            &mut issues,
            "start_hole_probability",
            self.start_hole_probability,
        );
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::new(issues))
        }
    }

    /// Reference demo parameter set: 1000 starting balls, +15 per win,
    /// +300 rush pool, continuation base win 0.8 with geometric decay.
    pub fn demo() -> Self {
        Self {
            balls: BallsConfig {
                init_balls: 1000,
                incremental_balls: 15,
                incremental_rush: 300,
            },
            probability: Probability {
                normal: SlotProbability {
                    win: 0.1,
                    fake_win: 0.2,
                    fake_lose: 0.1,
                },
                rush: SlotProbability {
                    win: 0.5,
                    fake_win: 0.2,
                    fake_lose: 0.1,
                },
                rush_continue: SlotProbability {
                    win: 0.8,
                    fake_win: 0.2,
                    fake_lose: 0.1,
                },
                rush_continue_fn: geometric_decay,
            },
            start_hole_probability: 0.1,
        }
    }
}
