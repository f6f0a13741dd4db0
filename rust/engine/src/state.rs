use serde::{Deserialize, Serialize};

use crate::config::BallsConfig;
use crate::errors::GameError;

/// The algebraic state of a single play session: exactly one variant is
/// active at a time, and every transition replaces the value wholesale.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No active session
    Uninitialized,
    /// Normal play; `balls > 0` while this state is active
    Normal {
        /// Remaining balls
        balls: u32,
    },
    /// Bonus mode with a separate ball pool and elevated odds
    Rush {
        /// Balls carried over from normal play (plus win awards)
        balls: u32,
        /// Bonus pool consumed while in rush
        rush_balls: u32,
        /// 1-based count of consecutive rush continuations won so far
        streak: u32,
    },
}

impl GameState {
    /// Whether a session is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, GameState::Uninitialized)
    }
}

/// Start a session: valid only from `Uninitialized`.
pub fn init(state: &GameState, balls: &BallsConfig) -> Result<GameState, GameError> {
    match state {
        GameState::Uninitialized => Ok(GameState::Normal {
            balls: balls.init_balls,
        }),
        _ => Err(GameError::AlreadyStarted),
    }
}

/// Spend one ball. Exhausting the normal balls ends the session;
/// exhausting the rush pool drops back to normal play with balls intact.
pub fn launch_ball(state: &GameState) -> Result<GameState, GameError> {
    match *state {
        GameState::Uninitialized => Err(GameError::Uninitialized),
        GameState::Normal { balls } => {
            if balls <= 1 {
                Ok(GameState::Uninitialized)
            } else {
                Ok(GameState::Normal { balls: balls - 1 })
            }
        }
        GameState::Rush {
            balls,
            rush_balls,
            streak,
        } => {
            if rush_balls <= 1 {
                Ok(GameState::Normal { balls })
            } else {
                Ok(GameState::Rush {
                    balls,
                    rush_balls: rush_balls - 1,
                    streak,
                })
            }
        }
    }
}

/// Award `incremental_balls` to the active state's ball count.
/// Calling this on `Uninitialized` is a programming error.
pub fn increment_balls(state: &GameState, balls_cfg: &BallsConfig) -> Result<GameState, GameError> {
    match *state {
        GameState::Uninitialized => Err(GameError::Uninitialized),
        GameState::Normal { balls } => Ok(GameState::Normal {
            balls: balls + balls_cfg.incremental_balls,
        }),
        GameState::Rush {
            balls,
            rush_balls,
            streak,
        } => Ok(GameState::Rush {
            balls: balls + balls_cfg.incremental_balls,
            rush_balls,
            streak,
        }),
    }
}

/// Enter rush from normal play (streak 1), or extend an active rush
/// (streak + 1, both pools topped up).
pub fn trigger_rush(state: &GameState, balls_cfg: &BallsConfig) -> Result<GameState, GameError> {
    match *state {
        GameState::Uninitialized => Err(GameError::Uninitialized),
        GameState::Normal { balls } => Ok(GameState::Rush {
            balls: balls + balls_cfg.incremental_balls,
            rush_balls: balls_cfg.incremental_rush,
            streak: 1,
        }),
        GameState::Rush {
            balls,
            rush_balls,
            streak,
        } => Ok(GameState::Rush {
            balls: balls + balls_cfg.incremental_balls,
            rush_balls: rush_balls + balls_cfg.incremental_rush,
            streak: streak + 1,
        }),
    }
}
