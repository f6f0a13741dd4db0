//! Console rendering for game states, reels, and lottery outcomes.

use pachisim_engine::lottery::{LoseKind, LotteryResult, WinKind};
use pachisim_engine::slot::{SlotOutput, Symbol};
use pachisim_engine::state::GameState;

/// One-line state summary, e.g. `Normal(balls=997)`.
pub fn format_state(state: &GameState) -> String {
    match state {
        GameState::Uninitialized => "Uninitialized".to_string(),
        GameState::Normal { balls } => format!("Normal(balls={})", balls),
        GameState::Rush {
            balls,
            rush_balls,
            streak,
        } => format!(
            "Rush(balls={}, rush_balls={}, streak={})",
            balls, rush_balls, streak
        ),
    }
}

/// Reel symbols joined with separators, e.g. `[7|BAR|7]`.
pub fn format_reel(reel: &[Symbol]) -> String {
    let symbols: Vec<String> = reel.iter().map(|s| s.to_string()).collect();
    format!("[{}]", symbols.join("|"))
}

pub fn format_result(result: &LotteryResult) -> &'static str {
    match result {
        LotteryResult::Win(WinKind::Default) => "WIN",
        LotteryResult::Win(WinKind::FakeWin) => "WIN (near miss first)",
        LotteryResult::Lose(LoseKind::Default) => "LOSE",
        LotteryResult::Lose(LoseKind::FakeLose) => "LOSE (near miss)",
    }
}

/// Full spin line: the primary reel, then the revealed bonus reel if any.
pub fn format_output(output: &SlotOutput) -> String {
    match &output.bonus {
        Some(bonus) => format!(
            "{} -> {}",
            format_reel(&output.primary),
            format_reel(bonus)
        ),
        None => format_reel(&output.primary),
    }
}
