//! # Play Command
//!
//! Interactive pachislot session driven from stdin.
//!
//! Each input line is one command token (`start`, `launch`, `lottery`,
//! `flow`, `finish`, or `q` to quit). The console observer prints every
//! state transition, reel, and lottery outcome as it happens. Printing a
//! reel is this adapter's whole "animation", so the spinning guard is
//! cleared as soon as the step's output has been written.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_output, format_result, format_state};
use crate::io_utils::read_stdin_line;
use crate::ui;
use pachisim_engine::errors::GameError;
use pachisim_engine::game::{CommandSource, Game, GameObserver, StepOutcome};
use pachisim_engine::lottery::LotteryResult;
use pachisim_engine::slot::SlotOutput;
use pachisim_engine::state::GameState;
use std::io::{BufRead, Write};

/// Command source holding exactly one already-read token.
struct OneShot(Option<String>);

impl CommandSource for OneShot {
    fn next_token(&mut self) -> Option<String> {
        self.0.take()
    }
}

/// Observer that renders every notification to the output stream.
struct ConsoleObserver<'a> {
    out: &'a mut dyn Write,
}

impl GameObserver for ConsoleObserver<'_> {
    fn start_game(&mut self, state: &GameState) {
        let _ = writeln!(self.out, "Game started: {}", format_state(state));
    }
    fn finish_game(&mut self, state: &GameState) {
        let _ = writeln!(self.out, "Game finished: {}", format_state(state));
    }
    fn lottery_normal(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        let _ = writeln!(
            self.out,
            "Spin: {} {}",
            format_output(reel),
            format_result(result)
        );
    }
    fn lottery_rush(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        let _ = writeln!(
            self.out,
            "Rush spin: {} {}",
            format_output(reel),
            format_result(result)
        );
    }
    fn lottery_rush_continue(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        let _ = writeln!(
            self.out,
            "Rush continue: {} {}",
            format_output(reel),
            format_result(result)
        );
    }
    fn transition(&mut self, before: Option<&GameState>, after: &GameState) {
        let before = match before {
            Some(s) => format_state(s),
            None => "-".to_string(),
        };
        let _ = writeln!(self.out, "State: {} -> {}", before, format_state(after));
    }
    fn probability_warning(&mut self, error: &GameError) {
        let _ = writeln!(self.out, "WARNING: {}", error);
    }
}

/// Handle the play command: interactive pachislot session.
///
/// # Arguments
///
/// * `balls` - Starting ball count override (default: configured value)
/// * `seed` - RNG seed for reproducibility (default: configured or random)
/// * `out` - Output stream for game display
/// * `err` - Error stream for warnings and errors
/// * `stdin` - Input stream for command tokens
///
/// # Returns
///
/// * `Ok(())` when the session loop ends (quit or EOF)
/// * `Err(CliError)` if configuration is invalid or I/O fails
pub fn handle_play_command(
    balls: Option<u32>,
    seed: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut knobs = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(b) = balls {
        knobs.init_balls = b;
    }
    let seed = seed.or(knobs.seed).unwrap_or_else(rand::random);

    let mut game = Game::new(knobs.to_engine_config(), seed)
        .map_err(|e| CliError::Config(e.to_string()))?;

    writeln!(out, "play: seed={}", seed)?;
    writeln!(out, "Commands: start, launch, lottery, flow, finish, q")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            break;
        };
        let mut source = OneShot(Some(line));
        let mut observer = ConsoleObserver { out: &mut *out };
        match game.run_step(&mut source, &mut observer) {
            Ok(StepOutcome::Terminated) => break,
            Ok(StepOutcome::Continue) => {}
            // interactive sessions keep prompting after a bad command
            Err(e) => ui::write_error(err, &e.to_string())?,
        }
        // reel printed: the spin has visibly resolved
        if game.is_spinning() {
            game.set_spinning(false);
        }
    }

    writeln!(out, "Session ended: {}", format_state(game.state()))?;
    Ok(())
}
