//! Simulation command handler for batch spin sessions.
//!
//! Runs a scripted session: start, N launch-flow commands, finish. Each
//! launch-flow spends one ball and spins only when the start-hole draw
//! lands. Prints a summary of wins, rush entries, and continuations, and
//! optionally records every spin as a JSONL [`SpinRecord`].

use crate::config;
use crate::error::CliError;
use crate::formatters::format_state;
use crate::ui;
use pachisim_engine::command::Command;
use pachisim_engine::errors::GameError;
use pachisim_engine::game::{Game, GameObserver, ScriptSource, StepOutcome};
use pachisim_engine::logger::{SpinLogger, SpinMode, SpinRecord};
use pachisim_engine::lottery::LotteryResult;
use pachisim_engine::slot::SlotOutput;
use pachisim_engine::state::GameState;
use std::io::Write;

/// Observer that tallies outcomes and streams records to the logger.
/// Spin events arrive before the command's closing transition, so records
/// are buffered until the post-spin state is known.
struct SimObserver {
    logger: Option<SpinLogger>,
    seed: u64,
    pending: Vec<(SpinMode, LotteryResult, SlotOutput)>,
    spins: u64,
    wins: u64,
    rush_entries: u64,
    continuations_won: u64,
    max_streak: u32,
    warnings: u64,
    write_failure: Option<std::io::Error>,
}

impl SimObserver {
    fn new(logger: Option<SpinLogger>, seed: u64) -> Self {
        Self {
            logger,
            seed,
            pending: Vec::new(),
            spins: 0,
            wins: 0,
            rush_entries: 0,
            continuations_won: 0,
            max_streak: 0,
            warnings: 0,
            write_failure: None,
        }
    }

    fn record_spin(&mut self, mode: SpinMode, result: &LotteryResult, reel: &SlotOutput) {
        self.spins += 1;
        if result.is_win() {
            self.wins += 1;
        }
        self.pending.push((mode, *result, reel.clone()));
    }
}

impl GameObserver for SimObserver {
    fn lottery_normal(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        if result.is_win() {
            self.rush_entries += 1;
        }
        self.record_spin(SpinMode::Normal, result, reel);
    }
    fn lottery_rush(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        self.record_spin(SpinMode::Rush, result, reel);
    }
    fn lottery_rush_continue(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        if result.is_win() {
            self.continuations_won += 1;
        }
        self.record_spin(SpinMode::RushContinue, result, reel);
    }
    fn transition(&mut self, _before: Option<&GameState>, after: &GameState) {
        if let GameState::Rush { streak, .. } = after {
            self.max_streak = self.max_streak.max(*streak);
        }
        for (mode, result, reel) in std::mem::take(&mut self.pending) {
            let Some(logger) = &mut self.logger else {
                continue;
            };
            let record = SpinRecord {
                spin_id: logger.next_id(),
                seed: Some(self.seed),
                mode,
                result,
                reel,
                state_after: *after,
                ts: None,
                meta: None,
            };
            if let Err(e) = logger.write(&record) {
                self.write_failure.get_or_insert(e);
            }
        }
    }
    fn probability_warning(&mut self, _error: &GameError) {
        self.warnings += 1;
    }
}

/// Handle the sim command: run a scripted launch-flow session.
///
/// # Arguments
///
/// * `spins` - Number of launch-flow commands to execute (must be >= 1)
/// * `seed` - Base RNG seed (default: configured or random)
/// * `output` - Path for JSONL spin records (optional)
/// * `out` - Output stream for the summary
/// * `err` - Output stream for warnings and errors
///
/// # Returns
///
/// `Ok(())` on success, or `CliError` on failure
pub fn handle_sim_command(
    spins: u64,
    seed: Option<u64>,
    output: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if spins == 0 {
        ui::write_error(err, "spins must be >= 1")?;
        return Err(CliError::InvalidInput("spins must be >= 1".to_string()));
    }

    let knobs = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    let seed = seed.or(knobs.seed).unwrap_or_else(rand::random);
    let mut game = Game::new(knobs.to_engine_config(), seed)
        .map_err(|e| CliError::Config(e.to_string()))?;

    let logger = match &output {
        Some(path) => Some(SpinLogger::create(path)?),
        None => None,
    };
    let mut observer = SimObserver::new(logger, seed);

    writeln!(out, "sim: spins={} seed={}", spins, seed)?;

    let mut tokens = vec!["start".to_string()];
    tokens.extend(std::iter::repeat_n("flow".to_string(), spins as usize));
    let mut source = ScriptSource::new(tokens);

    loop {
        match game.run_step(&mut source, &mut observer) {
            Ok(StepOutcome::Terminated) => break,
            Ok(StepOutcome::Continue) => {}
            Err(GameError::Uninitialized) => {
                ui::display_warning(err, "balls exhausted before all spins completed")?;
                break;
            }
            Err(e) => return Err(e.into()),
        }
        // each step's spin resolves instantly in batch mode
        game.set_spinning(false);
    }

    let final_state = *game.state();
    if final_state.is_active() {
        game.execute(Command::FinishGame, &mut observer)?;
    }
    if let Some(e) = observer.write_failure.take() {
        return Err(CliError::Io(e));
    }

    writeln!(out, "Balls launched: {}", spins)?;
    writeln!(out, "Spins: {}", observer.spins)?;
    writeln!(out, "Wins: {}", observer.wins)?;
    writeln!(out, "Rush entries: {}", observer.rush_entries)?;
    writeln!(out, "Continuations won: {}", observer.continuations_won)?;
    writeln!(out, "Max streak: {}", observer.max_streak)?;
    if observer.warnings > 0 {
        ui::display_warning(
            err,
            &format!("{} rush-continue draw(s) skipped", observer.warnings),
        )?;
    }
    writeln!(out, "Final state: {}", format_state(&final_state))?;
    if let Some(path) = output {
        writeln!(out, "Records written to {}", path)?;
    }
    Ok(())
}
