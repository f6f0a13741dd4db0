use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::command::Command;
use crate::config::{Config, ConfigError};
use crate::errors::GameError;
use crate::lottery::{Lottery, LotteryResult};
use crate::slot::{SlotOutput, SlotProducer};
use crate::state::{self, GameState};

/// Supplies the next raw command token. Returning `None` means the input
/// is exhausted and the command loop should terminate.
pub trait CommandSource {
    fn next_token(&mut self) -> Option<String>;
}

/// Receives named notifications for every observable game moment.
/// All methods default to no-ops so adapters implement only what they show.
pub trait GameObserver {
    /// A session opened with this initial state.
    fn start_game(&mut self, _state: &GameState) {}
    /// A session closed; `state` is the final state before reset.
    fn finish_game(&mut self, _state: &GameState) {}
    /// A normal-mode lottery resolved.
    fn lottery_normal(&mut self, _result: &LotteryResult, _reel: &SlotOutput) {}
    /// A rush-mode lottery resolved.
    fn lottery_rush(&mut self, _result: &LotteryResult, _reel: &SlotOutput) {}
    /// A rush-continuation lottery resolved.
    fn lottery_rush_continue(&mut self, _result: &LotteryResult, _reel: &SlotOutput) {}
    /// A command finished executing, moving the state from `before` to
    /// `after`. `before` is `None` only for the first notification of a
    /// fresh session.
    fn transition(&mut self, _before: Option<&GameState>, _after: &GameState) {}
    /// A rush-continuation draw was skipped because the configured decay
    /// function pushed the win probability above 1.0. Non-fatal.
    fn probability_warning(&mut self, _error: &GameError) {}
}

/// Scripted command source over a fixed token list.
pub struct ScriptSource {
    tokens: std::collections::VecDeque<String>,
}

impl ScriptSource {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommandSource for ScriptSource {
    fn next_token(&mut self) -> Option<String> {
        self.tokens.pop_front()
    }
}

/// Outcome of one `run_step` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StepOutcome {
    /// Keep pulling commands
    Continue,
    /// The loop is done (quit sentinel or input exhausted)
    Terminated,
}

/// Orchestrates a play session: owns the single game state, drives the
/// command loop, invokes the lottery and the slot producer, and emits
/// notifications to the observer.
#[derive(Debug)]
pub struct Game {
    config: Config,
    state: GameState,
    lottery: Lottery,
    producer: SlotProducer,
    /// Start-hole draws for launch-flow command production
    rng: ChaCha20Rng,
    /// Reentrancy guard: set when a spin starts, cleared only by the
    /// presentation layer once its animation completes
    spinning: bool,
    /// Last state handed to `transition`; `None` between sessions
    last_state: Option<GameState>,
}

impl Game {
    /// Build a game from a validated config and a base seed. The lottery,
    /// the producer, and command production each get their own ChaCha20
    /// stream derived from the seed.
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::Uninitialized,
            lottery: Lottery::new_with_seed(config.probability, seed),
            producer: SlotProducer::new_with_seed(seed.wrapping_add(1)),
            rng: ChaCha20Rng::seed_from_u64(seed.wrapping_add(2)),
            spinning: false,
            last_state: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Clearing the guard is the caller's job: the core has no notion of
    /// animation duration.
    pub fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }

    /// Pull and execute one command. Blank tokens are no-ops; `q`/`quit`
    /// (or exhausted input) terminates the loop; `finish` ends only the
    /// session. Unrecognized tokens fail fast.
    pub fn run_step(
        &mut self,
        source: &mut dyn CommandSource,
        observer: &mut dyn GameObserver,
    ) -> Result<StepOutcome, GameError> {
        let Some(raw) = source.next_token() else {
            return Ok(StepOutcome::Terminated);
        };
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            return Ok(StepOutcome::Continue);
        }
        if token == "q" || token == "quit" {
            return Ok(StepOutcome::Terminated);
        }
        let command = self.normalize(&token)?;
        self.execute(command, observer)?;
        Ok(StepOutcome::Continue)
    }

    /// Repeatedly execute commands until the loop terminates.
    pub fn run(
        &mut self,
        source: &mut dyn CommandSource,
        observer: &mut dyn GameObserver,
    ) -> Result<(), GameError> {
        loop {
            if self.run_step(source, observer)? == StepOutcome::Terminated {
                return Ok(());
            }
        }
    }

    /// Map an input mnemonic to a command. The launch-flow start-hole
    /// decision is drawn here, once per produced command.
    fn normalize(&mut self, token: &str) -> Result<Command, GameError> {
        match token {
            "start" | "start-game" => Ok(Command::StartGame),
            "launch" | "launch-ball" => Ok(Command::LaunchBall),
            "lottery" | "cause-lottery" => Ok(Command::CauseLottery),
            "flow" | "launch-flow" => {
                let triggers_lottery =
                    self.rng.random::<f64>() < self.config.start_hole_probability;
                Ok(Command::LaunchBallFlow { triggers_lottery })
            }
            "finish" | "finish-game" => Ok(Command::FinishGame),
            other => Err(GameError::UnknownCommand(other.to_string())),
        }
    }

    /// Execute one command against the state machine and notify the
    /// observer. Every command except `FinishGame` ends with a
    /// `transition` notification.
    pub fn execute(
        &mut self,
        command: Command,
        observer: &mut dyn GameObserver,
    ) -> Result<(), GameError> {
        match command {
            Command::StartGame => {
                self.state = state::init(&self.state, &self.config.balls)?;
                observer.start_game(&self.state);
            }
            Command::LaunchBall => self.launch_ball()?,
            Command::CauseLottery => self.cause_lottery(observer)?,
            Command::LaunchBallFlow { triggers_lottery } => {
                self.launch_ball()?;
                // the launch may have ended the session or drained the
                // rush pool; only a still-active session can spin
                if triggers_lottery && self.state.is_active() {
                    self.cause_lottery(observer)?;
                }
            }
            Command::FinishGame => {
                if !self.state.is_active() {
                    return Err(GameError::Uninitialized);
                }
                observer.finish_game(&self.state);
                self.state = GameState::Uninitialized;
                self.last_state = None;
                return Ok(());
            }
        }
        let after = self.state;
        observer.transition(self.last_state.as_ref(), &after);
        // a state back at Uninitialized means the session ended by ball
        // exhaustion; the next session starts a fresh notification chain
        self.last_state = after.is_active().then_some(after);
        Ok(())
    }

    fn launch_ball(&mut self) -> Result<(), GameError> {
        if self.spinning {
            return Err(GameError::SpinInProgress);
        }
        self.state = state::launch_ball(&self.state)?;
        Ok(())
    }

    fn cause_lottery(&mut self, observer: &mut dyn GameObserver) -> Result<(), GameError> {
        if !self.state.is_active() {
            return Err(GameError::Uninitialized);
        }
        self.spinning = true;
        let in_rush = matches!(self.state, GameState::Rush { .. });
        let result = if in_rush {
            self.lottery.draw_rush()
        } else {
            self.lottery.draw_normal()
        };
        let reel = self.producer.produce(&result);
        if in_rush {
            observer.lottery_rush(&result, &reel);
        } else {
            observer.lottery_normal(&result, &reel);
        }
        if !result.is_win() {
            return Ok(());
        }
        if let GameState::Rush { streak, .. } = self.state {
            match self.lottery.draw_rush_continue(streak) {
                Err(error) => {
                    // misconfigured decay function; skip the draw and
                    // leave the state untouched
                    observer.probability_warning(&error);
                }
                Ok(continue_result) => {
                    let reel = self.producer.produce(&continue_result);
                    observer.lottery_rush_continue(&continue_result, &reel);
                    if continue_result.is_win() {
                        self.state = state::trigger_rush(&self.state, &self.config.balls)?;
                    } else {
                        self.state = state::increment_balls(&self.state, &self.config.balls)?;
                    }
                }
            }
        } else {
            self.state = state::trigger_rush(&self.state, &self.config.balls)?;
        }
        Ok(())
    }
}
