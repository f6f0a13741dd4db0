use pachisim_engine::errors::GameError;
use pachisim_engine::config::{Config, SlotProbability};
use pachisim_engine::game::{Game, GameObserver, ScriptSource};
use pachisim_engine::lottery::LotteryResult;
use pachisim_engine::slot::SlotOutput;
use pachisim_engine::state::GameState;

#[derive(Default)]
struct Recorder {
    started: Vec<GameState>,
    finished: Vec<GameState>,
    normal: Vec<(LotteryResult, SlotOutput)>,
    rush: Vec<(LotteryResult, SlotOutput)>,
    rush_continue: Vec<(LotteryResult, SlotOutput)>,
    transitions: Vec<(Option<GameState>, GameState)>,
    warnings: Vec<GameError>,
}

impl GameObserver for Recorder {
    fn start_game(&mut self, state: &GameState) {
        self.started.push(*state);
    }
    fn finish_game(&mut self, state: &GameState) {
        self.finished.push(*state);
    }
    fn lottery_normal(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        self.normal.push((*result, reel.clone()));
    }
    fn lottery_rush(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        self.rush.push((*result, reel.clone()));
    }
    fn lottery_rush_continue(&mut self, result: &LotteryResult, reel: &SlotOutput) {
        self.rush_continue.push((*result, reel.clone()));
    }
    fn transition(&mut self, before: Option<&GameState>, after: &GameState) {
        self.transitions.push((before.copied(), *after));
    }
    fn probability_warning(&mut self, error: &GameError) {
        self.warnings.push(error.clone());
    }
}

fn sure(win: f64) -> SlotProbability {
    SlotProbability {
        win,
        fake_win: 0.0,
        fake_lose: 0.0,
    }
}

fn lose_only_config() -> Config {
    let mut cfg = Config::demo();
    cfg.probability.normal = sure(0.0);
    cfg.probability.rush = sure(0.0);
    cfg.probability.rush_continue = sure(0.0);
    cfg
}

fn win_only_config() -> Config {
    let mut cfg = Config::demo();
    cfg.probability.normal = sure(1.0);
    cfg.probability.rush = sure(1.0);
    cfg.probability.rush_continue = sure(1.0);
    cfg.probability.rush_continue_fn = |_| 1.0;
    cfg
}

#[test]
fn losing_session_spends_balls_and_finishes_at_997() {
    let mut game = Game::new(lose_only_config(), 11).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "launch", "launch", "finish"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert_eq!(recorder.finished, vec![GameState::Normal { balls: 997 }]);
    assert_eq!(recorder.started, vec![GameState::Normal { balls: 1000 }]);
    // start + three launches notify; finish does not
    assert_eq!(recorder.transitions.len(), 4);
    assert_eq!(
        recorder.transitions[0],
        (None, GameState::Normal { balls: 1000 })
    );
    assert_eq!(
        recorder.transitions[3],
        (
            Some(GameState::Normal { balls: 998 }),
            GameState::Normal { balls: 997 }
        )
    );
    assert_eq!(*game.state(), GameState::Uninitialized);
}

#[test]
fn winning_launch_and_lottery_cycle_enters_rush() {
    let mut cfg = win_only_config();
    cfg.probability.rush_continue = sure(0.0);
    let mut game = Game::new(cfg, 12).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert_eq!(
        *game.state(),
        GameState::Rush {
            balls: 1014,
            rush_balls: 300,
            streak: 1,
        }
    );
    assert_eq!(recorder.normal.len(), 1);
    assert!(recorder.normal[0].0.is_win());
}

#[test]
fn rush_win_with_winning_continuation_extends_the_streak() {
    let mut game = Game::new(win_only_config(), 13).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");
    assert!(matches!(game.state(), GameState::Rush { streak: 1, .. }));

    // the presentation layer resolves the spin before the next launch
    game.set_spinning(false);
    let mut source = ScriptSource::new(["launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert_eq!(
        *game.state(),
        GameState::Rush {
            balls: 1029,
            rush_balls: 599,
            streak: 2,
        }
    );
    assert_eq!(recorder.rush.len(), 1);
    assert_eq!(recorder.rush_continue.len(), 1);
    assert!(recorder.rush_continue[0].0.is_win());
}

#[test]
fn losing_continuation_awards_balls_but_stays_in_rush() {
    let mut cfg = win_only_config();
    cfg.probability.rush_continue_fn = |_| 0.0;
    let mut game = Game::new(cfg, 14).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    game.set_spinning(false);
    let mut source = ScriptSource::new(["launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    // rush pool and streak unchanged, only the win award lands
    assert_eq!(
        *game.state(),
        GameState::Rush {
            balls: 1029,
            rush_balls: 299,
            streak: 1,
        }
    );
    assert!(!recorder.rush_continue[0].0.is_win());
}

#[test]
fn misbehaving_decay_function_warns_and_leaves_state_unchanged() {
    let mut cfg = win_only_config();
    cfg.probability.rush_continue = sure(0.8);
    cfg.probability.rush_continue_fn = |_| 2.0;
    let mut game = Game::new(cfg, 15).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "lottery"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    let before = *game.state();
    game.set_spinning(false);
    let mut source = ScriptSource::new(["launch", "lottery"]);
    game.run(&mut source, &mut recorder)
        .expect("overflow is non-fatal");

    assert_eq!(recorder.warnings.len(), 1);
    assert!(matches!(
        recorder.warnings[0],
        GameError::ProbabilityOutOfRange { streak: 1, .. }
    ));
    assert!(recorder.rush_continue.is_empty());
    // only the launched ball was spent
    let GameState::Rush {
        balls, rush_balls, ..
    } = before
    else {
        panic!("expected rush before the draw");
    };
    assert_eq!(
        *game.state(),
        GameState::Rush {
            balls,
            rush_balls: rush_balls - 1,
            streak: 1,
        }
    );
}

#[test]
fn spinning_guard_blocks_launches_until_cleared() {
    let mut game = Game::new(lose_only_config(), 16).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "lottery", "launch"]);
    let err = game.run(&mut source, &mut recorder).expect_err("guard set");
    assert_eq!(err, GameError::SpinInProgress);
    assert!(game.is_spinning());

    game.set_spinning(false);
    let mut source = ScriptSource::new(["launch"]);
    game.run(&mut source, &mut recorder).expect("guard cleared");
    assert_eq!(*game.state(), GameState::Normal { balls: 998 });
}

#[test]
fn launch_flow_with_certain_start_hole_always_spins() {
    let mut cfg = lose_only_config();
    cfg.start_hole_probability = 1.0;
    let mut game = Game::new(cfg, 17).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "flow"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert_eq!(recorder.normal.len(), 1);
    assert_eq!(*game.state(), GameState::Normal { balls: 999 });
}

#[test]
fn launch_flow_with_zero_start_hole_never_spins() {
    let mut cfg = lose_only_config();
    cfg.start_hole_probability = 0.0;
    let mut game = Game::new(cfg, 18).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "flow", "flow", "flow"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert!(recorder.normal.is_empty());
    assert!(!game.is_spinning());
    assert_eq!(*game.state(), GameState::Normal { balls: 997 });
}

#[test]
fn ball_exhaustion_ends_the_session_and_resets_the_notification_chain() {
    let mut cfg = lose_only_config();
    cfg.balls.init_balls = 1;
    let mut game = Game::new(cfg, 19).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "launch", "start"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    assert_eq!(
        recorder.transitions[1],
        (
            Some(GameState::Normal { balls: 1 }),
            GameState::Uninitialized
        )
    );
    // the restart opens a fresh session: before is None again
    assert_eq!(recorder.transitions[2], (None, GameState::Normal { balls: 1 }));
}

#[test]
fn finish_ends_the_session_but_not_the_loop() {
    let mut game = Game::new(lose_only_config(), 20).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "finish", "start", "quit", "launch"]);
    game.run(&mut source, &mut recorder).expect("run ok");

    // the quit sentinel stopped the loop before the trailing launch
    assert_eq!(recorder.started.len(), 2);
    assert_eq!(recorder.finished.len(), 1);
    assert_eq!(*game.state(), GameState::Normal { balls: 1000 });
    // both session opens carry before = None
    assert_eq!(recorder.transitions[0].0, None);
    assert_eq!(recorder.transitions[1].0, None);
}

#[test]
fn blank_tokens_are_no_ops_and_eof_terminates() {
    let mut game = Game::new(lose_only_config(), 21).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["", "  ", "start", ""]);
    game.run(&mut source, &mut recorder).expect("run ok");
    assert_eq!(recorder.started.len(), 1);
}

#[test]
fn unrecognized_tokens_fail_fast() {
    let mut game = Game::new(lose_only_config(), 22).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "jackpot"]);
    let err = game.run(&mut source, &mut recorder).expect_err("must fail");
    assert_eq!(err, GameError::UnknownCommand("jackpot".to_string()));
}

#[test]
fn session_scoped_commands_require_a_started_game() {
    let mut game = Game::new(lose_only_config(), 23).expect("config valid");
    let mut recorder = Recorder::default();

    let mut source = ScriptSource::new(["finish"]);
    assert_eq!(
        game.run(&mut source, &mut recorder),
        Err(GameError::Uninitialized)
    );
    let mut source = ScriptSource::new(["lottery"]);
    assert_eq!(
        game.run(&mut source, &mut recorder),
        Err(GameError::Uninitialized)
    );
    let mut source = ScriptSource::new(["launch"]);
    assert_eq!(
        game.run(&mut source, &mut recorder),
        Err(GameError::Uninitialized)
    );
}

#[test]
fn starting_twice_fails_with_already_started() {
    let mut game = Game::new(lose_only_config(), 24).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["start", "start"]);
    assert_eq!(
        game.run(&mut source, &mut recorder),
        Err(GameError::AlreadyStarted)
    );
}

#[test]
fn mnemonic_long_forms_and_case_are_accepted() {
    let mut game = Game::new(lose_only_config(), 25).expect("config valid");
    let mut recorder = Recorder::default();
    let mut source = ScriptSource::new(["START-GAME", "Launch-Ball", "finish-game"]);
    game.run(&mut source, &mut recorder).expect("run ok");
    assert_eq!(recorder.finished, vec![GameState::Normal { balls: 999 }]);
}
