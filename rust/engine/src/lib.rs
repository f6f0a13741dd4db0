//! # pachisim-engine: Pachislot Simulation Core
//!
//! A deterministic-given-randomness pachislot simulator: a player spends
//! balls to spin reels, probabilistic lotteries decide wins and losses, and
//! a win enters a bonus "rush" mode with geometrically decaying continuation
//! odds. All randomness flows through seeded ChaCha20 streams so whole
//! sessions replay byte for byte from a seed.
//!
//! ## Core Modules
//!
//! - [`config`] - Balls economy and per-mode probabilities with batch validation
//! - [`state`] - Session state machine (Uninitialized / Normal / Rush) and pure transitions
//! - [`lottery`] - Win/lose draws with fake-presentation sub-kinds
//! - [`slot`] - Reel symbol production (wins, losses, near misses)
//! - [`command`] - The closed set of player commands
//! - [`game`] - Orchestrator: command loop, collaborator traits, notifications
//! - [`logger`] - Spin record serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pachisim_engine::config::Config;
//! use pachisim_engine::game::{Game, GameObserver, ScriptSource};
//!
//! struct Silent;
//! impl GameObserver for Silent {}
//!
//! let mut game = Game::new(Config::demo(), 42).expect("demo config is valid");
//! let mut source = ScriptSource::new(["start", "launch", "finish", "quit"]);
//! game.run(&mut source, &mut Silent).expect("script is well formed");
//! ```
//!
//! ## Deterministic Sessions
//!
//! The same config and seed produce the same lottery draws and the same
//! reels:
//!
//! ```rust
//! use pachisim_engine::config::Config;
//! use pachisim_engine::game::Game;
//!
//! let game1 = Game::new(Config::demo(), 7).unwrap();
//! let game2 = Game::new(Config::demo(), 7).unwrap();
//! // both games will draw identical outcomes for identical commands
//! ```

pub mod command;
pub mod config;
pub mod errors;
pub mod game;
pub mod logger;
pub mod lottery;
pub mod slot;
pub mod state;
