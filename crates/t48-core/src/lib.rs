//! Board engine, game controller and configuration for tile2048.
//!
//! This crate holds every piece of game logic. Rendering and terminal
//! I/O live in `t48-render` and `t48-app` and only read state from here.

pub mod board;
pub mod config;
pub mod direction;
pub mod error;
pub mod game;
pub mod random;
pub mod traits;

pub use board::{Board, PushOutcome};
pub use config::GameConfig;
pub use direction::{Direction, Sweep};
pub use error::CoreError;
pub use game::Game;
pub use random::RandomMoves;
pub use traits::DirectionSource;
