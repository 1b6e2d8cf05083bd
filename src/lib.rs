//! Draughts-Rust: a rules engine for English draughts (checkers).
//!
//! This crate holds the authoritative board and turn state of a game on an
//! 8x8 board and answers what may move, where it may go, and what happens
//! when it does: mandatory captures, chained jumps and crowning.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and CLI defaults
//! - [`board`] - Colors, pieces, squares and the board itself
//! - [`rules`] - Pure legality queries (captures, destinations)
//! - [`engine`] - The game session: selection, moves, turn order
//! - [`error`] - Rejection reasons
//! - [`protocol`] - Text command loop for driving the engine
//! - [`playout`] - Random legal play
//!
//! ## Example
//!
//! ```
//! use draughts_rust::board::{Color, Square};
//! use draughts_rust::engine::Engine;
//!
//! let mut engine = Engine::new();
//! let from = Square::new(5, 2).unwrap();
//! let to = Square::new(4, 3).unwrap();
//!
//! engine.select(from).unwrap();
//! engine.apply_move(to).unwrap();
//! assert_eq!(engine.current_player(), Color::Black);
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod error;
pub mod playout;
pub mod protocol;
pub mod rules;
