//! # Connect Four
//!
//! Game engine for Connect Four (7 columns by 6 rows, pieces drop to the
//! lowest open row, four in a row wins) with a minimax / alpha-beta computer
//! opponent.
//!
//! The engine is stateless: every call takes a [`game::Board`] value and
//! returns a new value or a score. [`game::GameSession`] is the explicit
//! turn-controller state that callers own between calls.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, move application, win/draw detection, session
//! - [`ai`] — Agent trait, static evaluator, minimax search, random agent
//! - [`arena`] — Headless agent-vs-agent games and series
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
