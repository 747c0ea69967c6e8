//! Core Connect Four game logic: board representation, player types, win
//! detection, and the session object a turn controller drives.

mod board;
mod player;
mod session;
pub mod win;

pub use board::{Board, Cell, COLS, ROWS};
pub use player::Player;
pub use session::{GameMode, GameOutcome, GameSession, Placement, AI_PLAYER};
pub use win::{check_win, find_winner, is_draw, Position, WinResult};
