//! Automated opponents: the [`Agent`] seam, the static evaluator, the
//! minimax / alpha-beta search, and a uniform random player.

mod agent;
pub mod evaluate;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use evaluate::{evaluate, Heuristic, WindowHeuristic, WIN_SCORE};
pub use minimax::{
    choose_move, root_scores, search, MinimaxAgent, Search, SearchReport, SearchStats,
    TerminalCheck, DEFAULT_DEPTH,
};
pub use random::RandomAgent;
