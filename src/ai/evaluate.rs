//! Static position evaluation.

use crate::game::win::{Position, CONNECT, DIRECTIONS};
use crate::game::{Board, Player, COLS, ROWS};

/// Score of a completed line. Also the terminal score used by the search.
pub const WIN_SCORE: i32 = 10_000;
const THREE_SCORE: i32 = 100;
const TWO_SCORE: i32 = 10;

/// Trait for evaluating a board position from a player's perspective.
/// Higher is better for `player`.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Default heuristic: scores every 4-cell window on the board by how many
/// pieces each side has in it.
///
/// Windows holding pieces of both players are dead and score nothing. There
/// is no positional bonus (centre columns weigh the same as edges).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        match (own, opp, empty) {
            (4, _, _) => WIN_SCORE,
            (3, _, 1) => THREE_SCORE,
            (2, _, 2) => TWO_SCORE,
            (_, 4, _) => -WIN_SCORE,
            (_, 3, 1) => -THREE_SCORE,
            (_, 2, 2) => -TWO_SCORE,
            _ => 0,
        }
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score = 0;

        for (dr, dc) in DIRECTIONS {
            for row in 0..ROWS {
                for col in 0..COLS {
                    let Some(window) = window_at(Position::new(row, col), dr, dc) else {
                        continue;
                    };

                    let (mut own, mut opp, mut empty) = (0, 0, 0);
                    for pos in window {
                        match board.get(pos.row, pos.col) {
                            c if c == own_cell => own += 1,
                            c if c == opp_cell => opp += 1,
                            _ => empty += 1,
                        }
                    }
                    score += Self::score_window(own, opp, empty);
                }
            }
        }

        score
    }
}

/// The 4-cell window starting at `start` along `(dr, dc)`, if it fits on the board.
fn window_at(start: Position, dr: isize, dc: isize) -> Option<[Position; CONNECT]> {
    let end_row = start.row as isize + dr * (CONNECT as isize - 1);
    let end_col = start.col as isize + dc * (CONNECT as isize - 1);
    if !(0..ROWS as isize).contains(&end_row) || !(0..COLS as isize).contains(&end_col) {
        return None;
    }
    Some(std::array::from_fn(|i| {
        let i = i as isize;
        Position::new(
            (start.row as isize + dr * i) as usize,
            (start.col as isize + dc * i) as usize,
        )
    }))
}

/// Evaluate `board` for `player` with the default [`WindowHeuristic`].
pub fn evaluate(board: &Board, player: Player) -> i32 {
    WindowHeuristic.evaluate(board, player)
}
