//! Four-in-a-row and draw detection.

use serde::Serialize;

use super::{Board, Cell, Player, COLS, ROWS};

/// Number of aligned pieces needed to win.
pub const CONNECT: usize = 4;

/// Line directions as (row step, column step), checked in this order:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step `distance` cells along `(dr, dc)`, or `None` when that leaves the board.
    fn offset(self, dr: isize, dc: isize, distance: isize) -> Option<Position> {
        let row = self.row as isize + dr * distance;
        let col = self.col as isize + dc * distance;
        if (0..ROWS as isize).contains(&row) && (0..COLS as isize).contains(&col) {
            Some(Position::new(row as usize, col as usize))
        } else {
            None
        }
    }
}

/// Outcome of a win check: the winning line, if any, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinResult {
    line: Option<[Position; CONNECT]>,
}

impl WinResult {
    pub fn won(&self) -> bool {
        self.line.is_some()
    }

    /// The four winning cells in board order, or an empty slice.
    pub fn cells(&self) -> &[Position] {
        match &self.line {
            Some(line) => line.as_slice(),
            None => &[],
        }
    }

    pub fn line(&self) -> Option<[Position; CONNECT]> {
        self.line
    }
}

/// Count consecutive `cell`s walking away from `origin` (at most `CONNECT - 1`).
fn run_length(board: &Board, origin: Position, dr: isize, dc: isize, cell: Cell) -> usize {
    (1..CONNECT as isize)
        .map_while(|i| origin.offset(dr, dc, i))
        .take_while(|pos| board.get(pos.row, pos.col) == cell)
        .count()
}

/// Check whether `player`, having just dropped a piece at `(row, col)`, has
/// completed a line through that cell.
///
/// The reported cells start at the end of the run nearest the top-left
/// (negative direction) and follow the line. Directions are tried in
/// [`DIRECTIONS`] order and the first winning one is returned.
///
/// # Panics
///
/// Panics if `(row, col)` is outside the board.
pub fn check_win(board: &Board, row: usize, col: usize, player: Player) -> WinResult {
    assert!(
        row < ROWS && col < COLS,
        "win check at ({row}, {col}) is outside the {ROWS}x{COLS} board"
    );

    let origin = Position::new(row, col);
    let cell = player.to_cell();

    for (dr, dc) in DIRECTIONS {
        let forward = run_length(board, origin, dr, dc, cell);
        let backward = run_length(board, origin, -dr, -dc, cell);

        if backward + 1 + forward >= CONNECT {
            let start = (row as isize - dr * backward as isize, col as isize - dc * backward as isize);
            let line = std::array::from_fn(|i| {
                let i = i as isize;
                Position::new((start.0 + dr * i) as usize, (start.1 + dc * i) as usize)
            });
            return WinResult { line: Some(line) };
        }
    }

    WinResult::default()
}

/// True when every cell of the top row is occupied, i.e. the board is full.
pub fn is_draw(board: &Board) -> bool {
    (0..COLS).all(|col| board.get(0, col) != Cell::Empty)
}

/// Scan every occupied cell in row-major order, treating it as the last move
/// of its owner. Returns the first completed line found.
pub fn find_winner(board: &Board) -> Option<(Player, WinResult)> {
    for row in 0..ROWS {
        for col in 0..COLS {
            if let Some(player) = board.get(row, col).player() {
                let result = check_win(board, row, col, player);
                if result.won() {
                    return Some((player, result));
                }
            }
        }
    }
    None
}
