//! Depth-limited minimax with alpha-beta pruning.
//!
//! The search scores each root column independently with a full window and
//! keeps the first column with the strictly highest score. Nodes are scored
//! from a fixed perspective player: the maximizing plies are that player's
//! moves, the minimizing plies are the opponent's.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::agent::Agent;
use super::evaluate::{Heuristic, WindowHeuristic, WIN_SCORE};
use crate::game::{check_win, find_winner, is_draw, Board, Player, Position, COLS};

/// Plies searched by default, counting the root move.
pub const DEFAULT_DEPTH: usize = 5;

/// How a node decides whether the game is already won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalCheck {
    /// Rescan every occupied cell of the board at every node.
    #[default]
    FullScan,
    /// Only check the cell placed by the move that led to the node.
    ///
    /// Falls back to [`TerminalCheck::FullScan`] when the root board already
    /// holds a completed line, so both strategies pick the same columns.
    LastMove,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, root children included.
    pub nodes: u64,
    /// Times a node stopped iterating columns because `beta <= alpha`.
    pub cutoffs: u64,
}

/// Everything a root search found out about a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub player: Player,
    pub depth: usize,
    /// Chosen column, `None` when the board is full.
    pub column: Option<usize>,
    /// Score of the chosen column; `None` when the column came from the
    /// random fallback or there was nothing to choose.
    pub score: Option<i32>,
    /// Score of each root column; `None` for full columns.
    pub scores: [Option<i32>; COLS],
    pub stats: SearchStats,
}

/// One search over a game tree, with its evaluator and counters.
pub struct Search<'h> {
    heuristic: &'h dyn Heuristic,
    terminal_check: TerminalCheck,
    stats: SearchStats,
}

impl<'h> Search<'h> {
    pub fn new(heuristic: &'h dyn Heuristic, terminal_check: TerminalCheck) -> Self {
        Search {
            heuristic,
            terminal_check,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Score every legal root column for `player`.
    ///
    /// Each column is searched with its own `(-inf, +inf)` window, so the
    /// scores are exact minimax values at `depth` and not just bounds.
    /// A depth of 0 is treated as 1.
    pub fn root_scores(&mut self, board: &Board, player: Player, depth: usize) -> [Option<i32>; COLS] {
        if self.terminal_check == TerminalCheck::LastMove && find_winner(board).is_some() {
            self.terminal_check = TerminalCheck::FullScan;
        }

        let child_depth = depth.max(1) - 1;
        let mut scores = [None; COLS];
        for (col, slot) in scores.iter_mut().enumerate() {
            let Ok((next, row)) = board.apply_move(col, player) else {
                continue;
            };
            let last = (Position::new(row, col), player);
            let score = self.node(&next, child_depth, i32::MIN, i32::MAX, false, player, Some(last));
            trace!(col, score, "root column");
            *slot = Some(score);
        }
        scores
    }

    /// Minimax value of `board` from `perspective`'s point of view.
    ///
    /// `maximizing` tells whose move it is at `board`: `perspective` when
    /// true, the opponent otherwise. The terminal check always rescans the
    /// whole board since no last move is known.
    pub fn value(
        &mut self,
        board: &Board,
        depth: usize,
        alpha: i32,
        beta: i32,
        maximizing: bool,
        perspective: Player,
    ) -> i32 {
        self.node(board, depth, alpha, beta, maximizing, perspective, None)
    }

    #[allow(clippy::too_many_arguments)]
    fn node(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        perspective: Player,
        last: Option<(Position, Player)>,
    ) -> i32 {
        self.stats.nodes += 1;

        if let Some(winner) = self.winner(board, last) {
            return if winner == perspective {
                WIN_SCORE
            } else {
                -WIN_SCORE
            };
        }

        if is_draw(board) || depth == 0 {
            return self.heuristic.evaluate(board, perspective);
        }

        let mover = if maximizing {
            perspective
        } else {
            perspective.other()
        };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for col in 0..COLS {
            let Ok((next, row)) = board.apply_move(col, mover) else {
                continue;
            };
            let score = self.node(
                &next,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                perspective,
                Some((Position::new(row, col), mover)),
            );

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    fn winner(&self, board: &Board, last: Option<(Position, Player)>) -> Option<Player> {
        match (self.terminal_check, last) {
            (TerminalCheck::LastMove, Some((pos, player))) => {
                check_win(board, pos.row, pos.col, player)
                    .won()
                    .then_some(player)
            }
            _ => find_winner(board).map(|(player, _)| player),
        }
    }
}

/// First column holding the strictly greatest score.
fn best_column(scores: &[Option<i32>; COLS]) -> Option<(usize, i32)> {
    let mut best: Option<(usize, i32)> = None;
    for (col, score) in scores.iter().enumerate() {
        if let Some(score) = *score {
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((col, score));
            }
        }
    }
    best
}

/// Uniformly random legal column. Only reached when no root column was
/// scored, which means the board is full and there is nothing to pick.
fn random_fallback(board: &Board) -> Option<usize> {
    let legal = board.legal_columns();
    warn!(?legal, "search produced no candidate, picking a random column");
    legal.choose(&mut rand::rng()).copied()
}

fn report(
    board: &Board,
    player: Player,
    depth: usize,
    heuristic: &dyn Heuristic,
    terminal_check: TerminalCheck,
) -> SearchReport {
    let mut search = Search::new(heuristic, terminal_check);
    let scores = search.root_scores(board, player, depth);
    let (column, score) = match best_column(&scores) {
        Some((col, score)) => (Some(col), Some(score)),
        None => (random_fallback(board), None),
    };

    debug!(
        player = player.name(),
        depth,
        ?column,
        ?score,
        nodes = search.stats().nodes,
        "search complete"
    );

    SearchReport {
        player,
        depth,
        column,
        score,
        scores,
        stats: search.stats(),
    }
}

/// Minimax value of `board` for `perspective` with the default evaluator.
pub fn search(
    board: &Board,
    depth: usize,
    alpha: i32,
    beta: i32,
    maximizing: bool,
    perspective: Player,
) -> i32 {
    Search::new(&WindowHeuristic, TerminalCheck::FullScan).value(
        board,
        depth,
        alpha,
        beta,
        maximizing,
        perspective,
    )
}

/// Per-column root scores for `player` with the default evaluator.
pub fn root_scores(board: &Board, player: Player, depth: usize) -> [Option<i32>; COLS] {
    Search::new(&WindowHeuristic, TerminalCheck::FullScan).root_scores(board, player, depth)
}

/// Pick a column for `player`, searching `depth` plies including the root
/// move. Returns `None` when every column is full.
pub fn choose_move(board: &Board, player: Player, depth: usize) -> Option<usize> {
    report(board, player, depth, &WindowHeuristic, TerminalCheck::FullScan).column
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    terminal_check: TerminalCheck,
    last_report: Option<SearchReport>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth,
            heuristic: Box::new(WindowHeuristic),
            terminal_check: TerminalCheck::default(),
            last_report: None,
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            heuristic,
            ..Self::new(depth)
        }
    }

    pub fn with_terminal_check(mut self, terminal_check: TerminalCheck) -> Self {
        self.terminal_check = terminal_check;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Search `board` for `player` and return the full report.
    pub fn analyze(&mut self, board: &Board, player: Player) -> SearchReport {
        let report = report(
            board,
            player,
            self.depth,
            self.heuristic.as_ref(),
            self.terminal_check,
        );
        self.last_report = Some(report.clone());
        report
    }

    /// Report of the most recent search, if any.
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize> {
        self.analyze(board, player).column
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
