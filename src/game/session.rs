use tracing::debug;

use super::{check_win, is_draw, Board, Player, Position, WinResult};
use crate::ai::Agent;
use crate::error::SessionError;

/// The side the computer plays in [`GameMode::Robot`].
pub const AI_PLAYER: Player = Player::Yellow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Two humans sharing the board.
    Friend,
    /// Human plays Red against the computer as Yellow.
    Robot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Where a piece landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
}

/// Authoritative game state owned by a turn controller.
///
/// The engine functions are stateless; this is the one place that remembers
/// whose turn it is, how the game ended, and which cells to highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    mode: Option<GameMode>,
    outcome: Option<GameOutcome>,
    win: WinResult,
    last_placed: Option<Position>,
}

impl GameSession {
    /// A fresh session with no mode selected. Moves are rejected until
    /// [`GameSession::set_mode`] is called.
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            mode: None,
            outcome: None,
            win: WinResult::default(),
            last_placed: None,
        }
    }

    pub fn with_mode(mode: GameMode) -> Self {
        let mut session = Self::new();
        session.set_mode(mode);
        session
    }

    /// Select a mode and start a new game.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = Some(mode);
        self.reset();
    }

    /// Clear the board and hand the first move back to Red. The mode is kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::Red;
        self.outcome = None;
        self.win = WinResult::default();
        self.last_placed = None;
        debug!(mode = ?self.mode, "new game");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Cells of the winning line, empty unless the game was won.
    pub fn winning_cells(&self) -> &[Position] {
        self.win.cells()
    }

    pub fn last_placed(&self) -> Option<Position> {
        self.last_placed
    }

    /// Columns the side to move may play; empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// True when the computer should move next.
    pub fn is_ai_turn(&self) -> bool {
        self.mode == Some(GameMode::Robot) && !self.is_terminal() && self.current_player == AI_PLAYER
    }

    /// Play a human move for the side to move.
    pub fn make_move(&mut self, column: usize) -> Result<Placement, SessionError> {
        let mode = self.mode.ok_or(SessionError::NoMode)?;
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if mode == GameMode::Robot && self.current_player == AI_PLAYER {
            return Err(SessionError::NotHumanTurn);
        }
        self.place(column)
    }

    /// Ask `agent` for the computer's move and play it.
    pub fn make_ai_move(&mut self, agent: &mut dyn Agent) -> Result<Placement, SessionError> {
        if self.is_terminal() {
            return Err(SessionError::GameOver);
        }
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn);
        }
        let column = agent
            .select_column(&self.board, AI_PLAYER)
            .ok_or(SessionError::NoLegalMove)?;
        debug!(agent = agent.name(), column, "computer move");
        self.place(column)
    }

    fn place(&mut self, column: usize) -> Result<Placement, SessionError> {
        let player = self.current_player;
        let (board, row) = self.board.apply_move(column, player)?;

        let win = check_win(&board, row, column, player);
        self.outcome = if win.won() {
            Some(GameOutcome::Winner(player))
        } else if is_draw(&board) {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        self.board = board;
        self.win = win;
        self.last_placed = Some(Position::new(row, column));

        match self.outcome {
            Some(outcome) => debug!(?outcome, row, column, "game over"),
            None => self.current_player = player.other(),
        }

        Ok(Placement {
            row,
            column,
            player,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MinimaxAgent;
    use crate::error::MoveError;
    use crate::game::{Cell, COLS, ROWS};

    /// Agent that always answers the same column.
    struct FixedAgent(Option<usize>);

    impl Agent for FixedAgent {
        fn select_column(&mut self, _board: &Board, _player: Player) -> Option<usize> {
            self.0
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new();
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(session.mode(), None);
        assert!(!session.is_terminal());
        assert_eq!(session.legal_columns().len(), COLS);
    }

    #[test]
    fn test_moves_rejected_without_mode() {
        let mut session = GameSession::new();
        assert_eq!(session.make_move(3), Err(SessionError::NoMode));
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_apply_move() {
        let mut session = GameSession::with_mode(GameMode::Friend);
        let placement = session.make_move(3).unwrap();

        assert_eq!(
            placement,
            Placement {
                row: 5,
                column: 3,
                player: Player::Red
            }
        );
        assert_eq!(session.current_player(), Player::Yellow);
        assert_eq!(session.board().get(5, 3), Cell::Red);
        assert_eq!(session.last_placed(), Some(Position::new(5, 3)));
    }

    #[test]
    fn test_full_column_keeps_turn() {
        let mut session = GameSession::with_mode(GameMode::Friend);
        for _ in 0..ROWS {
            session.make_move(0).unwrap();
        }
        let before = session.current_player();
        assert_eq!(
            session.make_move(0),
            Err(SessionError::Move(MoveError::ColumnFull { column: 0 }))
        );
        assert_eq!(session.current_player(), before);
    }

    #[test]
    fn test_win_detection() {
        let mut session = GameSession::with_mode(GameMode::Friend);

        // Red wins with horizontal line
        for col in 0..4 {
            session.make_move(col).unwrap(); // Red
            if col < 3 {
                session.make_move(col).unwrap(); // Yellow (different row)
            }
        }

        assert!(session.is_terminal());
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::Red)));
        // Winner keeps the turn marker
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(
            session.winning_cells(),
            &[
                Position::new(5, 0),
                Position::new(5, 1),
                Position::new(5, 2),
                Position::new(5, 3),
            ]
        );
        assert!(session.legal_columns().is_empty());
        assert_eq!(session.make_move(4), Err(SessionError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut session = GameSession::with_mode(GameMode::Friend);

        // Column order that fills the board without any four-in-a-row
        let pattern = [
            0, 1, 0, 1, 0, 1, 2, 3, 2, 3, 2, 3, 4, 5, 4, 5, 4, 5, 6, 0, 1, 0, 1, 0, 1, 2, 3, 2,
            3, 2, 3, 4, 5, 4, 5, 4, 5, 6, 6, 6, 6, 6,
        ];

        for &col in &pattern {
            session.make_move(col).unwrap();
        }

        assert!(session.board().is_full());
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
        assert!(session.winning_cells().is_empty());
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mut session = GameSession::with_mode(GameMode::Robot);
        session.make_move(2).unwrap();
        session.reset();

        assert_eq!(session.mode(), Some(GameMode::Robot));
        assert_eq!(*session.board(), Board::new());
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(session.last_placed(), None);
    }

    #[test]
    fn test_set_mode_restarts_game() {
        let mut session = GameSession::with_mode(GameMode::Friend);
        session.make_move(2).unwrap();
        session.set_mode(GameMode::Robot);

        assert_eq!(session.mode(), Some(GameMode::Robot));
        assert_eq!(session.board().piece_count(), 0);
    }

    #[test]
    fn test_robot_mode_turn_gating() {
        let mut session = GameSession::with_mode(GameMode::Robot);
        let mut agent = FixedAgent(Some(4));

        assert_eq!(
            session.make_ai_move(&mut agent),
            Err(SessionError::NotAiTurn)
        );
        session.make_move(3).unwrap();
        assert!(session.is_ai_turn());
        assert_eq!(session.make_move(3), Err(SessionError::NotHumanTurn));

        let placement = session.make_ai_move(&mut agent).unwrap();
        assert_eq!(placement.player, Player::Yellow);
        assert_eq!(placement.column, 4);
        assert_eq!(session.current_player(), Player::Red);
    }

    #[test]
    fn test_ai_move_rejected_in_friend_mode() {
        let mut session = GameSession::with_mode(GameMode::Friend);
        session.make_move(0).unwrap();
        let mut agent = FixedAgent(Some(1));
        assert_eq!(
            session.make_ai_move(&mut agent),
            Err(SessionError::NotAiTurn)
        );
    }

    #[test]
    fn test_ai_without_move_is_reported() {
        let mut session = GameSession::with_mode(GameMode::Robot);
        session.make_move(0).unwrap();
        let mut agent = FixedAgent(None);
        assert_eq!(
            session.make_ai_move(&mut agent),
            Err(SessionError::NoLegalMove)
        );
    }

    #[test]
    fn test_minimax_blocks_in_robot_mode() {
        let mut session = GameSession::with_mode(GameMode::Robot);
        let mut scripted = FixedAgent(Some(6));

        // Red builds three on the bottom row while Yellow stacks column 6.
        for col in 0..3 {
            session.make_move(col).unwrap();
            if col < 2 {
                session.make_ai_move(&mut scripted).unwrap();
            }
        }

        let mut agent = MinimaxAgent::new(4);
        let block = session.make_ai_move(&mut agent).unwrap();
        assert_eq!(block.column, 3);
        assert!(!session.is_terminal());
    }
}
