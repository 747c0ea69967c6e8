//! Headless agent-vs-agent games, used for strength checks and by the
//! `arena` command.

use serde::Serialize;
use tracing::debug;

use crate::ai::Agent;
use crate::error::SessionError;
use crate::game::{GameMode, GameOutcome, GameSession, Player, Position};

/// A finished game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    /// Columns played, Red first.
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
    pub winning_cells: Vec<Position>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Results of a series, from the first agent's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeriesTally {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl SeriesTally {
    pub fn total_games(&self) -> u64 {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        match self.total_games() {
            0 => 0.0,
            total => self.wins as f64 / total as f64,
        }
    }
}

/// Play one game to completion, `red` moving first.
///
/// Agent answers go through the same session path as human moves, so an
/// agent that picks a full column surfaces as [`SessionError::Move`].
pub fn play_game(red: &mut dyn Agent, yellow: &mut dyn Agent) -> Result<GameRecord, SessionError> {
    let mut session = GameSession::with_mode(GameMode::Friend);
    let mut moves = Vec::new();

    while !session.is_terminal() {
        let player = session.current_player();
        let agent: &mut dyn Agent = match player {
            Player::Red => &mut *red,
            Player::Yellow => &mut *yellow,
        };
        let column = agent
            .select_column(session.board(), player)
            .ok_or(SessionError::NoLegalMove)?;
        session.make_move(column)?;
        moves.push(column);
    }

    let outcome = session.outcome().ok_or(SessionError::GameOver)?;
    Ok(GameRecord {
        moves,
        outcome,
        winning_cells: session.winning_cells().to_vec(),
    })
}

/// Play `games` games between `first` and `second`, swapping colours every
/// game (`first` is Red in even-numbered games).
pub fn play_series(
    first: &mut dyn Agent,
    second: &mut dyn Agent,
    games: usize,
) -> Result<SeriesTally, SessionError> {
    let mut tally = SeriesTally::default();

    for game_idx in 0..games {
        let first_color = if game_idx % 2 == 0 {
            Player::Red
        } else {
            Player::Yellow
        };
        let record = match first_color {
            Player::Red => play_game(first, second)?,
            Player::Yellow => play_game(second, first)?,
        };

        match record.winner() {
            Some(winner) if winner == first_color => tally.wins += 1,
            Some(_) => tally.losses += 1,
            None => tally.draws += 1,
        }
        debug!(game_idx, winner = ?record.winner(), moves = record.moves.len(), "game finished");
    }

    Ok(tally)
}
