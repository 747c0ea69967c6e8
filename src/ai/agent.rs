use crate::game::{Board, Player};

/// Universal interface for anything that can pick a column.
///
/// Agents are `Send` so a turn controller can run a search on a worker
/// thread and keep its own loop responsive.
pub trait Agent: Send {
    /// Select a column for `player` to drop into, or `None` when the board
    /// has no open column.
    fn select_column(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
