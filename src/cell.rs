//! Single grid unit with a state tag and a cached list of passable neighbours.

use crate::types::{CellState, Position};

/// One square of the arena.
///
/// A cell knows where it lives, what it currently is and which of its four orthogonal neighbours
/// could be walked into the last time [`Grid::recompute_neighbors`](crate::grid::Grid::recompute_neighbors)
/// ran. The neighbour list is not refreshed when states change; callers recompute it after editing
/// barriers and before every search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Location of the cell in its grid.
    position: Position,
    /// Current logical state.
    state: CellState,
    /// Passable orthogonal neighbours as of the last recomputation.
    neighbors: Vec<Position>,
}

impl Cell {
    /// Creates an empty cell at the given position with no known neighbours.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            state: CellState::Empty,
            neighbors: Vec::new(),
        }
    }

    /// Returns the location of the cell.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the current state of the cell.
    #[must_use]
    pub const fn state(&self) -> CellState {
        self.state
    }

    /// Returns the passable neighbours recorded by the last recomputation.
    #[must_use]
    pub fn neighbors(&self) -> &[Position] {
        &self.neighbors
    }

    /// Replaces the neighbour list.
    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Position>) {
        self.neighbors = neighbors;
    }

    /// Forces the cell back to [`CellState::Empty`].
    pub fn reset(&mut self) {
        self.state = CellState::Empty;
    }

    /// Turns the cell into a wall.
    pub fn mark_barrier(&mut self) {
        self.state = CellState::Barrier;
    }

    /// Turns the cell into the search origin.
    pub fn mark_start(&mut self) {
        self.state = CellState::Start;
    }

    /// Turns the cell into the search target.
    pub fn mark_end(&mut self) {
        self.state = CellState::End;
    }

    /// Flags the cell as queued in the search frontier.
    pub fn mark_open(&mut self) {
        self.state = CellState::Open;
    }

    /// Flags the cell as expanded by the search.
    pub fn mark_closed(&mut self) {
        self.state = CellState::Closed;
    }

    /// Flags the cell as part of the reconstructed path.
    pub fn mark_path(&mut self) {
        self.state = CellState::Path;
    }

    /// Returns `true` if the cell is a wall.
    #[must_use]
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }

    /// Returns `true` if the cell is the search origin.
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }

    /// Returns `true` if the cell is the search target.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }

    /// Returns `true` if the cell has been expanded by the search.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty_without_neighbors() {
        let cell = Cell::new(Position::new(2, 5));

        assert_eq!(cell.position(), Position::new(2, 5), "position is kept");
        assert_eq!(cell.state(), CellState::Empty, "new cells are empty");
        assert!(cell.neighbors().is_empty(), "neighbours are computed lazily");
    }

    #[test]
    fn test_state_transitions() {
        let mut cell = Cell::new(Position::new(0, 0));

        cell.mark_barrier();
        assert!(cell.is_barrier(), "barrier mark sticks");
        cell.mark_start();
        assert!(cell.is_start(), "start mark sticks");
        assert!(!cell.is_barrier(), "marks replace each other");
        cell.mark_end();
        assert!(cell.is_end(), "end mark sticks");
        cell.mark_open();
        assert_eq!(cell.state(), CellState::Open, "open mark sticks");
        cell.mark_closed();
        assert!(cell.is_closed(), "closed mark sticks");
        cell.mark_path();
        assert_eq!(cell.state(), CellState::Path, "path mark sticks");
        cell.reset();
        assert_eq!(cell.state(), CellState::Empty, "reset empties the cell");
    }

    #[test]
    fn test_state_change_keeps_stale_neighbors() {
        let mut cell = Cell::new(Position::new(1, 1));
        cell.set_neighbors(vec![Position::new(0, 1), Position::new(1, 2)]);

        cell.mark_barrier();

        assert_eq!(
            cell.neighbors(),
            &[Position::new(0, 1), Position::new(1, 2)],
            "state changes never touch the neighbour list"
        );
    }
}
