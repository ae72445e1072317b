//! Type definitions shared by the grid model, the pathfinder and the terminal front-end.

use std::fmt;

/// Location of a cell in the grid.
///
/// Rows grow downwards and columns grow to the right, both starting at zero in the top-left
/// corner of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Row index of the cell.
    pub row: usize,
    /// Column index of the cell.
    pub col: usize,
}

impl Position {
    /// Builds a position from a row and a column index.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// Logical state of a single cell.
///
/// This enumeration is the only source of truth for what a cell is. Colours are derived from it at
/// render time and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Walkable cell that nothing has touched yet.
    #[default]
    Empty,
    /// Impassable wall cell.
    Barrier,
    /// Cell the search starts from.
    Start,
    /// Cell the search is looking for.
    End,
    /// Cell that has been discovered and is waiting in the frontier.
    Open,
    /// Cell that has been expanded by the search.
    Closed,
    /// Cell that lies on the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Every state, in drawing order.
    pub const ALL: [Self; 7] = [
        Self::Empty,
        Self::Barrier,
        Self::Start,
        Self::End,
        Self::Open,
        Self::Closed,
        Self::Path,
    ];

    /// Returns `true` for the transient states the search leaves behind.
    #[must_use]
    pub const fn is_trace(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}

/// Discrete key commands understood by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Run the pathfinder between the designated endpoints.
    Search,
    /// Throw the grid away and carve a new maze.
    Regenerate,
    /// Leave the application.
    Quit,
}

/// Message shown in the status strip under the grid.
///
/// This enumeration records what the session did last so the renderer can tell the user about it
/// without the renderer knowing anything about the search itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// Nothing has happened since the maze was generated.
    Idle,
    /// A search is being animated.
    Searching,
    /// The last search reached the end cell.
    Found {
        /// Number of steps on the shortest path.
        length: usize,
        /// Number of cells expanded before the end was reached.
        expanded: usize,
    },
    /// The last search exhausted the frontier without reaching the end cell.
    Unreachable {
        /// Number of cells expanded before giving up.
        expanded: usize,
    },
    /// The last search was cut short by a quit request.
    Interrupted,
    /// A search was requested without both endpoints in place.
    MissingEndpoints,
}

impl Status {
    /// Returns the human-readable text for the status strip.
    pub(crate) fn message(self) -> String {
        match self {
            Self::Idle => "place an end cell, then press space".to_owned(),
            Self::Searching => "searching...".to_owned(),
            Self::Found { length, expanded } => {
                format!("path found: {length} steps, {expanded} cells expanded")
            }
            Self::Unreachable { expanded } => {
                format!("no path: end is unreachable, {expanded} cells expanded")
            }
            Self::Interrupted => "search interrupted".to_owned(),
            Self::MissingEndpoints => "a start and an end cell are required".to_owned(),
        }
    }
}
