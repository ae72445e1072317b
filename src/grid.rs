//! Square arena of cells.
//!
//! This module owns the cell matrix, the outer wall ring, the entrance on the bottom wall and the
//! computation of passable neighbours. The interior carving lives in [`maze`](crate::maze).

use color_eyre::eyre::{ensure, Result};
use log::debug;
use rand::Rng;

use crate::{
    cell::Cell,
    maze,
    types::{CellState, Position},
};

/// Smallest side length that still leaves room for a walled arena with an entrance.
pub const MIN_ROWS: usize = 3;

/// Orthogonal offsets visited when collecting neighbours: down, up, right, left.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// `rows` by `rows` matrix of cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Side length of the arena.
    rows: usize,
    /// Cells stored row by row.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid of empty cells with `rows` rows and `rows` columns.
    #[must_use]
    pub fn build(rows: usize) -> Self {
        let cells = (0..rows)
            .map(|row| {
                (0..rows)
                    .map(|col| Cell::new(Position::new(row, col)))
                    .collect()
            })
            .collect();

        Self { rows, cells }
    }

    /// Builds a fresh maze.
    ///
    /// The arena gets its outer wall ring, an entrance on the bottom wall marked as the start cell
    /// and a recursively carved interior. The column of the entrance is returned alongside the
    /// grid.
    ///
    /// # Errors
    ///
    /// This function returns an error if `rows` is smaller than [`MIN_ROWS`].
    pub fn generate<R: Rng>(rows: usize, rng: &mut R) -> Result<(Self, usize)> {
        ensure!(
            rows >= MIN_ROWS,
            "a maze needs at least {MIN_ROWS} rows, got {rows}"
        );

        let mut grid = Self::build(rows);
        grid.apply_outer_walls();
        let entrance = grid.place_entrance(rng)?;
        maze::carve(&mut grid, rng);

        debug!("generated {rows}x{rows} maze with entrance at column {entrance}");

        Ok((grid, entrance))
    }

    /// Returns the side length of the grid.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns `true` if the position lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.rows
    }

    /// Returns the cell at the given position, if any.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position.row)?.get(position.col)
    }

    /// Returns the cell at the given position mutably, if any.
    pub fn cell_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position.row)?.get_mut(position.col)
    }

    /// Returns the state of the cell at the given position, if any.
    #[must_use]
    pub fn state(&self, position: Position) -> Option<CellState> {
        self.cell(position).map(Cell::state)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Returns the positions of every cell currently in `state`, row by row.
    #[must_use]
    pub fn positions_in(&self, state: CellState) -> Vec<Position> {
        self.cells()
            .filter(|cell| cell.state() == state)
            .map(Cell::position)
            .collect()
    }

    /// Returns `true` if the position lies on the outer ring of the arena.
    #[must_use]
    pub const fn is_border(&self, position: Position) -> bool {
        let last = self.rows.saturating_sub(1);
        position.row == 0 || position.col == 0 || position.row == last || position.col == last
    }

    /// Turns every cell on the outer ring into a barrier.
    pub fn apply_outer_walls(&mut self) {
        let last = self.rows.saturating_sub(1);
        for cell in self.cells.iter_mut().flatten() {
            let Position { row, col } = cell.position();
            if row == 0 || col == 0 || row == last || col == last {
                cell.mark_barrier();
            }
        }
    }

    /// Opens the entrance on the bottom wall.
    ///
    /// A random column that is not a corner is picked on the last row and marked as the start
    /// cell. The column is returned.
    ///
    /// # Errors
    ///
    /// This function returns an error if the grid is too small to have a non-corner border cell.
    pub fn place_entrance<R: Rng>(&mut self, rng: &mut R) -> Result<usize> {
        ensure!(
            self.rows >= MIN_ROWS,
            "a grid of {} rows has no room for an entrance",
            self.rows
        );

        let last = self.rows - 1;
        let col = rng.random_range(1..last);
        if let Some(cell) = self.cell_mut(Position::new(last, col)) {
            cell.mark_start();
        }

        debug!("placed entrance at {}", Position::new(last, col));

        Ok(col)
    }

    /// Returns the in-bounds orthogonal neighbours of `position` that are not barriers.
    #[must_use]
    pub fn passable_neighbors(&self, position: Position) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .filter_map(|&(row_step, col_step)| {
                let neighbor = Position::new(
                    position.row.checked_add_signed(row_step)?,
                    position.col.checked_add_signed(col_step)?,
                );
                self.cell(neighbor)
                    .filter(|cell| !cell.is_barrier())
                    .map(Cell::position)
            })
            .collect()
    }

    /// Refreshes the neighbour list of the cell at `position` against the current barriers.
    pub fn recompute_neighbors_of(&mut self, position: Position) {
        let neighbors = self.passable_neighbors(position);
        if let Some(cell) = self.cell_mut(position) {
            cell.set_neighbors(neighbors);
        }
    }

    /// Refreshes the neighbour list of every cell against the current barriers.
    ///
    /// This has to run after any barrier edit and before each search; cells never refresh their
    /// own lists.
    pub fn recompute_neighbors(&mut self) {
        let lists: Vec<Vec<Position>> = self
            .cells()
            .map(|cell| self.passable_neighbors(cell.position()))
            .collect();

        for (cell, neighbors) in self.cells.iter_mut().flatten().zip(lists) {
            cell.set_neighbors(neighbors);
        }
    }

    /// Resets every open, closed and path cell back to empty.
    pub fn clear_trace(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.state().is_trace() {
                cell.reset();
            }
        }
    }
}
