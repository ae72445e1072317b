//! Recursive bisection maze carving.
//!
//! The interior of a walled arena is split by a wall with a single hole, then each half is split
//! again with the opposite orientation until the regions become too thin. Walls always land on even
//! coordinates and holes on odd ones, so the corridors line up on a two-cell lattice and a hole is
//! never covered by a later perpendicular wall.
//!
//! Holes are placed per wall without looking at connectivity, so some pockets of the interior may
//! be sealed off from the entrance.

use log::trace;
use rand::Rng;

use crate::{grid::Grid, types::Position};

/// Direction of the next dividing wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// The wall runs along a row and splits the region into a top and a bottom half.
    Horizontal,
    /// The wall runs along a column and splits the region into a left and a right half.
    Vertical,
}

impl Orientation {
    /// Returns the other orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Inclusive rectangle of interior cells still open for subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    /// First row of the region.
    min_row: usize,
    /// Last row of the region.
    max_row: usize,
    /// First column of the region.
    min_col: usize,
    /// Last column of the region.
    max_col: usize,
}

impl Region {
    /// Number of steps between the first and last row.
    const fn row_span(self) -> usize {
        self.max_row.saturating_sub(self.min_row)
    }

    /// Number of steps between the first and last column.
    const fn col_span(self) -> usize {
        self.max_col.saturating_sub(self.min_col)
    }
}

/// Carves the interior of an already walled grid.
///
/// Carving starts with a horizontal wall over the whole interior and alternates orientation at
/// every level of recursion, whether or not the previous level carved anything.
pub fn carve<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let last = grid.rows().saturating_sub(2);
    if last < 1 {
        return;
    }

    let interior = Region {
        min_row: 1,
        max_row: last,
        min_col: 1,
        max_col: last,
    };
    divide(grid, interior, Orientation::Horizontal, rng);
}

/// Splits `region` with a wall of the given orientation and recurses into both halves.
fn divide<R: Rng>(grid: &mut Grid, region: Region, orientation: Orientation, rng: &mut R) {
    match orientation {
        Orientation::Horizontal => {
            if region.col_span() < 2 {
                return;
            }
            let Some(row) = wall_line(region.min_row, region.max_row, rng) else {
                return;
            };

            let hole = hole_cell(region.min_col, region.max_col, rng);
            for col in region.min_col..=region.max_col {
                set_wall(grid, Position::new(row, col), col == hole);
            }
            trace!(
                "horizontal wall on row {row} over columns {}..={} with hole at {hole}",
                region.min_col,
                region.max_col
            );

            let above = Region {
                max_row: row - 1,
                ..region
            };
            let below = Region {
                min_row: row + 1,
                ..region
            };
            divide(grid, above, orientation.flipped(), rng);
            divide(grid, below, orientation.flipped(), rng);
        }
        Orientation::Vertical => {
            if region.row_span() < 2 {
                return;
            }
            let Some(col) = wall_line(region.min_col, region.max_col, rng) else {
                return;
            };

            let hole = hole_cell(region.min_row, region.max_row, rng);
            for row in region.min_row..=region.max_row {
                set_wall(grid, Position::new(row, col), row == hole);
            }
            trace!(
                "vertical wall on column {col} over rows {}..={} with hole at {hole}",
                region.min_row,
                region.max_row
            );

            let left = Region {
                max_col: col - 1,
                ..region
            };
            let right = Region {
                min_col: col + 1,
                ..region
            };
            divide(grid, left, orientation.flipped(), rng);
            divide(grid, right, orientation.flipped(), rng);
        }
    }
}

/// Picks the even coordinate of a dividing wall strictly inside `min..=max`.
///
/// Returns `None` when the range is too thin to hold a wall with room on both sides.
fn wall_line<R: Rng>(min: usize, max: usize, rng: &mut R) -> Option<usize> {
    (max.saturating_sub(min) >= 2).then(|| rng.random_range(min + 1..max) / 2 * 2)
}

/// Picks the odd coordinate of the hole left in a wall spanning `min..=max`.
fn hole_cell<R: Rng>(min: usize, max: usize, rng: &mut R) -> usize {
    rng.random_range(min..max) / 2 * 2 + 1
}

/// Writes one cell of a dividing wall, leaving it open if it is the hole.
fn set_wall(grid: &mut Grid, position: Position, is_hole: bool) {
    if let Some(cell) = grid.cell_mut(position) {
        if is_hole {
            cell.reset();
        } else {
            cell.mark_barrier();
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::types::CellState;

    /// Builds a walled, carved grid from a fixed seed.
    fn carved(rows: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        let (grid, _) = Grid::generate(rows, &mut rng).expect("valid size");
        grid
    }

    #[test]
    fn test_orientation_flips() {
        assert_eq!(
            Orientation::Horizontal.flipped(),
            Orientation::Vertical,
            "horizontal flips to vertical"
        );
        assert_eq!(
            Orientation::Vertical.flipped(),
            Orientation::Horizontal,
            "vertical flips to horizontal"
        );
    }

    #[test]
    fn test_wall_line_is_even_and_inside() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let line = wall_line(1, 51, &mut rng).expect("range is wide enough");
            assert_eq!(line % 2, 0, "walls land on even coordinates");
            assert!((2..=50).contains(&line), "wall {line} stays strictly inside");
        }
        assert_eq!(wall_line(1, 3, &mut rng), Some(2), "only one wall fits in 1..=3");
        assert_eq!(wall_line(1, 2, &mut rng), None, "1..=2 is too thin");
    }

    #[test]
    fn test_hole_cell_is_odd_and_inside() {
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..200 {
            let hole = hole_cell(1, 51, &mut rng);
            assert_eq!(hole % 2, 1, "holes land on odd coordinates");
            assert!((1..=51).contains(&hole), "hole {hole} stays inside the wall");
        }
    }

    #[test]
    fn test_carving_terminates_for_small_sizes() {
        for rows in 3..=24 {
            for seed in 0..8 {
                let grid = carved(rows, seed);
                assert_eq!(grid.rows(), rows, "carving {rows}x{rows} finished");
            }
        }
    }

    #[test]
    fn test_tiny_interiors_stay_open() {
        for rows in 3..=4 {
            let grid = carved(rows, 1);
            let interior_walls = grid
                .cells()
                .filter(|cell| !grid.is_border(cell.position()) && cell.is_barrier())
                .count();
            assert_eq!(interior_walls, 0, "{rows}x{rows} is too small to subdivide");
        }
    }

    #[test]
    fn test_outer_ring_survives_carving() {
        for seed in 0..32 {
            let grid = carved(53, seed);
            let last = grid.rows() - 1;

            for cell in grid.cells().filter(|cell| grid.is_border(cell.position())) {
                let position = cell.position();
                if position.row == last && cell.is_start() {
                    continue;
                }
                assert!(
                    cell.is_barrier(),
                    "border cell {position} is a wall for seed {seed}"
                );
            }

            let starts = grid.positions_in(CellState::Start);
            assert_eq!(starts.len(), 1, "exactly one start for seed {seed}");
            assert!(
                starts.iter().all(|start| start.row == last),
                "the start is on the bottom row for seed {seed}"
            );
        }
    }

    #[test]
    fn test_interior_walls_follow_the_lattice() {
        let grid = carved(53, 9);

        for cell in grid.cells() {
            let Position { row, col } = cell.position();
            if grid.is_border(cell.position()) || !cell.is_barrier() {
                continue;
            }
            assert!(
                row % 2 == 0 || col % 2 == 0,
                "wall {} sits on an even row or column",
                cell.position()
            );
        }
    }

    #[test]
    fn test_odd_cells_are_never_walls() {
        let grid = carved(53, 21);

        for cell in grid.cells() {
            let Position { row, col } = cell.position();
            if row % 2 == 1 && col % 2 == 1 {
                assert!(
                    !cell.is_barrier(),
                    "corridor cell {} stays open",
                    cell.position()
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        assert_eq!(carved(31, 42), carved(31, 42), "carving is driven by the rng only");
    }
}
