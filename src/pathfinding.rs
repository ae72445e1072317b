//! A* search over the grid and path reconstruction.
//!
//! The search mutates cell states as it goes (frontier cells become [`CellState::Open`], expanded
//! cells [`CellState::Closed`] and the final route [`CellState::Path`]) and hands every
//! intermediate state to a [`SearchHost`] so it can be drawn. The host is also asked once per
//! iteration whether the search should stop early.

use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
};

use color_eyre::eyre::{ensure, OptionExt as _, Result};
use log::{info, trace};

use crate::{
    grid::Grid,
    types::{CellState, Position},
};

/// Receiver of search progress.
///
/// Every call happens on the searching thread between two fully applied mutations, so the grid
/// handed to [`on_step`](SearchHost::on_step) is always in a drawable state.
pub trait SearchHost {
    /// Returns `true` if the search must stop before expanding another cell.
    ///
    /// # Errors
    ///
    /// Implementations may fail while polling their input source.
    fn should_stop(&mut self) -> Result<bool>;

    /// Receives the grid after a relaxation pass or after a path cell has been marked.
    ///
    /// # Errors
    ///
    /// Implementations may fail while drawing.
    fn on_step(&mut self, grid: &Grid) -> Result<()>;
}

/// Host that draws nothing and never interrupts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl SearchHost for Headless {
    fn should_stop(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn on_step(&mut self, _grid: &Grid) -> Result<()> {
        Ok(())
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The end cell was reached through a path of `length` steps.
    Found {
        /// Number of moves between start and end.
        length: usize,
    },
    /// The frontier ran dry before the end cell was reached.
    Unreachable,
    /// The host asked the search to stop.
    Interrupted,
}

impl Outcome {
    /// Returns `true` if a path was found.
    #[must_use]
    pub const fn found(self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Everything a finished search leaves behind besides the marks on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// How the search ended.
    pub outcome: Outcome,
    /// Route from start to end, both included. Empty unless the end was found.
    pub path: Vec<Position>,
    /// Best known distance from the start for every discovered cell.
    pub g_scores: HashMap<Position, u32>,
    /// Number of cells expanded, not counting the end cell.
    pub expanded: usize,
}

/// Frontier entry.
///
/// Entries compare by f-score and then by discovery order; the position itself never takes part in
/// the comparison.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    /// Distance so far plus the heuristic estimate to the end.
    f_score: u32,
    /// Strictly increasing discovery counter.
    sequence: u64,
    /// Cell waiting to be expanded.
    position: Position,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.sequence == other.sequence
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest f-score, earliest discovery first.
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Manhattan distance between two cells.
#[must_use]
pub fn manhattan(from: Position, to: Position) -> u32 {
    let distance = from.row.abs_diff(to.row) + from.col.abs_diff(to.col);
    u32::try_from(distance).unwrap_or(u32::MAX)
}

/// Runs A* from `start` to `end`.
///
/// Neighbour lists must have been recomputed against the current barriers beforehand. Edges cost
/// one and the heuristic is the Manhattan distance. Ties on f-score are broken by discovery order,
/// earlier first. On success every cell strictly between start and end is marked as path, walking
/// back from the end, with a host step after each mark.
///
/// # Errors
///
/// This function returns an error if either endpoint lies outside the grid, if both endpoints are
/// the same cell, or if the host fails.
pub fn search<H: SearchHost + ?Sized>(
    grid: &mut Grid,
    start: Position,
    end: Position,
    host: &mut H,
) -> Result<SearchReport> {
    ensure!(grid.contains(start), "start {start} lies outside the grid");
    ensure!(grid.contains(end), "end {end} lies outside the grid");
    ensure!(start != end, "start and end are the same cell {start}");

    let mut sequence = 0_u64;
    let mut open_set = BinaryHeap::new();
    let mut queued = HashSet::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_scores: HashMap<Position, u32> = HashMap::new();
    let mut expanded = 0_usize;

    let _ = g_scores.insert(start, 0);
    open_set.push(QueueEntry {
        f_score: manhattan(start, end),
        sequence,
        position: start,
    });
    let _ = queued.insert(start);

    trace!("searching from {start} to {end}");

    loop {
        if host.should_stop()? {
            info!("search interrupted after {expanded} expansions");
            return Ok(SearchReport {
                outcome: Outcome::Interrupted,
                path: Vec::new(),
                g_scores,
                expanded,
            });
        }

        let Some(QueueEntry {
            position: current, ..
        }) = open_set.pop()
        else {
            break;
        };
        let _ = queued.remove(&current);

        if current == end {
            let path = reconstruct_path(grid, &came_from, start, end, host)?;
            let length = path.len().saturating_sub(1);
            info!("path of {length} steps found after {expanded} expansions");
            return Ok(SearchReport {
                outcome: Outcome::Found { length },
                path,
                g_scores,
                expanded,
            });
        }

        let current_score = *g_scores
            .get(&current)
            .ok_or_eyre("expanded cell has no recorded distance")?;
        let neighbors = grid
            .cell(current)
            .map(|cell| cell.neighbors().to_vec())
            .unwrap_or_default();

        for neighbor in neighbors {
            let tentative = current_score + 1;
            if tentative >= g_scores.get(&neighbor).copied().unwrap_or(u32::MAX) {
                continue;
            }

            let _ = came_from.insert(neighbor, current);
            let _ = g_scores.insert(neighbor, tentative);

            if queued.insert(neighbor) {
                sequence += 1;
                open_set.push(QueueEntry {
                    f_score: tentative + manhattan(neighbor, end),
                    sequence,
                    position: neighbor,
                });
                mark(grid, neighbor, CellState::Open);
            }
        }

        host.on_step(grid)?;

        if current != start {
            mark(grid, current, CellState::Closed);
        }
        expanded += 1;
        trace!("expanded {current} at distance {current_score}");
    }

    info!("end {end} unreachable after {expanded} expansions");

    Ok(SearchReport {
        outcome: Outcome::Unreachable,
        path: Vec::new(),
        g_scores,
        expanded,
    })
}

/// Walks the predecessor links back from `end` and marks the route.
///
/// Returns the route ordered from start to end.
fn reconstruct_path<H: SearchHost + ?Sized>(
    grid: &mut Grid,
    came_from: &HashMap<Position, Position>,
    start: Position,
    end: Position,
    host: &mut H,
) -> Result<Vec<Position>> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(&previous) = came_from.get(&current) {
        path.push(previous);
        if previous != start {
            mark(grid, previous, CellState::Path);
            host.on_step(grid)?;
        }
        current = previous;
    }

    path.reverse();
    Ok(path)
}

/// Applies a search mark to a cell unless it is one of the endpoints.
fn mark(grid: &mut Grid, position: Position, state: CellState) {
    let Some(cell) = grid.cell_mut(position) else {
        return;
    };
    if cell.is_start() || cell.is_end() {
        return;
    }

    match state {
        CellState::Open => cell.mark_open(),
        CellState::Closed => cell.mark_closed(),
        CellState::Path => cell.mark_path(),
        CellState::Empty | CellState::Barrier | CellState::Start | CellState::End => {}
    }
}
