//! Session state and the actions the user can take on it.

use std::time::Duration;

use color_eyre::eyre::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::{backend::Backend, layout::Rect, Terminal};

use crate::{
    config::Args,
    events,
    grid::Grid,
    pathfinding::{self, Outcome, SearchHost},
    types::{Position, Status},
    ui,
};

/// Application state container for the visualizer.
///
/// This structure owns everything a session needs: the maze, the random source it is carved from,
/// the designated endpoints and what to tell the user. Ratatui renders from it and crossterm events
/// are applied to it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It starts off `false` and is set
    /// when the user asks to quit, including in the middle of a search.
    pub(crate) exit: bool,
    /// Current maze.
    pub(crate) grid: Grid,
    /// Side length used for every regeneration.
    pub(crate) rows: usize,
    /// Random source for maze carving.
    ///
    /// Seeded from the command line when a seed is given, so a session can be replayed.
    pub(crate) rng: StdRng,
    /// Position of the start cell, if one is designated.
    pub(crate) start: Option<Position>,
    /// Position of the end cell, if one is designated.
    pub(crate) end: Option<Position>,
    /// Message for the status strip.
    pub(crate) status: Status,
    /// Pause after every drawn search frame.
    pub(crate) frame_delay: Duration,
    /// Rectangle the grid occupied during the last redraw.
    ///
    /// Pointer events are mapped against this rectangle. It is `None` until the first draw and
    /// whenever the terminal is too small to show the grid.
    pub(crate) grid_area: Option<Rect>,
}

impl App {
    /// Creates a session with a freshly generated maze.
    ///
    /// The maze entrance becomes the designated start cell. A [`Default`] implementation is not
    /// provided because generation is fallible.
    ///
    /// # Errors
    ///
    /// This function returns an error if the requested maze size is too small.
    pub fn new(args: &Args) -> Result<Self> {
        let mut rng = args
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let rows = args.rows();
        let (grid, entrance) = Grid::generate(rows, &mut rng)?;

        Ok(Self {
            exit: false,
            grid,
            rows,
            rng,
            start: Some(Position::new(rows - 1, entrance)),
            end: None,
            status: Status::Idle,
            frame_delay: args.frame_delay(),
            grid_area: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws the session and handles user input until the exit flag is raised, after
    /// which it returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self, terminal)?;
        }

        Ok(())
    }

    /// Applies a primary pointer press on `position`.
    ///
    /// The first free slot is filled: the start if there is none, then the end. Once both exist,
    /// any other cell becomes a barrier.
    pub(crate) fn primary_action(&mut self, position: Position) {
        let Some(cell) = self.grid.cell_mut(position) else {
            return;
        };

        if self.start.is_none() && self.end != Some(position) {
            cell.mark_start();
            self.start = Some(position);
        } else if self.end.is_none() && self.start != Some(position) {
            cell.mark_end();
            self.end = Some(position);
        } else if self.start != Some(position) && self.end != Some(position) {
            cell.mark_barrier();
        }
    }

    /// Applies a secondary pointer press on `position`.
    ///
    /// The cell is emptied and, if it was an endpoint, the endpoint is released.
    pub(crate) fn secondary_action(&mut self, position: Position) {
        let Some(cell) = self.grid.cell_mut(position) else {
            return;
        };

        cell.reset();
        if self.start == Some(position) {
            self.start = None;
        } else if self.end == Some(position) {
            self.end = None;
        }
    }

    /// Discards the maze and carves a new one.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be generated.
    pub(crate) fn regenerate(&mut self) -> Result<()> {
        let (grid, entrance) = Grid::generate(self.rows, &mut self.rng)?;
        self.grid = grid;
        self.start = Some(Position::new(self.rows - 1, entrance));
        self.end = None;
        self.status = Status::Idle;

        info!("regenerated maze with entrance at column {entrance}");

        Ok(())
    }

    /// Runs the pathfinder between the designated endpoints.
    ///
    /// The trace of any previous search is wiped and every neighbour list is refreshed first. Without
    /// both endpoints the pathfinder is not invoked and the status says why.
    ///
    /// # Errors
    ///
    /// This function returns errors raised by the host while polling or drawing.
    pub(crate) fn run_search<H: SearchHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            self.status = Status::MissingEndpoints;
            return Ok(());
        };

        self.grid.clear_trace();
        self.grid.recompute_neighbors();
        self.status = Status::Searching;

        let report = pathfinding::search(&mut self.grid, start, end, host)?;
        self.status = match report.outcome {
            Outcome::Found { length } => Status::Found {
                length,
                expanded: report.expanded,
            },
            Outcome::Unreachable => Status::Unreachable {
                expanded: report.expanded,
            },
            Outcome::Interrupted => Status::Interrupted,
        };

        info!("search from {start} to {end}: {}", self.status.message());

        Ok(())
    }
}
