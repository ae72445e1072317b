//! Event handling functions for user input and the live search host.

use std::{thread, time::Duration};

use color_eyre::eyre::Result;
use log::info;
use ratatui::{
    backend::Backend,
    crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    Terminal,
};

use crate::{grid::Grid, pathfinding::SearchHost, types::Command, ui, App};

/// How long the idle loop waits for input before redrawing.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them. It uses a timeout to
/// avoid blocking the UI, which also caps how often the idle loop redraws.
///
/// # Errors
///
/// This function may return errors from polling the terminal, from maze generation or from drawing
/// search frames.
pub(crate) fn handle_events<B: Backend>(app: &mut App, terminal: &mut Terminal<B>) -> Result<()> {
    if !event::poll(POLL_TIMEOUT)? {
        return Ok(());
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => match command_for(key.code) {
            Some(Command::Search) => handle_search(app, terminal)?,
            Some(Command::Regenerate) => app.regenerate()?,
            Some(Command::Quit) => app.exit = true,
            None => {}
        },
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        _ => {}
    }

    Ok(())
}

/// Maps a key to the command it triggers, if any.
pub(crate) const fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char(' ') => Some(Command::Search),
        KeyCode::Char('c') => Some(Command::Regenerate),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

/// Handles pointer presses and drags over the grid.
///
/// The left button is the primary pointer and the right button the secondary one. Events outside
/// the grid, or before the grid has been drawn, are ignored.
pub(crate) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let Some(area) = app.grid_area else {
        return;
    };
    let Some(position) = ui::cell_at(area, mouse.column, mouse.row) else {
        return;
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
            app.primary_action(position);
        }
        MouseEventKind::Down(MouseButton::Right) | MouseEventKind::Drag(MouseButton::Right) => {
            app.secondary_action(position);
        }
        _ => {}
    }
}

/// Runs an animated search and raises the exit flag if the user quit during it.
fn handle_search<B: Backend>(app: &mut App, terminal: &mut Terminal<B>) -> Result<()> {
    let mut host = LiveSearch::new(terminal, app.frame_delay);
    app.run_search(&mut host)?;

    if host.quit_requested {
        info!("quit requested during search");
        app.exit = true;
    }

    Ok(())
}

/// Search host that draws every step to the terminal.
///
/// Each step is drawn and then held for the frame delay. Pending input is drained between
/// expansions so a quit key ends the search early.
pub(crate) struct LiveSearch<'a, B: Backend> {
    /// Terminal the frames are drawn to.
    terminal: &'a mut Terminal<B>,
    /// Pause after every drawn frame.
    frame_delay: Duration,
    /// Set once a quit key has been seen.
    pub(crate) quit_requested: bool,
}

impl<'a, B: Backend> LiveSearch<'a, B> {
    /// Creates a host drawing to `terminal`.
    pub(crate) fn new(terminal: &'a mut Terminal<B>, frame_delay: Duration) -> Self {
        Self {
            terminal,
            frame_delay,
            quit_requested: false,
        }
    }
}

impl<B: Backend> SearchHost for LiveSearch<'_, B> {
    fn should_stop(&mut self) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && command_for(key.code) == Some(Command::Quit)
                {
                    self.quit_requested = true;
                }
            }
        }

        Ok(self.quit_requested)
    }

    fn on_step(&mut self, grid: &Grid) -> Result<()> {
        let _ = self.terminal.try_draw(|frame| {
            ui::draw_search_frame(frame, grid)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
        })?;

        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }

        Ok(())
    }
}
