//! Terminal rendering of the grid and the status strip.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    grid::Grid,
    types::{CellState, Position, Status},
    App,
};

/// Terminal columns used by one grid cell, so cells come out roughly square.
const CELL_WIDTH: usize = 2;

/// Key hints shown on top of the status strip.
const HINTS: &str =
    "(click) start / end / wall - (right click) erase - (space) search - (c) new maze - (q) quit";

/// Maps a cell state to its colour.
///
/// This is the one place where logical state turns into something visual. The palette is fixed.
pub(crate) const fn state_color(state: CellState) -> Color {
    match state {
        CellState::Empty => Color::White,
        CellState::Barrier => Color::Black,
        CellState::Start => Color::Rgb(150, 122, 69),
        CellState::End => Color::Rgb(19, 175, 160),
        CellState::Open => Color::Rgb(102, 141, 58),
        CellState::Closed => Color::Rgb(128, 65, 70),
        CellState::Path => Color::Rgb(84, 69, 150),
    }
}

/// Draws the idle screen and remembers where the grid landed.
///
/// The grid rectangle is stored back into the [`App`] so pointer events can be mapped to cells
/// against what the user actually sees.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversions.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let (grid_space, status_space) = split(frame.area())?;
    app.grid_area = render_grid(frame, &app.grid, grid_space)?;
    render_status(frame, app.status, status_space);

    Ok(())
}

/// Draws one frame of a running search.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversions.
pub(crate) fn draw_search_frame(frame: &mut Frame, grid: &Grid) -> Result<()> {
    clear(frame);

    let (grid_space, status_space) = split(frame.area())?;
    let _ = render_grid(frame, grid, grid_space)?;
    render_status(frame, Status::Searching, status_space);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Splits the screen into the grid space and the status strip at the bottom.
fn split(area: Rect) -> Result<(Rect, Rect)> {
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(area);

    let grid_space = *layout
        .first()
        .ok_or_eyre("failed to get grid area from layout")?;
    let status_space = *layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    Ok((grid_space, status_space))
}

/// Returns the rectangle a grid of `rows` rows occupies when centred in `space`.
///
/// Returns `None` when the grid does not fit.
///
/// # Errors
///
/// This function returns an error if the grid is too large for terminal coordinates.
pub(crate) fn grid_area(space: Rect, rows: usize) -> Result<Option<Rect>> {
    let width = u16::try_from(rows.saturating_mul(CELL_WIDTH))?;
    let height = u16::try_from(rows)?;
    if width > space.width || height > space.height {
        return Ok(None);
    }

    let x_offset = rounded_div::i32(i32::from(space.width - width), 2);
    let y_offset = rounded_div::i32(i32::from(space.height - height), 2);

    Ok(Some(Rect::new(
        space.x + u16::try_from(x_offset)?,
        space.y + u16::try_from(y_offset)?,
        width,
        height,
    )))
}

/// Maps a terminal position to the grid cell drawn there.
pub(crate) fn cell_at(area: Rect, column: u16, row: u16) -> Option<Position> {
    let dx = column.checked_sub(area.x).filter(|dx| *dx < area.width)?;
    let dy = row.checked_sub(area.y).filter(|dy| *dy < area.height)?;

    Some(Position::new(usize::from(dy), usize::from(dx) / CELL_WIDTH))
}

/// Transforms the cells in `state` into canvas coordinates.
///
/// The canvas has one point per terminal cell with the origin in the bottom-left corner, so row `r`
/// lands on `y = rows - 1 - r` and column `c` covers `x = 2c` and `x = 2c + 1`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn canvas_points(grid: &Grid, state: CellState) -> Result<Vec<(f64, f64)>> {
    let last_row = grid.rows().saturating_sub(1);

    grid.positions_in(state)
        .into_iter()
        .map(|Position { row, col }| {
            let screen_y = f64::from(u16::try_from(last_row - row)?);
            let left = col * CELL_WIDTH;
            let screen_x = f64::from(u16::try_from(left)?);
            let screen_x_right = f64::from(u16::try_from(left + 1)?);
            Ok([(screen_x, screen_y), (screen_x_right, screen_y)])
        })
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().flatten().collect())
}

/// Renders the grid centred in `space` and returns where it was drawn.
///
/// When the terminal is too small a notice is rendered instead and `None` is returned.
fn render_grid(frame: &mut Frame, grid: &Grid, space: Rect) -> Result<Option<Rect>> {
    let Some(area) = grid_area(space, grid.rows())? else {
        let notice = Line::styled(
            format!(
                "terminal too small for a {rows}x{rows} maze",
                rows = grid.rows()
            ),
            Style::default().fg(Color::Green),
        )
        .centered();
        frame.render_widget(notice, space);
        return Ok(None);
    };

    // Pre-compute every layer so conversion errors surface before the paint closure.
    let layers = CellState::ALL
        .into_iter()
        .map(|state| Ok((canvas_points(grid, state)?, state_color(state))))
        .collect::<Result<Vec<_>>>()?;

    let canvas = Canvas::default()
        .x_bounds([0.0, f64::from(area.width) - 1.0])
        .y_bounds([0.0, f64::from(area.height) - 1.0])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });

    frame.render_widget(canvas, area);

    Ok(Some(area))
}

/// Renders the key hints and the status message at the bottom of the screen.
fn render_status(frame: &mut Frame, status: Status, space: Rect) {
    let block = Block::bordered()
        .title(HINTS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    let inner_space = block.inner(space);
    frame.render_widget(block, space);
    frame.render_widget(Line::raw(status.message()).centered(), inner_space);
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use clap::Parser as _;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Args;

    /// Creates a seeded test app with a small maze.
    fn create_test_app(rows: &str) -> App {
        let args = Args::try_parse_from(["mazestar", "--rows", rows, "--seed", "4"])
            .expect("valid arguments");
        App::new(&args).expect("valid app")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Collects the symbols of the rendered buffer into one string.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_state_colors_are_distinct() {
        let colors: HashSet<String> = CellState::ALL
            .into_iter()
            .map(|state| format!("{:?}", state_color(state)))
            .collect();

        assert_eq!(colors.len(), CellState::ALL.len(), "every state has its own colour");
    }

    #[test]
    fn test_draw_idle_screen() {
        let mut app = create_test_app("21");
        let mut terminal = create_test_terminal(120, 30);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing the idle screen should succeed");
        assert_eq!(
            app.grid_area,
            Some(Rect::new(39, 3, 42, 21)),
            "grid is centred above the status strip"
        );
        let text = screen_text(&terminal);
        assert!(text.contains("(space) search"), "key hints are shown");
        assert!(text.contains("place an end cell"), "status message is shown");
    }

    #[test]
    fn test_draw_colours_walls() {
        let mut app = create_test_app("11");
        let mut terminal = create_test_terminal(40, 20);

        let _ = terminal
            .draw(|frame| {
                draw(&mut app, frame).expect("drawing should succeed in test");
            })
            .expect("terminal draw");

        let has_wall = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .any(|cell| cell.fg == Color::Black);
        assert!(has_wall, "walls are painted black");
    }

    #[test]
    fn test_draw_too_small_terminal() {
        let mut app = create_test_app("53");
        let mut terminal = create_test_terminal(40, 20);

        let result = terminal.draw(|frame| {
            draw(&mut app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing should succeed even if the grid does not fit");
        assert_eq!(app.grid_area, None, "no grid area when the grid does not fit");
        assert!(
            screen_text(&terminal).contains("terminal too small"),
            "the user is told why"
        );
    }

    #[test]
    fn test_draw_search_frame() {
        let app = create_test_app("11");
        let mut terminal = create_test_terminal(40, 20);

        let result = terminal.draw(|frame| {
            draw_search_frame(frame, &app.grid).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing a search frame should succeed");
        assert!(
            screen_text(&terminal).contains("searching..."),
            "search status is shown"
        );
    }

    #[test]
    fn test_grid_area_centres_with_rounding() {
        let space = Rect::new(0, 0, 13, 6);

        assert_eq!(
            grid_area(space, 3).expect("small grid"),
            Some(Rect::new(4, 2, 6, 3)),
            "odd leftovers round up"
        );
        assert_eq!(
            grid_area(space, 7).expect("small grid"),
            None,
            "a 14 column grid does not fit in 13 columns"
        );
    }

    #[test]
    fn test_cell_at_maps_double_width_cells() {
        let area = Rect::new(10, 5, 10, 5);

        assert_eq!(cell_at(area, 10, 5), Some(Position::new(0, 0)), "top-left");
        assert_eq!(cell_at(area, 11, 5), Some(Position::new(0, 0)), "same cell");
        assert_eq!(cell_at(area, 12, 7), Some(Position::new(2, 1)), "inside");
        assert_eq!(cell_at(area, 19, 9), Some(Position::new(4, 4)), "bottom-right");
        assert_eq!(cell_at(area, 9, 5), None, "left of the grid");
        assert_eq!(cell_at(area, 20, 5), None, "right of the grid");
        assert_eq!(cell_at(area, 10, 10), None, "below the grid");
    }

    #[test]
    fn test_canvas_points_flip_rows() {
        let mut grid = Grid::build(3);
        if let Some(cell) = grid.cell_mut(Position::new(0, 1)) {
            cell.mark_barrier();
        }

        let points = canvas_points(&grid, CellState::Barrier).expect("small grid");

        assert_eq!(
            points,
            vec![(2.0, 2.0), (3.0, 2.0)],
            "top row maps to the highest y, one point per terminal column"
        );
    }
}
