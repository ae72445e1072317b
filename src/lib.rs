//! Terminal maze generator with an animated A* pathfinding visualizer.
//!
//! A square arena is carved into a maze by recursive bisection, the user places a start and an end
//! cell with the mouse, and the A* search is animated frame by frame as it explores the grid and
//! reconstructs the shortest path. The grid model, the carver and the search are plain library code;
//! the terminal front-end only draws the grid and feeds input into the session.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod cell;
pub mod config;
mod events;
pub mod grid;
pub mod logging;
pub mod maze;
pub mod pathfinding;
pub mod types;
mod ui;

pub use app::App;
