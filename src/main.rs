//! This crate contains the source code for the binary of the maze visualizer.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io::stdout;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazestar::{config::Args, logging, App};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};

fn main() -> Result<()> {
    install()?;

    let args = Args::parse();
    logging::init(args.log_file.as_deref())?;
    let mut app = App::new(&args)?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(&mut terminal);
    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}
