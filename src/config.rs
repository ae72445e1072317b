//! Command-line configuration.
//!
//! The fixed constants below are the defaults; the command line can only override them at process
//! start. Nothing is read from or written to configuration files.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Side length of the maze when none is given.
pub const DEFAULT_ROWS: u16 = 53;

/// Delay between two animation frames of a search, in milliseconds.
///
/// This constant controls how long each frame of the search animation stays on screen. A lower
/// value results in a faster animation, while a higher value makes the exploration easier to
/// follow.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 10;

/// Command-line arguments of the visualizer.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Args {
    /// Number of rows and columns of the square maze.
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(3..=255))]
    pub rows: u16,
    /// Seed for the maze generator; every regeneration draws from the same seeded sequence.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Delay between two search animation frames, in milliseconds.
    #[arg(long = "frame-delay", default_value_t = DEFAULT_FRAME_DELAY_MS)]
    pub frame_delay_ms: u64,
    /// File to write logs to; logging stays off when absent.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: None,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            log_file: None,
        }
    }
}

impl Args {
    /// Returns the side length of the maze.
    #[must_use]
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    /// Returns the pause between two search animation frames.
    #[must_use]
    pub const fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}
