//! Log sink setup.
//!
//! The terminal is owned by the interface, so log records never go to stderr. They are written to a
//! file instead, and only when one is asked for.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

/// Routes `log` records into the file at `path`.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Passing `None` leaves logging off.
///
/// # Errors
///
/// This function returns an error if the file cannot be created or if a logger is already
/// installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
