//! Command-line configuration for the game binary.

use std::path::PathBuf;

use clap::Parser;

use crate::{generator::MIN_SIDE, session::MazeSettings, types::MazeError};

/// Command-line options for spikemaze.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "spikemaze")]
#[command(about = "Find your way out of a generated maze without stepping on the spikes")]
#[command(version)]
pub struct Config {
    /// Maze height in tiles, rounded up to the next odd number
    #[arg(long, default_value_t = 15)]
    pub rows: usize,

    /// Maze width in tiles, rounded up to the next odd number
    #[arg(long, default_value_t = 29)]
    pub cols: usize,

    /// Probability in [0, 1] that a tile off the solution path holds a spike
    #[arg(long, default_value_t = 0.1)]
    pub density: f64,

    /// Seed for the maze generator; a random one is picked and logged when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// File the log is written to
    #[arg(long, default_value = "spikemaze.log")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let settings = MazeSettings::default();
        Self {
            rows: settings.rows,
            cols: settings.cols,
            density: settings.density,
            seed: None,
            log_file: PathBuf::from("spikemaze.log"),
        }
    }
}

impl Config {
    /// Checks the options before any terminal setup happens.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidDimensions`] when either side is below 3.
    /// - [`MazeError::InvalidDensity`] when the density is not a finite value within `[0, 1]`.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows < MIN_SIDE || self.cols < MIN_SIDE {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(MazeError::InvalidDensity(self.density));
        }

        Ok(())
    }

    /// Maze generation settings derived from the options.
    pub const fn settings(&self) -> MazeSettings {
        MazeSettings {
            rows: self.rows,
            cols: self.cols,
            density: self.density,
        }
    }
}
