//! A terminal maze game built around a guaranteed-solvable generation pipeline.
//!
//! Every maze is carved as a perfect maze, so exactly one simple path joins any two open tiles.
//! The start and exit are placed at the two ends of the longest such path, the solution between
//! them is computed by breadth-first search, and spikes are scattered over the remaining floor
//! without ever touching that solution. A [`Session`] then owns the finished maze and resolves the
//! player's moves one step at a time.
//!
//! The pipeline stages are available on their own:
//!
//! - [`generate_maze`] carves the grid.
//! - [`select_endpoints`] picks the start and the exit.
//! - [`shortest_path`] finds the route between two tiles.
//! - [`place_hazards`] adds spikes off the solution path.
//! - [`apply_move`] resolves a single step.
//!
//! The binary wraps all of this in a small Ratatui front end through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod animation;
mod app;
pub mod config;
pub mod endpoints;
mod events;
pub mod generator;
pub mod grid;
pub mod hazards;
pub mod logging;
pub mod pathfinding;
pub mod session;
pub mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use endpoints::select_endpoints;
pub use generator::generate_maze;
pub use grid::{Direction, Endpoints, Grid, Position, Tile};
pub use hazards::place_hazards;
pub use pathfinding::shortest_path;
pub use session::{apply_move, MazeSettings, Session};
pub use types::{MazeError, Outcome, SessionState};
