//! Start and exit selection.

use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::{
    grid::{Endpoints, Grid},
    pathfinding,
    types::MazeError,
};

/// Picks a start and an exit tile as far apart as the maze allows.
///
/// A random walkable tile seeds a double sweep: the tile farthest from the seed becomes the start,
/// and the tile farthest from the start becomes the exit. On a perfect maze the second sweep finds
/// the two ends of the longest path in the tree, which makes for the longest possible solution.
///
/// # Errors
///
/// Returns [`MazeError::NoReachableEndpoint`] when fewer than two walkable tiles exist, or when the
/// seed tile cannot reach any other tile.
#[expect(
    clippy::module_name_repetitions,
    reason = "The name is part of the public pipeline API and reads better at call sites."
)]
pub fn select_endpoints<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<Endpoints, MazeError> {
    let open = grid.traversable_positions();
    if open.len() < 2 {
        return Err(MazeError::NoReachableEndpoint);
    }

    let seed = *open.choose(rng).ok_or(MazeError::NoReachableEndpoint)?;
    let (start, _) =
        pathfinding::farthest_from(grid, seed).ok_or(MazeError::NoReachableEndpoint)?;
    let (exit, distance) =
        pathfinding::farthest_from(grid, start).ok_or(MazeError::NoReachableEndpoint)?;

    if distance == 0 {
        return Err(MazeError::NoReachableEndpoint);
    }

    debug!(%start, %exit, distance, "selected endpoints");

    Ok(Endpoints { start, exit })
}
