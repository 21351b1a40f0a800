//! Perfect maze generation.
//!
//! Mazes are carved on a lattice of cells sitting at odd coordinates of a fully walled grid, with
//! the even coordinates in between acting as the walls that may be knocked down. A randomized
//! depth-first walk over the lattice, driven by an explicit stack, opens one wall per newly visited
//! cell. The visited cells and opened walls form a spanning tree, so any two open tiles are joined
//! by exactly one simple path.

use rand::{seq::SliceRandom as _, Rng};
use tracing::debug;

use crate::{
    grid::{Direction, Grid, Position, Tile},
    types::MazeError,
};

/// Smallest accepted size for either side of a maze.
pub const MIN_SIDE: usize = 3;

/// Rounds `side` up to the next odd number.
pub const fn round_to_odd(side: usize) -> usize {
    side | 1
}

/// Generates a perfect maze of at least `rows` by `cols` tiles.
///
/// Even dimensions are rounded up to the next odd value, so the returned grid is always odd in
/// both axes with a solid wall border. Every lattice cell ends up open and reachable from every
/// other one.
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] when either side is smaller than [`MIN_SIDE`].
pub fn generate_maze<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    if rows < MIN_SIDE || cols < MIN_SIDE {
        return Err(MazeError::InvalidDimensions { rows, cols });
    }

    let rows = round_to_odd(rows);
    let cols = round_to_odd(cols);
    let mut grid = Grid::filled(rows, cols, Tile::Wall);

    // Lattice cells live at odd coordinates; there are `(side - 1) / 2` of them per axis.
    let origin = Position::new(
        rng.gen_range(0..(rows - 1) / 2) * 2 + 1,
        rng.gen_range(0..(cols - 1) / 2) * 2 + 1,
    );
    grid.set(origin, Tile::Open)?;

    let mut stack = vec![origin];
    let mut carved = 1_usize;

    while let Some(&cell) = stack.last() {
        let candidates: Vec<(Position, Position)> = Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let target = cell.offset(direction, 2)?;
                let wall = cell.step(direction)?;
                is_interior(&grid, target)
                    .then_some((wall, target))
                    .filter(|_| grid.get(target) == Some(Tile::Wall))
            })
            .collect();

        if let Some(&(wall, target)) = candidates.choose(rng) {
            grid.set(wall, Tile::Open)?;
            grid.set(target, Tile::Open)?;
            stack.push(target);
            carved += 1;
        } else {
            let _ = stack.pop();
        }
    }

    debug!(rows, cols, carved, "carved perfect maze");

    Ok(grid)
}

/// Returns whether `position` lies strictly inside the wall border of `grid`.
const fn is_interior(grid: &Grid, position: Position) -> bool {
    position.row > 0
        && position.col > 0
        && position.row < grid.rows() - 1
        && position.col < grid.cols() - 1
}
