//! Grid model for the maze.
//!
//! This module contains the [`Grid`] tile matrix together with the small vocabulary the rest of the
//! crate speaks in: [`Tile`] kinds, [`Position`]s, movement [`Direction`]s and the pair of
//! [`Endpoints`] a maze is played between.

use std::{fmt, str::FromStr};

use crate::types::MazeError;

/// Kind of a single maze tile.
///
/// Exactly one kind occupies each cell at any time, so a tile is either a hazard or something the
/// player may walk on, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Impassable wall.
    Wall,
    /// Walkable floor.
    Open,
    /// Hazard that sends the player back to the start tile.
    Spike,
    /// Label for the start tile. Walkable.
    Start,
    /// Label for the exit tile. Walkable.
    Exit,
}

impl Tile {
    /// Returns whether the player and the pathfinder may step on this tile.
    pub const fn is_traversable(self) -> bool {
        matches!(self, Self::Open | Self::Start | Self::Exit)
    }

    /// Returns the digit used for this tile in the text layout of a grid.
    ///
    /// The digits follow the labyrinth map convention of `1` for the entry, `2` for walls, `3` for
    /// floor and `4` for the exit, extended with `5` for spikes.
    pub const fn symbol(self) -> char {
        match self {
            Self::Start => '1',
            Self::Wall => '2',
            Self::Open => '3',
            Self::Exit => '4',
            Self::Spike => '5',
        }
    }

    /// Parses a tile from its text layout digit.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '1' => Some(Self::Start),
            '2' => Some(Self::Wall),
            '3' => Some(Self::Open),
            '4' => Some(Self::Exit),
            '5' => Some(Self::Spike),
            _ => None,
        }
    }
}

/// A `(row, col)` coordinate into a [`Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row, counted from the top.
    pub row: usize,
    /// Zero-based column, counted from the left.
    pub col: usize,
}

impl Position {
    /// Builds a position from its row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the position one step away in `direction`.
    ///
    /// Yields [`None`] when the step would leave the non-negative quadrant. Whether the result lies
    /// inside a particular grid is up to [`Grid::contains`].
    pub const fn step(self, direction: Direction) -> Option<Self> {
        self.offset(direction, 1)
    }

    /// Returns the position `distance` steps away in `direction`.
    pub const fn offset(self, direction: Direction, distance: usize) -> Option<Self> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(distance), Some(self.col)),
            Direction::Down => (self.row.checked_add(distance), Some(self.col)),
            Direction::Left => (Some(self.row), self.col.checked_sub(distance)),
            Direction::Right => (Some(self.row), self.col.checked_add(distance)),
        };

        match (row, col) {
            (Some(row), Some(col)) => Some(Self { row, col }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four unit moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    Up,
    /// Away from row zero.
    Down,
    /// Towards column zero.
    Left,
    /// Away from column zero.
    Right,
}

impl Direction {
    /// All four directions, in the order the pathfinder explores them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// Start and exit positions of a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoints {
    /// Where the player spawns and where spikes send them back to.
    pub start: Position,
    /// Reaching this position wins the game.
    pub exit: Position,
}

/// Rectangular tile matrix backing a maze.
///
/// Tiles are stored row-major in a single contiguous buffer. Every accessor is bounds-checked and
/// reports positions outside the grid through [`Option`] or [`MazeError`] instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    rows: usize,
    /// Number of columns.
    cols: usize,
    /// Row-major tile storage of length `rows * cols`.
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds a grid of the given size with every tile set to `fill`.
    pub fn filled(rows: usize, cols: usize, fill: Tile) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![fill; rows.saturating_mul(cols)],
        }
    }

    /// Number of rows in the grid.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the grid.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether `position` lies inside the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Row-major index of an in-bounds position.
    const fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// Returns the tile at `position`, or [`None`] when it lies outside the grid.
    pub fn get(&self, position: Position) -> Option<Tile> {
        self.index(position)
            .and_then(|index| self.tiles.get(index))
            .copied()
    }

    /// Overwrites the tile at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `position` lies outside the grid.
    pub fn set(&mut self, position: Position, tile: Tile) -> Result<(), MazeError> {
        let slot = self
            .index(position)
            .and_then(|index| self.tiles.get_mut(index))
            .ok_or(MazeError::OutOfBounds(position))?;
        *slot = tile;

        Ok(())
    }

    /// Returns whether the tile at `position` exists and can be walked on.
    pub fn is_traversable(&self, position: Position) -> bool {
        self.get(position).is_some_and(Tile::is_traversable)
    }

    /// Iterates over every position in row-major order together with its tile.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        let cols = self.cols.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(index, tile)| (Position::new(index / cols, index % cols), *tile))
    }

    /// Collects every position holding `tile`, in row-major order.
    pub fn positions_of(&self, tile: Tile) -> Vec<Position> {
        self.iter()
            .filter(|&(_, kind)| kind == tile)
            .map(|(position, _)| position)
            .collect()
    }

    /// Collects every traversable position, in row-major order.
    pub fn traversable_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|&(_, kind)| kind.is_traversable())
            .map(|(position, _)| position)
            .collect()
    }

    /// Counts the tiles of the given kind.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&kind| kind == tile).count()
    }

    /// Returns the in-bounds, traversable neighbours of `position` in [`Direction::ALL`] order.
    pub fn open_neighbours(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| position.step(direction))
            .filter(|&neighbour| self.is_traversable(neighbour))
    }
}

impl fmt::Display for Grid {
    /// Writes the grid in its digit text layout, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.tiles.chunks(self.cols.max(1)).enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
        }

        Ok(())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    /// Parses the digit text layout produced by the [`Display`](fmt::Display) implementation.
    ///
    /// The input must be rectangular, at least 3x3 and hold only the digits `1` through `5`.
    /// Leading and trailing whitespace around the whole layout is ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = input.trim().lines().map(str::trim).collect();

        let cols = lines
            .first()
            .map(|line| line.chars().count())
            .ok_or_else(|| MazeError::ParseGrid("empty layout".to_owned()))?;
        if lines.len() < 3 || cols < 3 {
            return Err(MazeError::ParseGrid(format!(
                "layout must be at least 3x3, got {}x{cols}",
                lines.len()
            )));
        }

        let mut tiles = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(MazeError::ParseGrid(format!(
                    "row {row} has {} tiles, expected {cols}",
                    line.chars().count()
                )));
            }
            for symbol in line.chars() {
                tiles.push(Tile::from_symbol(symbol).ok_or_else(|| {
                    MazeError::ParseGrid(format!("unknown tile {symbol:?} in row {row}"))
                })?);
            }
        }

        Ok(Self {
            rows: lines.len(),
            cols,
            tiles,
        })
    }
}
