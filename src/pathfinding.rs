//! Pathfinding algorithms over the maze grid.
//!
//! This module contains the breadth-first search used to find the solution path between the start
//! and exit tiles, along with the distance map and farthest-point scan the endpoint selector builds
//! upon. Only walkable tiles are expanded; walls and spikes block the search.

use std::collections::VecDeque;

use tracing::trace;

use crate::grid::{Grid, Position};

/// Breadth-first search state over a grid.
///
/// Distances and parents are kept in row-major buffers the size of the grid, so a lookup never
/// hashes and the search allocates exactly twice.
struct Search<'grid> {
    /// Grid being searched.
    grid: &'grid Grid,
    /// Distance in steps from the origin, [`None`] for tiles not reached.
    distance: Vec<Option<usize>>,
    /// Tile each reached tile was first discovered from.
    parent: Vec<Option<Position>>,
}

impl<'grid> Search<'grid> {
    /// Runs a full breadth-first search from `origin`.
    ///
    /// When `target` is given the search stops as soon as it is dequeued. An origin outside the
    /// grid or on a blocking tile yields a search that reached nothing.
    fn run(grid: &'grid Grid, origin: Position, target: Option<Position>) -> Self {
        let len = grid.rows() * grid.cols();
        let mut search = Self {
            grid,
            distance: vec![None; len],
            parent: vec![None; len],
        };

        if !grid.is_traversable(origin) {
            return search;
        }

        search.mark(origin, 0, None);
        let mut queue = VecDeque::from([(origin, 0_usize)]);

        while let Some((current, steps)) = queue.pop_front() {
            if Some(current) == target {
                break;
            }

            for neighbour in grid.open_neighbours(current) {
                if search.distance_to(neighbour).is_none() {
                    search.mark(neighbour, steps + 1, Some(current));
                    queue.push_back((neighbour, steps + 1));
                }
            }
        }

        search
    }

    /// Row-major slot for a position, [`None`] outside the grid.
    fn slot(&self, position: Position) -> Option<usize> {
        self.grid
            .contains(position)
            .then(|| position.row * self.grid.cols() + position.col)
    }

    /// Records the distance and parent of a newly reached tile.
    fn mark(&mut self, position: Position, steps: usize, parent: Option<Position>) {
        if let Some(slot) = self.slot(position) {
            if let Some(distance) = self.distance.get_mut(slot) {
                *distance = Some(steps);
            }
            if let Some(entry) = self.parent.get_mut(slot) {
                *entry = parent;
            }
        }
    }

    /// Distance from the origin to `position`, if it was reached.
    fn distance_to(&self, position: Position) -> Option<usize> {
        self.slot(position)
            .and_then(|slot| self.distance.get(slot).copied().flatten())
    }

    /// Tile `position` was discovered from.
    fn parent_of(&self, position: Position) -> Option<Position> {
        self.slot(position)
            .and_then(|slot| self.parent.get(slot).copied().flatten())
    }

    /// Walks the parent links back from `target` and returns the path origin-first.
    fn path_to(&self, target: Position) -> Vec<Position> {
        if self.distance_to(target).is_none() {
            return Vec::new();
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent_of(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();

        path
    }
}

/// Computes the shortest route between two tiles.
///
/// The returned path starts at `from`, ends at `to` and moves one tile in one of the four
/// directions at every step. An empty vector means there is no route: either endpoint is outside
/// the grid or blocked, or walls and spikes separate them. Callers must check for emptiness rather
/// than assume a route exists.
///
/// In a perfect maze there is exactly one simple path between any two open tiles, so the search
/// returns that path.
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Vec<Position> {
    if !grid.is_traversable(to) {
        return Vec::new();
    }

    let path = Search::run(grid, from, Some(to)).path_to(to);
    trace!(%from, %to, len = path.len(), "computed shortest path");

    path
}

/// Computes the distance in steps from `from` to every tile of the grid.
///
/// The returned buffer is row-major with one entry per tile; unreachable and blocking tiles hold
/// [`None`].
pub fn distances(grid: &Grid, from: Position) -> Vec<Option<usize>> {
    Search::run(grid, from, None).distance
}

/// Finds the reachable tile farthest from `from`, together with its distance.
///
/// Ties are broken in favour of the tile that comes first in row-major order. Returns [`None`] when
/// `from` itself is not walkable.
pub fn farthest_from(grid: &Grid, from: Position) -> Option<(Position, usize)> {
    let cols = grid.cols().max(1);

    distances(grid, from)
        .into_iter()
        .enumerate()
        .filter_map(|(index, distance)| {
            distance.map(|steps| (Position::new(index / cols, index % cols), steps))
        })
        .fold(None, |best: Option<(Position, usize)>, candidate| match best {
            Some((_, steps)) if steps >= candidate.1 => best,
            _ => Some(candidate),
        })
}
