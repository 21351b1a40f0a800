//! Spike hazard placement.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::{
    grid::{Endpoints, Grid, Position, Tile},
    pathfinding,
    types::MazeError,
};

/// Scatters spikes over the maze without ever blocking the solution.
///
/// The solution path between the endpoints is computed first. Every [`Tile::Open`] tile that is
/// neither on that path nor one of the endpoints then turns into a [`Tile::Spike`] independently
/// with probability `density`. The path and both endpoints are never touched, so the maze stays
/// solvable whatever the density. Returns the number of spikes placed.
///
/// Each call rolls every remaining open tile again, so calling this twice on the same grid
/// compounds the density: a tile survives two calls with probability `(1 - density)²`. Sessions
/// call it exactly once per maze.
///
/// # Errors
///
/// - [`MazeError::InvalidDensity`] when `density` is not a finite value within `[0, 1]`.
/// - [`MazeError::UnreachableTarget`] when the endpoints are not connected. The grid is left
///   untouched in that case.
#[expect(
    clippy::module_name_repetitions,
    reason = "The name is part of the public pipeline API and reads better at call sites."
)]
pub fn place_hazards<R: Rng + ?Sized>(
    grid: &mut Grid,
    density: f64,
    endpoints: Endpoints,
    rng: &mut R,
) -> Result<usize, MazeError> {
    if !density.is_finite() || !(0.0..=1.0).contains(&density) {
        return Err(MazeError::InvalidDensity(density));
    }

    let solution = pathfinding::shortest_path(grid, endpoints.start, endpoints.exit);
    if solution.is_empty() {
        return Err(MazeError::UnreachableTarget {
            from: endpoints.start,
            to: endpoints.exit,
        });
    }

    let mut protected: HashSet<Position> = solution.into_iter().collect();
    let _ = protected.insert(endpoints.start);
    let _ = protected.insert(endpoints.exit);

    let candidates: Vec<Position> = grid
        .positions_of(Tile::Open)
        .into_iter()
        .filter(|position| !protected.contains(position))
        .collect();

    let mut placed = 0_usize;
    for position in candidates {
        if rng.gen_bool(density) {
            grid.set(position, Tile::Spike)?;
            placed += 1;
        }
    }

    debug!(density, placed, protected = protected.len(), "placed spikes");

    Ok(placed)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::{endpoints::select_endpoints, generator::generate_maze};

    /// Generates a maze and its endpoints from a seed.
    fn fixture(rows: usize, cols: usize, seed: u64) -> (Grid, Endpoints, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generate_maze(rows, cols, &mut rng).expect("size is valid");
        let endpoints = select_endpoints(&grid, &mut rng).expect("maze has open tiles");
        (grid, endpoints, rng)
    }

    #[test]
    fn test_spikes_avoid_solution_path() {
        let (mut grid, endpoints, mut rng) = fixture(15, 29, 1);
        let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
        assert!(!solution.is_empty(), "generated maze should be solvable");

        let _ = place_hazards(&mut grid, 0.1, endpoints, &mut rng).expect("density is valid");

        let spikes: HashSet<Position> = grid.positions_of(Tile::Spike).into_iter().collect();
        assert!(
            solution.iter().all(|position| !spikes.contains(position)),
            "no spike may sit on the solution path"
        );
        assert_ne!(grid.get(endpoints.start), Some(Tile::Spike));
        assert_ne!(grid.get(endpoints.exit), Some(Tile::Spike));
    }

    #[test]
    fn test_full_density_spikes_everything_off_path() {
        let (mut grid, endpoints, mut rng) = fixture(15, 29, 2);
        let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
        let open_before = grid.count(Tile::Open);

        let placed = place_hazards(&mut grid, 1.0, endpoints, &mut rng).expect("density is valid");

        assert_eq!(placed, open_before - solution.len());
        assert_eq!(grid.count(Tile::Open), solution.len());
        assert_eq!(
            pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit),
            solution,
            "the solution must survive any density"
        );
    }

    #[test]
    fn test_zero_density_places_nothing() {
        let (mut grid, endpoints, mut rng) = fixture(15, 29, 3);
        let before = grid.clone();

        let placed = place_hazards(&mut grid, 0.0, endpoints, &mut rng).expect("density is valid");

        assert_eq!(placed, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_invalid_density_is_rejected() {
        let (mut grid, endpoints, mut rng) = fixture(9, 9, 4);

        for density in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    place_hazards(&mut grid, density, endpoints, &mut rng),
                    Err(MazeError::InvalidDensity(_))
                ),
                "density {density} should be rejected"
            );
        }
        assert_eq!(grid.count(Tile::Spike), 0);
    }

    #[test]
    fn test_unreachable_exit_leaves_grid_untouched() {
        let mut grid: Grid = "\
2222222
2333232
2222222"
            .parse()
            .expect("layout should parse");
        let endpoints = Endpoints {
            start: Position::new(1, 1),
            exit: Position::new(1, 5),
        };
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            place_hazards(&mut grid, 1.0, endpoints, &mut rng),
            Err(MazeError::UnreachableTarget {
                from: endpoints.start,
                to: endpoints.exit,
            })
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn test_second_call_compounds_density() {
        let (mut grid, endpoints, mut rng) = fixture(31, 31, 5);

        let first = place_hazards(&mut grid, 0.5, endpoints, &mut rng).expect("density is valid");
        let second = place_hazards(&mut grid, 0.5, endpoints, &mut rng).expect("density is valid");

        assert!(first > 0, "half the off-path tiles should turn into spikes");
        assert!(second > 0, "the second call rolls the survivors again");
        assert_eq!(grid.count(Tile::Spike), first + second);
    }

    #[test]
    fn test_concrete_scenario_fifteen_by_twenty_nine() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut grid = generate_maze(15, 29, &mut rng).expect("15x29 is a valid size");
        let endpoints = select_endpoints(&grid, &mut rng).expect("maze has open tiles");

        let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
        assert!(!solution.is_empty(), "generated maze should be solvable");

        let _ = place_hazards(&mut grid, 0.1, endpoints, &mut rng).expect("density is valid");

        let spikes: HashSet<Position> = grid.positions_of(Tile::Spike).into_iter().collect();
        let path: HashSet<Position> = solution.into_iter().collect();
        assert!(spikes.is_disjoint(&path), "spikes and solution path must not overlap");
    }

    proptest! {
        #[test]
        fn prop_spikes_never_touch_path_or_endpoints(
            seed in any::<u64>(),
            density in 0.0_f64..=1.0
        ) {
            let (mut grid, endpoints, mut rng) = fixture(17, 23, seed);
            let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
            prop_assert!(!solution.is_empty());

            let _ = place_hazards(&mut grid, density, endpoints, &mut rng)
                .expect("density is valid");

            for position in &solution {
                prop_assert_ne!(grid.get(*position), Some(Tile::Spike));
            }
            prop_assert_ne!(grid.get(endpoints.start), Some(Tile::Spike));
            prop_assert_ne!(grid.get(endpoints.exit), Some(Tile::Spike));
        }

        #[test]
        fn prop_same_seed_same_hazards(seed in any::<u64>()) {
            let build = || {
                let (mut grid, endpoints, mut rng) = fixture(15, 29, seed);
                let _ = place_hazards(&mut grid, 0.3, endpoints, &mut rng)
                    .expect("density is valid");
                (grid, endpoints)
            };

            prop_assert_eq!(build(), build());
        }
    }
}
