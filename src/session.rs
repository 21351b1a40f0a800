//! Game session state and move resolution.
//!
//! This module contains the [`apply_move`] rule that decides what happens when the player steps in
//! a direction, and the [`Session`] that owns a finished maze and tracks the player through it. A
//! session is built by running the whole generation pipeline in order: carve the maze, pick the
//! endpoints, compute the solution path and scatter spikes around it.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::{
    endpoints::select_endpoints,
    generator::generate_maze,
    grid::{Direction, Endpoints, Grid, Position, Tile},
    hazards::place_hazards,
    pathfinding,
    types::{MazeError, Outcome, SessionState},
};

/// Parameters for generating a new maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeSettings {
    /// Requested number of rows, rounded up to odd.
    pub rows: usize,
    /// Requested number of columns, rounded up to odd.
    pub cols: usize,
    /// Probability in `[0, 1]` that an off-path open tile becomes a spike.
    pub density: f64,
}

impl Default for MazeSettings {
    fn default() -> Self {
        Self {
            rows: 15,
            cols: 29,
            density: 0.1,
        }
    }
}

/// Resolves a single step of the player.
///
/// Exit detection compares the target against `endpoints.exit` rather than looking at the tile
/// kind, so the [`Tile::Exit`] label only matters for rendering.
///
/// | target                    | outcome              | new position       |
/// |---------------------------|----------------------|--------------------|
/// | outside the grid or wall  | [`Outcome::Blocked`] | `current`          |
/// | `endpoints.exit`          | [`Outcome::Exit`]    | `endpoints.exit`   |
/// | spike                     | [`Outcome::Spike`]   | `endpoints.start`  |
/// | anything else             | [`Outcome::Moved`]   | target             |
pub fn apply_move(
    grid: &Grid,
    current: Position,
    endpoints: Endpoints,
    direction: Direction,
) -> (Position, Outcome) {
    let Some((target, tile)) = current
        .step(direction)
        .and_then(|target| grid.get(target).map(|tile| (target, tile)))
    else {
        return (current, Outcome::Blocked);
    };

    match tile {
        Tile::Wall => (current, Outcome::Blocked),
        _ if target == endpoints.exit => (target, Outcome::Exit),
        Tile::Spike => (endpoints.start, Outcome::Spike),
        Tile::Open | Tile::Start | Tile::Exit => (target, Outcome::Moved),
    }
}

/// A single playable maze.
///
/// The session exclusively owns its grid. Tiles never change during play; only the player position,
/// the counters and the [`SessionState`] do.
#[derive(Clone, Debug)]
pub struct Session {
    /// Finished maze, spikes and endpoint labels included.
    grid: Grid,
    /// Start and exit positions.
    endpoints: Endpoints,
    /// Solution path from start to exit, computed before spikes were placed.
    solution: Vec<Position>,
    /// Where the player currently stands.
    player: Position,
    /// Whether the exit has been reached.
    state: SessionState,
    /// Number of accepted moves, blocked ones included.
    moves: usize,
    /// Number of times the player stepped on a spike.
    spike_hits: usize,
}

impl Session {
    /// Generates a new maze and starts a session on it.
    ///
    /// The stages run strictly in order, each consuming the previous one's output: carving,
    /// endpoint selection, solution path, spike placement. The endpoint tiles are labelled
    /// [`Tile::Start`] and [`Tile::Exit`] at the end.
    ///
    /// # Errors
    ///
    /// Propagates [`MazeError::InvalidDimensions`], [`MazeError::InvalidDensity`],
    /// [`MazeError::NoReachableEndpoint`] and [`MazeError::UnreachableTarget`] from the pipeline
    /// stages.
    pub fn generate<R: Rng + ?Sized>(settings: MazeSettings, rng: &mut R) -> Result<Self, MazeError> {
        let mut grid = generate_maze(settings.rows, settings.cols, rng)?;
        let endpoints = select_endpoints(&grid, rng)?;
        let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
        let spikes = place_hazards(&mut grid, settings.density, endpoints, rng)?;

        grid.set(endpoints.start, Tile::Start)?;
        grid.set(endpoints.exit, Tile::Exit)?;

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            spikes,
            solution = solution.len(),
            "generated new maze"
        );
        debug!("maze layout:\n{grid}");

        Ok(Self::with_solution(grid, endpoints, solution))
    }

    /// Starts a session over an existing grid.
    ///
    /// The grid is used as-is: no spikes are placed and no tiles are relabelled. The solution path
    /// is computed on the grid as given.
    ///
    /// # Errors
    ///
    /// - [`MazeError::InvalidEndpoint`] when either endpoint is outside the grid or not walkable.
    /// - [`MazeError::NoReachableEndpoint`] when start and exit coincide.
    /// - [`MazeError::UnreachableTarget`] when no route joins them.
    pub fn from_parts(grid: Grid, endpoints: Endpoints) -> Result<Self, MazeError> {
        for position in [endpoints.start, endpoints.exit] {
            if !grid.is_traversable(position) {
                return Err(MazeError::InvalidEndpoint(position));
            }
        }
        if endpoints.start == endpoints.exit {
            return Err(MazeError::NoReachableEndpoint);
        }

        let solution = pathfinding::shortest_path(&grid, endpoints.start, endpoints.exit);
        if solution.is_empty() {
            return Err(MazeError::UnreachableTarget {
                from: endpoints.start,
                to: endpoints.exit,
            });
        }

        Ok(Self::with_solution(grid, endpoints, solution))
    }

    /// Assembles a fresh session with the player on the start tile.
    const fn with_solution(grid: Grid, endpoints: Endpoints, solution: Vec<Position>) -> Self {
        Self {
            grid,
            endpoints,
            solution,
            player: endpoints.start,
            state: SessionState::Playing,
            moves: 0,
            spike_hits: 0,
        }
    }

    /// Moves the player one step and reports what happened.
    ///
    /// Reaching the exit switches the session to [`SessionState::Won`], which is terminal.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::SessionFinished`] once the session is won. The state is left unchanged.
    pub fn try_move(&mut self, direction: Direction) -> Result<Outcome, MazeError> {
        if self.state == SessionState::Won {
            return Err(MazeError::SessionFinished);
        }

        let (position, outcome) = apply_move(&self.grid, self.player, self.endpoints, direction);
        trace!(from = %self.player, to = %position, ?direction, ?outcome, "resolved move");

        self.player = position;
        self.moves += 1;
        match outcome {
            Outcome::Spike => self.spike_hits += 1,
            Outcome::Exit => {
                self.state = SessionState::Won;
                info!(moves = self.moves, spike_hits = self.spike_hits, "maze solved");
            }
            Outcome::Blocked | Outcome::Moved => {}
        }

        Ok(outcome)
    }

    /// Puts the player back on the start tile and resets the counters, keeping the same maze.
    pub fn restart(&mut self) {
        self.player = self.endpoints.start;
        self.state = SessionState::Playing;
        self.moves = 0;
        self.spike_hits = 0;
    }

    /// Finished maze.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Start and exit positions.
    pub const fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    /// Solution path from start to exit, both included.
    pub fn solution(&self) -> &[Position] {
        &self.solution
    }

    /// Current player position.
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Number of moves made since the session started or was restarted.
    pub const fn moves(&self) -> usize {
        self.moves
    }

    /// Number of spikes stepped on since the session started or was restarted.
    pub const fn spike_hits(&self) -> usize {
        self.spike_hits
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    /// Layout with the start at (1, 1), a spike at (1, 3) and the exit at (3, 3).
    fn layout() -> Grid {
        "\
22222
23352
23232
23332
22222"
            .parse()
            .expect("layout should parse")
    }

    fn endpoints() -> Endpoints {
        Endpoints {
            start: Position::new(1, 1),
            exit: Position::new(3, 3),
        }
    }

    /// Walks `directions` and returns the outcome of the last move.
    fn walk(session: &mut Session, directions: &[Direction]) -> Outcome {
        let mut last = Outcome::Blocked;
        for &direction in directions {
            last = session.try_move(direction).expect("session should be playing");
        }
        last
    }

    #[test]
    fn test_move_into_wall_is_blocked() {
        let grid = layout();
        let start = endpoints().start;

        assert_eq!(
            apply_move(&grid, start, endpoints(), Direction::Up),
            (start, Outcome::Blocked)
        );
    }

    #[test]
    fn test_move_off_the_grid_is_blocked() {
        let grid = layout();
        let corner = Position::new(0, 0);

        assert_eq!(
            apply_move(&grid, corner, endpoints(), Direction::Left),
            (corner, Outcome::Blocked)
        );
        let edge = Position::new(4, 2);
        assert_eq!(
            apply_move(&grid, edge, endpoints(), Direction::Down),
            (edge, Outcome::Blocked)
        );
    }

    #[test]
    fn test_move_onto_open_tile() {
        let grid = layout();

        assert_eq!(
            apply_move(&grid, Position::new(1, 1), endpoints(), Direction::Right),
            (Position::new(1, 2), Outcome::Moved)
        );
    }

    #[test]
    fn test_spike_resets_to_start_not_previous_tile() {
        let grid = layout();
        let current = Position::new(1, 2);

        let (position, outcome) = apply_move(&grid, current, endpoints(), Direction::Right);

        assert_eq!(outcome, Outcome::Spike);
        assert_eq!(position, endpoints().start);
        assert_ne!(position, current);
    }

    #[test]
    fn test_exit_detected_by_position_not_tile_kind() {
        let grid = layout();

        assert_eq!(
            grid.get(endpoints().exit),
            Some(Tile::Open),
            "exit tile carries no label"
        );
        assert_eq!(
            apply_move(&grid, Position::new(3, 2), endpoints(), Direction::Right),
            (endpoints().exit, Outcome::Exit)
        );
    }

    #[test]
    fn test_exit_label_elsewhere_is_plain_floor() {
        let mut grid = layout();
        grid.set(Position::new(3, 1), Tile::Exit)
            .expect("position is inside the grid");

        assert_eq!(
            apply_move(&grid, Position::new(2, 1), endpoints(), Direction::Down),
            (Position::new(3, 1), Outcome::Moved)
        );
    }

    #[test]
    fn test_session_walks_to_the_exit() {
        let mut session = Session::from_parts(layout(), endpoints()).expect("endpoints are valid");

        let outcome = walk(
            &mut session,
            &[Direction::Down, Direction::Down, Direction::Right],
        );
        assert_eq!(outcome, Outcome::Moved);
        assert_eq!(session.state(), SessionState::Playing);

        let outcome = walk(&mut session, &[Direction::Right]);
        assert_eq!(outcome, Outcome::Exit);
        assert_eq!(session.player(), endpoints().exit);
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.moves(), 4);
    }

    #[test]
    fn test_won_session_rejects_moves() {
        let mut session = Session::from_parts(layout(), endpoints()).expect("endpoints are valid");
        let _ = walk(
            &mut session,
            &[
                Direction::Down,
                Direction::Down,
                Direction::Right,
                Direction::Right,
            ],
        );

        assert_eq!(
            session.try_move(Direction::Left),
            Err(MazeError::SessionFinished)
        );
        assert_eq!(session.player(), endpoints().exit);
        assert_eq!(session.moves(), 4);
    }

    #[test]
    fn test_session_counts_spike_hits_and_restarts() {
        let mut session = Session::from_parts(layout(), endpoints()).expect("endpoints are valid");

        let outcome = walk(&mut session, &[Direction::Right, Direction::Right]);
        assert_eq!(outcome, Outcome::Spike);
        assert_eq!(session.player(), endpoints().start);
        assert_eq!(session.spike_hits(), 1);

        let outcome = walk(&mut session, &[Direction::Up]);
        assert_eq!(outcome, Outcome::Blocked);
        assert_eq!(session.moves(), 3);

        session.restart();
        assert_eq!(session.moves(), 0);
        assert_eq!(session.spike_hits(), 0);
        assert_eq!(session.player(), endpoints().start);
    }

    #[test]
    fn test_from_parts_validates_endpoints() {
        let wall = Endpoints {
            start: Position::new(0, 0),
            exit: Position::new(3, 3),
        };
        assert_eq!(
            Session::from_parts(layout(), wall).map(|session| session.player()),
            Err(MazeError::InvalidEndpoint(Position::new(0, 0)))
        );

        let same = Endpoints {
            start: Position::new(1, 1),
            exit: Position::new(1, 1),
        };
        assert_eq!(
            Session::from_parts(layout(), same).map(|session| session.player()),
            Err(MazeError::NoReachableEndpoint)
        );

        let mut grid = layout();
        grid.set(Position::new(3, 2), Tile::Wall)
            .expect("position is inside the grid");
        assert_eq!(
            Session::from_parts(grid, endpoints()).map(|session| session.player()),
            Err(MazeError::UnreachableTarget {
                from: endpoints().start,
                to: endpoints().exit,
            })
        );
    }

    #[test]
    fn test_generated_session_is_labelled_and_solvable() {
        let mut rng = StdRng::seed_from_u64(99);
        let session =
            Session::generate(MazeSettings::default(), &mut rng).expect("default settings are valid");
        let grid = session.grid();
        let ends = session.endpoints();

        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.cols(), 29);
        assert_ne!(ends.start, ends.exit);
        assert_eq!(grid.get(ends.start), Some(Tile::Start));
        assert_eq!(grid.get(ends.exit), Some(Tile::Exit));
        assert_eq!(session.player(), ends.start);
        assert_eq!(session.state(), SessionState::Playing);

        let solution = session.solution();
        assert_eq!(solution.first(), Some(&ends.start));
        assert_eq!(solution.last(), Some(&ends.exit));

        let spikes: HashSet<Position> = grid.positions_of(Tile::Spike).into_iter().collect();
        assert!(
            solution.iter().all(|position| !spikes.contains(position)),
            "spikes must stay off the solution"
        );
        assert_eq!(
            pathfinding::shortest_path(grid, ends.start, ends.exit),
            solution,
            "labelled tiles stay walkable"
        );
    }

    #[test]
    fn test_following_the_solution_wins() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session =
            Session::generate(MazeSettings::default(), &mut rng).expect("default settings are valid");

        let steps: Vec<Direction> = session
            .solution()
            .windows(2)
            .filter_map(|pair| match pair {
                [current, next] => Direction::ALL
                    .into_iter()
                    .find(|&direction| current.step(direction) == Some(*next)),
                _ => None,
            })
            .collect();
        assert_eq!(steps.len() + 1, session.solution().len());

        let outcome = walk(&mut session, &steps);
        assert_eq!(outcome, Outcome::Exit);
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.spike_hits(), 0);
    }

    #[test]
    fn test_same_seed_same_session() {
        let build = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let session =
                Session::generate(MazeSettings::default(), &mut rng).expect("settings are valid");
            (session.grid().clone(), session.endpoints())
        };

        assert_eq!(build(77), build(77));
    }

    #[test]
    fn test_generate_propagates_pipeline_errors() {
        let mut rng = StdRng::seed_from_u64(0);

        let tiny = MazeSettings {
            rows: 1,
            ..MazeSettings::default()
        };
        assert!(matches!(
            Session::generate(tiny, &mut rng),
            Err(MazeError::InvalidDimensions { .. })
        ));

        let dense = MazeSettings {
            density: 2.0,
            ..MazeSettings::default()
        };
        assert!(matches!(
            Session::generate(dense, &mut rng),
            Err(MazeError::InvalidDensity(_))
        ));
    }
}
