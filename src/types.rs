//! Type definitions shared across the game and its terminal front end.

use thiserror::Error;

use crate::grid::Position;

/// Result of resolving a single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The target tile was a wall or lay outside the grid. The player did not move.
    Blocked,
    /// The target tile was a spike. The player was sent back to the start tile.
    Spike,
    /// The target tile was the exit. The game is won.
    Exit,
    /// The player stepped onto a walkable tile.
    Moved,
}

/// Lifecycle of a game session.
///
/// A session starts out [`Playing`](SessionState::Playing) and moves to
/// [`Won`](SessionState::Won) once the player reaches the exit. [`Won`](SessionState::Won) is
/// terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The player is still looking for the exit.
    #[default]
    Playing,
    /// The player reached the exit.
    Won,
}

/// Errors raised while building or playing a maze.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MazeError {
    /// Requested maze dimensions are below the 3x3 minimum.
    #[error("maze dimensions must be at least 3x3, got {rows}x{cols}")]
    InvalidDimensions {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
    },
    /// Fewer than two mutually reachable walkable tiles exist to pick a start and an exit from.
    #[error("fewer than two reachable open tiles to place a start and an exit on")]
    NoReachableEndpoint,
    /// No route connects the two positions.
    #[error("no route from {from} to {to}")]
    UnreachableTarget {
        /// Where the search started.
        from: Position,
        /// Where the search was headed.
        to: Position,
    },
    /// Hazard density is not a probability.
    #[error("hazard density must lie within [0, 1], got {0}")]
    InvalidDensity(f64),
    /// A position lies outside the grid or on a tile that cannot be walked on.
    #[error("position {0} is outside the grid or not walkable")]
    InvalidEndpoint(Position),
    /// A tile write targeted a position outside the grid.
    #[error("position {0} lies outside the grid")]
    OutOfBounds(Position),
    /// A move was attempted after the exit had already been reached.
    #[error("the session is already won")]
    SessionFinished,
    /// A text layout could not be turned into a grid.
    #[error("malformed grid layout: {0}")]
    ParseGrid(String),
}

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// In-game screen where the maze is displayed and played.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Play" menu option, resuming the current maze.
    Play,
    /// "New Maze" menu option, generating a fresh maze before playing.
    NewMaze,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Label rendered for the menu item.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::NewMaze => "New Maze",
            Self::Quit => "Quit",
        }
    }

    /// Item below this one, saturating at the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Play => Self::NewMaze,
            Self::NewMaze | Self::Quit => Self::Quit,
        }
    }

    /// Item above this one, saturating at the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Play | Self::NewMaze => Self::Play,
            Self::Quit => Self::NewMaze,
        }
    }

    /// All items in display order.
    pub(crate) const ALL: [Self; 3] = [Self::Play, Self::NewMaze, Self::Quit];
}
