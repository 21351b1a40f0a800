//! Core application state for the terminal front end.

use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    animation::{self, AnimationManager},
    config::Config,
    events,
    session::Session,
    types::{MainMenuItem, Outcome, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The game rules live in
/// the [`Session`]; the application only routes input to it and keeps presentation state around it.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Options the application was started with.
    pub(crate) config: Config,
    /// Seed the random generator was created from, shown so a maze can be replayed.
    pub(crate) seed: u64,
    /// Random generator shared by every maze of this run.
    pub(crate) rng: StdRng,
    /// Maze currently being played.
    pub(crate) session: Session,
    /// Outcome of the most recent move, if any since the maze was (re)started.
    pub(crate) last_outcome: Option<Outcome>,
    /// Whether the solver animation is shown over the maze.
    pub(crate) show_solution: bool,
    /// Animation manager for the solver visualization.
    ///
    /// This field manages the animation state including timing, current step tracking, and the
    /// tiles being displayed while the maze is being solved on screen.
    pub(crate) animation_manager: AnimationManager,
}

impl App {
    /// Creates the application and generates its first maze.
    ///
    /// The random generator is seeded from the configuration, or from a fresh random seed that is
    /// logged so the run can be reproduced with `--seed`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or the first maze cannot be generated.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        info!(
            seed,
            rows = config.rows,
            cols = config.cols,
            density = config.density,
            "starting spikemaze"
        );

        let mut rng = StdRng::seed_from_u64(seed);
        let session = Session::generate(config.settings(), &mut rng)?;

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Play),
            config,
            seed,
            rng,
            session,
            last_outcome: None,
            show_solution: false,
            animation_manager: AnimationManager::new(),
        })
    }

    /// Replaces the current maze with a freshly generated one.
    ///
    /// # Errors
    ///
    /// Returns an error when the maze cannot be generated.
    pub(crate) fn new_maze(&mut self) -> Result<()> {
        self.session = Session::generate(self.config.settings(), &mut self.rng)?;
        self.last_outcome = None;
        self.hide_solution();

        Ok(())
    }

    /// Puts the player back on the start tile of the current maze.
    pub(crate) fn restart(&mut self) {
        self.session.restart();
        self.last_outcome = None;
    }

    /// Shows or hides the solver animation, recording it from the current maze when shown.
    pub(crate) fn toggle_solution(&mut self) {
        if self.show_solution {
            self.hide_solution();
            return;
        }

        self.animation_manager.steps =
            animation::record_animation_steps(self.session.grid(), self.session.endpoints());
        self.animation_manager.reset();
        self.show_solution = true;
    }

    /// Hides the solver animation and drops its recorded steps.
    fn hide_solution(&mut self) {
        self.show_solution = false;
        self.animation_manager.clear();
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
