//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    grid::Direction,
    types::{MainMenuItem, MazeError, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler of the current
/// screen. It uses a timeout to avoid blocking the UI, so the solver animation keeps playing while
/// no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(20))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) && app.show_solution {
        app.animation_manager.update();
    }

    Ok(())
}

/// Dispatches a key press to the handler of the current screen.
///
/// `q` quits from every screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    match app.screen {
        Screen::MainMenu(item) => handle_menu_key(app, item, code)?,
        Screen::InGame => handle_game_key(app, code)?,
    }

    Ok(())
}

/// Handles key presses on the main menu.
///
/// `j` and `k` move the cursor down and up, `l` or `Enter` selects the highlighted item.
fn handle_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::Play => app.screen = Screen::InGame,
            MainMenuItem::NewMaze => {
                app.new_maze()?;
                app.screen = Screen::InGame;
            }
            MainMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }

    Ok(())
}

/// Handles key presses while playing.
///
/// The vim keys and the arrow keys move the player. Moves made after the exit was reached are
/// rejected by the session and ignored here.
fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    let direction = match code {
        KeyCode::Char('h') | KeyCode::Left => Direction::Left,
        KeyCode::Char('j') | KeyCode::Down => Direction::Down,
        KeyCode::Char('k') | KeyCode::Up => Direction::Up,
        KeyCode::Char('l') | KeyCode::Right => Direction::Right,
        KeyCode::Char('s') => {
            app.toggle_solution();
            return Ok(());
        }
        KeyCode::Char('r') => {
            app.restart();
            return Ok(());
        }
        KeyCode::Char('n') => return app.new_maze(),
        KeyCode::Esc => {
            app.screen = Screen::MainMenu(MainMenuItem::Play);
            return Ok(());
        }
        _ => return Ok(()),
    };

    match app.session.try_move(direction) {
        Ok(outcome) => app.last_outcome = Some(outcome),
        Err(MazeError::SessionFinished) => {}
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
