//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    grid::{Grid, Position, Tile},
    types::{MainMenuItem, Outcome, Screen, SessionState},
    App,
};

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the bordered, centered box the main menu is drawn in.
///
/// The box is exactly tall enough for its borders and `entries` lines. Returns one single-line
/// area per menu entry, top to bottom.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, entries: u16) -> Rc<[Rect]> {
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];

    let layout = Layout::vertical([Constraint::Length(entries + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title)
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); usize::from(entries)]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu and highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let entries = MainMenuItem::ALL;
    let inner_layout = init_menu(frame, "spikemaze", 3);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (entry, area) in entries.into_iter().zip(inner_layout.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(entry.label()).centered().style(style), *area);
    }
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts maze positions to canvas coordinates centered on the origin using the
/// formulas `y = (rows - 1) / 2 - row` and `x = col - (cols - 1) / 2`, so that row zero is drawn at
/// the top.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_maze_to_screen_coords(
    positions: &[Position],
    grid: &Grid,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.rows())?);
    let cols_n = f64::from(u16::try_from(grid.cols())?);

    positions
        .iter()
        .map(|position| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(position.row)?);
            let screen_x = f64::from(u16::try_from(position.col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Status line text for the in-game tooltip.
pub(crate) fn status_line(app: &App) -> String {
    let session = &app.session;
    let event = match app.last_outcome {
        Some(Outcome::Blocked) => "bump!",
        Some(Outcome::Spike) => "ouch! back to the start",
        Some(Outcome::Exit) => "you escaped!",
        Some(Outcome::Moved) | None => "",
    };

    format!(
        "moves {}  spikes hit {}  seed {}  {event}",
        session.moves(),
        session.spike_hits(),
        app.seed
    )
}

/// Renders the in-game screen with the maze, the player and the optional solver animation.
///
/// Walls are drawn green, spikes red, the start blue, the exit magenta and the player yellow. When
/// the solver animation is enabled its current walk is drawn in white on top of the floor.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let grid = app.session.grid();
    let maze_rows = grid.rows();
    let maze_columns = grid.cols();

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(4), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let tooltip_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_columns.max(60))?),
        Constraint::Min(1),
    ])
    .split(tooltip_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered tooltip area from horizontal layout")?;

    let main_layout = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area);

    let maze_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;

    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(maze_columns)?),
        Constraint::Min(1),
    ])
    .split(*maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before closures
    let endpoints = app.session.endpoints();
    let wall_coords = transform_maze_to_screen_coords(&grid.positions_of(Tile::Wall), grid)?;
    let spike_coords = transform_maze_to_screen_coords(&grid.positions_of(Tile::Spike), grid)?;
    let start_coords = transform_maze_to_screen_coords(&[endpoints.start], grid)?;
    let exit_coords = transform_maze_to_screen_coords(&[endpoints.exit], grid)?;
    let player_coords = transform_maze_to_screen_coords(&[app.session.player()], grid)?;
    let animation_coords = if app.show_solution {
        transform_maze_to_screen_coords(&app.animation_manager.current_path, grid)?
    } else {
        Vec::new()
    };

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &spike_coords,
                color: Color::Red,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &animation_coords,
                color: Color::White,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &start_coords,
                color: Color::Blue,
            });
            ctx.draw(&Points {
                coords: &exit_coords,
                color: Color::Magenta,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &player_coords,
                color: Color::Yellow,
            });
        });

    frame.render_widget(maze, space);

    let solver = match (app.show_solution, app.animation_manager.is_finished()) {
        (false, _) => "(s) show solver",
        (true, false) => "(s) hide solver [solving]",
        (true, true) => "(s) hide solver [solved]",
    };
    let tooltip_block = Block::bordered()
        .title("(hjkl) move / (r) restart / (n) new maze / (esc) menu")
        .title_bottom(solver)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP | Borders::BOTTOM);
    let status = Paragraph::new(status_line(app))
        .alignment(Alignment::Center)
        .block(tooltip_block);

    frame.render_widget(status, tooltip_area);

    if app.session.state() == SessionState::Won {
        won_banner(app, frame, space);
    }

    Ok(())
}

/// Renders the victory banner over the center of the maze.
pub(crate) fn won_banner(app: &App, frame: &mut Frame, area: Rect) {
    let [banner] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(area);
    let [banner] = Layout::horizontal([Constraint::Length(34)])
        .flex(Flex::Center)
        .areas(banner);

    let block = Block::bordered()
        .title("You escaped!")
        .title_bottom("(n) new maze / (r) replay")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .border_type(BorderType::Double);
    let text = Paragraph::new(format!(
        "{} moves, {} spikes",
        app.session.moves(),
        app.session.spike_hits()
    ))
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(Clear, banner);
    frame.render_widget(text, banner);
}
