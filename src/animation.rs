//! Solver animation for the in-game screen.
//!
//! This module records a depth-first walk from the start tile to the exit, including every dead end
//! it backs out of, and plays it back one step per frame so the player can watch the maze being
//! solved.

use std::{
    collections::HashSet,
    time::{Duration, Instant},
};

use crate::grid::{Direction, Endpoints, Grid, Position};

/// Animation frame delay in milliseconds.
///
/// This constant controls the timing between animation frames in the solver visualization. A lower
/// value results in faster animation, while a higher value slows it down to make the walk easier to
/// follow.
pub(crate) const ANIMATION_FRAME_DELAY_MS: u64 = 40;

/// Animation step types for the solver visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationStep {
    /// Add a tile to the displayed walk.
    Add(Position),
    /// Remove a tile from the displayed walk while backing out of a dead end.
    Remove(Position),
}

/// Animation state manager for the solver visualization.
///
/// This structure manages the animation state including timing, current step tracking, and the tiles
/// being displayed during playback.
pub(crate) struct AnimationManager {
    /// Animation steps recorded from the depth-first walk.
    pub(crate) steps: Vec<AnimationStep>,
    /// Index of the next step to play.
    pub(crate) current_index: usize,
    /// Timestamp of the last animation frame update.
    pub(crate) last_update_time: Instant,
    /// Tiles currently shown, in walk order.
    pub(crate) current_path: Vec<Position>,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationManager {
    /// Creates a new animation manager with no recorded steps.
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
            current_path: Vec::new(),
        }
    }

    /// Rewinds playback to the first step.
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.current_path.clear();
        self.last_update_time = Instant::now();
    }

    /// Clears all animation data and resets state.
    pub(crate) fn clear(&mut self) {
        self.steps.clear();
        self.reset();
    }

    /// Returns whether every recorded step has been played.
    pub(crate) fn is_finished(&self) -> bool {
        self.current_index >= self.steps.len()
    }

    /// Plays the next step once enough time has passed since the previous one.
    ///
    /// Once the walk reaches the exit the animation stops and keeps the solution on screen.
    pub(crate) fn update(&mut self) {
        if self.last_update_time.elapsed() < Duration::from_millis(ANIMATION_FRAME_DELAY_MS) {
            return;
        }
        self.last_update_time = Instant::now();
        self.advance();
    }

    /// Plays the next step regardless of timing.
    pub(crate) fn advance(&mut self) {
        let Some(step) = self.steps.get(self.current_index).copied() else {
            return;
        };

        match step {
            AnimationStep::Add(position) => self.current_path.push(position),
            AnimationStep::Remove(position) => {
                if let Some(index) = self
                    .current_path
                    .iter()
                    .rposition(|&shown| shown == position)
                {
                    let _ = self.current_path.remove(index);
                }
            }
        }
        self.current_index += 1;
    }
}

/// Records the steps of a depth-first walk from the start tile to the exit.
///
/// The walk explores neighbours in [`Direction::ALL`] order, never steps on walls or spikes, and
/// records a [`AnimationStep::Remove`] for every tile it backs out of. It stops on reaching the
/// exit, so the tiles still shown after playback form a route from start to exit. An unreachable
/// exit records the full exploration ending with an empty display.
pub(crate) fn record_animation_steps(grid: &Grid, endpoints: Endpoints) -> Vec<AnimationStep> {
    let mut steps = Vec::new();
    if !grid.is_traversable(endpoints.start) {
        return steps;
    }

    let mut visited = HashSet::from([endpoints.start]);
    let mut stack = vec![(endpoints.start, 0_usize)];
    steps.push(AnimationStep::Add(endpoints.start));

    while let Some((current, next_direction)) = stack.last_mut() {
        if *current == endpoints.exit {
            break;
        }

        let here = *current;
        let neighbour = Direction::ALL
            .iter()
            .enumerate()
            .skip(*next_direction)
            .find_map(|(index, &direction)| {
                here.step(direction)
                    .filter(|&target| grid.is_traversable(target) && !visited.contains(&target))
                    .map(|target| (index, target))
            });

        if let Some((index, target)) = neighbour {
            *next_direction = index + 1;
            let _ = visited.insert(target);
            steps.push(AnimationStep::Add(target));
            stack.push((target, 0));
        } else {
            let _ = stack.pop();
            steps.push(AnimationStep::Remove(here));
        }
    }

    steps
}
