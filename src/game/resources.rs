//! Game resources (singleton state) besides the rules state itself.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use super::Direction;

/// Random source for fruit placement.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        GameRng::seeded(rand::random())
    }
}

/// Input buffer to queue direction changes between ticks.
#[derive(Resource, Default)]
pub struct InputBuffer {
    queued_directions: Vec<Direction>,
}

impl InputBuffer {
    const CAPACITY: usize = 2;

    /// Queue `direction` if it changes course relative to `current` (or to
    /// the last queued request) without reversing it.
    pub fn request(&mut self, direction: Direction, current: Direction) -> bool {
        let last = self.last_direction().unwrap_or(current);
        if direction == last || direction.is_opposite(last) {
            return false;
        }
        self.queue_direction(direction)
    }

    /// Queue a direction change (max 2 buffered inputs).
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.queued_directions.len() < Self::CAPACITY {
            self.queued_directions.push(direction);
            true
        } else {
            false
        }
    }

    /// Pop the next queued direction.
    pub fn pop_direction(&mut self) -> Option<Direction> {
        if !self.queued_directions.is_empty() {
            Some(self.queued_directions.remove(0))
        } else {
            None
        }
    }

    /// Get the last queued direction without removing it.
    pub fn last_direction(&self) -> Option<Direction> {
        self.queued_directions.last().copied()
    }

    pub fn len(&self) -> usize {
        self.queued_directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued_directions.is_empty()
    }

    /// Clear all queued directions.
    pub fn clear(&mut self) {
        self.queued_directions.clear();
    }
}

/// Repeating tick timer that is re-armed only when the interval changes.
#[derive(Resource)]
pub struct TickScheduler {
    timer: Timer,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        TickScheduler {
            timer: Timer::new(interval, TimerMode::Repeating),
        }
    }

    pub fn interval(&self) -> Duration {
        self.timer.duration()
    }

    /// Re-arms with `interval` if it differs from the armed one, dropping any
    /// partially elapsed wait. Returns whether a re-arm happened.
    pub fn sync(&mut self, interval: Duration) -> bool {
        if self.timer.duration() == interval {
            return false;
        }
        self.timer = Timer::new(interval, TimerMode::Repeating);
        true
    }

    /// Restart the wait for the next tick from zero.
    pub fn restart(&mut self) {
        self.timer.reset();
    }

    /// Advance by `delta`; true when at least one tick is due. Several
    /// elapsed intervals in one frame still yield a single tick.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        self.timer.just_finished()
    }

    /// Fraction of the current interval that has elapsed.
    pub fn fraction(&self) -> f32 {
        self.timer.fraction()
    }
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
