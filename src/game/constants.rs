//! Game constants for grid size, timing, scoring, colors, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::{Direction, Position};

// Arena dimensions (the arena is square)
pub const GRID_SIZE: i32 = 20;

// Visual settings
pub const CELL_SIZE: f32 = 30.0;
pub const CORNER_RADIUS: f32 = 6.0;
pub const HUD_HEIGHT: f32 = 60.0;

// Timing, in milliseconds of tick interval
pub const INITIAL_INTERVAL_MS: u32 = 150;
pub const MIN_INTERVAL_MS: u32 = 80;
pub const INTERVAL_STEP_MS: u32 = 2;

// Scoring
pub const FRUIT_SCORE: u32 = 10;
pub const FRUIT_VARIANTS: usize = 6;

// Initial state
pub const INITIAL_SNAKE_POSITION: Position = Position { x: 10, y: 10 };
pub const INITIAL_DIRECTION: Direction = Direction::Right;

// Shape perturbation
pub const WAVY_AMPLITUDE: f32 = 0.6;
pub const WAVY_PERIOD: Duration = Duration::from_millis(200);
pub const ZIGZAG_AMPLITUDE: f32 = 0.6;
pub const ZIGZAG_HALF_PERIOD: Duration = Duration::from_millis(300);

// Shape visuals
pub const SPIRAL_STEP_DEGREES: f32 = 15.0;
pub const ZIGZAG_BOUNCE_HEIGHT: f32 = 4.0;

// Colors
pub const SNAKE_EYE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.75, 0.9, 0.75, 1.0);
pub const ARENA_BORDER_COLOR: Color = Color::srgba(0.29, 0.87, 0.5, 1.0);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.94, 0.97, 0.98, 1.0);
pub const EATEN_FLASH_COLOR: Color = Color::srgba(1.0, 1.0, 0.3, 0.8);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_FRUIT: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
