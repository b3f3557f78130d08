//! Grid types and ECS components for the snake game.

use bevy::prelude::*;

/// Grid cell coordinate. Row 0 is the top row of the arena.
#[derive(Component, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Whether the cell lies inside an `n` by `n` grid.
    pub fn in_grid(&self, n: i32) -> bool {
        (0..n).contains(&self.x) && (0..n).contains(&self.y)
    }
}

/// Component to track previous position for smooth interpolation.
#[derive(Component, Clone, Copy, Debug)]
pub struct PreviousPosition {
    pub pos: Position,
}

/// Direction of travel for the snake head.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit step on the grid. Up moves toward row 0.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Maps a freshly pressed arrow or WASD key to a direction.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>) -> Option<Direction> {
        if keyboard_input.any_just_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]) {
            Some(Direction::Left)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowRight, KeyCode::KeyD]) {
            Some(Direction::Right)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
            Some(Direction::Up)
        } else if keyboard_input.any_just_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Movement and visual modifier applied to the whole snake.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub enum Shape {
    #[default]
    Straight,
    Wavy,
    Zigzag,
    Spiral,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Straight, Shape::Wavy, Shape::Zigzag, Shape::Spiral];

    /// Next shape in the fixed cycle.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|shape| shape == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shape::Straight => "straight",
            Shape::Wavy => "wavy",
            Shape::Zigzag => "zigzag",
            Shape::Spiral => "spiral",
        }
    }
}

/// Component to mark the snake's head.
#[derive(Component)]
pub struct SnakeHead;

/// Component to mark snake head eyes (children of head).
#[derive(Component)]
pub struct SnakeEye;

/// Snake body segment; `index` is the distance from the head.
#[derive(Component)]
pub struct SnakeSegment {
    pub index: usize,
}

/// Component to mark the fruit entity.
#[derive(Component)]
pub struct Fruit;

/// Component for fruit pulsing animation.
#[derive(Component)]
pub struct FruitPulse {
    pub timer: Timer,
}

/// Component for entities that should flash/pulse.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// Component for animating newly grown segments.
#[derive(Component)]
pub struct GrowingSegment {
    pub timer: Timer,
}

/// Component to mark the score/shape/speed display.
#[derive(Component)]
pub struct HudText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the start menu UI.
#[derive(Component)]
pub struct MenuUI;

/// Component to mark the pause overlay UI.
#[derive(Component)]
pub struct PauseUI;
