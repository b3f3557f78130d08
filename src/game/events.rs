//! Game events (messages).

use bevy::prelude::*;

use super::{CollisionKind, Position};

/// Message triggered when the snake eats a fruit (for visual effects).
#[derive(Message)]
pub struct FruitEatenEvent {
    pub position: Position,
    pub score: u32,
}

/// Message triggered on the tick that ends the game. `collision` is `None`
/// when the snake filled the arena.
#[derive(Message)]
pub struct GameOverEvent {
    pub collision: Option<CollisionKind>,
    pub score: u32,
}

/// Message triggered when the game is reset to its initial state.
#[derive(Message)]
pub struct ResetEvent;
