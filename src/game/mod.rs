//! Core game module containing the rules, shared components, resources, events, and constants.

use bevy::prelude::*;

mod components;
mod constants;
mod events;
mod resources;
mod rules;

pub use components::*;
pub use constants::*;
pub use events::*;
pub use resources::*;
pub use rules::*;

/// Ordering of the per-frame work shared by every plugin.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard handling; may start, pause, reset or steer the game.
    Input,
    /// The timer-driven state transition.
    Tick,
    /// Entities follow the freshly updated state.
    Sync,
    /// Purely visual work.
    Render,
}

/// Registers the authoritative state, its helpers, and the game messages.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let mut rng = GameRng::default();
        let state = GameState::new(&mut rng.0);

        app.insert_resource(TickScheduler::new(state.interval()))
            .insert_resource(state)
            .insert_resource(rng)
            .init_resource::<InputBuffer>()
            .init_resource::<CameraShake>()
            .add_message::<FruitEatenEvent>()
            .add_message::<GameOverEvent>()
            .add_message::<ResetEvent>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Tick, GameSet::Sync, GameSet::Render).chain(),
            );
    }
}
