//! Food plugin - keeps the fruit entity on the cell chosen by the game rules
//! and animates it.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    CELL_SIZE, FRUIT_VARIANTS, Fruit, FruitPulse, GameSet, GameState, Position, PreviousPosition,
    Z_FRUIT,
};
use crate::rendering::cell_to_world;

/// Plugin for fruit-related systems.
pub struct FoodPlugin;

impl Plugin for FoodPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, sync_fruit.in_set(GameSet::Sync))
            .add_systems(Update, fruit_pulse_animation.in_set(GameSet::Render));
    }
}

/// Fruit kinds, cycled every time a fruit is placed.
const FRUIT_KINDS: [(&str, Color); FRUIT_VARIANTS] = [
    ("apple", Color::srgb(0.94, 0.27, 0.27)),
    ("orange", Color::srgb(0.98, 0.45, 0.09)),
    ("banana", Color::srgb(0.92, 0.70, 0.03)),
    ("grape", Color::srgb(0.66, 0.33, 0.97)),
    ("kiwi", Color::srgb(0.13, 0.77, 0.37)),
    ("strawberry", Color::srgb(0.93, 0.28, 0.60)),
];

pub fn fruit_name(variant: usize) -> &'static str {
    FRUIT_KINDS[variant % FRUIT_VARIANTS].0
}

pub fn fruit_color(variant: usize) -> Color {
    FRUIT_KINDS[variant % FRUIT_VARIANTS].1
}

/// Spawns the fruit at `position`.
pub fn spawn_fruit(commands: &mut Commands, position: Position, variant: usize) -> Entity {
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: fruit_color(variant),
                    transform: Transform::from_xyz(world.x, world.y, Z_FRUIT),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE * 0.4,
            ),
            Fruit,
            position,
            PreviousPosition { pos: position },
            FruitPulse {
                timer: Timer::from_seconds(0.8, TimerMode::Repeating),
            },
        ))
        .id()
}

/// System to move (or first spawn) the fruit when the rules place a new one.
fn sync_fruit(
    mut commands: Commands,
    game_state: Res<GameState>,
    mut fruits: Query<(&mut Position, &mut PreviousPosition, &mut ShapeFill), With<Fruit>>,
) {
    let target = game_state.fruit();
    let variant = game_state.fruit_variant();

    if fruits.is_empty() {
        spawn_fruit(&mut commands, target, variant);
        debug!("{} placed at ({}, {})", fruit_name(variant), target.x, target.y);
        return;
    }

    let Ok((mut position, mut previous, mut fill)) = fruits.single_mut() else {
        return;
    };

    if game_state.is_changed() {
        fill.color = fruit_color(variant);
    }

    if *position != target {
        // Fruit jumps; it is never interpolated.
        *position = target;
        previous.pos = target;
        debug!("{} placed at ({}, {})", fruit_name(variant), target.x, target.y);
    }
}

/// System to animate fruit with a pulsing effect.
fn fruit_pulse_animation(
    time: Res<Time>,
    mut fruits: Query<(&mut Transform, &mut FruitPulse), With<Fruit>>,
) {
    for (mut transform, mut pulse) in fruits.iter_mut() {
        pulse.timer.tick(time.delta());

        // Use sine wave for smooth pulsing
        let progress = pulse.timer.fraction();
        let scale = 1.0 + (progress * std::f32::consts::PI * 2.0).sin() * 0.15;

        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_wrap_around() {
        assert_eq!(fruit_name(0), "apple");
        assert_eq!(fruit_name(5), "strawberry");
        assert_eq!(fruit_name(6), "apple");
        assert_eq!(fruit_color(7), fruit_color(1));
    }
}
