//! Rendering plugin - handles position interpolation, shape animations,
//! palettes, visual effects, and camera.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::game::{
    CELL_SIZE, CameraShake, Direction, EATEN_FLASH_COLOR, Fruit, FruitEatenEvent, GameOverEvent,
    GameSet, GameState, GRID_SIZE, GrowingSegment, Position, PreviousPosition, PulseEffect, Shape,
    SnakeHead, SnakeSegment, SPIRAL_STEP_DEGREES, TickScheduler, Z_BACKGROUND, Z_FRUIT,
    Z_SNAKE_HEAD, Z_SNAKE_SEGMENT, ZIGZAG_BOUNCE_HEIGHT,
};

/// Plugin for rendering and visual effects.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                position_translation,
                shape_animation,
                segment_palette,
                pulse_effect_system,
                spawn_fruit_eaten_effect,
                trigger_camera_shake_on_game_over,
                camera_shake_system,
                growing_segment_animation,
            )
                .chain()
                .in_set(GameSet::Render),
        );
    }
}

// Type alias for transform interpolation query
type TransformInterpolationQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Position,
        &'static PreviousPosition,
        &'static mut Transform,
        Option<&'static SnakeHead>,
        Option<&'static SnakeSegment>,
        Option<&'static Fruit>,
    ),
>;

/// Center of a grid cell in world space. Row 0 is drawn at the top.
pub fn cell_to_world(position: Position) -> Vec2 {
    let half = GRID_SIZE as f32 / 2.0;
    Vec2::new(
        (position.x as f32 - half + 0.5) * CELL_SIZE,
        (half - position.y as f32 - 0.5) * CELL_SIZE,
    )
}

/// Head and tail-most shades for each shape.
fn palette(shape: Shape) -> (Srgba, Srgba) {
    match shape {
        Shape::Straight => (Srgba::rgb_u8(22, 163, 74), Srgba::rgb_u8(134, 239, 172)),
        Shape::Wavy => (Srgba::rgb_u8(37, 99, 235), Srgba::rgb_u8(147, 197, 253)),
        Shape::Zigzag => (Srgba::rgb_u8(147, 51, 234), Srgba::rgb_u8(216, 180, 254)),
        Shape::Spiral => (Srgba::rgb_u8(220, 38, 38), Srgba::rgb_u8(252, 165, 165)),
    }
}

/// Segment colour: the shape's strong shade at the head, fading toward the
/// light shade over ten segments. The tail is drawn translucent.
pub fn segment_color(shape: Shape, index: usize, len: usize) -> Color {
    let (strong, light) = palette(shape);
    let t = (index.min(10) as f32) / 10.0;
    let alpha = if index > 0 && index + 1 == len { 0.7 } else { 1.0 };
    Color::srgba(
        strong.red + (light.red - strong.red) * t,
        strong.green + (light.green - strong.green) * t,
        strong.blue + (light.blue - strong.blue) * t,
        alpha,
    )
}

fn facing_angle(direction: Direction) -> f32 {
    match direction {
        Direction::Right => 0.0,
        Direction::Up => FRAC_PI_2,
        Direction::Left => PI,
        Direction::Down => -FRAC_PI_2,
    }
}

/// System to interpolate entity positions for smooth movement.
fn position_translation(
    mut transforms: TransformInterpolationQuery,
    scheduler: Res<TickScheduler>,
    game_state: Res<GameState>,
) {
    // Calculate interpolation progress (0.0 to 1.0)
    let progress = if game_state.is_running() {
        scheduler.fraction().min(1.0)
    } else {
        1.0
    };

    for (pos, prev_pos, mut transform, head, segment, fruit) in transforms.iter_mut() {
        // Set z-index based on entity type to ensure proper layering
        let z = if head.is_some() {
            Z_SNAKE_HEAD
        } else if segment.is_some() {
            Z_SNAKE_SEGMENT
        } else if fruit.is_some() {
            Z_FRUIT
        } else {
            Z_BACKGROUND
        };

        let current = cell_to_world(*pos);
        let previous = cell_to_world(prev_pos.pos);
        let interpolated = previous.lerp(current, progress);

        transform.translation = interpolated.extend(z);
    }
}

/// System to apply the per-shape motion: head facing, spiral twist, wavy
/// pulse, and zigzag bounce.
fn shape_animation(
    time: Res<Time>,
    game_state: Res<GameState>,
    mut segments: Query<(&SnakeSegment, Option<&SnakeHead>, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    let shape = game_state.shape();

    for (segment, head, mut transform) in segments.iter_mut() {
        let phase = segment.index as f32 * 0.6;
        let facing = if head.is_some() {
            facing_angle(game_state.direction())
        } else {
            0.0
        };

        let twist = match shape {
            Shape::Spiral => (segment.index as f32 * SPIRAL_STEP_DEGREES).to_radians(),
            _ => 0.0,
        };
        transform.rotation = Quat::from_rotation_z(facing + twist);

        let scale = match shape {
            Shape::Wavy => 1.0 + (t * TAU + phase).sin() * 0.08,
            _ => 1.0,
        };
        transform.scale = Vec3::splat(scale);

        if shape == Shape::Zigzag {
            transform.translation.y += (t * TAU * 1.5 + phase).sin().abs() * ZIGZAG_BOUNCE_HEIGHT;
        }
    }
}

/// System to recolour segments for the current shape and length.
fn segment_palette(
    game_state: Res<GameState>,
    mut segments: Query<(&SnakeSegment, &mut ShapeFill)>,
) {
    if !game_state.is_changed() {
        return;
    }

    let len = game_state.body().len();
    for (segment, mut fill) in segments.iter_mut() {
        fill.color = segment_color(game_state.shape(), segment.index, len);
    }
}

/// System to handle pulse effects (for eaten fruit flash).
fn pulse_effect_system(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut Transform, &mut PulseEffect)>,
) {
    for (entity, mut transform, mut effect) in effects.iter_mut() {
        effect.timer.tick(time.delta());

        if effect.timer.is_finished() {
            commands.entity(entity).despawn();
        } else {
            let progress = effect.timer.fraction();
            let scale = effect.start_scale + (effect.end_scale - effect.start_scale) * progress;
            transform.scale = Vec3::splat(scale);
        }
    }
}

/// System to spawn visual effect when fruit is eaten.
fn spawn_fruit_eaten_effect(
    mut commands: Commands,
    mut fruit_eaten_reader: MessageReader<FruitEatenEvent>,
) {
    for event in fruit_eaten_reader.read() {
        let world = cell_to_world(event.position);
        // Every hundredth point gets a bigger flash.
        let end_scale = if event.score % 100 == 0 { 3.5 } else { 2.5 };

        commands.spawn((
            ShapeBundle::circle(
                &ShapeConfig {
                    color: EATEN_FLASH_COLOR,
                    transform: Transform::from_xyz(world.x, world.y, Z_FRUIT + 0.5),
                    ..ShapeConfig::default_2d()
                },
                CELL_SIZE / 2.0,
            ),
            PulseEffect {
                timer: Timer::from_seconds(0.3, TimerMode::Once),
                start_scale: 1.0,
                end_scale,
            },
        ));
    }
}

/// System to trigger camera shake on game over.
fn trigger_camera_shake_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut camera_shake: ResMut<CameraShake>,
) {
    for event in game_over_reader.read() {
        // Running out of room earns a gentler shake than a crash.
        camera_shake.intensity = if event.collision.is_some() { 8.0 } else { 3.0 };
        camera_shake.timer = Timer::from_seconds(0.5, TimerMode::Once);
        debug!("camera shake for final score {}", event.score);
    }
}

/// System to apply camera shake effect.
fn camera_shake_system(
    time: Res<Time>,
    mut camera_shake: ResMut<CameraShake>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    if camera_shake.timer.is_finished() {
        return;
    }

    camera_shake.timer.tick(time.delta());

    if let Ok(mut camera_transform) = camera_query.single_mut() {
        if camera_shake.timer.is_finished() {
            // Reset camera position when shake is done
            camera_transform.translation.x = 0.0;
            camera_transform.translation.y = 0.0;
        } else {
            let decay = 1.0 - camera_shake.timer.fraction();

            let mut rng = rand::rng();
            let shake_x = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;
            let shake_y = (rng.random::<f32>() - 0.5) * camera_shake.intensity * decay;

            camera_transform.translation.x = shake_x;
            camera_transform.translation.y = shake_y;
        }
    }
}

/// System to animate growing segments.
fn growing_segment_animation(
    mut commands: Commands,
    time: Res<Time>,
    mut growing: Query<(Entity, &mut Transform, &mut GrowingSegment)>,
) {
    for (entity, mut transform, mut growing_segment) in growing.iter_mut() {
        growing_segment.timer.tick(time.delta());

        if growing_segment.timer.is_finished() {
            transform.scale = Vec3::splat(1.0);
            commands.entity(entity).remove::<GrowingSegment>();
        } else {
            let progress = growing_segment.timer.fraction();
            // Use ease-out for a bouncy effect
            let scale = progress * (2.0 - progress);
            transform.scale = Vec3::splat(scale);
        }
    }
}
