//! Snake plugin - steering input, the timer-driven tick, and keeping the
//! segment entities in step with the game state.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    CELL_SIZE, CORNER_RADIUS, Direction, FruitEatenEvent, GameOverEvent, GameRng, GameSet, GameState,
    GrowingSegment, InputBuffer, Position, PreviousPosition, ResetEvent, SNAKE_EYE_COLOR,
    SnakeEye, SnakeHead, SnakeSegment, TickOutcome, TickScheduler, Z_SNAKE_HEAD, Z_SNAKE_SEGMENT,
};
use crate::rendering::{cell_to_world, segment_color};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SnakeEntities>()
            .add_systems(
                Update,
                (snake_direction_input, shape_input)
                    .chain()
                    .in_set(GameSet::Input),
            )
            .add_systems(Update, snake_tick.in_set(GameSet::Tick))
            .add_systems(Update, sync_snake_entities.in_set(GameSet::Sync));
    }
}

/// Segment entities, head first, mirroring the body in [`GameState`].
#[derive(Resource, Default)]
pub struct SnakeEntities(pub Vec<Entity>);

type SegmentPositionQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Position, &'static mut PreviousPosition),
    Or<(With<SnakeHead>, With<SnakeSegment>)>,
>;

/// Spawns the snake head entity with eyes.
pub fn spawn_snake_head(commands: &mut Commands, position: Position, color: Color) -> Entity {
    let size = CELL_SIZE * 0.95;
    // Normalize corner radius relative to the shape size (0.0 to 1.0 range)
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_SNAKE_HEAD),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeHead,
            SnakeSegment { index: 0 },
            position,
            PreviousPosition { pos: position },
        ))
        .with_children(|parent| {
            let eye_radius = CELL_SIZE * 0.08;

            // Eyes sit on the leading edge for a head facing right.
            for side in [1.0, -1.0] {
                parent.spawn((
                    ShapeBundle::circle(
                        &ShapeConfig {
                            color: SNAKE_EYE_COLOR,
                            transform: Transform::from_xyz(
                                CELL_SIZE * 0.18,
                                side * CELL_SIZE * 0.15,
                                0.1,
                            ),
                            ..ShapeConfig::default_2d()
                        },
                        eye_radius,
                    ),
                    SnakeEye,
                ));
            }
        })
        .id()
}

/// Spawns a snake body segment at the given position.
pub fn spawn_snake_segment(
    commands: &mut Commands,
    index: usize,
    position: Position,
    color: Color,
) -> Entity {
    let size = CELL_SIZE * 0.9;
    let corner_radius_normalized = CORNER_RADIUS / (size / 2.0);
    let world = cell_to_world(position);

    commands
        .spawn((
            ShapeBundle::rect(
                &ShapeConfig {
                    color,
                    corner_radii: Vec4::splat(corner_radius_normalized),
                    transform: Transform::from_xyz(world.x, world.y, Z_SNAKE_SEGMENT),
                    ..ShapeConfig::default_2d()
                },
                Vec2::splat(size),
            ),
            SnakeSegment { index },
            position,
            PreviousPosition { pos: position },
        ))
        .id()
}

/// System to read arrow/WASD keys and queue direction changes.
pub(crate) fn snake_direction_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut input_buffer: ResMut<InputBuffer>,
    game_state: Res<GameState>,
) {
    if !game_state.is_running() {
        return;
    }

    if let Some(direction) = Direction::from_input(&keyboard_input)
        && input_buffer.request(direction, game_state.direction())
    {
        debug!("queued direction {:?}", direction);
    }
}

/// System to cycle the snake shape on space, in any phase.
pub(crate) fn shape_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        let shape = game_state.cycle_shape();
        info!("shape changed to {}", shape.label());
    }
}

/// System to run one game tick whenever the scheduler says one is due.
pub(crate) fn snake_tick(
    time: Res<Time>,
    mut scheduler: ResMut<TickScheduler>,
    mut game_state: ResMut<GameState>,
    mut input_buffer: ResMut<InputBuffer>,
    mut rng: ResMut<GameRng>,
    mut fruit_eaten_writer: MessageWriter<FruitEatenEvent>,
    mut game_over_writer: MessageWriter<GameOverEvent>,
) {
    if scheduler.sync(game_state.interval()) {
        debug!("tick interval re-armed at {:?}", scheduler.interval());
    }

    if !game_state.is_running() || !scheduler.advance(time.delta()) {
        return;
    }

    if let Some(direction) = input_buffer.pop_direction() {
        game_state.set_direction(direction);
    }

    match game_state.tick(time.elapsed(), &mut rng.0) {
        TickOutcome::Ate { fruit } => {
            info!(
                "ate fruit at ({}, {}); score {}, length {}",
                fruit.x,
                fruit.y,
                game_state.score(),
                game_state.body().len()
            );
            fruit_eaten_writer.write(FruitEatenEvent {
                position: fruit,
                score: game_state.score(),
            });
        }
        TickOutcome::Collided(kind) => {
            info!(
                "game over: {:?} collision, final score {}",
                kind,
                game_state.score()
            );
            input_buffer.clear();
            game_over_writer.write(GameOverEvent {
                collision: Some(kind),
                score: game_state.score(),
            });
        }
        TickOutcome::Filled => {
            info!("arena filled, final score {}", game_state.score());
            input_buffer.clear();
            game_over_writer.write(GameOverEvent {
                collision: None,
                score: game_state.score(),
            });
        }
        TickOutcome::Moved | TickOutcome::Idle => {}
    }
}

/// System to spawn, move, and despawn segment entities to match the body.
fn sync_snake_entities(
    mut commands: Commands,
    game_state: Res<GameState>,
    mut entities: ResMut<SnakeEntities>,
    mut positions: SegmentPositionQuery,
    mut reset_reader: MessageReader<ResetEvent>,
) {
    let reset = reset_reader.read().count() > 0;
    if !reset && !game_state.is_changed() && !entities.0.is_empty() {
        return;
    }

    let body = game_state.body();
    let respawn = reset || entities.0.len() > body.len();

    if respawn {
        for entity in entities.0.drain(..) {
            commands.entity(entity).despawn();
        }
    }

    for (index, &cell) in body.iter().enumerate() {
        if let Some(&entity) = entities.0.get(index) {
            if let Ok((mut position, mut previous)) = positions.get_mut(entity)
                && *position != cell
            {
                previous.pos = *position;
                *position = cell;
            }
            continue;
        }

        let color = segment_color(game_state.shape(), index, body.len());
        let entity = if index == 0 {
            spawn_snake_head(&mut commands, cell, color)
        } else {
            let entity = spawn_snake_segment(&mut commands, index, cell, color);
            if !respawn {
                commands.entity(entity).insert(GrowingSegment {
                    timer: Timer::from_seconds(0.2, TimerMode::Once),
                });
            }
            entity
        };
        entities.0.push(entity);
    }
}
