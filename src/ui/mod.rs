//! UI plugin - handles the start menu, pause and game over overlays, the HUD,
//! and the play/pause/reset controls.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    ARENA_BORDER_COLOR, ARENA_COLOR, CELL_SIZE, GRID_SIZE, GameOverUI, GamePhase, GameRng, GameSet,
    GameState, HudText, InputBuffer, MenuUI, PauseUI, ResetEvent, TickScheduler,
};

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system)
            .add_systems(Update, game_flow_input.in_set(GameSet::Input))
            .add_systems(
                Update,
                (sync_overlays, update_hud_text)
                    .chain()
                    .in_set(GameSet::Render),
            );
    }
}

const TITLE_COLOR: Color = Color::srgba(0.3, 1.0, 0.3, 1.0);
const BODY_TEXT_COLOR: Color = Color::srgba(0.85, 0.85, 0.85, 1.0);
const PROMPT_COLOR: Color = Color::srgba(1.0, 1.0, 0.3, 1.0);
const HUD_TEXT_COLOR: Color = Color::srgba(0.09, 0.4, 0.2, 1.0);

const CONTROLS_LINE: &str =
    "Arrows / WASD: move    Space: change shape    Enter: start    P: pause    R: reset";

/// Initial setup system - camera, arena, HUD and controls line.
fn setup_system(mut commands: Commands) {
    commands.spawn(Camera2d);

    let arena_size = GRID_SIZE as f32 * CELL_SIZE;

    // Arena background
    commands.spawn((
        Sprite {
            color: ARENA_COLOR,
            custom_size: Some(Vec2::splat(arena_size)),
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));

    // Arena border using hollow rectangle
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: ARENA_BORDER_COLOR,
            hollow: true,
            thickness: 4.0,
            corner_radii: Vec4::splat(0.02),
            transform: Transform::from_xyz(0.0, 0.0, 0.1),
            ..ShapeConfig::default_2d()
        },
        Vec2::splat(arena_size + 8.0),
    ));

    commands.spawn((
        Text::from(hud_line(0, "straight", 25)),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(20.0),
            ..default()
        },
        HudText,
    ));

    commands.spawn((
        Text::from(CONTROLS_LINE),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(HUD_TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        },
    ));
}

fn hud_line(score: u32, shape: &str, speed: u32) -> String {
    format!("Score: {}    Shape: {}    Speed: {}", score, shape, speed)
}

/// One centred line of overlay text.
fn overlay_line(text: impl Into<String>, size: f32, color: Color, gap: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap)),
            ..default()
        },
    )
}

fn overlay_root(alpha: f32) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, alpha)),
    )
}

/// Spawns the start menu UI.
fn spawn_start_menu(commands: &mut Commands) {
    commands
        .spawn((overlay_root(0.85), MenuUI))
        .with_children(|parent| {
            parent.spawn(overlay_line("SHAPE-SHIFTING SNAKE", 56.0, TITLE_COLOR, 30.0));
            parent.spawn(overlay_line("CONTROLS", 24.0, Color::WHITE, 12.0));
            parent.spawn(overlay_line("Arrow Keys or WASD to move", 18.0, BODY_TEXT_COLOR, 8.0));
            parent.spawn(overlay_line("Space to change shape", 18.0, BODY_TEXT_COLOR, 8.0));
            parent.spawn(overlay_line("P to pause, R to reset", 18.0, BODY_TEXT_COLOR, 24.0));
            parent.spawn(overlay_line("SHAPES", 24.0, Color::WHITE, 12.0));
            parent.spawn(overlay_line("Straight: normal movement", 16.0, BODY_TEXT_COLOR, 6.0));
            parent.spawn(overlay_line("Wavy: smooth wave motion", 16.0, BODY_TEXT_COLOR, 6.0));
            parent.spawn(overlay_line(
                "Zigzag: sharp alternating movement",
                16.0,
                BODY_TEXT_COLOR,
                6.0,
            ));
            parent.spawn(overlay_line("Spiral: rotating segments", 16.0, BODY_TEXT_COLOR, 36.0));
            parent.spawn(overlay_line("Press ENTER to start", 24.0, PROMPT_COLOR, 0.0));
        });
}

/// Spawns the pause overlay.
fn spawn_pause_screen(commands: &mut Commands) {
    commands
        .spawn((overlay_root(0.5), PauseUI))
        .with_children(|parent| {
            parent.spawn(overlay_line("PAUSED", 56.0, Color::WHITE, 20.0));
            parent.spawn(overlay_line(
                "Press P or ENTER to resume",
                20.0,
                BODY_TEXT_COLOR,
                0.0,
            ));
        });
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32) {
    commands
        .spawn((overlay_root(0.7), GameOverUI))
        .with_children(|parent| {
            parent.spawn(overlay_line(
                "GAME OVER",
                60.0,
                Color::srgba(1.0, 0.3, 0.3, 1.0),
                20.0,
            ));
            parent.spawn(overlay_line(
                format!("Final Score: {}", score),
                30.0,
                Color::WHITE,
                30.0,
            ));
            parent.spawn(overlay_line("Press R to play again", 20.0, BODY_TEXT_COLOR, 0.0));
        });
}

/// System for the start, pause and reset keys.
pub(crate) fn game_flow_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut scheduler: ResMut<TickScheduler>,
    mut input_buffer: ResMut<InputBuffer>,
    mut rng: ResMut<GameRng>,
    mut reset_writer: MessageWriter<ResetEvent>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        game_state.reset(&mut rng.0);
        input_buffer.clear();
        scheduler.sync(game_state.interval());
        scheduler.restart();
        reset_writer.write(ResetEvent);
        info!("game reset");
        return;
    }

    let phase = game_state.phase();

    if keyboard_input.just_pressed(KeyCode::Enter)
        && matches!(phase, GamePhase::Ready | GamePhase::Paused)
    {
        game_state.start();
        scheduler.restart();
        info!("game started");
    } else if keyboard_input.just_pressed(KeyCode::KeyP)
        && matches!(phase, GamePhase::Playing | GamePhase::Paused)
    {
        game_state.toggle_pause();
        if game_state.is_running() {
            scheduler.restart();
            info!("game resumed");
        } else {
            info!("game paused at score {}", game_state.score());
        }
    }
}

/// System to show exactly the overlay that matches the current phase.
fn sync_overlays(
    mut commands: Commands,
    game_state: Res<GameState>,
    menu_ui: Query<Entity, With<MenuUI>>,
    pause_ui: Query<Entity, With<PauseUI>>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if !game_state.is_changed() {
        return;
    }

    let phase = game_state.phase();

    let overlays = [
        (GamePhase::Ready, menu_ui.iter().collect::<Vec<_>>()),
        (GamePhase::Paused, pause_ui.iter().collect()),
        (GamePhase::GameOver, game_over_ui.iter().collect()),
    ];

    for (overlay_phase, entities) in &overlays {
        if *overlay_phase != phase {
            for entity in entities {
                commands.entity(*entity).despawn();
            }
        } else if entities.is_empty() {
            match phase {
                GamePhase::Ready => spawn_start_menu(&mut commands),
                GamePhase::Paused => spawn_pause_screen(&mut commands),
                GamePhase::GameOver => spawn_game_over_screen(&mut commands, game_state.score()),
                GamePhase::Playing => {}
            }
        }
    }
}

/// System to update the score/shape/speed display.
fn update_hud_text(game_state: Res<GameState>, mut query: Query<&mut Text, With<HudText>>) {
    if !game_state.is_changed() {
        return;
    }

    if let Ok(mut text) = query.single_mut() {
        *text = Text::from(hud_line(
            game_state.score(),
            game_state.shape().label(),
            game_state.speed_level(),
        ));
    }
}
