use bevy::{log::LogPlugin, prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

mod food;
mod game;
mod rendering;
mod snake;
mod ui;

use food::FoodPlugin;
use game::{BACKGROUND_COLOR, CELL_SIZE, GRID_SIZE, GamePlugin, HUD_HEIGHT};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

fn main() {
    let arena_size = GRID_SIZE as f32 * CELL_SIZE;

    App::new()
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: WindowResolution::new(
                            (arena_size + 40.0) as u32,
                            (arena_size + HUD_HEIGHT * 2.0) as u32,
                        ),
                        title: "Shape-Shifting Snake".to_string(),
                        ..Default::default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,shape_snake=debug".to_string(),
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .add_plugins((GamePlugin, SnakePlugin, FoodPlugin, RenderingPlugin, UiPlugin))
        .run();
}
