mod audio;
pub mod config;
mod gameplay;
mod player;
pub mod render;
mod scene;
pub mod session;
mod ui;

use arcade_helpers::CanvasSize;
use bevy::prelude::*;
use config::GameConfig;

pub fn run() {
    let config = GameConfig::default();
    let canvas = CanvasSize(Vec2::new(config.canvas_width, config.canvas_height));

    arcade_helpers::get_default_app(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), canvas)
        .insert_resource(config)
        .add_plugins(scene::ScenePlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(gameplay::GameplayPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(audio::GameAudioPlugin)
        .run();
}
