#![allow(
    clippy::allow_attributes,
    reason = "allow attributes are needed for wasm"
)]

use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::camera::ScalingMode;
use bevy::render::settings::{WgpuSettings, WgpuSettingsPriority};
use bevy::window::{WindowMode, WindowResolution};

#[cfg(target_arch = "wasm32")]
use crate::window_resizing::handle_browser_resize;

/// Logical size of the play area in pixels. The camera always shows exactly
/// this area, whatever the real window size is.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize(pub Vec2);

impl CanvasSize {
    pub const fn width(self) -> f32 {
        self.0.x
    }

    pub const fn height(self) -> f32 {
        self.0.y
    }
}

// Creates a Bevy app with the plugins every arcade game needs, sized for a
// fixed logical canvas.
#[allow(unused_variables, reason = "game_version is used in wasm")]
pub fn get_default_app(game_name: &str, game_version: &str, canvas: CanvasSize) -> App {
    let mut app = App::new();

    let asset_plugin = bevy::asset::AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,

        #[cfg(not(target_arch = "wasm32"))]
        file_path: "assets".to_string(),
        #[cfg(target_arch = "wasm32")]
        file_path: format!("games/{game_name}-{game_version}/assets"),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let resolution = WindowResolution::new(canvas.width(), canvas.height());

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: game_name.to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution,
            canvas: Some("#game".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: bevy::render::settings::RenderCreation::Automatic(WgpuSettings {
            backends: Some(
                bevy::render::settings::Backends::BROWSER_WEBGPU
                    | bevy::render::settings::Backends::GL
                    | bevy::render::settings::Backends::PRIMARY,
            ),
            power_preference: bevy::render::settings::PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..Default::default()
        }),
        ..Default::default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin)
            .set(ImagePlugin::default_nearest()),
    );

    // Keeps the frame rate in step with the display and saves battery on mobile.
    // https://github.com/aevyrie/bevy_framepace
    app.add_plugins(bevy_framepace::FramepacePlugin);

    app.insert_resource(canvas)
        .insert_resource(ClearColor(Color::BLACK))
        .add_systems(Startup, spawn_canvas_camera);

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(PreUpdate, handle_browser_resize);
    }

    app
}

/// The camera is centered on the canvas and scaled so the whole canvas is
/// always visible. Canvas pixel (0, 0) is the top-left corner of the view.
fn spawn_canvas_camera(mut commands: Commands, canvas: Res<CanvasSize>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: canvas.width(),
                min_height: canvas.height(),
            },
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Converts canvas pixel coordinates (origin top-left, Y-down) to Bevy world
/// coordinates (origin center, Y-up).
pub fn canvas_to_world(canvas: CanvasSize, position: Vec2, z: f32) -> Vec3 {
    Vec3::new(
        position.x - canvas.width() * 0.5,
        canvas.height() * 0.5 - position.y,
        z,
    )
}
