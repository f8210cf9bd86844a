use arcade_helpers::{CanvasSize, canvas_to_world};
use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::transform::TransformSystem;
use bevy_asset_loader::prelude::*;

use crate::gameplay::ActiveSession;
use crate::render::{DrawCommand, ImageId, draw_commands};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AssetState>()
            .add_loading_state(
                LoadingState::new(AssetState::Loading)
                    .continue_to_state(AssetState::Loaded)
                    .on_failure_continue_to_state(AssetState::Failed)
                    .load_collection::<SceneAssets>(),
            )
            .add_systems(OnEnter(AssetState::Failed), report_missing_images)
            .add_systems(
                PostUpdate,
                present_frame
                    .run_if(in_state(AssetState::Loaded))
                    .before(TransformSystem::TransformPropagate),
            );
    }
}

/// The game loop only runs once every image is available.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Default, States)]
pub enum AssetState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(AssetCollection, Resource)]
struct SceneAssets {
    #[asset(path = "images/bg.png")]
    background: Handle<Image>,
    #[asset(path = "images/pipe_green.png")]
    pipe: Handle<Image>,
    #[asset(path = "images/land.png")]
    ground: Handle<Image>,
    #[asset(path = "images/bird_0.png")]
    bird_0: Handle<Image>,
    #[asset(path = "images/bird_1.png")]
    bird_1: Handle<Image>,
    #[asset(path = "images/bird_2.png")]
    bird_2: Handle<Image>,
}

impl SceneAssets {
    fn image(&self, image: ImageId) -> Handle<Image> {
        match image {
            ImageId::Background => self.background.clone_weak(),
            ImageId::Pipe => self.pipe.clone_weak(),
            ImageId::Ground => self.ground.clone_weak(),
            ImageId::Bird(frame) => match frame % 3 {
                0 => self.bird_0.clone_weak(),
                1 => self.bird_1.clone_weak(),
                _ => self.bird_2.clone_weak(),
            },
        }
    }
}

/// Position of a sprite in the draw list; higher slots are drawn on top.
#[derive(Component, Debug, Clone, Copy)]
struct DrawSlot(usize);

fn report_missing_images() {
    error!("Could not load the game images, the game cannot start");
}

// Replays the frame's draw list onto a pool of sprites, one per slot.
fn present_frame(
    mut commands: Commands,
    session: Res<ActiveSession>,
    assets: Res<SceneAssets>,
    canvas: Res<CanvasSize>,
    mut clear_color: ResMut<ClearColor>,
    mut slots: Query<(Entity, &DrawSlot, &mut Sprite, &mut Transform)>,
) {
    let mut sprites = Vec::new();
    for command in draw_commands(&session) {
        match command {
            DrawCommand::Clear(color) => {
                if clear_color.0 != color {
                    clear_color.0 = color;
                }
            }
            DrawCommand::Image {
                image,
                position,
                size,
                rotation,
            } => {
                let z = sprites.len() as f32;
                let sprite = Sprite {
                    image: assets.image(image),
                    custom_size: size,
                    anchor: Anchor::TopLeft,
                    ..default()
                };
                // Canvas angles turn clockwise because its Y axis points down.
                let transform = Transform::from_translation(canvas_to_world(*canvas, position, z))
                    .with_rotation(Quat::from_rotation_z(-rotation));
                sprites.push((sprite, transform));
            }
        }
    }

    let mut filled = vec![false; sprites.len()];
    for (entity, slot, mut sprite, mut transform) in &mut slots {
        match (sprites.get(slot.0), filled.get_mut(slot.0)) {
            (Some((new_sprite, new_transform)), Some(filled)) if !*filled => {
                *sprite = new_sprite.clone();
                *transform = *new_transform;
                *filled = true;
            }
            _ => commands.entity(entity).despawn(),
        }
    }

    for (index, (sprite, transform)) in sprites.into_iter().enumerate() {
        if filled.get(index) == Some(&false) {
            commands.spawn((DrawSlot(index), sprite, transform));
        }
    }
}
