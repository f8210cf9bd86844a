pub mod controls;
pub mod inputs;

use bevy::prelude::*;
use leafwing_input_manager::plugin::InputManagerSystem;
use leafwing_input_manager::prelude::*;

use controls::{FlapRequested, latch_flap};

#[derive(Component, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<inputs::Action>::default())
            .register_type::<Player>()
            .init_resource::<FlapRequested>()
            .add_systems(Startup, setup)
            .add_systems(PreUpdate, latch_flap.after(InputManagerSystem::Update));
    }
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player,
        InputManagerBundle::<inputs::Action> {
            input_map: inputs::create_input_map(),
            ..default()
        },
    ));
}
