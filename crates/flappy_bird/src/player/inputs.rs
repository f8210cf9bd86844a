use bevy::prelude::{GamepadButton, KeyCode, MouseButton, Reflect};
use leafwing_input_manager::prelude::*;

// The only thing a player can do. Every input device maps onto it.
#[derive(Actionlike, PartialEq, Eq, Hash, Clone, Copy, Debug, Reflect)]
pub enum Action {
    Flap,
}

pub fn create_input_map() -> InputMap<Action> {
    let mut input_map = InputMap::default();

    input_map.insert(Action::Flap, KeyCode::Space);
    input_map.insert(Action::Flap, MouseButton::Left);
    input_map.insert(Action::Flap, GamepadButton::South);

    input_map
}
