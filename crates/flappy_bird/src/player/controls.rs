use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::player::inputs::Action;

/// Set when a flap happened since the last simulation step.
#[derive(Resource, Default, Debug)]
pub struct FlapRequested(pub bool);

impl FlapRequested {
    /// Returns whether a flap is pending and clears it.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.0)
    }
}

pub fn latch_flap(
    query: Query<&ActionState<Action>>,
    touch_input: Res<Touches>,
    mut flap: ResMut<FlapRequested>,
) {
    let pressed = query
        .iter()
        .any(|action_state| action_state.just_pressed(&Action::Flap));

    // Leafwing Input Manager doesn't support touch input, so we need to check for it here
    if pressed || touch_input.any_just_pressed() {
        flap.0 = true;
    }
}
