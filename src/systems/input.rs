//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`crate::resources::input::InputState`] through its
//! event handlers. The debug key triggers a
//! [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;
use raylib::prelude::*;
use smallvec::SmallVec;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<RaylibHandle>,
    mut commands: Commands,
) {
    input.begin_frame();

    let keys: SmallVec<[KeyboardKey; 9]> = input.bound_keys().collect();
    for key in keys {
        input.handle_key(key, rl.is_key_down(key));
    }

    input.handle_mouse_button(
        MouseButton::MOUSE_BUTTON_RIGHT,
        rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_RIGHT),
    );
    input.handle_mouse_button(
        MouseButton::MOUSE_BUTTON_LEFT,
        rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
    );
    input.mouse_position = rl.get_mouse_position();
    input.mouse_delta = rl.get_mouse_delta();
    input.wheel = rl.get_mouse_wheel_move();

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}
