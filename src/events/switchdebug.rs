//! Debug overlay toggle.
//!
//! F11 triggers a [`SwitchDebugEvent`]; the observer adds or removes the
//! [`DebugMode`] marker, which the renderer checks before drawing hitbox
//! wireframes and the FPS/node counters.
use crate::resources::debugmode::DebugMode;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

#[derive(Event, Debug, Clone, Copy)]
pub struct SwitchDebugEvent {}

/// Insert [`DebugMode`] when absent, remove it when present.
pub fn switch_debug_observer(
    _trigger: On<SwitchDebugEvent>,
    mut commands: Commands,
    debug_mode: Option<Res<DebugMode>>,
) {
    if debug_mode.is_some() {
        commands.remove_resource::<DebugMode>();
        info!("Debug overlays off");
    } else {
        commands.insert_resource(DebugMode {});
        info!("Debug overlays on");
    }
}
