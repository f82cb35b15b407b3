//! Progression change notification.
//!
//! Triggered after inventory or skill state changed; the HUD text is rebuilt
//! in response.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use crate::resources::hud::HudText;
use crate::resources::progression::Progression;

#[derive(Event, Debug, Clone, Copy)]
pub struct ProgressionChangedEvent {}

/// Rebuild [`HudText`] from the current [`Progression`].
pub fn refresh_hud_observer(
    _trigger: On<ProgressionChangedEvent>,
    progression: Res<Progression>,
    mut hud: ResMut<HudText>,
) {
    hud.refresh(&progression.snapshot());
}
