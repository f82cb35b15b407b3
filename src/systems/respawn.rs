//! Respawn processing.
//!
//! Brings back every node whose respawn ticket is due at the current
//! [`WorldTime::elapsed`](crate::resources::worldtime::WorldTime).
use bevy_ecs::prelude::*;

use crate::resources::nodeentities::{CommandsNodeView, NodeEntities};
use crate::resources::resourcemanager::ResourceManager;
use crate::resources::worldtime::WorldTime;

pub fn respawn_system(
    world_time: Res<WorldTime>,
    mut manager: ResMut<ResourceManager>,
    mut entities: ResMut<NodeEntities>,
    mut commands: Commands,
) {
    let mut view = CommandsNodeView::new(&mut commands, &mut entities);
    manager.respawn_due(world_time.elapsed, &mut view);
}
