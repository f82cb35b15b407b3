//! Startup and shutdown of a play session.
//!
//! These are plain systems run once from `main` through single-shot
//! schedules: [`load_models`] and [`populate_world`] before the first frame,
//! [`shutdown`] after the window closes.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::avatar::Avatar;
use crate::components::worldposition::WorldPosition;
use crate::events::progression::ProgressionChangedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::modelstore::ModelStore;
use crate::resources::nodeentities::{CommandsNodeView, NodeEntities};
use crate::resources::resourcemanager::ResourceManager;
use crate::systems::render::AVATAR_MODEL;

/// Load the model of every resource kind and of the avatar, plus the
/// avatar's walk clip.
///
/// Missing files are logged and leave the fallback shapes in use.
pub fn load_models(
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    mut models: NonSendMut<ModelStore>,
    manager: Res<ResourceManager>,
) {
    for (_, kind) in manager.kinds().iter() {
        models.load(&mut rl, &thread, &kind.model);
    }
    if models.load(&mut rl, &thread, AVATAR_MODEL) {
        models.load_animations(&mut rl, &thread, AVATAR_MODEL);
    }
}

/// Place the initial nodes and the avatar, then fill the HUD.
pub fn populate_world(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut manager: ResMut<ResourceManager>,
    mut entities: ResMut<NodeEntities>,
) {
    {
        let mut view = CommandsNodeView::new(&mut commands, &mut entities);
        manager.populate(config.spawn_count, &mut view);
    }

    commands.spawn((Avatar::default(), WorldPosition::new(0.0, 0.0, 0.0)));
    commands.trigger(ProgressionChangedEvent {});
}

/// Cancel pending respawns and remove every node.
pub fn shutdown(
    mut commands: Commands,
    mut manager: ResMut<ResourceManager>,
    mut entities: ResMut<NodeEntities>,
) {
    let mut view = CommandsNodeView::new(&mut commands, &mut entities);
    manager.shutdown(&mut view);
}
