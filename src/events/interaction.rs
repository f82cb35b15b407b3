//! Gathering interaction on a resource node.
//!
//! [`NodeClickedEvent`] is triggered by the picking system when the player
//! clicks a live node. [`node_interaction_observer`] forwards it to the
//! [`ResourceManager`] and, when progression moved, announces it with a
//! [`ProgressionChangedEvent`].
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

use crate::events::progression::ProgressionChangedEvent;
use crate::resources::nodeentities::{CommandsNodeView, NodeEntities};
use crate::resources::progression::Progression;
use crate::resources::resourcemanager::{InteractionOutcome, NodeId, ResourceManager};
use crate::resources::worldtime::WorldTime;

/// The player clicked the node `node`.
#[derive(Event, Debug, Clone, Copy)]
pub struct NodeClickedEvent {
    pub node: NodeId,
}

pub fn node_interaction_observer(
    trigger: On<NodeClickedEvent>,
    world_time: Res<WorldTime>,
    mut manager: ResMut<ResourceManager>,
    mut progression: ResMut<Progression>,
    mut entities: ResMut<NodeEntities>,
    mut commands: Commands,
) {
    let id = trigger.event().node;
    // The node may have been removed between picking and this observer.
    if !manager.contains(id) {
        return;
    }
    let outcome = {
        let mut view = CommandsNodeView::new(&mut commands, &mut entities);
        manager.apply_interaction(id, &mut progression, world_time.elapsed, &mut view)
    };
    match outcome {
        InteractionOutcome::NotEligible {
            skill,
            required,
            current,
        } => {
            info!(
                "Need {} level {} to gather this (current: {})",
                skill, required, current
            );
        }
        InteractionOutcome::Damaged { remaining } => {
            info!("Node {:?} hit, {} hits left", id, remaining);
            commands.trigger(ProgressionChangedEvent {});
        }
        InteractionOutcome::Depleted => {
            info!("Node {:?} depleted", id);
            commands.trigger(ProgressionChangedEvent {});
        }
    }
}
