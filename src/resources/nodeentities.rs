//! Mapping from resource nodes to the entities that represent them.
//!
//! Picking resolves a click to an entity, the entity carries a
//! [`NodeHandle`], and the handle addresses the node in the
//! [`ResourceManager`]. This resource keeps the reverse direction so that a
//! node leaving the live set can despawn its entity.
//!
//! [`ResourceManager`]: crate::resources::resourcemanager::ResourceManager

use bevy_ecs::prelude::*;
use log::warn;
use raylib::prelude::Color;
use rustc_hash::FxHashMap;

use crate::components::hitbox::Hitbox;
use crate::components::resourcenode::{FallbackShape, NodeHandle, NodeVisual};
use crate::components::worldposition::WorldPosition;
use crate::resources::progression::Skill;
use crate::resources::resourcekinds::ResourceKind;
use crate::resources::resourcemanager::{NodeId, NodeView, ResourceNode};

/// `NodeId -> Entity` map for live nodes.
#[derive(Resource, Default, Debug)]
pub struct NodeEntities {
    map: FxHashMap<NodeId, Entity>,
}

impl NodeEntities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, entity: Entity) {
        self.map.insert(id, entity);
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Entity> {
        self.map.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<Entity> {
        self.map.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// [`NodeView`] that mirrors nodes as ECS entities through [`Commands`].
pub struct CommandsNodeView<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub entities: &'a mut NodeEntities,
}

impl<'a, 'w, 's> CommandsNodeView<'a, 'w, 's> {
    pub fn new(commands: &'a mut Commands<'w, 's>, entities: &'a mut NodeEntities) -> Self {
        Self { commands, entities }
    }
}

impl NodeView for CommandsNodeView<'_, '_, '_> {
    fn attach(&mut self, node: &ResourceNode, kind: &ResourceKind) {
        let (shape, color) = match kind.skill {
            Skill::Lumberjack => (FallbackShape::Column, Color::DARKGREEN),
            Skill::Mining => (FallbackShape::Block, Color::GRAY),
        };
        let entity = self
            .commands
            .spawn((
                NodeHandle(node.id),
                WorldPosition { pos: node.position },
                Hitbox::standing(kind.footprint, kind.height),
                NodeVisual {
                    model: kind.model.clone(),
                    shape,
                    color,
                    footprint: kind.footprint,
                    height: kind.height,
                },
            ))
            .id();
        self.entities.insert(node.id, entity);
    }

    fn release(&mut self, id: NodeId) {
        match self.entities.remove(id) {
            Some(entity) => {
                self.commands.entity(entity).try_despawn();
            }
            None => warn!("No entity found for released node {:?}", id),
        }
    }
}
