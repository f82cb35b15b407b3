//! ECS side of a live resource node.
//!
//! The [`ResourceManager`](crate::resources::resourcemanager::ResourceManager)
//! owns the authoritative node state. Each live node is mirrored by one entity
//! carrying a [`NodeHandle`] back to it, plus a [`NodeVisual`] describing how
//! to draw it.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

use crate::resources::resourcemanager::NodeId;

/// Links an entity to its node in the resource manager.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub NodeId);

/// Primitive drawn when a node's model is unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackShape {
    /// Upright cylinder (trees).
    Column,
    /// Squat box (rocks).
    Block,
}

#[derive(Component, Clone, Debug)]
pub struct NodeVisual {
    /// Key into the [`ModelStore`](crate::resources::modelstore::ModelStore).
    pub model: String,
    pub shape: FallbackShape,
    pub color: Color,
    pub footprint: f32,
    pub height: f32,
}
