//! Click picking.
//!
//! On a primary click a ray is cast from the camera through the cursor and
//! tested against the [`Hitbox`] of every node entity. The nearest hit, if it
//! still refers to a live node, triggers a
//! [`NodeClickedEvent`](crate::events::interaction::NodeClickedEvent).
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector3;

use crate::components::hitbox::Hitbox;
use crate::components::resourcenode::NodeHandle;
use crate::components::worldposition::WorldPosition;
use crate::events::interaction::NodeClickedEvent;
use crate::resources::input::InputState;
use crate::resources::orbitcamera::OrbitCamera;
use crate::resources::resourcemanager::{NodeId, ResourceManager};
use crate::resources::screensize::ScreenSize;

/// Nearest node whose hitbox the ray `origin + t * direction` crosses.
pub fn pick_node<'a>(
    origin: Vector3,
    direction: Vector3,
    candidates: impl IntoIterator<Item = (&'a NodeHandle, &'a WorldPosition, &'a Hitbox)>,
) -> Option<NodeId> {
    candidates
        .into_iter()
        .filter_map(|(handle, position, hitbox)| {
            hitbox
                .ray_hit(position.pos, origin, direction)
                .map(|t| (t, handle.0))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, id)| id)
}

pub fn node_picking_system(
    input: Res<InputState>,
    camera: Res<OrbitCamera>,
    screen: Res<ScreenSize>,
    manager: Res<ResourceManager>,
    nodes: Query<(&NodeHandle, &WorldPosition, &Hitbox)>,
    mut commands: Commands,
) {
    if !input.interact || screen.w <= 0 || screen.h <= 0 {
        return;
    }
    let (origin, direction) =
        camera.picking_ray(input.mouse_position, screen.w as f32, screen.h as f32);
    let Some(id) = pick_node(origin, direction, nodes.iter()) else {
        return;
    };
    debug!("Picked node {:?}", id);
    if manager.contains(id) {
        commands.trigger(NodeClickedEvent { node: id });
    }
}
