//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that debug rendering should
//! be enabled: hitbox wireframes, FPS and node counts. Remove it to disable.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws debug overlays.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
