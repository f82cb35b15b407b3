//! Simulation clock.
//!
//! `elapsed` is the time source for respawn tickets; advancing it (through
//! [`update_world_time`](crate::systems::time::update_world_time)) is what
//! makes depleted nodes come back.
use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled seconds of the current frame.
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
