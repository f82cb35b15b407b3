//! Axis-aligned 3D hitbox used for click picking.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct Hitbox {
    pub size: Vector3,
    /// Offset of the box center from the entity position.
    pub offset: Vector3,
}

impl Hitbox {
    /// Box of the given size, centered on the entity position.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vector3::new(width, height, depth),
            offset: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Box standing on the ground: its bottom face sits at the entity position.
    pub fn standing(footprint: f32, height: f32) -> Self {
        Self::new(footprint, height, footprint).with_offset(Vector3::new(0.0, height * 0.5, 0.0))
    }

    pub fn with_offset(mut self, offset: Vector3) -> Self {
        self.offset = offset;
        self
    }

    /// World-space center of the box.
    pub fn center(&self, position: Vector3) -> Vector3 {
        position + self.offset
    }

    /// Returns (min, max) corners of the box for a given entity position.
    pub fn aabb(&self, position: Vector3) -> (Vector3, Vector3) {
        let center = self.center(position);
        let half = self.size * 0.5;
        (center - half, center + half)
    }

    /// Slab test. Returns the ray parameter of the first hit in front of the
    /// origin, or `None` if the ray misses.
    pub fn ray_hit(&self, position: Vector3, origin: Vector3, direction: Vector3) -> Option<f32> {
        let (min, max) = self.aabb(position);
        let mut t_near = 0.0_f32;
        let mut t_far = f32::INFINITY;

        for (o, d, lo, hi) in [
            (origin.x, direction.x, min.x, max.x),
            (origin.y, direction.y, min.y, max.y),
            (origin.z, direction.z, min.z, max.z),
        ] {
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already be inside it
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (t0, t1) = {
                let a = (lo - o) * inv;
                let b = (hi - o) * inv;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}
