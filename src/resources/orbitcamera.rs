//! Third-person camera orbiting the avatar.
//!
//! The camera sits `distance` units away from its target on the ground plane,
//! `height` units above it, at heading `angle` (radians around +Y). It always
//! looks at the target. Besides producing the raylib [`Camera3D`] for drawing,
//! it builds picking rays through screen positions.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

use crate::resources::gameconfig::CameraSettings;

#[derive(Resource, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub angle: f32,
    pub distance: f32,
    pub height: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotation_speed: f32,
    pub zoom_speed: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Point the camera looks at, normally the avatar position.
    pub target: Vector3,
}

impl OrbitCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            angle: 0.0,
            distance: settings
                .initial_distance
                .clamp(settings.min_distance, settings.max_distance),
            height: settings.initial_height,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            rotation_speed: settings.rotation_speed,
            zoom_speed: settings.zoom_speed,
            fovy: settings.fovy,
            target: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    /// Orbit by a horizontal mouse movement in pixels.
    pub fn rotate(&mut self, mouse_dx: f32) {
        self.angle -= mouse_dx * self.rotation_speed;
    }

    /// Zoom by wheel notches; scrolling away from the user moves closer.
    pub fn zoom(&mut self, wheel: f32) {
        self.distance =
            (self.distance - wheel * self.zoom_speed).clamp(self.min_distance, self.max_distance);
    }

    pub fn eye(&self) -> Vector3 {
        Vector3::new(
            self.target.x + self.angle.sin() * self.distance,
            self.target.y + self.height,
            self.target.z + self.angle.cos() * self.distance,
        )
    }

    /// Unit forward vector projected on the ground plane.
    pub fn ground_forward(&self) -> Vector3 {
        Vector3::new(-self.angle.sin(), 0.0, -self.angle.cos())
    }

    /// Unit vector pointing to the left of [`ground_forward`](Self::ground_forward).
    pub fn ground_left(&self) -> Vector3 {
        let f = self.ground_forward();
        // up x forward
        Vector3::new(f.z, 0.0, -f.x)
    }

    pub fn camera3d(&self) -> Camera3D {
        Camera3D::perspective(
            self.eye(),
            self.target,
            Vector3::new(0.0, 1.0, 0.0),
            self.fovy,
        )
    }

    /// Ray through screen pixel `screen_pos`: `(origin, unit direction)`.
    pub fn picking_ray(
        &self,
        screen_pos: Vector2,
        screen_w: f32,
        screen_h: f32,
    ) -> (Vector3, Vector3) {
        let eye = self.eye();
        let forward = (self.target - eye).normalized();
        let right = forward.cross(Vector3::new(0.0, 1.0, 0.0)).normalized();
        let up = right.cross(forward);

        let ndc_x = 2.0 * screen_pos.x / screen_w - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_pos.y / screen_h;
        let tan_half = (self.fovy.to_radians() * 0.5).tan();
        let aspect = screen_w / screen_h;

        let direction =
            (forward + right * (ndc_x * tan_half * aspect) + up * (ndc_y * tan_half)).normalized();
        (eye, direction)
    }
}
