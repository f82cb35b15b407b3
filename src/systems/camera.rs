//! Orbit camera control.
//!
//! Keeps the [`OrbitCamera`] centered on the avatar, orbits it while the
//! rotation button is held and zooms with the mouse wheel.
use bevy_ecs::prelude::*;

use crate::components::avatar::Avatar;
use crate::components::worldposition::WorldPosition;
use crate::resources::input::InputState;
use crate::resources::orbitcamera::OrbitCamera;

pub fn camera_controller(
    input: Res<InputState>,
    mut camera: ResMut<OrbitCamera>,
    avatar: Query<&WorldPosition, With<Avatar>>,
) {
    if input.is_rotating_camera() {
        camera.rotate(input.mouse_delta.x);
    }
    if input.wheel != 0.0 {
        camera.zoom(input.wheel);
    }
    if let Ok(pos) = avatar.single() {
        camera.target = pos.pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::CameraSettings;
    use raylib::prelude::Vector2;

    fn setup(input: InputState) -> World {
        let mut world = World::new();
        world.insert_resource(input);
        world.insert_resource(OrbitCamera::from_settings(&CameraSettings::default()));
        world.spawn((Avatar::default(), WorldPosition::new(4.0, 0.0, -2.0)));
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(camera_controller);
        schedule.run(world);
    }

    #[test]
    fn test_camera_follows_avatar() {
        let mut world = setup(InputState::default());
        run(&mut world);
        let cam = world.resource::<OrbitCamera>();
        assert_eq!(cam.target.x, 4.0);
        assert_eq!(cam.target.z, -2.0);
        assert_eq!(cam.angle, 0.0);
    }

    #[test]
    fn test_mouse_delta_rotates_only_while_held() {
        let mut input = InputState::default();
        input.mouse_delta = Vector2 { x: 10.0, y: 0.0 };
        let mut world = setup(input.clone());
        run(&mut world);
        assert_eq!(world.resource::<OrbitCamera>().angle, 0.0);

        input.rotating_camera = true;
        world.insert_resource(input);
        run(&mut world);
        let cam = world.resource::<OrbitCamera>();
        assert!((cam.angle + 10.0 * cam.rotation_speed).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_zooms_in() {
        let mut input = InputState::default();
        input.wheel = 2.0;
        let mut world = setup(input);
        run(&mut world);
        assert_eq!(world.resource::<OrbitCamera>().distance, 8.0);
    }
}
