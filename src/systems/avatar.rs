//! Avatar movement.
//!
//! Direction keys move the avatar on the ground plane relative to where the
//! camera looks. Diagonals are normalized so they are not faster than
//! straight movement. The avatar turns towards its walking direction at the
//! configured turn speed.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector3;
use std::f32::consts::{PI, TAU};

use crate::components::avatar::Avatar;
use crate::components::worldposition::WorldPosition;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::orbitcamera::OrbitCamera;
use crate::resources::worldtime::WorldTime;

/// Unit ground-plane direction requested by the held keys, if any.
pub fn movement_direction(input: &InputState, camera: &OrbitCamera) -> Option<Vector3> {
    let forward = camera.ground_forward();
    let left = camera.ground_left();
    let mut dir = Vector3::new(0.0, 0.0, 0.0);
    if input.forward() {
        dir = dir + forward;
    }
    if input.back() {
        dir = dir - forward;
    }
    if input.left() {
        dir = dir + left;
    }
    if input.right() {
        dir = dir - left;
    }
    if dir.length() < f32::EPSILON {
        None
    } else {
        Some(dir.normalized())
    }
}

/// Rotate `current` towards `target` by at most `max_step` radians along the
/// shorter arc.
pub fn turn_towards(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = (target - current + PI).rem_euclid(TAU) - PI;
    if diff.abs() <= max_step {
        target
    } else {
        current + max_step.copysign(diff)
    }
}

pub fn avatar_movement(
    input: Res<InputState>,
    camera: Res<OrbitCamera>,
    time: Res<WorldTime>,
    config: Res<GameConfig>,
    mut query: Query<(&mut WorldPosition, &mut Avatar)>,
) {
    let direction = movement_direction(&input, &camera);
    for (mut position, mut avatar) in query.iter_mut() {
        match direction {
            Some(dir) => {
                position.pos = position.pos + dir * (config.move_speed * time.delta);
                let target = dir.x.atan2(dir.z);
                avatar.facing = turn_towards(avatar.facing, target, config.turn_speed * time.delta);
                avatar.set_walking(true, time.delta);
            }
            None => avatar.set_walking(false, time.delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::gameconfig::CameraSettings;
    use raylib::prelude::KeyboardKey;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_settings(&CameraSettings::default())
    }

    #[test]
    fn test_no_keys_no_direction() {
        assert!(movement_direction(&InputState::default(), &camera()).is_none());
    }

    #[test]
    fn test_forward_moves_away_from_camera() {
        let mut input = InputState::default();
        input.handle_key(KeyboardKey::KEY_W, true);
        let dir = movement_direction(&input, &camera()).unwrap();
        // Default camera sits on +Z looking towards -Z
        assert!((dir.z + 1.0).abs() < 1e-5);
        assert!(dir.x.abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = InputState::default();
        input.handle_key(KeyboardKey::KEY_W, true);
        input.handle_key(KeyboardKey::KEY_D, true);
        let dir = movement_direction(&input, &camera()).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.x > 0.0 && dir.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::default();
        input.handle_key(KeyboardKey::KEY_A, true);
        input.handle_key(KeyboardKey::KEY_RIGHT, true);
        assert!(movement_direction(&input, &camera()).is_none());
    }

    #[test]
    fn test_turn_towards_takes_short_arc() {
        assert_eq!(turn_towards(0.0, 0.5, 1.0), 0.5);
        let stepped = turn_towards(0.0, 1.0, 0.25);
        assert!((stepped - 0.25).abs() < 1e-6);
        // From just below +PI to just above -PI is a short hop across the seam
        let next = turn_towards(3.0, -3.0, 0.1);
        assert!(next > 3.0);
    }

    #[test]
    fn test_avatar_movement_system() {
        let mut world = World::new();
        let mut input = InputState::default();
        input.handle_key(KeyboardKey::KEY_S, true);
        world.insert_resource(input);
        world.insert_resource(camera());
        world.insert_resource(GameConfig::new());
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..WorldTime::default()
        });
        let e = world
            .spawn((Avatar::default(), WorldPosition::new(0.0, 0.0, 0.0)))
            .id();

        let mut schedule = Schedule::default();
        schedule.add_systems(avatar_movement);
        schedule.run(&mut world);

        let pos = world.get::<WorldPosition>(e).unwrap().pos;
        // 6 units/s for half a second towards the camera (+Z)
        assert!((pos.z - 3.0).abs() < 1e-4);
        let avatar = *world.get::<Avatar>(e).unwrap();
        assert!(avatar.walking);
        assert_eq!(avatar.walk_time, 0.5);

        // Releasing the key stops the walk cycle
        world.resource_mut::<InputState>().handle_key(KeyboardKey::KEY_S, false);
        schedule.run(&mut world);
        let avatar = *world.get::<Avatar>(e).unwrap();
        assert!(!avatar.walking);
        assert_eq!(avatar.walk_frame(30), 0);
    }
}
