use bevy_ecs::prelude::Component;

/// Sample rate of the avatar's skeletal animation clips.
pub const WALK_ANIMATION_FPS: f32 = 60.0;

/// The player-controlled character.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct Avatar {
    /// Heading in radians around the Y axis; 0 faces +Z.
    pub facing: f32,
    /// True while movement input is held.
    pub walking: bool,
    /// Seconds the current walk has lasted; reset when the avatar stops.
    pub walk_time: f32,
}

impl Avatar {
    /// Advance or reset the walk clock for this frame.
    pub fn set_walking(&mut self, walking: bool, delta: f32) {
        self.walking = walking;
        if walking {
            self.walk_time += delta;
        } else {
            self.walk_time = 0.0;
        }
    }

    /// Pose index into a walk clip of `frame_count` frames.
    ///
    /// Loops while walking; an idle avatar holds the first frame.
    pub fn walk_frame(&self, frame_count: i32) -> i32 {
        if !self.walking || frame_count <= 0 {
            return 0;
        }
        ((self.walk_time * WALK_ANIMATION_FPS) as i32).rem_euclid(frame_count)
    }
}
