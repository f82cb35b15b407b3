//! Screen size resource.
//!
//! Stores the current framebuffer dimensions in pixels. Picking needs them to
//! turn a cursor position into a camera ray; the main loop refreshes them
//! every frame to follow window resizes.

use bevy_ecs::prelude::Resource;

/// Current screen size in pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
