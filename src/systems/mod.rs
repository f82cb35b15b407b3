//! Game systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`avatar`] – camera-relative avatar movement and facing
//! - [`camera`] – orbit/zoom the camera and keep it on the avatar
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`picking`] – turn a click into a [`NodeClickedEvent`](crate::events::interaction::NodeClickedEvent)
//! - [`render`] – draw world, HUD and debug overlays using Raylib
//! - [`respawn`] – bring back depleted nodes once their delay elapsed
//! - [`time`] – update simulation time and delta

pub mod avatar;
pub mod camera;
pub mod input;
pub mod picking;
pub mod render;
pub mod respawn;
pub mod time;
