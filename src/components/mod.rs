//! ECS components for entities.
//!
//! Submodules overview:
//! - [`avatar`] – the player character's facing and walk state
//! - [`hitbox`] – axis-aligned 3D box used for click picking
//! - [`resourcenode`] – link from an entity to its resource node, plus how to draw it
//! - [`worldposition`] – world-space position on the ground plane

pub mod avatar;
pub mod hitbox;
pub mod resourcenode;
pub mod worldposition;
