//! Event types and observers used by the game.
//!
//! Events provide a decoupled way for systems to communicate without direct
//! dependencies. Each submodule pairs an event with the observer reacting to
//! it.
//!
//! Submodules:
//! - [`interaction`] – a click on a resource node, applied through the resource manager
//! - [`progression`] – inventory/skill changes, refreshes the HUD
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
pub mod interaction;
pub mod progression;
pub mod switchdebug;
