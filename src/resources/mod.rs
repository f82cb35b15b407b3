//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. The gameplay core (`resourcekinds`,
//! `progression`, `respawnqueue`, `resourcemanager`) does no rendering and can
//! be driven headless.
//!
//! Overview
//! - `debugmode` – presence toggles optional debug overlays
//! - `gameconfig` – settings loaded from the INI file, plus `ConfigError`
//! - `hud` – text lines shown on screen
//! - `input` – per-frame keyboard and mouse state relevant to the game
//! - `modelstore` – loaded 3D models keyed by asset path
//! - `nodeentities` – node id to entity map and the ECS node view
//! - `orbitcamera` – third-person camera and picking rays
//! - `progression` – inventory and skill levels
//! - `resourcekinds` – static table of gatherable kinds
//! - `resourcemanager` – live nodes, interactions and respawns
//! - `respawnqueue` – time-ordered respawn tickets
//! - `screensize` – current framebuffer dimensions in pixels
//! - `worldtime` – simulation time and delta
pub mod debugmode;
pub mod gameconfig;
pub mod hud;
pub mod input;
pub mod modelstore;
pub mod nodeentities;
pub mod orbitcamera;
pub mod progression;
pub mod resourcekinds;
pub mod resourcemanager;
pub mod respawnqueue;
pub mod screensize;
pub mod worldtime;
