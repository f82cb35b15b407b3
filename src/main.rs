//! Gatherer main entry point.
//!
//! A 3D resource-gathering game written in Rust using:
//! - **raylib** for windowing, graphics, and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The player walks a ground plane, clicks trees and rocks to gather them and
//! levels up the matching skill. Depleted nodes come back after a delay.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (node handles, hitboxes, avatar, etc.)
//! - [`events`] – Event types (node clicks, progression changes, debug toggle)
//! - [`game`] – Session startup and shutdown
//! - [`resources`] – ECS resources (resource manager, progression, config, etc.)
//! - [`systems`] – ECS systems (input, camera, picking, respawn, rendering)
//!
//! # Main Loop
//!
//! 1. Parse the command line, load `config.ini` and the resource kind table
//! 2. Initialize the raylib window and the ECS world with its resources
//! 3. Register observers, load models and populate the world
//! 4. Run the main game loop:
//!    - Poll input, move the avatar, orbit the camera
//!    - Resolve clicks into gathering interactions
//!    - Respawn depleted nodes whose delay elapsed
//!    - Render the world, HUD and debug overlays
//! 5. Cancel pending respawns and remove every node on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod components;
mod events;
mod game;
mod resources;
mod systems;

use crate::events::interaction::node_interaction_observer;
use crate::events::progression::refresh_hud_observer;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::debugmode::DebugMode;
use crate::resources::gameconfig::{ConfigError, GameConfig};
use crate::resources::hud::HudText;
use crate::resources::input::InputState;
use crate::resources::modelstore::ModelStore;
use crate::resources::nodeentities::NodeEntities;
use crate::resources::orbitcamera::OrbitCamera;
use crate::resources::progression::Progression;
use crate::resources::resourcekinds::ResourceKinds;
use crate::resources::resourcemanager::ResourceManager;
use crate::resources::screensize::ScreenSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::avatar::avatar_movement;
use crate::systems::camera::camera_controller;
use crate::systems::input::update_input_state;
use crate::systems::picking::node_picking_system;
use crate::systems::render::render_system;
use crate::systems::respawn::respawn_system;
use crate::systems::time::update_world_time;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use configparser::ini::Ini;
use log::{error, info, warn};
use std::path::PathBuf;

/// Gatherer
#[derive(Parser)]
#[command(version, about = "Walk around, chop trees, mine rocks, level up.")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for node placement; random when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Write the resource kind table as JSON and exit.
    /// Optionally provide a path (default: kinds.json).
    #[arg(long, value_name = "PATH")]
    dump_kinds: Option<Option<PathBuf>>,
}

/// Read the configuration file and the kind table it may define.
///
/// A missing or unreadable file keeps the defaults; malformed values are
/// errors.
fn load_configuration(path: PathBuf) -> Result<(GameConfig, ResourceKinds), ConfigError> {
    let mut config = GameConfig::with_path(path);
    let ini = match config.load_from_file() {
        Ok(ini) => ini,
        Err(ConfigError::Load(e)) => {
            warn!(
                "Could not read {:?} ({}), using default settings",
                config.config_path, e
            );
            Ini::new()
        }
        Err(e) => return Err(e),
    };
    let kinds = ResourceKinds::from_ini(&ini)?;
    Ok((config, kinds))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (config, kinds) = match load_configuration(cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Early-exit: dump the kind table and quit (no window needed)
    if let Some(maybe_path) = cli.dump_kinds {
        let path = maybe_path.unwrap_or_else(|| PathBuf::from("kinds.json"));
        if let Err(e) = kinds.write_json(&path) {
            error!("Error writing kind table: {}", e);
            std::process::exit(1);
        }
        println!("Resource kinds written to {}", path.display());
        return;
    }

    info!("Starting Gatherer with {} resource kinds", kinds.len());
    // --------------- Raylib window ---------------
    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .resizable()
        .title("Gatherer")
        .build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut manager = ResourceManager::new(kinds, config.spawn_area);
    if let Some(seed) = cli.seed {
        manager = manager.with_seed(seed);
    }

    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(ScreenSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });
    world.insert_resource(InputState::default());
    world.insert_resource(OrbitCamera::from_settings(&config.camera));
    world.insert_resource(Progression::new());
    world.insert_resource(HudText::default());
    world.insert_resource(NodeEntities::new());
    world.insert_resource(manager);
    if config.debug {
        world.insert_resource(DebugMode {});
    }
    world.insert_resource(config);
    world.insert_non_send_resource(ModelStore::new());
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(node_interaction_observer));
    world.spawn(Observer::new(refresh_hud_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut startup = Schedule::default();
    startup.add_systems((game::load_models, game::populate_world).chain());
    startup.run(&mut world);

    let mut update = Schedule::default();
    update.add_systems(
        (
            update_input_state,
            avatar_movement,
            camera_controller,
            node_picking_system,
            respawn_system,
            render_system,
        )
            .chain(),
    );

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        // Update screen size each frame (may change due to resize)
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut screen_size = world.resource_mut::<ScreenSize>();
            screen_size.w = new_w;
            screen_size.h = new_h;
        }
    }

    let mut teardown = Schedule::default();
    teardown.add_systems(game::shutdown);
    teardown.run(&mut world);
}
