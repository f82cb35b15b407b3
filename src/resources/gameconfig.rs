//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration. The same
//! file may also carry `[resource.<key>]` sections, which are read by
//! [`ResourceKinds::from_ini`](crate::resources::resourcekinds::ResourceKinds::from_ini).
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [spawn]
//! min_x = -50
//! max_x = 50
//! min_z = -50
//! max_z = 50
//! count = 150
//!
//! [camera]
//! initial_distance = 10
//! initial_height = 5
//! min_distance = 3
//! max_distance = 20
//! rotation_speed = 0.01
//! zoom_speed = 1.0
//! fovy = 75
//!
//! [movement]
//! move_speed = 6.0
//! turn_speed = 3.0
//!
//! [debug]
//! enabled = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;
use thiserror::Error;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SPAWN_HALF_EXTENT: f32 = 50.0;
const DEFAULT_SPAWN_COUNT: u32 = 150;
const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;
const DEFAULT_CAMERA_HEIGHT: f32 = 5.0;
const DEFAULT_CAMERA_MIN_DISTANCE: f32 = 3.0;
const DEFAULT_CAMERA_MAX_DISTANCE: f32 = 20.0;
const DEFAULT_CAMERA_ROTATION_SPEED: f32 = 0.01;
const DEFAULT_CAMERA_ZOOM_SPEED: f32 = 1.0;
const DEFAULT_CAMERA_FOVY: f32 = 75.0;
const DEFAULT_MOVE_SPEED: f32 = 6.0;
const DEFAULT_TURN_SPEED: f32 = 3.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Errors raised while reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file: {0}")]
    Load(String),
    #[error("failed to save config file: {0}")]
    Save(String),
    #[error("invalid value for [{section}] {key}: {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("unknown item category '{0}'")]
    UnknownCategory(String),
    #[error("invalid resource kind '{key}': {message}")]
    InvalidKind { key: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a float value, mapping parse failures to [`ConfigError::InvalidValue`].
///
/// `nan` and `inf` parse as floats but are rejected.
pub(crate) fn ini_float(ini: &Ini, section: &str, key: &str) -> Result<Option<f32>, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message,
    };
    let value = ini.getfloat(section, key).map_err(invalid)?;
    match value {
        Some(v) if !(v as f32).is_finite() => Err(invalid(format!("{} is not a finite number", v))),
        v => Ok(v.map(|f| f as f32)),
    }
}

/// Read an unsigned integer value, mapping parse failures to [`ConfigError::InvalidValue`].
pub(crate) fn ini_uint(ini: &Ini, section: &str, key: &str) -> Result<Option<u32>, ConfigError> {
    let value = ini
        .getuint(section, key)
        .map_err(|message| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message,
        })?;
    value
        .map(|v| {
            u32::try_from(v).map_err(|_| ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: format!("{} does not fit in 32 bits", v),
            })
        })
        .transpose()
}

fn ini_bool(ini: &Ini, section: &str, key: &str) -> Result<Option<bool>, ConfigError> {
    ini.getbool(section, key)
        .map_err(|message| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message,
        })
}

/// Parse an INI document from a string.
pub fn parse_ini(text: &str) -> Result<Ini, ConfigError> {
    let mut ini = Ini::new();
    ini.read(text.to_string()).map_err(ConfigError::Load)?;
    Ok(ini)
}

/// Rectangular area on the ground plane where resource nodes are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        Self {
            min_x: -DEFAULT_SPAWN_HALF_EXTENT,
            max_x: DEFAULT_SPAWN_HALF_EXTENT,
            min_z: -DEFAULT_SPAWN_HALF_EXTENT,
            max_z: DEFAULT_SPAWN_HALF_EXTENT,
        }
    }
}

impl SpawnArea {
    /// Whether a ground position (x, z) lies inside the rectangle, bounds included.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

/// Orbit camera tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub initial_distance: f32,
    pub initial_height: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of orbit per pixel of horizontal mouse movement.
    pub rotation_speed: f32,
    /// Distance units per wheel notch.
    pub zoom_speed: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_distance: DEFAULT_CAMERA_DISTANCE,
            initial_height: DEFAULT_CAMERA_HEIGHT,
            min_distance: DEFAULT_CAMERA_MIN_DISTANCE,
            max_distance: DEFAULT_CAMERA_MAX_DISTANCE,
            rotation_speed: DEFAULT_CAMERA_ROTATION_SPEED,
            zoom_speed: DEFAULT_CAMERA_ZOOM_SPEED,
            fovy: DEFAULT_CAMERA_FOVY,
        }
    }
}

/// Game configuration resource.
///
/// Stores window settings, the spawn rectangle, camera and movement tunables.
/// It is read once at startup and treated as immutable afterwards.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Where resource nodes are placed.
    pub spawn_area: SpawnArea,
    /// Base node count handed to `ResourceManager::populate`.
    pub spawn_count: u32,
    pub camera: CameraSettings,
    /// Avatar speed in world units per second.
    pub move_speed: f32,
    /// How fast the avatar turns to face its walking direction, radians per second.
    pub turn_speed: f32,
    /// Start with debug overlays enabled.
    pub debug: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            spawn_area: SpawnArea::default(),
            spawn_count: DEFAULT_SPAWN_COUNT,
            camera: CameraSettings::default(),
            move_speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
            debug: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Read the configuration file into an INI document.
    pub fn read_ini(&self) -> Result<Ini, ConfigError> {
        let mut ini = Ini::new();
        ini.load(&self.config_path).map_err(ConfigError::Load)?;
        Ok(ini)
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Returns the
    /// parsed document so callers can read further sections from it.
    pub fn load_from_file(&mut self) -> Result<Ini, ConfigError> {
        let ini = self.read_ini()?;
        self.apply_ini(&ini)?;
        info!(
            "Loaded config from {:?}: {}x{} window, fps={}, spawn count={}",
            self.config_path,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.spawn_count
        );
        Ok(ini)
    }

    /// Override fields with the values present in `ini`.
    pub fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [window] section
        if let Some(width) = ini_uint(ini, "window", "width")? {
            self.window_width = width;
        }
        if let Some(height) = ini_uint(ini, "window", "height")? {
            self.window_height = height;
        }
        if let Some(fps) = ini_uint(ini, "window", "target_fps")? {
            self.target_fps = fps;
        }

        // [spawn] section
        let area = &mut self.spawn_area;
        if let Some(v) = ini_float(ini, "spawn", "min_x")? {
            area.min_x = v;
        }
        if let Some(v) = ini_float(ini, "spawn", "max_x")? {
            area.max_x = v;
        }
        if let Some(v) = ini_float(ini, "spawn", "min_z")? {
            area.min_z = v;
        }
        if let Some(v) = ini_float(ini, "spawn", "max_z")? {
            area.max_z = v;
        }
        if area.min_x > area.max_x || area.min_z > area.max_z {
            return Err(ConfigError::InvalidValue {
                section: "spawn".to_string(),
                key: "min_x/max_x/min_z/max_z".to_string(),
                message: "minimum bound exceeds maximum bound".to_string(),
            });
        }
        if let Some(count) = ini_uint(ini, "spawn", "count")? {
            self.spawn_count = count;
        }

        // [camera] section
        let camera = &mut self.camera;
        if let Some(v) = ini_float(ini, "camera", "initial_distance")? {
            camera.initial_distance = v;
        }
        if let Some(v) = ini_float(ini, "camera", "initial_height")? {
            camera.initial_height = v;
        }
        if let Some(v) = ini_float(ini, "camera", "min_distance")? {
            camera.min_distance = v;
        }
        if let Some(v) = ini_float(ini, "camera", "max_distance")? {
            camera.max_distance = v;
        }
        if let Some(v) = ini_float(ini, "camera", "rotation_speed")? {
            camera.rotation_speed = v;
        }
        if let Some(v) = ini_float(ini, "camera", "zoom_speed")? {
            camera.zoom_speed = v;
        }
        if let Some(v) = ini_float(ini, "camera", "fovy")? {
            camera.fovy = v;
        }
        if camera.min_distance > camera.max_distance {
            return Err(ConfigError::InvalidValue {
                section: "camera".to_string(),
                key: "min_distance".to_string(),
                message: "min_distance exceeds max_distance".to_string(),
            });
        }

        // [movement] section
        if let Some(v) = ini_float(ini, "movement", "move_speed")? {
            self.move_speed = v;
        }
        if let Some(v) = ini_float(ini, "movement", "turn_speed")? {
            self.turn_speed = v;
        }

        // [debug] section
        if let Some(enabled) = ini_bool(ini, "debug", "enabled")? {
            self.debug = enabled;
        }

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist. Resource kind sections are not
    /// written.
    pub fn save_to_file(&self) -> Result<(), ConfigError> {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        let area = self.spawn_area;
        config.set("spawn", "min_x", Some(area.min_x.to_string()));
        config.set("spawn", "max_x", Some(area.max_x.to_string()));
        config.set("spawn", "min_z", Some(area.min_z.to_string()));
        config.set("spawn", "max_z", Some(area.max_z.to_string()));
        config.set("spawn", "count", Some(self.spawn_count.to_string()));

        let camera = self.camera;
        config.set("camera", "initial_distance", Some(camera.initial_distance.to_string()));
        config.set("camera", "initial_height", Some(camera.initial_height.to_string()));
        config.set("camera", "min_distance", Some(camera.min_distance.to_string()));
        config.set("camera", "max_distance", Some(camera.max_distance.to_string()));
        config.set("camera", "rotation_speed", Some(camera.rotation_speed.to_string()));
        config.set("camera", "zoom_speed", Some(camera.zoom_speed.to_string()));
        config.set("camera", "fovy", Some(camera.fovy.to_string()));

        config.set("movement", "move_speed", Some(self.move_speed.to_string()));
        config.set("movement", "turn_speed", Some(self.turn_speed.to_string()));
        config.set("debug", "enabled", Some(self.debug.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| ConfigError::Save(e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
