//! Loaded 3D models keyed by asset path.
//!
//! Lives in the world as a non-send resource because raylib models are tied
//! to the GL context. A path that failed to load is simply absent; renderers
//! fall back to primitive shapes. Skeletal animation clips are stored next to
//! the model they were loaded from.

use log::{info, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct ModelStore {
    map: FxHashMap<String, Model>,
    animations: FxHashMap<String, Vec<ModelAnimation>>,
}

impl ModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path` unless already present. Returns whether the model is available.
    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        if self.map.contains_key(path) {
            return true;
        }
        match rl.load_model(thread, path) {
            Ok(model) => {
                info!("Loaded model {}", path);
                self.map.insert(path.to_string(), model);
                true
            }
            Err(e) => {
                warn!("Failed to load model {}: {}. Using fallback shape.", path, e);
                false
            }
        }
    }

    /// Load the animation clips embedded in `path`. Returns the clip count.
    pub fn load_animations(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        path: &str,
    ) -> usize {
        if let Some(clips) = self.animations.get(path) {
            return clips.len();
        }
        match rl.load_model_animations(thread, path) {
            Ok(clips) => {
                info!("Loaded {} animation clip(s) from {}", clips.len(), path);
                let count = clips.len();
                self.animations.insert(path.to_string(), clips);
                count
            }
            Err(e) => {
                warn!("Failed to load animations from {}: {}", path, e);
                0
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&Model> {
        self.map.get(path)
    }

    /// Frame count of the first clip of `path`, if any.
    pub fn clip_frames(&self, path: &str) -> Option<i32> {
        self.animations
            .get(path)
            .and_then(|clips| clips.first())
            .map(|clip| clip.frameCount)
    }

    /// Pose the model at `path` on `frame` of its first clip.
    pub fn pose(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, path: &str, frame: i32) {
        let (Some(model), Some(clip)) = (
            self.map.get_mut(path),
            self.animations.get(path).and_then(|clips| clips.first()),
        ) else {
            return;
        };
        rl.update_model_animation(thread, model, clip, frame);
    }
}
