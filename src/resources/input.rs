//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input state the game cares about and exposes it to
//! systems via the [`InputState`] resource. WASD is the primary movement set
//! and the arrow keys mirror it. Holding the right mouse button orbits the
//! camera, a left click gathers.
//!
//! State is fed through [`InputState::handle_key`] and
//! [`InputState::handle_mouse_button`]; the raylib polling system in
//! [`crate::systems::input`] is one such feeder, tests are another.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Released state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }

    /// Record a new down/up state, deriving the edge flags.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    pub mode_debug: BoolState,
    /// Right mouse button held: mouse movement orbits the camera.
    pub rotating_camera: bool,
    /// Left mouse button went down this frame.
    pub interact: bool,
    pub mouse_position: Vector2,
    pub mouse_delta: Vector2,
    /// Wheel movement this frame; positive scrolls away from the user.
    pub wheel: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
            rotating_camera: false,
            interact: false,
            mouse_position: Vector2 { x: 0.0, y: 0.0 },
            mouse_delta: Vector2 { x: 0.0, y: 0.0 },
            wheel: 0.0,
        }
    }
}

impl InputState {
    fn bindings_mut(&mut self) -> [&mut BoolState; 9] {
        [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.secondarydirection_up,
            &mut self.secondarydirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.mode_debug,
        ]
    }

    fn bindings(&self) -> [&BoolState; 9] {
        [
            &self.maindirection_up,
            &self.maindirection_left,
            &self.maindirection_down,
            &self.maindirection_right,
            &self.secondarydirection_up,
            &self.secondarydirection_down,
            &self.secondarydirection_left,
            &self.secondarydirection_right,
            &self.mode_debug,
        ]
    }

    /// Every key with a binding, for pollers.
    pub fn bound_keys(&self) -> impl Iterator<Item = KeyboardKey> + '_ {
        self.bindings().into_iter().map(|b| b.key_binding)
    }

    /// Apply a key down/up event. Unbound keys are ignored.
    pub fn handle_key(&mut self, key: KeyboardKey, down: bool) {
        for binding in self.bindings_mut() {
            if binding.key_binding == key {
                binding.set(down);
            }
        }
    }

    /// Apply a mouse button down/up event.
    pub fn handle_mouse_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::MOUSE_BUTTON_RIGHT => self.rotating_camera = down,
            MouseButton::MOUSE_BUTTON_LEFT => self.interact = down,
            _ => {}
        }
    }

    /// Whether `key` is bound and currently held.
    pub fn is_key_pressed(&self, key: KeyboardKey) -> bool {
        self.bindings()
            .into_iter()
            .any(|b| b.key_binding == key && b.active)
    }

    pub fn is_rotating_camera(&self) -> bool {
        self.rotating_camera
    }

    pub fn forward(&self) -> bool {
        self.maindirection_up.active || self.secondarydirection_up.active
    }

    pub fn back(&self) -> bool {
        self.maindirection_down.active || self.secondarydirection_down.active
    }

    pub fn left(&self) -> bool {
        self.maindirection_left.active || self.secondarydirection_left.active
    }

    pub fn right(&self) -> bool {
        self.maindirection_right.active || self.secondarydirection_right.active
    }

    /// Clear per-frame values (click, mouse delta, wheel) before polling.
    pub fn begin_frame(&mut self) {
        self.interact = false;
        self.mouse_delta = Vector2 { x: 0.0, y: 0.0 };
        self.wheel = 0.0;
    }
}
