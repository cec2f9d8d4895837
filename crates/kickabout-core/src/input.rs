use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keyboard state, fed by host key events and sampled once per frame.
///
/// Key identifiers are DOM `KeyboardEvent.code` strings (`"KeyW"`,
/// `"ArrowUp"`, `"Space"`).
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held down.
    pub keys_down: HashSet<String>,
    /// Keys pressed this frame (cleared each frame).
    pub keys_just_pressed: HashSet<String>,
    /// Keys released this frame (cleared each frame).
    pub keys_just_released: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key down event. Returns `true` for a fresh press and
    /// `false` for auto-repeat of a key that is already held.
    pub fn on_key_down(&mut self, code: &str) -> bool {
        if self.keys_down.insert(code.to_string()) {
            self.keys_just_pressed.insert(code.to_string());
            true
        } else {
            false
        }
    }

    /// Register a key up event.
    pub fn on_key_up(&mut self, code: &str) {
        self.keys_down.remove(code);
        self.keys_just_released.insert(code.to_string());
    }

    /// Check if a key is currently held.
    pub fn is_key_down(&self, code: &str) -> bool {
        self.keys_down.contains(code)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_just_pressed(&self, code: &str) -> bool {
        self.keys_just_pressed.contains(code)
    }

    /// Check if a key was released this frame.
    pub fn is_key_just_released(&self, code: &str) -> bool {
        self.keys_just_released.contains(code)
    }

    /// Release everything, e.g. when the host window loses focus.
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }

    /// Clear per-frame state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }
}

/// Which key codes drive which action. Each direction accepts several codes
/// so WASD and the arrow keys work interchangeably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub kick: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: vec!["KeyW".to_string(), "ArrowUp".to_string()],
            down: vec!["KeyS".to_string(), "ArrowDown".to_string()],
            left: vec!["KeyA".to_string(), "ArrowLeft".to_string()],
            right: vec!["KeyD".to_string(), "ArrowRight".to_string()],
            kick: "Space".to_string(),
        }
    }
}

impl KeyBindings {
    /// Movement direction from the held keys, on the ground plane: `x` is
    /// left/right, `y` maps to world `z` with "up" pointing towards `-z`.
    ///
    /// The result is not normalized; opposing keys cancel to zero.
    pub fn movement_direction(&self, input: &InputState) -> Vec2 {
        let held = |codes: &[String]| codes.iter().any(|c| input.is_key_down(c));
        let mut direction = Vec2::ZERO;
        if held(&self.up) {
            direction.y -= 1.0;
        }
        if held(&self.down) {
            direction.y += 1.0;
        }
        if held(&self.left) {
            direction.x -= 1.0;
        }
        if held(&self.right) {
            direction.x += 1.0;
        }
        direction
    }

    pub fn is_kick(&self, code: &str) -> bool {
        self.kick == code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_and_up() {
        let mut input = InputState::new();
        assert!(input.on_key_down("KeyA"));
        assert!(input.is_key_down("KeyA"));
        assert!(input.is_key_just_pressed("KeyA"));

        input.end_frame();
        assert!(input.is_key_down("KeyA"));
        assert!(!input.is_key_just_pressed("KeyA"));

        input.on_key_up("KeyA");
        assert!(!input.is_key_down("KeyA"));
        assert!(input.is_key_just_released("KeyA"));
    }

    #[test]
    fn repeated_key_down_is_not_a_fresh_press() {
        let mut input = InputState::new();
        assert!(input.on_key_down("Space"));
        assert!(!input.on_key_down("Space"));
        assert_eq!(input.keys_just_pressed.len(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputState::new();
        input.on_key_down("KeyW");
        input.on_key_down("KeyD");
        input.clear();
        assert!(input.keys_down.is_empty());
        assert!(input.keys_just_pressed.is_empty());
    }

    #[test]
    fn wasd_and_arrows_are_equivalent() {
        let bindings = KeyBindings::default();
        let mut wasd = InputState::new();
        wasd.on_key_down("KeyW");
        wasd.on_key_down("KeyD");
        let mut arrows = InputState::new();
        arrows.on_key_down("ArrowUp");
        arrows.on_key_down("ArrowRight");

        assert_eq!(bindings.movement_direction(&wasd), Vec2::new(1.0, -1.0));
        assert_eq!(
            bindings.movement_direction(&wasd),
            bindings.movement_direction(&arrows)
        );
    }

    #[test]
    fn opposing_keys_cancel() {
        let bindings = KeyBindings::default();
        let mut input = InputState::new();
        input.on_key_down("KeyA");
        input.on_key_down("ArrowRight");
        assert_eq!(bindings.movement_direction(&input), Vec2::ZERO);
    }

    #[test]
    fn kick_matches_only_its_binding() {
        let bindings = KeyBindings::default();
        assert!(bindings.is_kick("Space"));
        assert!(!bindings.is_kick("KeyW"));
    }

    #[test]
    fn bindings_parse_with_partial_overrides() {
        let bindings: KeyBindings = toml::from_str(r#"kick = "KeyK""#).unwrap();
        assert_eq!(bindings.kick, "KeyK");
        assert_eq!(bindings.up, KeyBindings::default().up);
    }
}
