use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton, PointerButtonEvent};

/// Per-frame input deltas.
///
/// `InputState` provides the held keys/buttons and pointer position.
/// `InputFrame` provides the transitions that happened since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Button presses with their cursor positions, in arrival order.
    pub clicks: Vec<PointerButtonEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.clicks.clear();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Cursor positions of every `button` press this frame.
    pub fn clicks_of(&self, button: MouseButton) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.clicks
            .iter()
            .filter(move |c| c.button == button)
            .map(|c| (c.x, c.y))
    }
}
