use std::collections::HashSet;
use glam::Vec2;

/// Input event types the runner understands.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the host UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host writes events into the queue; the runner drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame view of input, folded from queued events.
///
/// "Pressed" and "released" are true only during the frame the event arrived;
/// "held" persists until the matching release.
#[derive(Debug, Default)]
pub struct InputState {
    held_keys: HashSet<u32>,
    pressed_keys: HashSet<u32>,
    released_keys: HashSet<u32>,
    pointer: Vec2,
    pointer_held: bool,
    pointer_pressed: bool,
    pointer_released: bool,
    custom: Vec<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the state.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_held = true;
                self.pointer_pressed = true;
            }
            InputEvent::PointerUp { x, y } => {
                self.pointer = Vec2::new(x, y);
                self.pointer_held = false;
                self.pointer_released = true;
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = Vec2::new(x, y);
            }
            InputEvent::KeyDown { key_code } => {
                if self.held_keys.insert(key_code) {
                    self.pressed_keys.insert(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if self.held_keys.remove(&key_code) {
                    self.released_keys.insert(key_code);
                }
            }
            InputEvent::Custom { .. } => self.custom.push(event),
        }
    }

    /// Clear the per-frame flags. Held state and pointer position persist.
    pub fn end_frame(&mut self) {
        self.pressed_keys.clear();
        self.released_keys.clear();
        self.pointer_pressed = false;
        self.pointer_released = false;
        self.custom.clear();
    }

    pub fn is_pressed(&self, key_code: u32) -> bool {
        self.pressed_keys.contains(&key_code)
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held_keys.contains(&key_code)
    }

    pub fn is_released(&self, key_code: u32) -> bool {
        self.released_keys.contains(&key_code)
    }

    /// Pointer position in world coordinates.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    pub fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    pub fn pointer_released(&self) -> bool {
        self.pointer_released
    }

    /// Custom events received this frame.
    pub fn custom_events(&self) -> &[InputEvent] {
        &self.custom
    }
}
