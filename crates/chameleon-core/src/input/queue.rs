/// Browser key codes the game reacts to.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const RIGHT: u32 = 39;
}

/// Input events pushed by the browser layer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// The cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A button in the UI overlay (help, restart). `kind` identifies it.
    Custom { kind: u32, a: f32 },
}

/// Events queued since the last frame.
/// The browser writes into the queue; the game reads it during update and the
/// runner drains it afterwards.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Held state of the two aiming keys. Holding a key keeps nudging the aim
/// every frame until it is released; holding both cancels out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    /// Fold a key event into the held state. Returns true if it was an aim key.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let (key_code, down) = match *event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
            _ => return false,
        };
        match key_code {
            keys::LEFT => self.left = down,
            keys::RIGHT => self.right = down,
            _ => return false,
        }
        true
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
