/// Pointer events the field understands, in surface-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The pointer moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A press was released anywhere.
    PointerUp,
    /// The pointer left the surface.
    PointerLeave,
}

/// A queue of input events.
/// Browser listeners push at any time; the field drains once at frame start,
/// so each frame sees a stable snapshot.
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

    /// Replace any pending moves and leaves with `event`, keeping releases.
    /// Only the latest pointer position matters once drawing resumes.
    pub fn replace_position(&mut self, event: InputEvent) {
        self.events.retain(|e| matches!(e, InputEvent::PointerUp));
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
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
