/// Input event types the simulation understands.
/// Coordinates are surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse/pen cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// The cursor left the surface.
    PointerLeave,
    /// A finger touched the surface.
    TouchStart,
    /// The primary touch moved to (x, y).
    TouchMove { x: f32, y: f32 },
    /// The last finger lifted.
    TouchEnd,
    /// The host viewport changed size.
    Resize { width: u32, height: u32 },
}

impl InputEvent {
    /// Whether the host should cancel the platform's default handling
    /// (scrolling, for touch moves) when delivering this event.
    pub fn suppresses_default(&self) -> bool {
        matches!(self, InputEvent::TouchMove { .. })
    }
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them once per frame.
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

    /// Drop all pending events.
    pub fn clear(&mut self) {
        self.events.clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::TouchStart);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], InputEvent::PointerMove { x: 10.0, y: 20.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::TouchStart);
        q.push(InputEvent::TouchMove { x: 1.0, y: 2.0 });
        q.push(InputEvent::TouchEnd);
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::TouchStart);
        assert_eq!(events[2], InputEvent::TouchEnd);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerLeave);
        q.push(InputEvent::TouchEnd);
        q.clear();
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }

    #[test]
    fn only_touch_move_suppresses_default() {
        assert!(InputEvent::TouchMove { x: 0.0, y: 0.0 }.suppresses_default());
        assert!(!InputEvent::PointerMove { x: 0.0, y: 0.0 }.suppresses_default());
        assert!(!InputEvent::TouchStart.suppresses_default());
        assert!(!InputEvent::TouchEnd.suppresses_default());
        assert!(!InputEvent::PointerLeave.suppresses_default());
        assert!(!InputEvent::Resize { width: 1, height: 1 }.suppresses_default());
    }
}
