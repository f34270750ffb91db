//! Last known pointer position plus touch/hover engagement.

use glam::Vec2;

use crate::api::config::InputMode;
use crate::input::queue::InputEvent;

/// Tracks where the pointer is and whether it currently engages the field.
///
/// Leaving the surface or lifting a finger resets the position to the origin.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    mode: InputMode,
    pos: Vec2,
    touching: bool,
    hovering: bool,
}

impl PointerTracker {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            pos: Vec2::ZERO,
            touching: false,
            hovering: false,
        }
    }

    /// Apply one input event. `Resize` is not a pointer event and is ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => {
                self.pos = Vec2::new(x, y);
                self.hovering = true;
            }
            InputEvent::TouchMove { x, y } => {
                self.pos = Vec2::new(x, y);
            }
            InputEvent::TouchStart => {
                self.touching = true;
            }
            InputEvent::TouchEnd => {
                // Taps are followed by compatibility mouse events; lifting ends hover too.
                self.touching = false;
                self.hovering = false;
                self.pos = Vec2::ZERO;
            }
            InputEvent::PointerLeave => {
                self.hovering = false;
                // Touch-only devices fire synthetic leaves; their position is owned by touch events.
                if self.mode != InputMode::Touch {
                    self.pos = Vec2::ZERO;
                }
            }
            InputEvent::Resize { .. } => {}
        }
    }

    /// Whether particles near the pointer should scatter right now.
    pub fn engaged(&self) -> bool {
        match self.mode {
            InputMode::Pointer => true,
            InputMode::Touch => self.touching,
            InputMode::Hybrid => self.touching || self.hovering,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_move_updates_position_only() {
        let mut t = PointerTracker::new(InputMode::Pointer);
        t.apply(&InputEvent::PointerMove { x: 12.0, y: 34.0 });
        assert_eq!(t.position(), Vec2::new(12.0, 34.0));
        assert!(!t.is_touching());
        assert!(t.engaged());
    }

    #[test]
    fn touch_lifecycle() {
        let mut t = PointerTracker::new(InputMode::Touch);
        assert!(!t.engaged());

        t.apply(&InputEvent::TouchStart);
        t.apply(&InputEvent::TouchMove { x: 100.0, y: 200.0 });
        assert!(t.engaged());
        assert_eq!(t.position(), Vec2::new(100.0, 200.0));

        t.apply(&InputEvent::TouchEnd);
        assert!(!t.engaged());
        assert_eq!(t.position(), Vec2::ZERO);
    }

    #[test]
    fn leave_resets_position_on_pointer_devices() {
        let mut t = PointerTracker::new(InputMode::Pointer);
        t.apply(&InputEvent::PointerMove { x: 5.0, y: 5.0 });
        t.apply(&InputEvent::PointerLeave);
        assert_eq!(t.position(), Vec2::ZERO);
    }

    #[test]
    fn leave_is_ignored_on_touch_devices() {
        let mut t = PointerTracker::new(InputMode::Touch);
        t.apply(&InputEvent::TouchStart);
        t.apply(&InputEvent::TouchMove { x: 5.0, y: 5.0 });
        t.apply(&InputEvent::PointerLeave);
        assert_eq!(t.position(), Vec2::new(5.0, 5.0));
        assert!(t.engaged());
    }

    #[test]
    fn hybrid_engages_on_hover_or_touch() {
        let mut t = PointerTracker::new(InputMode::Hybrid);
        assert!(!t.engaged());

        t.apply(&InputEvent::PointerMove { x: 1.0, y: 1.0 });
        assert!(t.engaged());

        t.apply(&InputEvent::PointerLeave);
        assert!(!t.engaged());
        assert_eq!(t.position(), Vec2::ZERO);

        t.apply(&InputEvent::TouchStart);
        assert!(t.engaged());
        t.apply(&InputEvent::TouchEnd);
        assert!(!t.engaged());
    }

    #[test]
    fn hybrid_touch_end_clears_hover_from_compat_mouse_events() {
        let mut t = PointerTracker::new(InputMode::Hybrid);
        t.apply(&InputEvent::TouchStart);
        t.apply(&InputEvent::TouchMove { x: 40.0, y: 60.0 });
        t.apply(&InputEvent::PointerMove { x: 40.0, y: 60.0 });
        t.apply(&InputEvent::TouchEnd);

        assert_eq!(t.position(), Vec2::ZERO);
        assert!(!t.engaged(), "no engagement left at the origin after lifting");
    }

    #[test]
    fn resize_is_not_a_pointer_event() {
        let mut t = PointerTracker::new(InputMode::Pointer);
        t.apply(&InputEvent::PointerMove { x: 9.0, y: 9.0 });
        t.apply(&InputEvent::Resize { width: 10, height: 10 });
        assert_eq!(t.position(), Vec2::new(9.0, 9.0));
    }
}
