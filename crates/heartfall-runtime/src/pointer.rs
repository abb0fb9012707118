//! Pointer (mouse and touch) state scoped to the drawing surface

use glam::Vec2;
use std::collections::HashSet;
use winit::event::TouchPhase;

/// Button index of the primary (left) mouse button
pub const PRIMARY_BUTTON: u32 = 0;

/// A change in the primary pointer that the interaction layer reacts to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Pressed(Vec2),
    Moved(Vec2),
    Released,
}

/// Tracks the primary pointer in surface coordinates (logical pixels)
///
/// Mouse and touch feed the same primary pointer; the first finger down owns
/// it until lifted. Wheel input is observed but never consumed, so the host
/// keeps its scrolling.
#[derive(Debug, Default)]
pub struct PointerState {
    position: Option<Vec2>,
    primary_down: bool,
    just_pressed: bool,
    just_released: bool,
    /// Non-primary mouse buttons currently held
    other_buttons: HashSet<u32>,
    /// Touch id that currently drives the primary pointer
    active_touch: Option<u64>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process cursor movement
    pub fn process_move(&mut self, x: f32, y: f32) -> Option<PointerEvent> {
        let pos = Vec2::new(x, y);
        self.position = Some(pos);
        Some(PointerEvent::Moved(pos))
    }

    /// Process the cursor leaving the surface; an ongoing press ends here
    pub fn process_leave(&mut self) -> Option<PointerEvent> {
        self.position = None;
        if self.active_touch.is_none() {
            return self.release_primary();
        }
        None
    }

    /// Process a mouse button transition
    pub fn process_button(&mut self, button: u32, pressed: bool) -> Option<PointerEvent> {
        if button != PRIMARY_BUTTON {
            if pressed {
                self.other_buttons.insert(button);
            } else {
                self.other_buttons.remove(&button);
            }
            return None;
        }

        if pressed {
            self.press_primary()
        } else {
            self.release_primary()
        }
    }

    /// Process a touch transition; only the owning finger moves the pointer
    pub fn process_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_some() {
                    return None;
                }
                self.active_touch = Some(id);
                self.position = Some(Vec2::new(x, y));
                self.press_primary()
            }
            TouchPhase::Moved => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.process_move(x, y)
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                self.release_primary()
            }
        }
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }

    fn press_primary(&mut self) -> Option<PointerEvent> {
        let pos = self.position?;
        if !self.primary_down {
            self.just_pressed = true;
        }
        self.primary_down = true;
        Some(PointerEvent::Pressed(pos))
    }

    fn release_primary(&mut self) -> Option<PointerEvent> {
        if !self.primary_down {
            return None;
        }
        self.primary_down = false;
        self.just_released = true;
        Some(PointerEvent::Released)
    }

    // --- Query methods ---

    /// Last known pointer position, None when the pointer is off the surface
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    pub fn is_just_pressed(&self) -> bool {
        self.just_pressed
    }

    pub fn is_just_released(&self) -> bool {
        self.just_released
    }

    pub fn is_button_down(&self, button: u32) -> bool {
        if button == PRIMARY_BUTTON {
            self.primary_down
        } else {
            self.other_buttons.contains(&button)
        }
    }
}
