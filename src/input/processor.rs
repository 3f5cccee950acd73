//! Converts raw platform events into frame-loop commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! the held button, modifier keys) and the key-binding map. It is the only
//! thing between raw window events and
//! [`FrameLoop::execute`](crate::frame::FrameLoop::execute).

use glam::Vec2;

use super::command::Command;
use super::event::{InputEvent, MouseButton};
use crate::options::KeybindingOptions;

/// Converts raw window events into [`Command`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     frame_loop.execute(cmd);
/// }
/// if let Some(cmd) = input.handle_key_press("KeyR") {
///     frame_loop.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    last_cursor: Option<Vec2>,
    held: Option<MouseButton>,
    shift_pressed: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor with the given key bindings and no buttons held.
    #[must_use]
    pub fn new(key_bindings: KeybindingOptions) -> Self {
        Self {
            last_cursor: None,
            held: None,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Feed one pointer event. Drags become rotate (left button) or pan
    /// (right/middle button, or left with shift); the wheel becomes zoom.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let pos = Vec2::new(x, y);
                let delta = self.last_cursor.map_or(Vec2::ZERO, |last| pos - last);
                self.last_cursor = Some(pos);
                let button = self.held?;
                if delta == Vec2::ZERO {
                    return None;
                }
                if button == MouseButton::Left && !self.shift_pressed {
                    Some(Command::RotateCamera(delta))
                } else {
                    Some(Command::PanCamera(delta))
                }
            }
            InputEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.held = Some(button);
                } else if self.held == Some(button) {
                    self.held = None;
                }
                None
            }
            InputEvent::Scroll { delta } => Some(Command::Zoom(delta)),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Look up a bound key (winit `KeyCode` debug string, e.g. `"KeyR"`).
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<Command> {
        self.key_bindings.lookup(key)
    }
}
