use std::collections::HashSet;

use glam::Vec2;
use winit::event::{
    ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent,
};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::controller::CameraController;

/// What the frame loop should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Event not relevant to camera or simulation control.
    None,
    /// The camera moved; a redraw is worthwhile.
    CameraChanged,
    /// Toggle the simulation between running and paused.
    TogglePause,
    /// Advance the simulation by one step while paused.
    StepOnce,
}

/// Zoom rate for the keyboard zoom keys, in scroll-equivalent units per
/// second.
const KEY_ZOOM_RATE: f32 = 20.0;

/// Tracks held keys and the mouse, translating window events into camera
/// motion and simulation commands.
///
/// Mouse drags rotate (or pan, with shift) the orbit immediately; held
/// movement keys are applied once per frame via
/// [`apply_held_keys`](Self::apply_held_keys) so motion speed follows frame
/// time rather than key-repeat rate.
pub struct InputHandler {
    keys_held: HashSet<KeyCode>,
    last_mouse_pos: Vec2,
}

/// Pan direction in the view plane for the held movement keys: WASD or
/// arrows, opposing keys cancel, diagonals normalized.
fn pan_direction(held: impl Fn(KeyCode) -> bool) -> Vec2 {
    let mapping = [
        (KeyCode::KeyW, Vec2::Y),
        (KeyCode::ArrowUp, Vec2::Y),
        (KeyCode::KeyS, -Vec2::Y),
        (KeyCode::ArrowDown, -Vec2::Y),
        (KeyCode::KeyD, Vec2::X),
        (KeyCode::ArrowRight, Vec2::X),
        (KeyCode::KeyA, -Vec2::X),
        (KeyCode::ArrowLeft, -Vec2::X),
    ];

    mapping
        .iter()
        .filter_map(|(code, direction)| held(*code).then_some(*direction))
        .sum::<Vec2>()
        .normalize_or_zero()
}

/// Zoom direction for the held zoom keys: E moves closer, Q further.
fn zoom_direction(held: impl Fn(KeyCode) -> bool) -> f32 {
    f32::from(held(KeyCode::KeyE)) - f32::from(held(KeyCode::KeyQ))
}

/// Simulation command bound to a key press, if any.
fn key_command(code: KeyCode) -> Option<InputEffect> {
    match code {
        KeyCode::Space => Some(InputEffect::TogglePause),
        KeyCode::Period => Some(InputEffect::StepOnce),
        _ => None,
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Create a handler with no keys held and no recorded mouse position.
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            last_mouse_pos: Vec2::ZERO,
        }
    }

    /// Process a window event, applying mouse-driven camera motion directly.
    pub fn handle_event(
        &mut self,
        controller: &mut CameraController,
        event: &WindowEvent,
    ) -> InputEffect {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                let _ = match state {
                    ElementState::Pressed => self.keys_held.insert(*code),
                    ElementState::Released => self.keys_held.remove(code),
                };

                if *state == ElementState::Pressed && !*repeat {
                    if let Some(command) = key_command(*code) {
                        return command;
                    }
                }
                InputEffect::None
            }
            WindowEvent::Focused(false) => {
                // Key releases are lost while unfocused; drop held state so
                // the camera does not drift.
                self.keys_held.clear();
                InputEffect::None
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                controller.mouse_pressed = *state == ElementState::Pressed;
                InputEffect::None
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                controller.shift_pressed = modifiers.state().shift_key();
                InputEffect::None
            }
            WindowEvent::CursorMoved { position, .. } => {
                let current_pos =
                    Vec2::new(position.x as f32, position.y as f32);
                let delta = current_pos - self.last_mouse_pos;
                self.last_mouse_pos = current_pos;

                if controller.mouse_pressed {
                    if controller.shift_pressed {
                        controller.pan(delta);
                    } else {
                        controller.rotate(delta);
                    }
                    InputEffect::CameraChanged
                } else {
                    InputEffect::None
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                controller.zoom(scroll);
                InputEffect::CameraChanged
            }
            _ => InputEffect::None,
        }
    }

    /// Apply held movement keys for a frame of `dt` seconds. Returns true
    /// if the camera moved.
    pub fn apply_held_keys(
        &self,
        controller: &mut CameraController,
        dt: f32,
    ) -> bool {
        let held = |code: KeyCode| self.keys_held.contains(&code);

        let pan = pan_direction(held);
        let zoom = zoom_direction(held);

        if pan != Vec2::ZERO {
            controller.pan_world(pan * dt);
        }
        if zoom != 0.0 {
            controller.zoom(zoom * KEY_ZOOM_RATE * dt);
        }

        pan != Vec2::ZERO || zoom != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[KeyCode]) -> impl Fn(KeyCode) -> bool + '_ {
        move |code| keys.contains(&code)
    }

    #[test]
    fn single_key_pans_along_axis() {
        assert_eq!(pan_direction(held(&[KeyCode::KeyW])), Vec2::Y);
        assert_eq!(pan_direction(held(&[KeyCode::ArrowLeft])), -Vec2::X);
    }

    #[test]
    fn opposing_keys_cancel() {
        let dir = pan_direction(held(&[KeyCode::KeyW, KeyCode::KeyS]));
        assert_eq!(dir, Vec2::ZERO);
    }

    #[test]
    fn diagonal_is_normalized() {
        let dir = pan_direction(held(&[KeyCode::KeyW, KeyCode::KeyD]));
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);
    }

    #[test]
    fn zoom_keys_oppose() {
        assert_eq!(zoom_direction(held(&[KeyCode::KeyE])), 1.0);
        assert_eq!(zoom_direction(held(&[KeyCode::KeyQ])), -1.0);
        assert_eq!(
            zoom_direction(held(&[KeyCode::KeyE, KeyCode::KeyQ])),
            0.0
        );
    }

    #[test]
    fn simulation_commands_bound_to_keys() {
        assert_eq!(
            key_command(KeyCode::Space),
            Some(InputEffect::TogglePause)
        );
        assert_eq!(key_command(KeyCode::Period), Some(InputEffect::StepOnce));
        assert_eq!(key_command(KeyCode::KeyW), None);
    }
}
