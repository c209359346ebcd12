use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    KeyR,
    KeyL,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Shift,
    Escape,
    MouseLeft,
    MouseRight,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

/// Edge reported by [`WinitController::process_event`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEdge {
    Pressed(Button),
    Released(Button),
    CursorMoved(Vec2),
    /// The window lost focus; every held button was dropped
    FocusLost,
}

/// Adapter that bridges Winit events to the Controller trait
#[derive(Debug, Clone, Default)]
pub struct WinitController {
    pressed_keys: HashSet<Button>,
    /// All pressed buttons as a vec (for efficient get_down_keys)
    pressed_vec: Vec<Button>,
    /// Cursor position in physical pixels
    mouse_position: Option<Vec2>,
}

impl WinitController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates held state and reports the edge, if the event is one we track.
    /// Key repeats are not edges.
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEdge> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(keycode) = event.physical_key else {
                    return None;
                };
                let button = keycode_to_button(keycode)?;
                self.set(button, event.state)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = mouse_button_to_button(*button)?;
                self.set(button, *state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_position = Some(position);
                Some(InputEdge::CursorMoved(position))
            }
            WindowEvent::Focused(false) => {
                // Releases are lost while unfocused
                self.release_all();
                Some(InputEdge::FocusLost)
            }
            _ => None,
        }
    }

    /// Applies button releases from an event the overlay consumed, so a
    /// button let go over it does not stay held. True when a mouse button
    /// was released.
    pub fn release_consumed(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } => mouse_button_to_button(*button).is_some_and(|b| self.release(b)),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Released => {
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    if let Some(button) = keycode_to_button(keycode) {
                        self.release(button);
                    }
                }
                false
            }
            _ => false,
        }
    }

    fn set(&mut self, button: Button, state: ElementState) -> Option<InputEdge> {
        match state {
            ElementState::Pressed => self.press(button).then_some(InputEdge::Pressed(button)),
            ElementState::Released => self.release(button).then_some(InputEdge::Released(button)),
        }
    }

    /// Marks `button` held; false if it already was
    pub fn press(&mut self, button: Button) -> bool {
        let inserted = self.pressed_keys.insert(button);
        if inserted {
            self.pressed_vec.push(button);
        }
        inserted
    }

    /// Marks `button` released; false if it was not held
    pub fn release(&mut self, button: Button) -> bool {
        let removed = self.pressed_keys.remove(&button);
        if removed {
            self.pressed_vec.retain(|&b| b != button);
        }
        removed
    }

    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.pressed_vec.clear();
    }

    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }
}

impl Controller for WinitController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed_keys.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed_vec
    }
}

/// Map Winit KeyCode to Button
pub fn keycode_to_button(keycode: KeyCode) -> Option<Button> {
    match keycode {
        KeyCode::KeyW => Some(Button::KeyW),
        KeyCode::KeyA => Some(Button::KeyA),
        KeyCode::KeyS => Some(Button::KeyS),
        KeyCode::KeyD => Some(Button::KeyD),
        KeyCode::KeyQ => Some(Button::KeyQ),
        KeyCode::KeyE => Some(Button::KeyE),
        KeyCode::KeyR => Some(Button::KeyR),
        KeyCode::KeyL => Some(Button::KeyL),
        KeyCode::ArrowUp => Some(Button::ArrowUp),
        KeyCode::ArrowDown => Some(Button::ArrowDown),
        KeyCode::ArrowLeft => Some(Button::ArrowLeft),
        KeyCode::ArrowRight => Some(Button::ArrowRight),
        KeyCode::Space => Some(Button::Space),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Button::Shift),
        KeyCode::Escape => Some(Button::Escape),
        _ => None,
    }
}

/// Map Winit MouseButton to Button
pub fn mouse_button_to_button(button: MouseButton) -> Option<Button> {
    match button {
        MouseButton::Left => Some(Button::MouseLeft),
        MouseButton::Right => Some(Button::MouseRight),
        _ => None,
    }
}

/// Pixel position to normalized device coordinates, y up
pub fn cursor_to_ndc(position: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(position.x / size.x * 2.0 - 1.0, -(position.y / size.y) * 2.0 + 1.0)
}
