//! Pointer and keyboard interaction: input mapping, picking, rotation, dragging

mod drag;
mod input;
mod picking;
mod rotation;

pub use drag::LampDrag;
pub use input::{
    cursor_to_ndc, keycode_to_button, mouse_button_to_button, Button, Controller, InputEdge,
    WinitController,
};
pub use picking::{Intersection, Raycaster};
pub use rotation::{ClickRotate, SpinToggle};
