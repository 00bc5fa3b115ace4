use cgmath::Vector2;
use serde::{Deserialize, Serialize};

/// When the pointer counts as active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Active while a button is held. Moves are ignored while released.
    Press,
    /// Active while the pointer is over the surface.
    Hover,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseState {
    pub position: Vector2<f32>,
    pub active: bool,
    pub radius: f32,
    pub activation: Activation,
}

impl MouseState {
    pub fn new(radius: f32, activation: Activation) -> Self {
        Self {
            position: cgmath::vec2(0.0, 0.0),
            active: false,
            radius,
            activation,
        }
    }

    pub fn apply(&mut self, event: &InputEvent) {
        match (*event, self.activation) {
            (InputEvent::PointerMoved(position), Activation::Press) => {
                if self.active {
                    self.position = position;
                }
            }
            (InputEvent::PointerMoved(position), Activation::Hover) => {
                self.position = position;
                self.active = true;
            }
            (InputEvent::PointerDown(position), _) => {
                self.position = position;
                if self.activation == Activation::Press {
                    self.active = true;
                }
            }
            (InputEvent::PointerUp, Activation::Press) => self.active = false,
            (InputEvent::PointerLeft, Activation::Hover) => self.active = false,
            _ => {}
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vector2<f32>),
    PointerDown(Vector2<f32>),
    PointerUp,
    PointerLeft,
    Resized { width: f32, height: f32 },
}

/// Everything that happened since the previous frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    /// Elapsed time in nominal 60 Hz frames.
    pub dt: f32,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            dt: 1.0,
        }
    }
}

impl FrameInput {
    pub fn with_events(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }
}
