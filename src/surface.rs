//! Drawing surface the particle field paints onto.
//!
//! The core only needs six primitives; the windowed binary maps them onto an
//! egui painter and headless runs record them into a [`CommandList`].

use cgmath::Vector2;

/// Linear RGB in `0.0..=1.0`.
pub type Color = cgmath::Vector3<f32>;

pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn set_fill(&mut self, color: Color);
    fn set_stroke(&mut self, color: Color);
    fn set_alpha(&mut self, alpha: f32);
    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32);
    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    SetFill(Color),
    SetStroke(Color),
    SetAlpha(f32),
    FillCircle { center: Vector2<f32>, radius: f32 },
    StrokeLine { from: Vector2<f32>, to: Vector2<f32> },
}

/// Records every call in order.
#[derive(Clone, Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vector2<f32>, f32)> + '_ {
        self.commands.iter().filter_map(|command| match *command {
            DrawCommand::FillCircle { center, radius } => Some((center, radius)),
            _ => None,
        })
    }

    /// Stroked lines together with the global alpha active when each was drawn.
    pub fn lines(&self) -> Vec<(Vector2<f32>, Vector2<f32>, f32)> {
        let mut alpha = 1.0;
        let mut lines = Vec::new();
        for command in &self.commands {
            match *command {
                DrawCommand::SetAlpha(a) => alpha = a,
                DrawCommand::StrokeLine { from, to } => lines.push((from, to, alpha)),
                _ => {}
            }
        }
        lines
    }
}

impl Surface for CommandList {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn set_stroke(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStroke(color));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::SetAlpha(alpha));
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { center, radius });
    }

    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        self.commands.push(DrawCommand::StrokeLine { from, to });
    }
}
