use std::mem;

use crate::mouse::{FrameInput, InputEvent};
use crate::surface::{CommandList, Surface};
use crate::system::ParticleSystem;

/// Per-frame driver. The host calls [`RenderLoop::frame`] once before every
/// repaint; input arriving in between is queued and handed to the next frame.
pub struct RenderLoop {
    pub system: ParticleSystem,
    pending: Vec<InputEvent>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub particles: usize,
    pub last_frame_commands: usize,
}

impl RenderLoop {
    pub fn new(system: ParticleSystem) -> Self {
        Self {
            system,
            pending: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn frame<S: Surface>(&mut self, surface: &mut S, dt: f32) {
        let input = FrameInput {
            events: mem::take(&mut self.pending),
            dt,
        };
        // a resize in this frame's input must clear the new size
        if let Some((width, height)) = input.events.iter().rev().find_map(|event| match *event {
            InputEvent::Resized { width, height } => Some((width, height)),
            _ => None,
        }) {
            surface.clear(width.max(0.0), height.max(0.0));
        } else {
            let viewport = self.system.viewport();
            surface.clear(viewport.width, viewport.height);
        }
        self.system.step(&input, surface);
    }

    pub fn run_headless(&mut self, frames: u64, dt: f32) -> FrameStats {
        let mut surface = CommandList::new();
        for _ in 0..frames {
            surface.clear_commands();
            self.frame(&mut surface, dt);
        }

        let stats = FrameStats {
            frames: self.system.frame_count(),
            particles: self.system.len(),
            last_frame_commands: surface.commands.len(),
        };
        log::info!(
            "headless run: {} frames, {} particles alive, {} draw commands on the last frame",
            stats.frames,
            stats.particles,
            stats.last_frame_commands
        );
        stats
    }
}
