use cgmath::prelude::*;
use cgmath::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Palette, SpawnConfig};
use crate::mouse::MouseState;
use crate::surface::{Color, Surface};
use crate::viewport::Viewport;

/// How every particle of a system moves, grows and dies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Behavior {
    /// Pushed away from an active pointer. The push decays by `friction`
    /// every frame. Edges are kept `edge_buffer` radii away.
    Repel { friction: f32, edge_buffer: f32 },
    /// Grows towards `max_radius` near an active pointer, shrinks back to
    /// `min_radius` otherwise.
    Pulse {
        min_radius: f32,
        max_radius: f32,
        grow: f32,
        shrink: f32,
    },
    /// Shrinks every frame and expires at `expire_below`.
    Fade { shrink: f32, expire_below: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
    pub push: Vector2<f32>,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>, radius: f32) -> Self {
        Self {
            position,
            velocity,
            push: Vector2::zero(),
            radius,
        }
    }

    pub fn spawn<R: Rng>(
        spawn: &SpawnConfig,
        behavior: &Behavior,
        viewport: &Viewport,
        rng: &mut R,
    ) -> Self {
        let radius = match *behavior {
            Behavior::Pulse { min_radius, .. } => min_radius,
            _ => {
                let [low, high] = spawn.radius;
                rng.gen_range(low.min(high)..=high.max(low))
            }
        };
        let speed = spawn.max_speed.abs();
        let velocity = cgmath::vec2(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed));

        let mut particle = Self::new(Vector2::zero(), velocity, radius);
        particle.reset(viewport, rng);
        particle
    }

    /// Places the particle so its whole radius is inside the viewport.
    pub fn reset<R: Rng>(&mut self, viewport: &Viewport, rng: &mut R) {
        self.position = viewport.random_point(self.radius, rng);
    }

    pub fn update(&mut self, behavior: &Behavior, mouse: &MouseState, viewport: &Viewport, dt: f32) {
        match *behavior {
            Behavior::Repel { friction, edge_buffer } => {
                if mouse.active {
                    let offset = self.position - mouse.position;
                    let distance = offset.magnitude();
                    // a pointer exactly on the particle has no direction to push in
                    if distance > 0.0 && distance < mouse.radius {
                        self.push += offset / distance * (mouse.radius / distance) * dt;
                    }
                }
                self.push *= friction.powf(dt);
                self.position += (self.push + self.velocity) * dt;
                self.reflect(viewport, edge_buffer * self.radius);
            }
            Behavior::Pulse {
                min_radius,
                max_radius,
                grow,
                shrink,
            } => {
                let in_range = mouse.active
                    && (self.position - mouse.position).magnitude2() < mouse.radius * mouse.radius;
                let radius = if in_range {
                    self.radius + grow * dt
                } else {
                    self.radius - shrink * dt
                };
                self.radius = radius.max(min_radius).min(max_radius);

                self.position += self.velocity * dt;
                self.reflect(viewport, self.radius);
            }
            Behavior::Fade { shrink, .. } => {
                self.position += self.velocity * dt;
                self.reflect(viewport, 0.0);
                self.radius = (self.radius - shrink * dt).max(0.0);
            }
        }
    }

    fn reflect(&mut self, viewport: &Viewport, inset: f32) {
        let (min, max) = viewport.inset_bounds(inset);

        macro_rules! handle_boundary {
            ($coord:expr, $vel:expr, $min:expr, $max:expr) => {
                if $coord > $max {
                    $coord = $max;
                    $vel = -$vel.abs();
                } else if $coord < $min {
                    $coord = $min;
                    $vel = $vel.abs();
                }
            };
        }

        handle_boundary!(self.position.x, self.velocity.x, min.x, max.x);
        handle_boundary!(self.position.y, self.velocity.y, min.y, max.y);
    }

    pub fn draw<S: Surface>(&self, behavior: &Behavior, palette: &Palette, surface: &mut S) {
        surface.set_fill(Color::from(palette.fill));
        surface.fill_circle(self.position, self.radius);

        if let Behavior::Pulse { .. } = behavior {
            // bubble highlight, up and to the left
            let offset = cgmath::vec2(-0.3, -0.3) * self.radius;
            surface.set_alpha(0.6);
            surface.set_fill(Color::from(palette.highlight));
            surface.fill_circle(self.position + offset, self.radius * 0.35);
            surface.set_alpha(1.0);
        }
    }

    pub fn is_expired(&self, behavior: &Behavior) -> bool {
        match *behavior {
            Behavior::Fade { expire_below, .. } => self.radius <= expire_below,
            _ => false,
        }
    }
}
