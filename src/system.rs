use rand::{SeedableRng, rngs::StdRng};

use crate::config::{Palette, SpawnConfig, SystemConfig};
use crate::links::{self, LinkConfig};
use crate::mouse::{FrameInput, InputEvent, MouseState};
use crate::particle::{Behavior, Particle};
use crate::surface::{Color, Surface};
use crate::viewport::Viewport;

pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub mouse: MouseState,
    pub behavior: Behavior,
    pub spawn: SpawnConfig,
    pub links: Option<LinkConfig>,
    pub palette: Palette,
    viewport: Viewport,
    rng: StdRng,
    frame_count: u64,
}

impl ParticleSystem {
    pub fn new(config: &SystemConfig, width: f32, height: f32) -> Self {
        let mut system = Self::from_particles(config, width, height, Vec::new());
        let particles = (0..config.particle_count)
            .map(|_| {
                Particle::spawn(&system.spawn, &system.behavior, &system.viewport, &mut system.rng)
            })
            .collect();
        system.particles = particles;

        log::info!(
            "spawned {} particles in a {}x{} viewport",
            system.particles.len(),
            system.viewport.width,
            system.viewport.height
        );
        system
    }

    /// Builds a system around existing particles, leaving them where they are.
    pub fn from_particles(
        config: &SystemConfig,
        width: f32,
        height: f32,
        particles: Vec<Particle>,
    ) -> Self {
        let viewport = Viewport::new(width, height);
        if viewport.is_degenerate() {
            log::warn!("degenerate viewport {width}x{height}, particles will collapse onto its centre");
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            particles,
            mouse: MouseState::new(config.mouse.radius, config.mouse.activation),
            behavior: config.behavior,
            spawn: config.spawn,
            links: config.links,
            palette: config.palette,
            viewport,
            rng,
            frame_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Repositions every particle inside the new viewport. Velocities and the
    /// mouse are left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        log::debug!("resized to {}x{}", self.viewport.width, self.viewport.height);
        if self.viewport.is_degenerate() {
            log::warn!("degenerate viewport {width}x{height}");
        }
        for particle in &mut self.particles {
            particle.reset(&self.viewport, &mut self.rng);
        }
    }

    pub fn apply_input(&mut self, input: &FrameInput) {
        for event in &input.events {
            match *event {
                InputEvent::Resized { width, height } => self.resize(width, height),
                _ => self.mouse.apply(event),
            }
        }
    }

    /// Runs one frame: input, links, then draw-before-update for every particle.
    pub fn step<S: Surface>(&mut self, input: &FrameInput, surface: &mut S) {
        self.apply_input(input);

        if let Some(link_config) = self.links {
            let segments = links::find_links(&self.particles, link_config.max_distance);
            links::draw_links(&segments, Color::from(self.palette.stroke), surface);
        }

        for particle in &mut self.particles {
            particle.draw(&self.behavior, &self.palette, surface);
            particle.update(&self.behavior, &self.mouse, &self.viewport, input.dt);
        }

        let before = self.particles.len();
        let behavior = self.behavior;
        self.particles.retain(|particle| !particle.is_expired(&behavior));
        let expired = before - self.particles.len();
        if expired > 0 {
            log::debug!("{expired} particles expired, {} left", self.particles.len());
            if self.particles.is_empty() {
                log::info!("all particles expired after {} frames", self.frame_count + 1);
            }
        }

        self.frame_count += 1;
    }
}
