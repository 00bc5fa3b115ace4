//! Configuration for a particle field, loadable from JSON.
//!
//! ```json
//! {
//!   "particle_count": 400,
//!   "behavior": { "kind": "repel", "friction": 0.9, "edge_buffer": 4.0 },
//!   "spawn": { "radius": [10.0, 24.0], "max_speed": 0.5 },
//!   "links": { "max_distance": 100.0 },
//!   "mouse": { "radius": 250.0, "activation": "press" },
//!   "palette": {
//!     "background": [0.0, 0.0, 0.0],
//!     "fill": [1.0, 1.0, 1.0],
//!     "stroke": [1.0, 1.0, 1.0],
//!     "highlight": [1.0, 1.0, 1.0]
//!   },
//!   "seed": 42
//! }
//! ```
//!
//! `links` and `seed` may be omitted or `null`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::links::LinkConfig;
use crate::mouse::Activation;
use crate::particle::Behavior;

/// The three stock scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Repelled dots joined by fading lines.
    Constellation,
    /// Bubbles that swell under the pointer.
    Bubbles,
    /// Drifting embers that burn out.
    Embers,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// `[min, max]` initial radius. Ignored by `pulse`, which starts at its minimum.
    pub radius: [f32; 2],
    /// Each drift velocity component is drawn from `-max_speed..=max_speed`.
    pub max_speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MouseConfig {
    pub radius: f32,
    pub activation: Activation,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: [f32; 3],
    pub fill: [f32; 3],
    pub stroke: [f32; 3],
    pub highlight: [f32; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            fill: [1.0, 1.0, 1.0],
            stroke: [1.0, 1.0, 1.0],
            highlight: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub particle_count: usize,
    pub behavior: Behavior,
    pub spawn: SpawnConfig,
    #[serde(default)]
    pub links: Option<LinkConfig>,
    pub mouse: MouseConfig,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SystemConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Constellation => Self {
                particle_count: 400,
                behavior: Behavior::Repel {
                    friction: 0.9,
                    edge_buffer: 4.0,
                },
                spawn: SpawnConfig {
                    radius: [10.0, 24.0],
                    max_speed: 0.5,
                },
                links: Some(LinkConfig::default()),
                mouse: MouseConfig {
                    radius: 250.0,
                    activation: Activation::Press,
                },
                palette: Palette::default(),
                seed: None,
            },
            Preset::Bubbles => Self {
                particle_count: 150,
                behavior: Behavior::Pulse {
                    min_radius: 6.0,
                    max_radius: 40.0,
                    grow: 3.0,
                    shrink: 0.5,
                },
                spawn: SpawnConfig {
                    radius: [6.0, 6.0],
                    max_speed: 1.0,
                },
                links: None,
                mouse: MouseConfig {
                    radius: 120.0,
                    activation: Activation::Hover,
                },
                palette: Palette {
                    background: [0.02, 0.05, 0.12],
                    fill: [0.2, 0.55, 0.9],
                    stroke: [0.2, 0.55, 0.9],
                    highlight: [1.0, 1.0, 1.0],
                },
                seed: None,
            },
            Preset::Embers => Self {
                particle_count: 100,
                behavior: Behavior::Fade {
                    shrink: 0.1,
                    expire_below: 0.3,
                },
                spawn: SpawnConfig {
                    radius: [1.0, 16.0],
                    max_speed: 1.5,
                },
                links: None,
                mouse: MouseConfig {
                    radius: 0.0,
                    activation: Activation::Press,
                },
                palette: Palette {
                    background: [0.0, 0.0, 0.0],
                    fill: [0.0, 0.5, 0.0],
                    stroke: [0.0, 0.5, 0.0],
                    highlight: [0.0, 0.5, 0.0],
                },
                seed: None,
            },
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let [min_radius, max_radius] = self.spawn.radius;
        ensure!(
            min_radius.is_finite() && max_radius.is_finite(),
            "spawn.radius must be finite, got {:?}",
            self.spawn.radius
        );
        ensure!(
            min_radius >= 0.0 && min_radius <= max_radius,
            "spawn.radius must be an ordered non-negative range, got {:?}",
            self.spawn.radius
        );
        // the velocity range spans 2 * max_speed
        ensure!(
            self.spawn.max_speed.is_finite() && self.spawn.max_speed.abs() <= f32::MAX / 2.0,
            "spawn.max_speed out of range, got {}",
            self.spawn.max_speed
        );
        ensure!(
            self.mouse.radius.is_finite() && self.mouse.radius >= 0.0,
            "mouse.radius must be finite and not negative, got {}",
            self.mouse.radius
        );

        match self.behavior {
            Behavior::Repel {
                friction,
                edge_buffer,
            } => {
                ensure!(
                    (0.0..=1.0).contains(&friction),
                    "repel.friction must be within 0..=1, got {friction}"
                );
                ensure!(edge_buffer >= 0.0, "repel.edge_buffer must not be negative");
            }
            Behavior::Pulse {
                min_radius,
                max_radius,
                grow,
                shrink,
            } => {
                ensure!(
                    min_radius.is_finite() && max_radius.is_finite(),
                    "pulse radii must be finite"
                );
                ensure!(
                    min_radius >= 0.0 && min_radius <= max_radius,
                    "pulse radii must satisfy 0 <= min_radius <= max_radius"
                );
                ensure!(grow >= 0.0 && shrink >= 0.0, "pulse rates must not be negative");
            }
            Behavior::Fade {
                shrink,
                expire_below,
            } => {
                ensure!(shrink > 0.0, "fade.shrink must be positive");
                ensure!(expire_below >= 0.0, "fade.expire_below must not be negative");
            }
        }

        if let Some(links) = self.links {
            ensure!(links.max_distance > 0.0, "links.max_distance must be positive");
        }
        Ok(())
    }
}
