pub mod config;
pub mod links;
pub mod mouse;
pub mod particle;
pub mod render_loop;
pub mod surface;
pub mod system;
pub mod viewport;

pub use config::{MouseConfig, Palette, Preset, SpawnConfig, SystemConfig};
pub use links::{Link, LinkConfig, find_links, link_opacity};
pub use mouse::{Activation, FrameInput, InputEvent, MouseState};
pub use particle::{Behavior, Particle};
pub use render_loop::{FrameStats, RenderLoop};
pub use surface::{Color, CommandList, DrawCommand, Surface};
pub use system::ParticleSystem;
pub use viewport::Viewport;
