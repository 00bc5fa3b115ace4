use anyhow::{Context, Result};
use cgmath::Vector2;
use clap::{Parser, ValueEnum};
use eframe::egui;
use particle_field::{
    Activation, Behavior, Color, InputEvent, ParticleSystem, Preset, RenderLoop, Surface, SystemConfig,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const INITIAL_WIDTH: f32 = 1280.0;
const INITIAL_HEIGHT: f32 = 720.0;
const NOMINAL_FRAME: Duration = Duration::from_nanos(16_666_667);
// longer stalls (window drags, breakpoints) advance at most this many frames
const MAX_FRAME_STEP: f32 = 3.0;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Constellation,
    Bubbles,
    Embers,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Constellation => Preset::Constellation,
            PresetArg::Bubbles => Preset::Bubbles,
            PresetArg::Embers => Preset::Embers,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Interactive 2D particle field")]
struct Args {
    #[arg(long, value_enum, default_value = "constellation")]
    preset: PresetArg,

    /// JSON configuration, overrides --preset
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    count: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Run this many frames without a window and exit
    #[arg(long)]
    headless: Option<u64>,
}

fn load_config(args: &Args) -> Result<SystemConfig> {
    let mut config = match &args.config {
        Some(path) => SystemConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SystemConfig::preset(args.preset.into()),
    };
    if let Some(count) = args.count {
        config.particle_count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn color32(color: Color, alpha: f32) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.x),
        channel(color.y),
        channel(color.z),
        channel(alpha),
    )
}

/// Paints onto an egui panel, translating field coordinates to screen space.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    background: Color,
    fill: Color,
    stroke: Color,
    alpha: f32,
}

impl<'a> PainterSurface<'a> {
    fn new(painter: &'a egui::Painter, origin: egui::Pos2, background: Color) -> Self {
        Self {
            painter,
            origin,
            background,
            fill: Color::new(1.0, 1.0, 1.0),
            stroke: Color::new(1.0, 1.0, 1.0),
            alpha: 1.0,
        }
    }

    fn to_screen(&self, point: Vector2<f32>) -> egui::Pos2 {
        self.origin + egui::vec2(point.x, point.y)
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, width: f32, height: f32) {
        let rect = egui::Rect::from_min_size(self.origin, egui::vec2(width, height));
        self.painter.rect_filled(rect, 0.0, color32(self.background, 1.0));
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Color) {
        self.stroke = color;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color32(self.fill, self.alpha));
    }

    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(1.0, color32(self.stroke, self.alpha)),
        );
    }
}

/// Turns egui pointer events into field input. Only presses that land on the
/// field count, but a press keeps being tracked after the pointer leaves it.
#[derive(Default)]
struct PointerRouter {
    held: bool,
}

impl PointerRouter {
    fn route(
        &mut self,
        event: &egui::Event,
        rect: egui::Rect,
        activation: Activation,
    ) -> Option<InputEvent> {
        let to_field = |pos: egui::Pos2| cgmath::vec2(pos.x - rect.min.x, pos.y - rect.min.y);
        match *event {
            egui::Event::PointerMoved(pos) if rect.contains(pos) => {
                Some(InputEvent::PointerMoved(to_field(pos)))
            }
            egui::Event::PointerMoved(pos) if self.held && activation == Activation::Press => {
                Some(InputEvent::PointerMoved(to_field(pos)))
            }
            egui::Event::PointerMoved(_) | egui::Event::PointerGone => Some(InputEvent::PointerLeft),
            egui::Event::PointerButton {
                pos, pressed: true, ..
            } if rect.contains(pos) => {
                self.held = true;
                Some(InputEvent::PointerDown(to_field(pos)))
            }
            egui::Event::PointerButton { pressed: false, .. } => {
                self.held = false;
                Some(InputEvent::PointerUp)
            }
            _ => None,
        }
    }
}

struct ParticleApp {
    render_loop: RenderLoop,
    pointer: PointerRouter,
    last_frame_time: Instant,
    last_update_time: f64,
    field_size: egui::Vec2,
}

impl ParticleApp {
    fn new(config: &SystemConfig) -> Self {
        let system = ParticleSystem::new(config, INITIAL_WIDTH, INITIAL_HEIGHT);
        Self {
            render_loop: RenderLoop::new(system),
            pointer: PointerRouter::default(),
            last_frame_time: Instant::now(),
            last_update_time: 0.0,
            field_size: egui::vec2(INITIAL_WIDTH, INITIAL_HEIGHT),
        }
    }

    fn queue_input(&mut self, ctx: &egui::Context, rect: egui::Rect) {
        if rect.size() != self.field_size {
            self.field_size = rect.size();
            self.render_loop.push_event(InputEvent::Resized {
                width: rect.width(),
                height: rect.height(),
            });
        }

        let activation = self.render_loop.system.mouse.activation;
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Some(event) = self.pointer.route(event, rect, activation) {
                self.render_loop.push_event(event);
            }
        }
    }

    fn render_ui_panel(&mut self, ui: &mut egui::Ui, frame_time: f32, update_time: f64) {
        let system = &mut self.render_loop.system;

        ui.label(format!("FPS: {:.3}", 1.0 / frame_time));
        ui.label(format!("Frame Time: {:.3}ms", frame_time * 1000.0));
        ui.label(format!("Update Time: {:.3}ms", update_time * 1000.0));
        ui.label(format!("Particles: {}", system.len()));

        ui.horizontal(|ui| {
            ui.label("Mouse Radius: ");
            ui.add(egui::Slider::new(&mut system.mouse.radius, 0.0..=500.0));
        });

        if let Behavior::Repel { friction, .. } = &mut system.behavior {
            ui.horizontal(|ui| {
                ui.label("Friction: ");
                ui.add(egui::Slider::new(friction, 0.0..=1.0).drag_value_speed(0.01));
            });
        }

        if let Some(links) = &mut system.links {
            ui.horizontal(|ui| {
                ui.label("Link Distance: ");
                ui.add(egui::Slider::new(&mut links.max_distance, 1.0..=300.0));
            });
        }
    }
}

impl eframe::App for ParticleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_time = Instant::now();
        let frame_time = current_time.duration_since(self.last_frame_time);
        self.last_frame_time = current_time;
        let dt = (frame_time.as_secs_f32() / NOMINAL_FRAME.as_secs_f32()).min(MAX_FRAME_STEP);

        // the panel reports the previous frame's update time
        let update_time = self.last_update_time;
        egui::SidePanel::left("Control Panel").show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_ui_panel(ui, frame_time.as_secs_f32().max(f32::EPSILON), update_time);
                ui.allocate_space(ui.available_size());
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
                self.queue_input(ctx, rect);

                let painter = ui.painter_at(rect);
                let background = Color::from(self.render_loop.system.palette.background);
                let mut surface = PainterSurface::new(&painter, rect.min, background);

                let start_update = Instant::now();
                self.render_loop.frame(&mut surface, dt);
                self.last_update_time = start_update.elapsed().as_secs_f64();
            });

        // next frame callback
        ctx.request_repaint();
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(&args)?;

    if let Some(frames) = args.headless {
        let system = ParticleSystem::new(&config, INITIAL_WIDTH, INITIAL_HEIGHT);
        let stats = RenderLoop::new(system).run_headless(frames, 1.0);
        println!(
            "{} frames, {} particles alive, {} draw commands on the last frame",
            stats.frames, stats.particles, stats.last_frame_commands
        );
        return Ok(());
    }

    eframe::run_native(
        "Particle Field",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            initial_window_size: Some(egui::vec2(INITIAL_WIDTH, INITIAL_HEIGHT)),
            vsync: true,
            ..Default::default()
        },
        Box::new(move |_cc| Box::new(ParticleApp::new(&config))),
    )
    .map_err(|err| anyhow::anyhow!("render loop failed: {err}"))
}
