use cgmath::Vector2;
use particle_field::{
    Activation, Behavior, CommandList, FrameInput, InputEvent, MouseState, Particle, ParticleSystem,
    Preset, SystemConfig, Viewport,
};
use rand::{SeedableRng, rngs::StdRng};

/// Preset with a fixed seed and particle count
pub fn seeded_config(preset: Preset, count: usize) -> SystemConfig {
    let mut config = SystemConfig::preset(preset);
    config.particle_count = count;
    config.seed = Some(42);
    config
}

/// System holding one motionless particle
pub fn single_particle_system(preset: Preset, x: f32, y: f32, radius: f32) -> ParticleSystem {
    let config = seeded_config(preset, 0);
    let particle = Particle::new(cgmath::vec2(x, y), Vector2::new(0.0, 0.0), radius);
    ParticleSystem::from_particles(&config, 800.0, 600.0, vec![particle])
}

pub fn pulse() -> Behavior {
    Behavior::Pulse {
        min_radius: 6.0,
        max_radius: 40.0,
        grow: 3.0,
        shrink: 0.5,
    }
}

fn assert_inside(system: &ParticleSystem) {
    let viewport = system.viewport();
    for particle in &system.particles {
        assert!(
            (0.0..=viewport.width).contains(&particle.position.x)
                && (0.0..=viewport.height).contains(&particle.position.y),
            "particle escaped: {:?}",
            particle.position
        );
    }
}

// ==================================================================================
// Placement tests
// ==================================================================================

#[test]
fn reset_keeps_whole_radius_inside() {
    let mut rng = StdRng::seed_from_u64(5);
    let viewport = Viewport::new(800.0, 600.0);
    let mut particle = Particle::new(Vector2::new(0.0, 0.0), Vector2::new(0.0, 0.0), 24.0);

    for _ in 0..1000 {
        particle.reset(&viewport, &mut rng);
        let p = particle.position;
        let r = particle.radius;
        assert!(p.x >= r && p.x <= viewport.width - r, "x out of range: {}", p.x);
        assert!(p.y >= r && p.y <= viewport.height - r, "y out of range: {}", p.y);
    }
}

#[test]
fn spawned_systems_start_inside_viewport() {
    for preset in [Preset::Constellation, Preset::Bubbles, Preset::Embers] {
        let system = ParticleSystem::new(&seeded_config(preset, 200), 800.0, 600.0);
        assert_eq!(system.len(), 200);
        for particle in &system.particles {
            let r = particle.radius;
            assert!(particle.position.x >= r && particle.position.x <= 800.0 - r);
            assert!(particle.position.y >= r && particle.position.y <= 600.0 - r);
        }
    }
}

#[test]
fn tiny_viewport_centres_particles() {
    let mut system = ParticleSystem::new(&seeded_config(Preset::Constellation, 10), 800.0, 600.0);
    system.resize(10.0, 0.0);
    for particle in &system.particles {
        assert_eq!(particle.position, Vector2::new(5.0, 0.0));
    }

    // and stepping a collapsed viewport stays finite
    let mut surface = CommandList::new();
    system.step(&FrameInput::default(), &mut surface);
    assert_inside(&system);
}

// ==================================================================================
// Motion tests
// ==================================================================================

#[test]
fn every_behavior_stays_in_bounds() {
    for preset in [Preset::Constellation, Preset::Bubbles, Preset::Embers] {
        let mut system = ParticleSystem::new(&seeded_config(preset, 100), 400.0, 300.0);
        let mut surface = CommandList::new();

        // a pointer sweeping across the field while pressed
        let mut events = vec![InputEvent::PointerDown(Vector2::new(0.0, 150.0))];
        for frame in 0..300 {
            events.push(InputEvent::PointerMoved(Vector2::new(frame as f32, 150.0)));
            let input = FrameInput::with_events(std::mem::take(&mut events));
            surface.clear_commands();
            system.step(&input, &mut surface);
            assert_inside(&system);
        }
    }
}

#[test]
fn resize_repositions_into_new_viewport() {
    let mut system = ParticleSystem::new(&seeded_config(Preset::Constellation, 50), 1920.0, 1080.0);
    system.resize(320.0, 240.0);
    assert_eq!(system.len(), 50);
    assert_inside(&system);
}

// ==================================================================================
// Pulse tests
// ==================================================================================

#[test]
fn pulse_rests_at_min_radius_without_pointer() {
    let viewport = Viewport::new(800.0, 600.0);
    let mouse = MouseState::new(120.0, Activation::Hover);
    let mut particle = Particle::new(Vector2::new(400.0, 300.0), Vector2::new(0.0, 0.0), 6.0);

    for _ in 0..100 {
        particle.update(&pulse(), &mouse, &viewport, 1.0);
        assert_eq!(particle.radius, 6.0);
    }
}

#[test]
fn pulse_grows_monotonically_to_max_radius() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut mouse = MouseState::new(120.0, Activation::Hover);
    mouse.apply(&InputEvent::PointerMoved(Vector2::new(400.0, 300.0)));
    let mut particle = Particle::new(Vector2::new(400.0, 300.0), Vector2::new(0.0, 0.0), 6.0);

    let mut previous = particle.radius;
    for _ in 0..50 {
        particle.update(&pulse(), &mouse, &viewport, 1.0);
        assert!(particle.radius >= previous);
        assert!(particle.radius <= 40.0);
        previous = particle.radius;
    }
    assert_eq!(particle.radius, 40.0);
}

#[test]
fn pulse_clamps_to_grown_radius_near_edges() {
    let viewport = Viewport::new(800.0, 600.0);
    let mut mouse = MouseState::new(120.0, Activation::Hover);
    mouse.apply(&InputEvent::PointerMoved(Vector2::new(795.0, 300.0)));
    let mut particle = Particle::new(Vector2::new(795.0, 300.0), Vector2::new(0.0, 0.0), 6.0);

    particle.update(&pulse(), &mouse, &viewport, 1.0);
    assert_eq!(particle.radius, 9.0);
    assert_eq!(particle.position.x, 800.0 - 9.0);
}

// ==================================================================================
// Fade tests
// ==================================================================================

#[test]
fn fade_shrinks_every_frame_and_expires() {
    let mut system = single_particle_system(Preset::Embers, 400.0, 300.0, 1.0);
    let mut surface = CommandList::new();

    let mut previous = system.particles[0].radius;
    while !system.is_empty() {
        system.step(&FrameInput::default(), &mut surface);
        if let Some(particle) = system.particles.first() {
            assert!((previous - particle.radius - 0.1).abs() < 1e-5);
            assert!(particle.radius > 0.3);
            previous = particle.radius;
        }
        assert!(system.frame_count() < 100, "particle never expired");
    }
    // 1.0 -> 0.3 in steps of 0.1, give or take float error
    assert!((7..=8).contains(&system.frame_count()));
}

#[test]
fn fade_population_never_grows() {
    let mut system = ParticleSystem::new(&seeded_config(Preset::Embers, 100), 800.0, 600.0);
    let mut surface = CommandList::new();
    let mut previous = system.len();

    for _ in 0..200 {
        system.step(&FrameInput::default(), &mut surface);
        assert!(system.len() <= previous);
        previous = system.len();
    }
    // the largest spawn radius is 16, gone after ~160 frames
    assert!(system.is_empty());
}

// ==================================================================================
// Repulsion scenario
// ==================================================================================

#[test]
fn idle_particle_does_not_move() {
    let mut system = single_particle_system(Preset::Constellation, 400.0, 300.0, 10.0);
    let mut surface = CommandList::new();

    system.step(&FrameInput::default(), &mut surface);
    assert_eq!(system.particles[0].position, Vector2::new(400.0, 300.0));
}

#[test]
fn pointer_on_top_of_particle_applies_no_force() {
    let mut system = single_particle_system(Preset::Constellation, 400.0, 300.0, 10.0);
    let mut surface = CommandList::new();

    let input = FrameInput::with_events(vec![InputEvent::PointerDown(Vector2::new(400.0, 300.0))]);
    system.step(&input, &mut surface);

    let particle = system.particles[0];
    assert!(system.mouse.active);
    assert_eq!(particle.push, Vector2::new(0.0, 0.0));
    assert!(particle.position.x.is_finite() && particle.position.y.is_finite());
    assert_eq!(particle.position, Vector2::new(400.0, 300.0));
}

#[test]
fn released_pointer_lets_push_decay() {
    let mut system = single_particle_system(Preset::Constellation, 400.0, 300.0, 10.0);
    let mut surface = CommandList::new();

    let press = FrameInput::with_events(vec![InputEvent::PointerDown(Vector2::new(300.0, 300.0))]);
    system.step(&press, &mut surface);
    let pushed = system.particles[0].push.x;
    assert!(pushed > 0.0);

    let release = FrameInput::with_events(vec![InputEvent::PointerUp]);
    system.step(&release, &mut surface);
    assert!((system.particles[0].push.x - pushed * 0.9).abs() < 1e-4);
}

// ==================================================================================
// Link tests
// ==================================================================================

#[test]
fn links_fade_with_distance_and_restore_alpha() {
    let config = seeded_config(Preset::Constellation, 0);
    let particles = vec![
        Particle::new(Vector2::new(100.0, 100.0), Vector2::new(0.0, 0.0), 10.0),
        Particle::new(Vector2::new(125.0, 100.0), Vector2::new(0.0, 0.0), 10.0),
        Particle::new(Vector2::new(175.0, 100.0), Vector2::new(0.0, 0.0), 10.0),
        Particle::new(Vector2::new(700.0, 500.0), Vector2::new(0.0, 0.0), 10.0),
    ];
    let mut system = ParticleSystem::from_particles(&config, 800.0, 600.0, particles);
    let mut surface = CommandList::new();
    system.step(&FrameInput::default(), &mut surface);

    let alphas: Vec<f32> = surface.lines().iter().map(|&(_, _, alpha)| alpha).collect();
    assert_eq!(alphas.len(), 3);
    assert!((alphas[0] - 0.75).abs() < 1e-6);
    assert!((alphas[1] - 0.25).abs() < 1e-6);
    assert!((alphas[2] - 0.5).abs() < 1e-6);

    // circles after the link pass are painted fully opaque
    let last_alpha = surface
        .commands
        .iter()
        .rev()
        .find_map(|command| match command {
            particle_field::DrawCommand::SetAlpha(alpha) => Some(*alpha),
            _ => None,
        });
    assert_eq!(last_alpha, Some(1.0));
}

#[test]
fn behaviors_without_links_draw_no_lines() {
    let mut system = ParticleSystem::new(&seeded_config(Preset::Embers, 50), 200.0, 200.0);
    let mut surface = CommandList::new();
    system.step(&FrameInput::default(), &mut surface);
    assert!(surface.lines().is_empty());
    assert_eq!(surface.circles().count(), 50);
}

// ==================================================================================
// Configuration file tests
// ==================================================================================

fn manifest_path(relative: &str) -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn shipped_constellation_config_matches_preset() {
    let loaded = SystemConfig::from_json_file(&manifest_path("configs/constellation.json")).unwrap();
    let mut preset = SystemConfig::preset(Preset::Constellation);
    preset.seed = loaded.seed;
    assert_eq!(loaded, preset);
}

#[test]
fn missing_config_file_error_names_the_path() {
    let path = manifest_path("configs/does-not-exist.json");
    let err = SystemConfig::from_json_file(&path).unwrap_err();
    assert!(
        format!("{err:#}").contains(&path.display().to_string()),
        "error does not mention the path: {err:#}"
    );
}

#[test]
fn malformed_config_file_error_names_the_path() {
    let path = std::env::temp_dir().join(format!("particle_field_malformed_{}.json", std::process::id()));
    std::fs::write(&path, "{ \"particle_count\": ").unwrap();

    let result = SystemConfig::from_json_file(&path);
    std::fs::remove_file(&path).unwrap();

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains(&path.display().to_string()));
}
