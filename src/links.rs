//! Connective lines between nearby particles.
//!
//! Every unordered pair is checked, so the pass is O(n²) and dominates the
//! frame for a few hundred particles. Rows of the pair triangle are scanned in
//! parallel and collected back in order, so drawing stays deterministic.

use cgmath::prelude::*;
use cgmath::Vector2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;
use crate::surface::{Color, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub max_distance: f32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { max_distance: 100.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: Vector2<f32>,
    pub to: Vector2<f32>,
    pub opacity: f32,
}

/// Fades linearly from 1 at distance 0 to nothing at `max_distance`.
pub fn link_opacity(distance: f32, max_distance: f32) -> Option<f32> {
    if distance < max_distance {
        Some(1.0 - distance / max_distance)
    } else {
        None
    }
}

pub fn find_links(particles: &[Particle], max_distance: f32) -> Vec<Link> {
    if max_distance <= 0.0 {
        return Vec::new();
    }
    let max_distance2 = max_distance * max_distance;

    particles
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, a)| {
            // j > i: each pair once, never a particle with itself
            particles[i + 1..].iter().filter_map(move |b| {
                let sqr_distance = (a.position - b.position).magnitude2();
                if sqr_distance >= max_distance2 {
                    return None;
                }
                link_opacity(sqr_distance.sqrt(), max_distance).map(|opacity| Link {
                    from: a.position,
                    to: b.position,
                    opacity,
                })
            })
        })
        .collect()
}

pub fn draw_links<S: Surface>(links: &[Link], color: Color, surface: &mut S) {
    if links.is_empty() {
        return;
    }
    surface.set_stroke(color);
    for link in links {
        surface.set_alpha(link.opacity);
        surface.stroke_line(link.from, link.to);
    }
    surface.set_alpha(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle::new(cgmath::vec2(x, y), Vector2::zero(), 5.0)
    }

    #[test]
    fn opacity_at_zero_distance_is_one() {
        assert_eq!(link_opacity(0.0, 100.0), Some(1.0));
    }

    #[test]
    fn no_link_at_or_beyond_max_distance() {
        assert_eq!(link_opacity(100.0, 100.0), None);
        assert_eq!(link_opacity(150.0, 100.0), None);
    }

    #[test]
    fn opacity_decreases_with_distance() {
        let mut previous = f32::INFINITY;
        for step in 0..100 {
            let opacity = link_opacity(step as f32, 100.0).unwrap();
            assert!(opacity < previous);
            previous = opacity;
        }
    }

    #[test]
    fn self_pairs_are_excluded() {
        let particles = vec![particle_at(10.0, 10.0)];
        assert!(find_links(&particles, 100.0).is_empty());
    }

    #[test]
    fn coincident_particles_link_at_full_opacity() {
        let particles = vec![particle_at(10.0, 10.0), particle_at(10.0, 10.0)];
        let links = find_links(&particles, 100.0);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].opacity, 1.0);
    }

    #[test]
    fn links_come_back_in_pair_order() {
        let particles = vec![
            particle_at(0.0, 0.0),
            particle_at(30.0, 0.0),
            particle_at(60.0, 0.0),
            particle_at(500.0, 500.0),
        ];
        let links = find_links(&particles, 100.0);
        let pairs: Vec<_> = links.iter().map(|l| (l.from.x, l.to.x)).collect();
        assert_eq!(pairs, vec![(0.0, 30.0), (0.0, 60.0), (30.0, 60.0)]);
        assert!((links[0].opacity - 0.7).abs() < 1e-6);
    }
}
