use cgmath::Vector2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Allowed `(min, max)` coordinates along each axis for a point kept
    /// `inset` away from the edges.
    pub fn inset_bounds(&self, inset: f32) -> (Vector2<f32>, Vector2<f32>) {
        let (min_x, max_x) = inset_range(self.width, inset);
        let (min_y, max_y) = inset_range(self.height, inset);
        (cgmath::vec2(min_x, min_y), cgmath::vec2(max_x, max_y))
    }

    pub fn random_point<R: Rng>(&self, inset: f32, rng: &mut R) -> Vector2<f32> {
        let (min, max) = self.inset_bounds(inset);
        cgmath::vec2(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y))
    }
}

/// The inset never exceeds half the extent, so the range is never inverted.
pub fn inset_range(extent: f32, inset: f32) -> (f32, f32) {
    let extent = extent.max(0.0);
    let inset = inset.max(0.0).min(extent * 0.5);
    (inset, extent - inset)
}
