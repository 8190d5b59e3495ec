pub use kurbo::{BezPath, PathEl, Point, Vec2};

/// Placement origin and non-uniform scale applied to imported geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Position every emitted item is placed at.
    pub position: Point,
    /// Per-axis multiplier applied to point coordinates.
    pub scale: Vec2,
}

impl Anchor {
    /// Origin placement with unit scale.
    pub const IDENTITY: Self = Self {
        position: Point::ORIGIN,
        scale: Vec2::new(1.0, 1.0),
    };

    /// Create an anchor from a position and a scale.
    pub fn new(position: Point, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Map a grid-space point into pixel space at `density` grid-to-pixel.
    ///
    /// The anchor position is not added: items carry it as their own position.
    pub fn to_pixels(self, p: Point, density: f64) -> Point {
        Point::new(p.x * density * self.scale.x, p.y * density * self.scale.y)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Bytes per binary megabyte, used for size ceilings.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Pixels per binary megapixel, used for resolution ceilings.
pub const PIXELS_PER_MP: u64 = 1024 * 1024;

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
