use crate::foundation::core::Point;
use crate::foundation::error::{VttError, VttResult};

/// Map extent and grid size shared by both source schemas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Resolution {
    pub origin: Point,
    /// Map size in grid cells.
    pub size: Point,
    pub pixels_per_grid: f64,
}

impl Resolution {
    /// Build a resolution, rejecting a missing, zero, negative or non-finite grid size.
    pub fn new(origin: Point, size: Point, pixels_per_grid: Option<f64>) -> VttResult<Self> {
        match pixels_per_grid {
            Some(ppg) if ppg.is_finite() && ppg > 0.0 => Ok(Self {
                origin,
                size,
                pixels_per_grid: ppg,
            }),
            _ => Err(VttError::MissingResolution),
        }
    }
}

/// Open polyline in grid space, at least two points.
#[derive(Clone, Debug, PartialEq)]
pub struct WallSegment {
    pub points: Vec<Point>,
}

/// Door span in grid space. Only the first and last bound points are meaningful.
#[derive(Clone, Debug, PartialEq)]
pub struct DoorSegment {
    pub bounds: Vec<Point>,
    pub closed: bool,
}

impl WallSegment {
    /// Returns `None` for segments with fewer than two points.
    pub fn new(points: Vec<Point>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }
}

impl DoorSegment {
    /// Returns `None` for doors with fewer than two bound points.
    pub fn new(bounds: Vec<Point>, closed: bool) -> Option<Self> {
        (bounds.len() >= 2).then_some(Self { bounds, closed })
    }

    pub fn endpoints(&self) -> Option<(Point, Point)> {
        Some((*self.bounds.first()?, *self.bounds.last()?))
    }
}

/// Unified geometry both source schemas normalize into.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalGeometry {
    pub walls: Vec<WallSegment>,
    pub doors: Vec<DoorSegment>,
    pub resolution: Resolution,
}
