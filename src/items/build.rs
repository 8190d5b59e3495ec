use crate::foundation::core::{Anchor, BezPath, Point};
use crate::items::primitive::{DoorMeta, Primitive, PrimitiveKind};
use crate::normalize::{CanonicalGeometry, DoorSegment, WallSegment};

/// Build one wall item per segment, in source order.
///
/// `density` is the target scene's grid-to-pixel multiplier, independent of the
/// document's own `pixels_per_grid`.
pub fn build_walls(geometry: &CanonicalGeometry, density: f64, anchor: Anchor) -> Vec<Primitive> {
    if geometry.walls.is_empty() {
        tracing::warn!("no wall data found in the file");
    }
    geometry
        .walls
        .iter()
        .filter_map(|w| wall_primitive(w, density, anchor))
        .collect()
}

/// Build one door item per segment, in source order.
pub fn build_doors(geometry: &CanonicalGeometry, density: f64, anchor: Anchor) -> Vec<Primitive> {
    geometry
        .doors
        .iter()
        .filter_map(|d| door_primitive(d, density, anchor))
        .collect()
}

pub fn wall_primitive(segment: &WallSegment, density: f64, anchor: Anchor) -> Option<Primitive> {
    let points: Vec<Point> = segment
        .points
        .iter()
        .map(|&p| anchor.to_pixels(p, density))
        .collect();
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }

    let mut path = BezPath::new();
    path.move_to(*first);
    for &p in rest {
        path.line_to(p);
    }

    Some(Primitive {
        kind: PrimitiveKind::Wall,
        position: anchor.position,
        path,
    })
}

/// Doors render as a straight span between the first and last bound points.
pub fn door_primitive(door: &DoorSegment, density: f64, anchor: Anchor) -> Option<Primitive> {
    if door.bounds.len() < 2 {
        return None;
    }
    let (first, last) = door.endpoints()?;
    let first = anchor.to_pixels(first, density);
    let last = anchor.to_pixels(last, density);

    let mut path = BezPath::new();
    path.move_to(first);
    path.line_to(last);

    Some(Primitive {
        kind: PrimitiveKind::Door(DoorMeta {
            open: !door.closed,
            start: 0.0,
            end: first.distance(last),
        }),
        position: anchor.position,
        path,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/items/build.rs"]
mod tests;
