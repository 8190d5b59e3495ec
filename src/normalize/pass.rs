use crate::foundation::core::Point;
use crate::foundation::error::VttResult;
use crate::normalize::geometry::{CanonicalGeometry, DoorSegment, Resolution, WallSegment};
use crate::schema::{CanonicalDocument, LegacyDocument, LegacyWallKind, SchemaKind, SourceDocument};

/// Knobs for the normalization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizeOpts {
    /// Closed state given to legacy doors, which carry no open/closed flag.
    pub legacy_doors_closed: bool,
}

impl Default for NormalizeOpts {
    fn default() -> Self {
        Self {
            legacy_doors_closed: true,
        }
    }
}

/// Result of normalizing one source document.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedImport {
    pub kind: SchemaKind,
    pub geometry: CanonicalGeometry,
    /// Base64 map image, canonical documents only.
    pub image: Option<String>,
}

/// Convert a classified document into canonical geometry.
pub fn normalize(doc: SourceDocument, opts: NormalizeOpts) -> VttResult<NormalizedImport> {
    let kind = doc.kind();
    let (geometry, image) = match doc {
        SourceDocument::Legacy(doc) => (normalize_legacy(&doc, opts)?, None),
        SourceDocument::Canonical(doc) => normalize_canonical(doc)?,
    };
    tracing::debug!(
        ?kind,
        walls = geometry.walls.len(),
        doors = geometry.doors.len(),
        has_image = image.is_some(),
        "normalized document"
    );
    Ok(NormalizedImport {
        kind,
        geometry,
        image,
    })
}

pub fn normalize_legacy(doc: &LegacyDocument, opts: NormalizeOpts) -> VttResult<CanonicalGeometry> {
    let resolution = Resolution::new(
        Point::ORIGIN,
        Point::new(doc.width, doc.height),
        Some(doc.grid),
    )?;
    let grid = resolution.pixels_per_grid;
    let span = |c: &[f64; 4]| {
        vec![
            Point::new(c[0] / grid, c[1] / grid),
            Point::new(c[2] / grid, c[3] / grid),
        ]
    };

    let mut walls = Vec::new();
    let mut doors = Vec::new();
    for (idx, wall) in doc.walls.iter().enumerate() {
        match wall.kind() {
            LegacyWallKind::Wall => walls.extend(WallSegment::new(span(&wall.c))),
            LegacyWallKind::Door => {
                doors.extend(DoorSegment::new(span(&wall.c), opts.legacy_doors_closed));
            }
            LegacyWallKind::Other(flag) => {
                tracing::debug!(idx, flag, "skipping wall record with unknown door flag");
            }
        }
    }

    Ok(CanonicalGeometry {
        walls,
        doors,
        resolution,
    })
}

pub fn normalize_canonical(
    doc: CanonicalDocument,
) -> VttResult<(CanonicalGeometry, Option<String>)> {
    let resolution = Resolution::new(
        doc.resolution.map_origin,
        doc.resolution.map_size,
        doc.resolution.pixels_per_grid,
    )?;

    let walls = doc
        .line_of_sight
        .into_iter()
        .chain(doc.objects_line_of_sight)
        .flatten()
        .filter_map(WallSegment::new)
        .collect();

    let doors = doc
        .portals
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| DoorSegment::new(p.bounds, p.closed))
        .collect();

    let image = doc.image.filter(|s| !s.is_empty());

    Ok((
        CanonicalGeometry {
            walls,
            doors,
            resolution,
        },
        image,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pass.rs"]
mod tests;
