use crate::foundation::core::Point;
use crate::foundation::error::VttResult;
use crate::normalize::{NormalizeOpts, normalize};
use crate::schema::{SchemaKind, SourceDocument, detect, has_map_image, parse_document, strip_image};

/// Quick look at a file before importing it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DocumentSummary {
    pub kind: SchemaKind,
    pub has_image: bool,
    /// Canonical documents with an image are the only ones that can seed a new scene.
    pub can_create_scene: bool,
    pub walls: usize,
    pub doors: usize,
    pub pixels_per_grid: Option<f64>,
    pub map_size: Option<Point>,
}

pub fn inspect(bytes: &[u8]) -> VttResult<DocumentSummary> {
    let mut value = parse_document(bytes)?;
    let has_image = has_map_image(&value);
    strip_image(&mut value);

    let kind = detect(&value);
    if kind == SchemaKind::Unrecognized {
        return Ok(DocumentSummary {
            kind,
            has_image,
            can_create_scene: false,
            walls: 0,
            doors: 0,
            pixels_per_grid: None,
            map_size: None,
        });
    }

    let geometry = normalize(SourceDocument::from_value(value)?, NormalizeOpts::default())?.geometry;
    Ok(DocumentSummary {
        kind,
        has_image,
        can_create_scene: kind == SchemaKind::Canonical && has_image,
        walls: geometry.walls.len(),
        doors: geometry.doors.len(),
        pixels_per_grid: Some(geometry.resolution.pixels_per_grid),
        map_size: Some(geometry.resolution.size),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/inspect.rs"]
mod tests;
