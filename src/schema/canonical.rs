use crate::foundation::core::Point;

/// Universal VTT export (`.uvtt` / `.dd2vtt`). Coordinates are in grid units.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CanonicalDocument {
    pub format: f64,
    pub resolution: RawResolution,
    #[serde(default)]
    pub line_of_sight: Option<Vec<Vec<Point>>>,
    #[serde(default)]
    pub objects_line_of_sight: Option<Vec<Vec<Point>>>,
    #[serde(default)]
    pub portals: Option<Vec<Portal>>,
    /// Base64-encoded map raster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawResolution {
    #[serde(default)]
    pub map_origin: Point,
    #[serde(default)]
    pub map_size: Point,
    #[serde(default)]
    pub pixels_per_grid: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Portal {
    #[serde(default)]
    pub position: Point,
    #[serde(default)]
    pub bounds: Vec<Point>,
    #[serde(default)]
    pub rotation: f64,
    // A missing flag reads as open.
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub freestanding: bool,
}

impl CanonicalDocument {
    /// Return the embedded image payload when it is present and non-empty.
    pub fn image_payload(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }
}
