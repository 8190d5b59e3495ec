use crate::items::StoreItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GridType {
    Square,
}

/// Base map image of a new scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub name: String,
    /// Pixels per grid cell of the raster.
    pub dpi: f64,
    pub file_name: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    /// Encoded raster. Not part of the JSON manifest.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Everything needed to create a scene in one upload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBundle {
    pub name: String,
    pub grid_type: GridType,
    pub base_map: ImageUpload,
    pub items: Vec<StoreItem>,
}
