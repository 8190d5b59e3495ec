use crate::foundation::core::{BezPath, PathEl, Point, Vec2};
use crate::items::style::{Layer, Style};

/// Metadata key the scene's dynamic fog reads door state from.
pub const DOOR_METADATA_KEY: &str = "rodeo.owlbear.dynamic-fog/doors";

/// Path command codes understood by the scene store.
pub const COMMAND_MOVE: u8 = 0;
pub const COMMAND_LINE: u8 = 1;

/// Open/closed state and traversable span of a door item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorMeta {
    pub open: bool,
    /// Distance along the path where the door starts. Always 0.
    pub start: f64,
    /// Distance along the path where the door ends: the endpoint distance.
    pub end: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrimitiveKind {
    Wall,
    Door(DoorMeta),
}

/// A drawable wall or door in pixel space, placed at `position`.
#[derive(Clone, Debug)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub position: Point,
    pub path: BezPath,
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self.kind {
            PrimitiveKind::Wall => "Wall",
            PrimitiveKind::Door(_) => "Door",
        }
    }

    pub fn style(&self) -> Style {
        match self.kind {
            PrimitiveKind::Wall => Style::wall(),
            PrimitiveKind::Door(_) => Style::door(),
        }
    }

    pub fn layer(&self) -> Layer {
        Layer::Fog
    }

    pub fn door(&self) -> Option<&DoorMeta> {
        match &self.kind {
            PrimitiveKind::Door(meta) => Some(meta),
            PrimitiveKind::Wall => None,
        }
    }

    /// Vertices of the path in command order.
    pub fn points(&self) -> Vec<Point> {
        self.path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    /// Convert to the store's item representation.
    pub fn to_store_item(&self, id: impl Into<String>) -> StoreItem {
        let commands = self
            .path
            .elements()
            .iter()
            .filter_map(|el| match *el {
                PathEl::MoveTo(p) => Some(PathCommand(COMMAND_MOVE, p.x, p.y)),
                PathEl::LineTo(p) => Some(PathCommand(COMMAND_LINE, p.x, p.y)),
                _ => None,
            })
            .collect();

        let mut metadata = serde_json::Map::new();
        let mut fill_rule = None;
        if let PrimitiveKind::Door(meta) = self.kind {
            metadata.insert(
                DOOR_METADATA_KEY.to_string(),
                serde_json::json!([{
                    "open": meta.open,
                    "start": { "distance": meta.start, "index": 0 },
                    "end": { "distance": meta.end, "index": 0 },
                }]),
            );
            fill_rule = Some("nonzero".to_string());
        }

        StoreItem {
            id: id.into(),
            item_type: "PATH".to_string(),
            name: self.name().to_string(),
            position: self.position,
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
            layer: self.layer(),
            visible: true,
            style: self.style(),
            fill_rule,
            commands,
            metadata,
        }
    }
}

/// `[code, x, y]` path command as the store expects it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathCommand(pub u8, pub f64, pub f64);

/// Path item in the shape the scene store accepts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreItem {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub position: Point,
    pub scale: Vec2,
    pub rotation: f64,
    pub layer: Layer,
    pub visible: bool,
    pub style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_rule: Option<String>,
    pub commands: Vec<PathCommand>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}
