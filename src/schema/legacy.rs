/// Foundry-style wall export: pixel-space wall records plus grid metadata.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Grid cell size in pixels.
    pub grid: f64,
    pub grid_distance: f64,
    #[serde(default)]
    pub grid_units: Option<String>,
    pub walls: Vec<LegacyWall>,
}

/// One wall record. `c` is `[x1, y1, x2, y2]` in pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegacyWall {
    pub c: [f64; 4],
    #[serde(default)]
    pub door: i64,
    #[serde(default, rename = "move")]
    pub movement: Option<i64>,
    #[serde(default)]
    pub sense: Option<i64>,
    #[serde(default)]
    pub sound: Option<i64>,
}

/// Interpretation of a legacy `door` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegacyWallKind {
    Wall,
    Door,
    /// Secret doors and anything newer than the two known flags.
    Other(i64),
}

impl LegacyWall {
    pub fn kind(&self) -> LegacyWallKind {
        match self.door {
            0 => LegacyWallKind::Wall,
            1 => LegacyWallKind::Door,
            other => LegacyWallKind::Other(other),
        }
    }
}
