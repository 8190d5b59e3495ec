/// Scene layer an item is drawn on. Walls and doors live on the fog layer so
/// dynamic fog treats them as line-of-sight blockers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Layer {
    Fog,
}

/// Stroke and fill style of a path item.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    pub stroke_dash: Vec<f64>,
}

impl Style {
    /// Solid black, 2 units wide, unfilled.
    pub fn wall() -> Self {
        Self {
            fill_color: "black".to_string(),
            fill_opacity: 0.0,
            stroke_color: "#000000".to_string(),
            stroke_opacity: 1.0,
            stroke_width: 2.0,
            stroke_dash: Vec::new(),
        }
    }

    /// Solid red, 5 units wide, unfilled.
    pub fn door() -> Self {
        Self {
            fill_color: "black".to_string(),
            fill_opacity: 0.0,
            stroke_color: "#FF0000".to_string(),
            stroke_opacity: 1.0,
            stroke_width: 5.0,
            stroke_dash: Vec::new(),
        }
    }
}
