use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoldAxis {
    Horizontal,
    Vertical,
}

/// Box of the sub-shape starting at `depth` (the suffix `shape[depth..]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLayout {
    pub depth: usize,
    pub rank: usize,
    pub extent: usize,
    pub width: f64,
    pub height: f64,
    /// Only set for ranks above 3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold: Option<FoldAxis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeLayout {
    pub shape: Vec<usize>,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub levels: Vec<LevelLayout>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    /// Every row of every matrix is painted.
    #[default]
    Full,
    /// First row in full, remaining rows as single-cell stubs.
    Abbreviated,
}
