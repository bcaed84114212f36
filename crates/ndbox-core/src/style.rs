//! Colors and spacing shared by the layout engine and the renderer.
//!
//! A [`StyleConfig`] is immutable for the duration of a render. JSON overrides are partial:
//! every missing key keeps its default.

use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const BACKGROUND: Color = Color::rgb(0x08, 0x09, 0x0a);
pub const CELL: Color = Color::rgb(0x3a, 0xb1, 0xd2);
pub const CUBE_BORDER: Color = Color::rgb(0xff, 0xbc, 0x03);
pub const MATRIX_BORDER: Color = Color::rgb(0xc2, 0x2e, 0xb8);

pub const NDIM_PALETTE: [Color; 4] = [
    Color::rgb(0x7b, 0xd8, 0x8f),
    Color::rgb(0xfc, 0x61, 0x8d),
    Color::rgb(0x94, 0x8a, 0xe3),
    Color::rgb(0xfd, 0x93, 0x53),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleConfig {
    pub background: Color,
    /// Fill of leaf cells.
    pub cell_color: Color,
    /// Border of 2-D boxes.
    pub matrix_border: Color,
    /// Border of 3-D boxes.
    pub cube_border: Color,
    /// Borders above rank 3, indexed by `(rank - 3) % len`.
    pub ndim_palette: Vec<Color>,
    pub cell_size: f64,
    pub gap: f64,
    pub matrix_gap_x: f64,
    pub matrix_gap_y: f64,
    /// Spacing between repeated sub-boxes above rank 3.
    pub ndim_gap: f64,
    pub line_width: f64,
    /// Canvas padding around the outermost box.
    pub margin: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: BACKGROUND,
            cell_color: CELL,
            matrix_border: MATRIX_BORDER,
            cube_border: CUBE_BORDER,
            ndim_palette: NDIM_PALETTE.to_vec(),
            cell_size: 25.0,
            gap: 8.0,
            matrix_gap_x: 12.0,
            matrix_gap_y: 12.0,
            ndim_gap: 16.0,
            line_width: 2.0,
            margin: 8.0,
        }
    }
}

impl StyleConfig {
    /// Parses a (possibly partial) JSON object on top of the defaults and validates it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let style: Self = serde_json::from_str(text)?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidStyle { message });

        let lengths = [
            ("cellSize", self.cell_size),
            ("gap", self.gap),
            ("matrixGapX", self.matrix_gap_x),
            ("matrixGapY", self.matrix_gap_y),
            ("ndimGap", self.ndim_gap),
            ("lineWidth", self.line_width),
            ("margin", self.margin),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be a finite, non-negative number"));
            }
        }
        if self.cell_size <= 0.0 {
            return invalid("cellSize must be positive".to_string());
        }
        // Borders are stroked inside the gap that surrounds their content.
        if self.line_width > self.gap {
            return invalid(format!(
                "lineWidth ({}) must not exceed gap ({})",
                self.line_width, self.gap
            ));
        }
        if self.ndim_palette.is_empty() {
            return invalid("ndimPalette must contain at least one color".to_string());
        }
        Ok(())
    }

    /// Border color of a box enclosing `rank` axes. Rank 1 has no border.
    pub fn border_color(&self, rank: usize) -> Color {
        match rank {
            0..=2 => self.matrix_border,
            3 => self.cube_border,
            _ => self
                .ndim_palette
                .get((rank - 3) % self.ndim_palette.len().max(1))
                .copied()
                .unwrap_or(self.cube_border),
        }
    }
}
