use crate::foundation::{
    core::Rgba8,
    error::{EvaError, EvaResult},
    math::snap_clamp,
};

/// Fixed ratio between glyph size and the side of the square cell containing it.
pub const CELL_SIZE_RATIO: f64 = 1.4;

/// Input range of the font-size control: `(min, max, step)`.
pub const FONT_SIZE_RANGE: (f64, f64, f64) = (24.0, 200.0, 2.0);
/// Input range of the gap control: `(min, max, step)`.
pub const GAP_RANGE: (f64, f64, f64) = (0.0, 40.0, 1.0);
/// Input range of the padding control: `(min, max, step)`.
pub const PADDING_RANGE: (f64, f64, f64) = (0.0, 80.0, 2.0);

/// Axis along which grid cells are laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Cells run left to right (a row).
    #[default]
    #[serde(alias = "row")]
    Horizontal,
    /// Cells run top to bottom (a column).
    #[serde(alias = "column")]
    Vertical,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Complete input of the grid renderer: one square cell per character.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub text: String,
    pub canvas_background: Rgba8,
    pub cell_background: Rgba8,
    pub text_color: Rgba8,
    pub font_size_px: f64,
    pub gap_px: f64,
    pub padding_px: f64,
    pub direction: Direction,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            canvas_background: Rgba8::rgb(0x00, 0x00, 0x00),
            cell_background: Rgba8::rgb(0x1a, 0x1a, 0x2e),
            text_color: Rgba8::rgb(0xff, 0xff, 0xff),
            font_size_px: 72.0,
            gap_px: 8.0,
            padding_px: 24.0,
            direction: Direction::Horizontal,
        }
    }
}

impl GridConfig {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Side length of one cell.
    pub fn cell_size(&self) -> f64 {
        self.font_size_px * CELL_SIZE_RATIO
    }

    /// Characters in paint order, one per cell.
    ///
    /// Splits on Unicode scalar values; combining marks and multi-scalar emoji land in
    /// separate cells.
    pub fn chars(&self) -> Vec<char> {
        self.text.chars().collect()
    }

    pub fn validate(&self) -> EvaResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(EvaError::validation(
                "grid font_size_px must be finite and > 0",
            ));
        }
        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(EvaError::validation("grid gap_px must be finite and >= 0"));
        }
        if !self.padding_px.is_finite() || self.padding_px < 0.0 {
            return Err(EvaError::validation(
                "grid padding_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Snap numeric fields onto the control ranges (see [`FONT_SIZE_RANGE`] and friends).
    pub fn clamped_to_controls(mut self) -> Self {
        let (min, max, step) = FONT_SIZE_RANGE;
        self.font_size_px = snap_clamp(self.font_size_px, min, max, step);
        let (min, max, step) = GAP_RANGE;
        self.gap_px = snap_clamp(self.gap_px, min, max, step);
        let (min, max, step) = PADDING_RANGE;
        self.padding_px = snap_clamp(self.padding_px, min, max, step);
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/grid.rs"]
mod tests;
