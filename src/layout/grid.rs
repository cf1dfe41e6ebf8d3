use crate::{
    foundation::{
        core::{Canvas, Point, Rect},
        error::EvaResult,
    },
    model::grid::GridConfig,
};

/// One square cell holding exactly one character.
#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    pub index: usize,
    pub ch: char,
    pub rect: Rect,
}

impl GridCell {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// Exact (unrounded) geometry of a grid rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub cells: Vec<GridCell>,
}

impl GridLayout {
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            cell_size: 0.0,
            cells: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raster size the layout paints into.
    pub fn canvas(&self) -> Canvas {
        Canvas::from_extent(self.width, self.height)
    }
}

/// Compute canvas extent and cell rectangles for `config`.
pub fn layout_grid(config: &GridConfig) -> EvaResult<GridLayout> {
    config.validate()?;

    let chars = config.chars();
    if chars.is_empty() {
        return Ok(GridLayout::empty());
    }

    let n = chars.len() as f64;
    let cell = config.cell_size();
    let pad = config.padding_px;
    let gap = config.gap_px;

    let along = pad * 2.0 + n * cell + (n - 1.0) * gap;
    let across = pad * 2.0 + cell;
    let horizontal = config.direction.is_horizontal();
    let (width, height) = if horizontal {
        (along, across)
    } else {
        (across, along)
    };

    let cells = chars
        .into_iter()
        .enumerate()
        .map(|(index, ch)| {
            let offset = pad + index as f64 * (cell + gap);
            let (x, y) = if horizontal {
                (offset, pad)
            } else {
                (pad, offset)
            };
            GridCell {
                index,
                ch,
                rect: Rect::new(x, y, x + cell, y + cell),
            }
        })
        .collect();

    Ok(GridLayout {
        width,
        height,
        cell_size: cell,
        cells,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
