use crate::{
    compile::plan::{DrawOp, RenderPlan, TextAlign, TextBaseline, TextOp},
    foundation::core::{Affine, Rect, Rgba8},
    layout::grid::GridLayout,
    model::grid::GridConfig,
    text::engine::{FontRole, TextStyle},
};

/// Weight of grid glyphs.
pub const GRID_FONT_WEIGHT: f32 = 900.0;

/// Background, then per cell: square fill followed by its centered glyph.
pub fn compile_grid(layout: &GridLayout, config: &GridConfig) -> RenderPlan {
    let canvas = layout.canvas();
    let mut ops = Vec::with_capacity(1 + layout.cells.len() * 2);
    if layout.is_empty() {
        return RenderPlan::single_scene(canvas, Rgba8::TRANSPARENT, ops);
    }

    ops.push(DrawOp::FillRect {
        rect: Rect::new(0.0, 0.0, layout.width, layout.height),
        color: config.canvas_background,
        transform: Affine::IDENTITY,
    });

    let style =
        TextStyle::new(FontRole::Sans, config.font_size_px as f32).weight(GRID_FONT_WEIGHT);
    for cell in &layout.cells {
        ops.push(DrawOp::FillRect {
            rect: cell.rect,
            color: config.cell_background,
            transform: Affine::IDENTITY,
        });
        ops.push(DrawOp::Text(TextOp {
            text: cell.ch.to_string(),
            style,
            position: cell.center(),
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            color: config.text_color,
            transform: Affine::IDENTITY,
        }));
    }

    RenderPlan::single_scene(canvas, Rgba8::TRANSPARENT, ops)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/grid.rs"]
mod tests;
