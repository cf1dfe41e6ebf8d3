use super::*;
use crate::{foundation::core::Point, layout::grid::layout_grid, model::grid::Direction};

fn compiled(config: &GridConfig) -> RenderPlan {
    let layout = layout_grid(config).unwrap();
    compile_grid(&layout, config)
}

#[test]
fn background_then_cell_and_glyph_pairs() {
    let config = GridConfig::with_text("EVA");
    let plan = compiled(&config);
    let ops: Vec<&DrawOp> = plan.draw_ops().collect();
    assert_eq!(ops.len(), 1 + 3 * 2);

    let DrawOp::FillRect { rect, color, .. } = ops[0] else {
        panic!("expected background fill");
    };
    assert_eq!(*color, config.canvas_background);
    assert_eq!(rect.x0, 0.0);
    assert!((rect.x1 - plan_width(&config)).abs() < 1e-9);

    for (i, ch) in ['E', 'V', 'A'].into_iter().enumerate() {
        let DrawOp::FillRect { color, .. } = ops[1 + i * 2] else {
            panic!("expected cell fill");
        };
        assert_eq!(*color, config.cell_background);
        let DrawOp::Text(t) = ops[2 + i * 2] else {
            panic!("expected glyph");
        };
        assert_eq!(t.text, ch.to_string());
        assert_eq!(t.align, TextAlign::Center);
        assert_eq!(t.baseline, TextBaseline::Middle);
        assert_eq!(t.color, config.text_color);
        assert_eq!(t.style.weight, GRID_FONT_WEIGHT);
        assert_eq!(t.style.role, FontRole::Sans);
        assert_eq!(t.style.size_px, 72.0);
    }
}

fn plan_width(config: &GridConfig) -> f64 {
    layout_grid(config).unwrap().width
}

#[test]
fn glyphs_are_centered_in_their_cells() {
    let config = GridConfig {
        direction: Direction::Vertical,
        ..GridConfig::with_text("AB")
    };
    let layout = layout_grid(&config).unwrap();
    let plan = compile_grid(&layout, &config);
    let centers: Vec<Point> = plan
        .draw_ops()
        .filter_map(|op| match op {
            DrawOp::Text(t) => Some(t.position),
            _ => None,
        })
        .collect();
    let expected: Vec<Point> = layout.cells.iter().map(|c| c.center()).collect();
    assert_eq!(centers, expected);
}

#[test]
fn canvas_is_truncated_extent() {
    let plan = compiled(&GridConfig::with_text("AB"));
    assert_eq!(plan.canvas.width, 257);
    assert_eq!(plan.canvas.height, 148);
    assert_eq!(plan.clear, Rgba8::TRANSPARENT);
}

#[test]
fn empty_text_compiles_to_nothing() {
    let plan = compiled(&GridConfig::default());
    assert!(plan.canvas.is_empty());
    assert_eq!(plan.draw_ops().count(), 0);
}
