use crate::{
    compile::plan::{
        CompositeOp, CompositePass, DrawOp, OffscreenPass, Pass, PassFx, RenderPlan,
        ScenePass, SurfaceDesc, SurfaceId, TextAlign, TextBaseline, TextOp,
    },
    foundation::core::{Affine, Rect, Rgba8, Vec2},
    layout::title_card::{PlacedLine, TitleCardLayout},
};

/// Horizontal displacement of each chromatic ghost of the title.
pub const CHROMATIC_OFFSET_PX: f64 = 2.0;
pub const CHROMATIC_BLUR: PassFx = PassFx::Blur {
    radius_px: 2,
    sigma: 1.0,
};
pub const CHROMATIC_OPACITY: f32 = 0.75;
const GHOST_RED: Rgba8 = Rgba8::rgb(255, 0, 0);
const GHOST_CYAN: Rgba8 = Rgba8::rgb(0, 255, 255);

/// Scanline pattern: every `SCANLINE_PERIOD_PX` rows, the last `SCANLINE_DARK_PX` are shaded.
pub const SCANLINE_PERIOD_PX: u32 = 4;
pub const SCANLINE_DARK_PX: u32 = 2;
pub const SCANLINE_ALPHA: f32 = 0.3;
/// Opacity of the whole scanline layer, blended with `overlay`.
pub const SCANLINE_OPACITY: f32 = 0.2;

const MAIN: SurfaceId = SurfaceId(0);
const GHOST_A: SurfaceId = SurfaceId(1);
const GHOST_B: SurfaceId = SurfaceId(2);
const SCANLINES: SurfaceId = SurfaceId(3);

/// Background, labels, then the title on top; effects add ghost and scanline surfaces.
pub fn compile_title_card(layout: &TitleCardLayout) -> RenderPlan {
    let canvas = layout.frame;
    let frame_rect = Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));

    let mut base_ops = vec![DrawOp::FillRect {
        rect: frame_rect,
        color: layout.palette.background,
        transform: Affine::IDENTITY,
    }];
    base_ops.extend(
        layout
            .labels
            .iter()
            .filter_map(|l| text_op(l, l.color, Affine::IDENTITY)),
    );

    let title_ops = |color: Option<Rgba8>, shift: f64| -> Vec<DrawOp> {
        let pre = Affine::translate(Vec2::new(shift, 0.0));
        layout
            .title_lines
            .iter()
            .filter_map(|l| text_op(l, color.unwrap_or(l.color), pre))
            .collect()
    };

    if !layout.effects_enabled {
        base_ops.extend(title_ops(None, 0.0));
        return RenderPlan::single_scene(canvas, layout.palette.background, base_ops);
    }

    let mut passes = vec![
        Pass::Scene(ScenePass {
            target: MAIN,
            ops: base_ops,
            clear_to_transparent: false,
        }),
        Pass::Scene(ScenePass {
            target: GHOST_A,
            ops: title_ops(Some(GHOST_RED), -CHROMATIC_OFFSET_PX),
            clear_to_transparent: true,
        }),
        Pass::Scene(ScenePass {
            target: GHOST_B,
            ops: title_ops(Some(GHOST_CYAN), CHROMATIC_OFFSET_PX),
            clear_to_transparent: true,
        }),
        Pass::Offscreen(OffscreenPass {
            input: GHOST_A,
            output: GHOST_A,
            fx: CHROMATIC_BLUR,
        }),
        Pass::Offscreen(OffscreenPass {
            input: GHOST_B,
            output: GHOST_B,
            fx: CHROMATIC_BLUR,
        }),
        Pass::Composite(CompositePass {
            target: MAIN,
            ops: vec![
                CompositeOp::Over {
                    src: GHOST_A,
                    opacity: CHROMATIC_OPACITY,
                },
                CompositeOp::Over {
                    src: GHOST_B,
                    opacity: CHROMATIC_OPACITY,
                },
            ],
        }),
        Pass::Scene(ScenePass {
            target: MAIN,
            ops: title_ops(None, 0.0),
            clear_to_transparent: false,
        }),
    ];

    passes.push(Pass::Scene(ScenePass {
        target: SCANLINES,
        ops: scanline_ops(frame_rect),
        clear_to_transparent: true,
    }));
    passes.push(Pass::Composite(CompositePass {
        target: MAIN,
        ops: vec![CompositeOp::Overlay {
            src: SCANLINES,
            opacity: SCANLINE_OPACITY,
        }],
    }));

    RenderPlan {
        canvas,
        clear: layout.palette.background,
        surfaces: vec![SurfaceDesc::for_canvas(canvas); 4],
        passes,
        final_surface: MAIN,
    }
}

fn text_op(line: &PlacedLine, color: Rgba8, pre: Affine) -> Option<DrawOp> {
    if line.text.is_empty() {
        return None;
    }
    Some(DrawOp::Text(TextOp {
        text: line.text.clone(),
        style: line.style,
        position: line.origin,
        align: TextAlign::Start,
        baseline: TextBaseline::Alphabetic,
        color,
        transform: pre * line.transform.to_affine(),
    }))
}

fn scanline_ops(frame: Rect) -> Vec<DrawOp> {
    let shade = Rgba8::BLACK.with_alpha(SCANLINE_ALPHA);
    let period = f64::from(SCANLINE_PERIOD_PX);
    let light = f64::from(SCANLINE_PERIOD_PX - SCANLINE_DARK_PX);
    let mut ops = Vec::new();
    let mut y = frame.y0;
    while y + light < frame.y1 {
        let y0 = y + light;
        let y1 = (y + period).min(frame.y1);
        ops.push(DrawOp::FillRect {
            rect: Rect::new(frame.x0, y0, frame.x1, y1),
            color: shade,
            transform: Affine::IDENTITY,
        });
        y += period;
    }
    ops
}

#[cfg(test)]
#[path = "../../tests/unit/compile/title_card.rs"]
mod tests;
