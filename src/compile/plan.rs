use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};
use crate::text::engine::TextStyle;

#[derive(Clone, Debug)]
/// Backend-agnostic render plan for one image.
///
/// A plan consists of:
/// - surface declarations (`surfaces`)
/// - a sequence of passes (`passes`)
/// - a declared final surface (`final_surface`)
///
/// Every surface has the canvas size. Surface 0 starts cleared to `clear`; all others start
/// transparent.
pub struct RenderPlan {
    pub canvas: Canvas,
    pub clear: Rgba8,
    pub surfaces: Vec<SurfaceDesc>,
    pub passes: Vec<Pass>,
    pub final_surface: SurfaceId,
}

impl RenderPlan {
    /// Plan for a single surface drawn by one scene pass.
    pub fn single_scene(canvas: Canvas, clear: Rgba8, ops: Vec<DrawOp>) -> Self {
        Self {
            canvas,
            clear,
            surfaces: vec![SurfaceDesc::for_canvas(canvas)],
            passes: vec![Pass::Scene(ScenePass {
                target: SurfaceId(0),
                ops,
                clear_to_transparent: false,
            })],
            final_surface: SurfaceId(0),
        }
    }

    /// Every draw op in pass order.
    pub fn draw_ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.passes.iter().flat_map(|p| match p {
            Pass::Scene(s) => s.ops.as_slice(),
            _ => &[],
        })
    }
}

#[derive(Clone, Debug)]
/// A single pass in a [`RenderPlan`].
pub enum Pass {
    Scene(ScenePass),
    Offscreen(OffscreenPass),
    Composite(CompositePass),
}

#[derive(Clone, Debug)]
/// Draw operations into a surface.
pub struct ScenePass {
    pub target: SurfaceId,
    pub ops: Vec<DrawOp>,
    pub clear_to_transparent: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Identifier for a render surface declared in [`RenderPlan::surfaces`].
pub struct SurfaceId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Supported pixel formats for render surfaces.
pub enum PixelFormat {
    Rgba8Premul,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Surface declaration: dimensions + pixel format.
pub struct SurfaceDesc {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl SurfaceDesc {
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            format: PixelFormat::Rgba8Premul,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Post-processing effect applied by an [`OffscreenPass`].
pub enum PassFx {
    Blur { radius_px: u32, sigma: f32 },
}

#[derive(Clone, Debug)]
/// Run a post-processing effect producing a surface from an input surface.
pub struct OffscreenPass {
    pub input: SurfaceId,
    pub output: SurfaceId,
    pub fx: PassFx,
}

#[derive(Clone, Debug)]
/// Composite surfaces into a target surface.
pub struct CompositePass {
    pub target: SurfaceId,
    pub ops: Vec<CompositeOp>,
}

#[derive(Clone, Debug, PartialEq)]
/// A compositing operation between surfaces.
pub enum CompositeOp {
    /// Source-over.
    Over { src: SurfaceId, opacity: f32 },
    /// Separable `overlay` blend, then source-over.
    Overlay { src: SurfaceId, opacity: f32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Horizontal anchoring of a text op's `position`.
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Vertical anchoring of a text op's `position`.
pub enum TextBaseline {
    #[default]
    Alphabetic,
    /// Middle of the ascent/descent box.
    Middle,
}

#[derive(Clone, Debug, PartialEq)]
/// One line of text to shape and paint.
pub struct TextOp {
    pub text: String,
    pub style: TextStyle,
    pub position: Point,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: Rgba8,
    pub transform: Affine,
}

#[derive(Clone, Debug, PartialEq)]
/// Draw operation emitted by the compilers.
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba8,
        transform: Affine,
    },
    Text(TextOp),
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
