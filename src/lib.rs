//! evagen renders stylized text images: per-character grid strips and title cards.
//!
//! Both renderers are pure, synchronous functions of a configuration snapshot. Each call
//! re-derives the whole image.
//!
//! # Pipeline overview
//!
//! 1. **Layout**: `GridConfig` / `TitleCardConfig` -> exact geometry (`GridLayout`,
//!    `TitleCardLayout`)
//! 2. **Compile**: layout -> backend-agnostic `RenderPlan` (scene, blur and composite passes)
//! 3. **Render**: `RenderPlan -> RasterImage` on the CPU backend (`vello_cpu` + `parley`)
//! 4. **Export** (optional): PNG / JPEG under a fixed file name; failures are logged, not raised
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical configs produce identical pixels on a given font setup.
//! - **No file IO in renderers**: font files are loaded up front into a [`FontBook`];
//!   installed system fonts back them unless [`FontBook::system_fonts`] disables that.
//! - **Premultiplied RGBA8** surfaces; export converts as needed.
#![forbid(unsafe_code)]

mod compile;
mod export;
mod foundation;
mod layout;
mod model;
mod render;
mod text;

pub use compile::grid::{GRID_FONT_WEIGHT, compile_grid};
pub use compile::plan::{
    CompositeOp, CompositePass, DrawOp, OffscreenPass, Pass, PassFx, PixelFormat, RenderPlan,
    ScenePass, SurfaceDesc, SurfaceId, TextAlign, TextBaseline, TextOp,
};
pub use compile::title_card::{
    CHROMATIC_BLUR, CHROMATIC_OFFSET_PX, CHROMATIC_OPACITY, SCANLINE_ALPHA, SCANLINE_DARK_PX,
    SCANLINE_OPACITY, SCANLINE_PERIOD_PX, compile_title_card,
};
pub use export::encode::{
    ExportFormat, Exporter, GRID_EXPORT_NAME, TITLE_CARD_EXPORT_NAME, TITLE_CARD_JPEG_QUALITY,
    encode_jpeg, encode_png,
};
pub use foundation::core::{Affine, Canvas, Point, Rect, Rgba8, Rgba8Premul, ScaleAbout, Vec2};
pub use foundation::error::{EvaError, EvaResult};
pub use layout::grid::{GridCell, GridLayout, layout_grid};
pub use layout::title_card::{
    Breakpoint, DEFAULT_FRAME_WIDTH, FrameSpec, MIN_FRAME_HEIGHT, PlacedLine, TITLE_LEADING,
    TitleCardLayout, Typography, layout_title_card,
};
pub use model::grid::{
    CELL_SIZE_RATIO, Direction, FONT_SIZE_RANGE, GAP_RANGE, GridConfig, PADDING_RANGE,
};
pub use model::title_card::{Palette, SCALE_RANGE, Theme, TitleCardConfig, TitleElement};
pub use render::backend::{RasterImage, RenderBackend};
pub use render::cpu::CpuBackend;
pub use render::passes::{PassBackend, execute_plan};
pub use render::pipeline::{render_grid, render_title_card};
pub use text::engine::{
    ApproxMeasure, FontBook, FontRole, SANS_FONT_ENV, SERIF_FONT_ENV, ShapedText, TextExtent,
    TextLayoutEngine, TextMeasure, TextStyle,
};
