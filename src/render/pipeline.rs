use crate::{
    compile::{grid::compile_grid, plan::RenderPlan, title_card::compile_title_card},
    foundation::error::EvaResult,
    layout::{
        grid::layout_grid,
        title_card::{FrameSpec, layout_title_card},
    },
    model::{grid::GridConfig, title_card::TitleCardConfig},
    render::{
        backend::{RasterImage, RenderBackend},
        passes::execute_plan,
    },
};

/// Render a character grid from scratch.
///
/// Empty text yields [`RasterImage::empty`] without touching the backend.
#[tracing::instrument(skip(config, backend), fields(chars = config.text.chars().count()))]
pub fn render_grid<B: RenderBackend>(
    config: &GridConfig,
    backend: &mut B,
) -> EvaResult<RasterImage> {
    let layout = layout_grid(config)?;
    tracing::debug!(
        width = layout.width,
        height = layout.height,
        cell = layout.cell_size,
        "grid layout"
    );
    let plan = compile_grid(&layout, config);
    execute(backend, &plan)
}

/// Render a title card from scratch at the given frame width.
#[tracing::instrument(skip(config, backend), fields(theme = ?config.theme, effects = config.effects_enabled))]
pub fn render_title_card<B: RenderBackend>(
    config: &TitleCardConfig,
    frame: FrameSpec,
    backend: &mut B,
) -> EvaResult<RasterImage> {
    let layout = layout_title_card(config, frame, backend)?;
    let plan = compile_title_card(&layout);
    execute(backend, &plan)
}

fn execute<B: RenderBackend>(backend: &mut B, plan: &RenderPlan) -> EvaResult<RasterImage> {
    if plan.canvas.is_empty() {
        tracing::debug!("empty canvas; nothing to render");
        return Ok(RasterImage::empty());
    }
    tracing::debug!(
        surfaces = plan.surfaces.len(),
        passes = plan.passes.len(),
        "executing render plan"
    );
    execute_plan(backend, plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
