use crate::{
    compile::plan::{
        CompositePass, OffscreenPass, Pass, RenderPlan, ScenePass, SurfaceDesc, SurfaceId,
    },
    foundation::{
        core::Rgba8Premul,
        error::{EvaError, EvaResult},
    },
    render::backend::RasterImage,
};

/// Executes the individual passes of a [`RenderPlan`].
pub trait PassBackend {
    fn ensure_surface(
        &mut self,
        id: SurfaceId,
        desc: &SurfaceDesc,
        clear: Rgba8Premul,
    ) -> EvaResult<()>;

    fn exec_scene(&mut self, pass: &ScenePass) -> EvaResult<()>;

    fn exec_offscreen(&mut self, pass: &OffscreenPass) -> EvaResult<()>;

    fn exec_composite(&mut self, pass: &CompositePass) -> EvaResult<()>;

    fn readback_rgba8(&mut self, surface: SurfaceId, plan: &RenderPlan)
    -> EvaResult<RasterImage>;
}

pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &RenderPlan,
) -> EvaResult<RasterImage> {
    for (idx, desc) in plan.surfaces.iter().enumerate() {
        let id = SurfaceId(
            idx.try_into()
                .map_err(|_| EvaError::render("surface id overflow"))?,
        );
        let clear = if id == SurfaceId(0) {
            plan.clear.premultiplied()
        } else {
            Rgba8Premul::transparent()
        };
        backend.ensure_surface(id, desc, clear)?;
    }

    for pass in &plan.passes {
        match pass {
            Pass::Scene(p) => backend.exec_scene(p)?,
            Pass::Offscreen(p) => backend.exec_offscreen(p)?,
            Pass::Composite(p) => backend.exec_composite(p)?,
        }
    }

    backend.readback_rgba8(plan.final_surface, plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
