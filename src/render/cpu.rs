use std::collections::HashMap;

use crate::{
    compile::plan::{
        CompositeOp, CompositePass, DrawOp, OffscreenPass, PassFx, RenderPlan, ScenePass,
        SurfaceDesc, SurfaceId, TextAlign, TextBaseline, TextOp,
    },
    foundation::{
        core::{Affine, Rgba8, Rgba8Premul, Vec2},
        error::{EvaError, EvaResult},
    },
    render::{backend::RasterImage, blur, composite, passes::PassBackend},
    text::engine::{FontBook, TextExtent, TextLayoutEngine, TextMeasure, TextStyle},
};

/// CPU pass executor: `vello_cpu` for fills and glyphs, in-crate kernels for blur/composite.
pub struct CpuBackend {
    text: TextLayoutEngine,
    surfaces: HashMap<SurfaceId, CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(TextLayoutEngine::new())
    }
}

impl CpuBackend {
    pub fn new(text: TextLayoutEngine) -> Self {
        Self {
            text,
            surfaces: HashMap::new(),
        }
    }

    pub fn with_fonts(book: &FontBook) -> EvaResult<Self> {
        Ok(Self::new(TextLayoutEngine::with_fonts(book)?))
    }

    /// Backend whose text sees only explicitly registered fonts.
    pub fn without_system_fonts() -> Self {
        Self::new(TextLayoutEngine::with_system_fonts(false))
    }

    pub fn text_engine(&self) -> &TextLayoutEngine {
        &self.text
    }

    fn take_surface(&mut self, id: SurfaceId, what: &str) -> EvaResult<CpuSurface> {
        self.surfaces.remove(&id).ok_or_else(|| {
            EvaError::render(format!("{what} surface {id:?} was not initialized"))
        })
    }

    fn surface(&self, id: SurfaceId, what: &str) -> EvaResult<&CpuSurface> {
        self.surfaces.get(&id).ok_or_else(|| {
            EvaError::render(format!("{what} surface {id:?} was not initialized"))
        })
    }
}

impl PassBackend for CpuBackend {
    fn ensure_surface(
        &mut self,
        id: SurfaceId,
        desc: &SurfaceDesc,
        clear: Rgba8Premul,
    ) -> EvaResult<()> {
        let width_u16: u16 = desc
            .width
            .try_into()
            .map_err(|_| EvaError::render("surface width exceeds u16"))?;
        let height_u16: u16 = desc
            .height
            .try_into()
            .map_err(|_| EvaError::render("surface height exceeds u16"))?;

        let surface = self
            .surfaces
            .entry(id)
            .or_insert_with(|| CpuSurface::new(width_u16, height_u16));
        if surface.width != width_u16 || surface.height != height_u16 {
            *surface = CpuSurface::new(width_u16, height_u16);
        }
        clear_pixmap(&mut surface.pixmap, clear.to_array());
        Ok(())
    }

    fn exec_scene(&mut self, pass: &ScenePass) -> EvaResult<()> {
        let mut surface = self.take_surface(pass.target, "scene target")?;

        if pass.clear_to_transparent {
            clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);
        }

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        if !pass.clear_to_transparent {
            // Scenes paint on top of what the surface already holds.
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(pixmap_to_image(&surface.pixmap));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(surface.width),
                f64::from(surface.height),
            ));
        }

        let result = pass
            .ops
            .iter()
            .try_for_each(|op| draw_op(&mut self.text, &mut ctx, op));
        if result.is_ok() {
            ctx.flush();
            clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);
            ctx.render_to_pixmap(&mut surface.pixmap);
        }
        self.surfaces.insert(pass.target, surface);
        result
    }

    fn exec_offscreen(&mut self, pass: &OffscreenPass) -> EvaResult<()> {
        let mut output = self.take_surface(pass.output, "offscreen output")?;

        let (w, h) = (u32::from(output.width), u32::from(output.height));
        let input_bytes = if pass.input == pass.output {
            output.pixmap.data_as_u8_slice().to_vec()
        } else {
            let input = match self.surface(pass.input, "offscreen input") {
                Ok(s) if s.width == output.width && s.height == output.height => {
                    Ok(s.pixmap.data_as_u8_slice().to_vec())
                }
                Ok(_) => Err(EvaError::render(
                    "offscreen input/output surface size mismatch",
                )),
                Err(e) => Err(e),
            };
            match input {
                Ok(bytes) => bytes,
                Err(e) => {
                    self.surfaces.insert(pass.output, output);
                    return Err(e);
                }
            }
        };

        let result = match pass.fx {
            PassFx::Blur { radius_px, sigma } => {
                blur::blur_rgba8_premul(&input_bytes, w, h, radius_px, sigma).map(|blurred| {
                    output
                        .pixmap
                        .data_as_u8_slice_mut()
                        .copy_from_slice(&blurred);
                })
            }
        };

        self.surfaces.insert(pass.output, output);
        result
    }

    fn exec_composite(&mut self, pass: &CompositePass) -> EvaResult<()> {
        let mut dst = self.take_surface(pass.target, "composite target")?;

        let result = pass.ops.iter().try_for_each(|op| {
            let (src, opacity, blend): (_, _, fn(&mut [u8], &[u8], f32) -> EvaResult<()>) =
                match *op {
                    CompositeOp::Over { src, opacity } => {
                        (src, opacity, composite::over_in_place)
                    }
                    CompositeOp::Overlay { src, opacity } => {
                        (src, opacity, composite::overlay_in_place)
                    }
                };
            let src = self.surface(src, "composite src")?;
            blend(
                dst.pixmap.data_as_u8_slice_mut(),
                src.pixmap.data_as_u8_slice(),
                opacity,
            )
        });

        self.surfaces.insert(pass.target, dst);
        result
    }

    fn readback_rgba8(
        &mut self,
        surface: SurfaceId,
        plan: &RenderPlan,
    ) -> EvaResult<RasterImage> {
        let s = self.surface(surface, "readback")?;
        let data = s.pixmap.data_as_u8_slice().to_vec();
        let surface_cap = plan.surfaces.len() as u32;
        self.surfaces.retain(|id, _| id.0 < surface_cap);

        Ok(RasterImage {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

impl TextMeasure for CpuBackend {
    fn measure(&mut self, text: &str, style: &TextStyle) -> EvaResult<TextExtent> {
        self.text.measure(text, style)
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn pixmap_to_image(pixmap: &vello_cpu::Pixmap) -> vello_cpu::Image {
    let pixels = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    let copy = vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        pixmap.width(),
        pixmap.height(),
        true,
    );
    vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(copy)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn draw_op(
    text: &mut TextLayoutEngine,
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
) -> EvaResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect {
            rect,
            color,
            transform,
        } => {
            ctx.set_transform(affine_to_cpu(*transform));
            ctx.set_paint(color_to_cpu(*color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
            Ok(())
        }
        DrawOp::Text(t) => draw_text(text, ctx, t),
    }
}

fn draw_text(
    engine: &mut TextLayoutEngine,
    ctx: &mut vello_cpu::RenderContext,
    op: &TextOp,
) -> EvaResult<()> {
    let Some(shaped) = engine.shape(&op.text, &op.style)? else {
        return Ok(());
    };

    let extent = shaped.extent;
    let x = match op.align {
        TextAlign::Start => op.position.x,
        TextAlign::Center => op.position.x - extent.width / 2.0,
    };
    let baseline = match op.baseline {
        TextBaseline::Alphabetic => op.position.y,
        TextBaseline::Middle => op.position.y + (extent.ascent - extent.descent) / 2.0,
    };
    let local = Affine::translate(Vec2::new(x, baseline - shaped.baseline));

    ctx.set_transform(affine_to_cpu(op.transform * local));
    ctx.set_paint(color_to_cpu(op.color));

    for line in shaped.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            // Fallback runs index into their own font, not the requested family.
            let font = run.run().font();
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
