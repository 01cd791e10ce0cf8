use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{AdframeError, AdframeResult};
use crate::render::surface::{DrawSurface, FrameRGBA, TextBaseline, TextStyle};
use crate::text::layout::{TextBrushRgba8, TextLayoutEngine, line_box_of};

/// Options for [`CpuSurface`].
#[derive(Clone, Debug, Default)]
pub struct CpuSurfaceOpts {
    /// TTF/OTF bytes of the body-text face. Without a face, text commands fail and the
    /// compositor skips the caption and CTA layers.
    pub font_bytes: Option<Vec<u8>>,
}

impl CpuSurfaceOpts {
    /// Return options using the font at `path` as the body face.
    pub fn with_font_file(mut self, path: impl AsRef<Path>) -> AdframeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            AdframeError::validation(format!("failed to read font '{}': {e}", path.display()))
        })?;
        self.font_bytes = Some(bytes);
        Ok(self)
    }
}

/// CPU raster surface powered by `vello_cpu`, with text shaped by `parley`.
///
/// Commands are recorded into a render context and rasterized on [`DrawSurface::snapshot`].
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    text: Option<TextLayoutEngine>,
}

impl CpuSurface {
    /// Create a surface of `canvas` size.
    pub fn new(canvas: Canvas, opts: CpuSurfaceOpts) -> AdframeResult<Self> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let (w, h) = dims_u16(canvas)?;
        let text = opts
            .font_bytes
            .map(TextLayoutEngine::with_font)
            .transpose()?;
        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(w, h),
            text,
        })
    }

    /// Whether a body face is available for text commands.
    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    fn text_engine(&mut self) -> AdframeResult<&mut TextLayoutEngine> {
        self.text
            .as_mut()
            .ok_or_else(|| AdframeError::render("no body font configured for text"))
    }
}

impl DrawSurface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx.reset();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    fn draw_image(&mut self, image: &PreparedImage, dst: Rect) -> AdframeResult<()> {
        let dst = dst.abs();
        if dst.area() <= 0.0 {
            return Ok(());
        }
        let paint = rgba_premul_to_image(&image.rgba8_premul, image.width, image.height)?;
        let sx = dst.width() / f64::from(image.width);
        let sy = dst.height() / f64::from(image.height);
        let tr = Affine::translate((dst.x0, dst.y0)) * Affine::scale_non_uniform(sx, sy);

        self.reset_transforms();
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        self.reset_transforms();
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size: f64) -> AdframeResult<f64> {
        let engine = self.text_engine()?;
        Ok(engine.line_box(text, font_size as f32)?.width)
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> AdframeResult<()> {
        let size_px = style.font_size as f32;
        let brush = TextBrushRgba8 {
            r: style.color.r,
            g: style.color.g,
            b: style.color.b,
            a: style.color.a,
        };
        let Some(engine) = self.text.as_mut() else {
            return Err(AdframeError::render("no body font configured for text"));
        };
        let layout = engine.layout_line(text, size_px, brush)?;
        let metrics = line_box_of(&layout, size_px);

        let x0 = at.x - metrics.width * style.align.anchor_fraction();
        let y0 = match style.baseline {
            TextBaseline::Alphabetic => at.y - metrics.baseline,
            TextBaseline::Middle => at.y - metrics.middle(),
        };

        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(Affine::translate((x0, y0))));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                // Positioned glyphs carry the run offset and the line baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(engine.font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }

    fn snapshot(&mut self) -> AdframeResult<FrameRGBA> {
        let (w, h) = dims_u16(self.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn dims_u16(canvas: Canvas) -> AdframeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| AdframeError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| AdframeError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> AdframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| AdframeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| AdframeError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(AdframeError::render("image byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    let may_have_opacities = bytes.chunks_exact(4).any(|px| px[3] != 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> AdframeResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
