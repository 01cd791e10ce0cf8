//! The five preview layers and their fixed drawing order.
//!
//! Every function here is synchronous: images arrive already decoded, so the order in which
//! layers reach the surface is exactly the order of the calls in [`draw_layers`].

use std::fmt;

use crate::assets::decode::PreparedImage;
use crate::edit::state::EditState;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::AdframeResult;
use crate::render::shapes::fill_rounded_rect;
use crate::render::surface::{DrawSurface, TextBaseline, TextStyle};
use crate::template::model::{CaptionSpec, CtaSpec, ImageMask, TemplateSpec, TextAlign};
use crate::text::wrap::wrap_lines;

/// Width of the frame stroked around the user image.
pub const MASK_STROKE_WIDTH: f64 = 5.0;
/// Color of the frame stroked around the user image.
pub const MASK_STROKE_COLOR: Rgba8 = Rgba8::WHITE;
/// Extra vertical space between caption lines, added to the font size.
pub const CAPTION_LINE_GAP: f64 = 10.0;
/// CTA label font size.
pub const CTA_FONT_SIZE: f64 = 30.0;
/// Padding between the CTA label and the button edge, on every side.
pub const CTA_PADDING: f64 = 24.0;
/// CTA button corner radius.
pub const CTA_CORNER_RADIUS: f64 = 10.0;

/// A visual element of the preview, in occlusion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Solid fill with the selected color.
    Background,
    /// Decorative pattern over the whole canvas.
    Pattern,
    /// User image in the mask rectangle, plus its frame.
    MaskImage,
    /// Wrapped caption lines.
    Caption,
    /// Call-to-action button.
    Cta,
}

impl Layer {
    /// All layers, bottom to top.
    pub const ORDER: [Layer; 5] = [
        Layer::Background,
        Layer::Pattern,
        Layer::MaskImage,
        Layer::Caption,
        Layer::Cta,
    ];
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Background => "background",
            Self::Pattern => "pattern",
            Self::MaskImage => "mask-image",
            Self::Caption => "caption",
            Self::Cta => "cta",
        };
        f.write_str(name)
    }
}

/// What happened to one layer during a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayerStatus {
    /// The layer reached the surface.
    Drawn,
    /// The layer was left out; the reason is for logs and diagnostics.
    Skipped(String),
}

/// Per-layer outcome of one render, bottom to top.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// One entry per layer, in drawing order.
    pub outcomes: Vec<(Layer, LayerStatus)>,
}

impl RenderReport {
    /// Status of `layer`, if it was attempted.
    pub fn status(&self, layer: Layer) -> Option<&LayerStatus> {
        self.outcomes
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, s)| s)
    }

    /// Whether `layer` reached the surface.
    pub fn drawn(&self, layer: Layer) -> bool {
        matches!(self.status(layer), Some(LayerStatus::Drawn))
    }

    fn record(&mut self, layer: Layer, result: AdframeResult<()>) {
        let status = match result {
            Ok(()) => LayerStatus::Drawn,
            Err(e) => {
                tracing::warn!(%layer, error = %e, "layer skipped");
                LayerStatus::Skipped(e.to_string())
            }
        };
        self.outcomes.push((layer, status));
    }

    fn skip(&mut self, layer: Layer, reason: &str) {
        tracing::debug!(%layer, reason, "layer skipped");
        self.outcomes
            .push((layer, LayerStatus::Skipped(reason.to_owned())));
    }
}

/// Frame around the user image: the mask rectangle pushed out by the stroke width.
pub fn mask_frame_rect(mask: ImageMask) -> Rect {
    mask.rect().inflate(MASK_STROKE_WIDTH, MASK_STROKE_WIDTH)
}

/// CTA button for a label of `text_width`, centered on `center`.
pub fn cta_button_rect(center: Point, text_width: f64) -> Rect {
    let width = text_width + 2.0 * CTA_PADDING;
    let height = CTA_FONT_SIZE + 2.0 * CTA_PADDING;
    Rect::from_center_size(center, (width, height))
}

/// Anchor of caption line `index` (0-based).
pub fn caption_line_anchor(caption: &CaptionSpec, index: usize) -> Point {
    Point::new(
        caption.position.x,
        caption.position.y + index as f64 * (caption.font_size + CAPTION_LINE_GAP),
    )
}

/// Fill the whole surface with `color`.
pub fn draw_background<S>(surface: &mut S, color: Rgba8)
where
    S: DrawSurface + ?Sized,
{
    let full = surface.canvas().rect();
    surface.fill_rect(full, color);
}

/// Stretch the pattern over the whole surface.
pub fn draw_pattern<S>(surface: &mut S, pattern: &PreparedImage) -> AdframeResult<()>
where
    S: DrawSurface + ?Sized,
{
    let full = surface.canvas().rect();
    surface.draw_image(pattern, full)
}

/// Stretch the user image into the mask rectangle and frame it.
pub fn draw_masked_image<S>(
    surface: &mut S,
    mask: ImageMask,
    image: &PreparedImage,
) -> AdframeResult<()>
where
    S: DrawSurface + ?Sized,
{
    surface.draw_image(image, mask.rect())?;
    surface.stroke_rect(mask_frame_rect(mask), MASK_STROKE_WIDTH, MASK_STROKE_COLOR);
    Ok(())
}

/// Wrap `text` and draw one line per row below the caption anchor.
pub fn draw_caption<S>(surface: &mut S, caption: &CaptionSpec, text: &str) -> AdframeResult<()>
where
    S: DrawSurface + ?Sized,
{
    let style = TextStyle {
        font_size: caption.font_size,
        color: caption.text_color.rgba(),
        align: caption.alignment,
        baseline: TextBaseline::Alphabetic,
    };
    for (i, line) in wrap_lines(text, caption.max_chars_per_line).iter().enumerate() {
        surface.fill_text(line, caption_line_anchor(caption, i), &style)?;
    }
    Ok(())
}

/// Measure the label, fill the rounded button behind it, then draw it centered.
pub fn draw_cta<S>(surface: &mut S, cta: &CtaSpec, label: &str) -> AdframeResult<()>
where
    S: DrawSurface + ?Sized,
{
    let text_width = surface.measure_text(label, CTA_FONT_SIZE)?;
    let center = Point::from(cta.position);
    fill_rounded_rect(
        surface,
        cta_button_rect(center, text_width),
        CTA_CORNER_RADIUS,
        cta.background_color.rgba(),
    );
    let style = TextStyle {
        font_size: CTA_FONT_SIZE,
        color: cta.text_color.rgba(),
        align: TextAlign::Center,
        baseline: TextBaseline::Middle,
    };
    surface.fill_text(label, center, &style)
}

/// Clear `surface` and draw every layer bottom to top.
///
/// `pattern` and `mask_image` are the outcomes of loading the two images; a failed load skips
/// its layer and the remaining layers are still drawn.
pub fn draw_layers<S>(
    surface: &mut S,
    template: &TemplateSpec,
    edit: &EditState,
    pattern: AdframeResult<PreparedImage>,
    mask_image: AdframeResult<PreparedImage>,
) -> RenderReport
where
    S: DrawSurface + ?Sized,
{
    let mut report = RenderReport::default();
    surface.clear();

    draw_background(surface, edit.selected_color.rgba());
    report.record(Layer::Background, Ok(()));

    report.record(
        Layer::Pattern,
        pattern.and_then(|img| draw_pattern(surface, &img)),
    );
    report.record(
        Layer::MaskImage,
        mask_image.and_then(|img| draw_masked_image(surface, template.image_mask, &img)),
    );

    match &template.caption {
        Some(caption) => report.record(
            Layer::Caption,
            draw_caption(surface, caption, &edit.selected_caption),
        ),
        None => report.skip(Layer::Caption, "template has no caption section"),
    }
    match &template.cta {
        Some(cta) => report.record(Layer::Cta, draw_cta(surface, cta, &edit.selected_cta)),
        None => report.skip(Layer::Cta, "template has no cta section"),
    }

    report
}

#[cfg(test)]
#[path = "../../tests/unit/render/layers.rs"]
mod tests;
