use crate::foundation::error::{AdframeError, AdframeResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    /// Red channel.
    pub(crate) r: u8,
    /// Green channel.
    pub(crate) g: u8,
    /// Blue channel.
    pub(crate) b: u8,
    /// Alpha channel.
    pub(crate) a: u8,
}

/// Vertical metrics of a laid-out single line, relative to the layout's top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LineBox {
    /// Advance width of the line.
    pub(crate) width: f64,
    /// Baseline offset from the top.
    pub(crate) baseline: f64,
    /// Distance from baseline to the top of the em box.
    pub(crate) ascent: f64,
    /// Distance from baseline to the bottom of the em box.
    pub(crate) descent: f64,
}

impl LineBox {
    /// Offset from the top of the layout to the middle of the em box.
    pub(crate) fn middle(&self) -> f64 {
        self.baseline - (self.ascent - self.descent) / 2.0
    }
}

/// Parley text layout bound to a single body-text face.
///
/// The face is registered once; every layout uses it as the sole font stack entry.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font_bytes` (TTF/OTF) and build fresh Parley contexts around it.
    pub(crate) fn with_font(font_bytes: Vec<u8>) -> AdframeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AdframeError::validation("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AdframeError::validation("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    /// Font handle for glyph rasterization.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as one unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> AdframeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(AdframeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Measure the advance width and vertical metrics of `text`.
    pub(crate) fn line_box(&mut self, text: &str, size_px: f32) -> AdframeResult<LineBox> {
        let layout = self.layout_line(text, size_px, TextBrushRgba8::default())?;
        Ok(line_box_of(&layout, size_px))
    }
}

/// Metrics of the first line of `layout`; empty text reports zero width and em-box metrics.
pub(crate) fn line_box_of(layout: &parley::Layout<TextBrushRgba8>, size_px: f32) -> LineBox {
    let width = f64::from(layout.width());
    match layout.lines().next() {
        Some(line) => {
            let m = line.metrics();
            LineBox {
                width,
                baseline: f64::from(m.baseline),
                ascent: f64::from(m.ascent),
                descent: f64::from(m.descent),
            }
        }
        None => LineBox {
            width,
            baseline: f64::from(size_px),
            ascent: f64::from(size_px),
            descent: 0.0,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
