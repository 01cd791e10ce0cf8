use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::AdframeResult;
use crate::render::surface::{DrawSurface, FrameRGBA, TextStyle};

/// One command received by a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`DrawSurface::clear`].
    Clear,
    /// [`DrawSurface::fill_rect`].
    FillRect {
        /// Filled area.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
    },
    /// [`DrawSurface::fill_path`].
    FillPath {
        /// Filled outline.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
    /// [`DrawSurface::stroke_rect`].
    StrokeRect {
        /// Stroked outline.
        rect: Rect,
        /// Line width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
    /// [`DrawSurface::draw_image`].
    DrawImage {
        /// Source image size.
        source_size: (u32, u32),
        /// Destination rectangle.
        dst: Rect,
    },
    /// [`DrawSurface::fill_text`].
    FillText {
        /// Drawn text.
        text: String,
        /// Anchor point.
        at: Point,
        /// Style.
        style: TextStyle,
    },
}

/// Surface that records commands instead of rasterizing them.
///
/// Text is measured with a fixed advance of `advance_em × font_size` per character, so layout
/// arithmetic is predictable without a font. Snapshots are fully transparent.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    advance_em: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Advance per character, in ems, used when none is configured.
    pub const DEFAULT_ADVANCE_EM: f64 = 0.5;

    /// Create a recording surface of `canvas` size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            advance_em: Self::DEFAULT_ADVANCE_EM,
            commands: Vec::new(),
        }
    }

    /// Return a surface that measures text with `advance_em` per character.
    pub fn with_advance_em(mut self, advance_em: f64) -> Self {
        self.advance_em = advance_em;
        self
    }

    /// Commands received since the last clear (the clear itself included).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawSurface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn draw_image(&mut self, image: &PreparedImage, dst: Rect) -> AdframeResult<()> {
        self.commands.push(DrawCommand::DrawImage {
            source_size: (image.width, image.height),
            dst,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size: f64) -> AdframeResult<f64> {
        Ok(text.chars().count() as f64 * font_size * self.advance_em)
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> AdframeResult<()> {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            at,
            style: *style,
        });
        Ok(())
    }

    fn snapshot(&mut self) -> AdframeResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: vec![0; self.canvas.rgba_len()],
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
