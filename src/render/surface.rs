use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::AdframeResult;
use crate::template::model::TextAlign;

/// A rendered preview as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. Because the background layer is an opaque fill, rendered
/// previews are fully opaque and the distinction only matters for partially drawn surfaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Premultiplied RGBA of the pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Vertical anchoring of a text run relative to its anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    /// Anchor is on the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Anchor is at the middle of the em box.
    Middle,
}

/// Style of a single text draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels (the body face is fixed per surface).
    pub font_size: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Horizontal anchoring.
    pub align: TextAlign,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
}

/// The 2D drawing surface a compositor owns.
///
/// Commands are applied in call order; later commands occlude earlier ones. Fallible commands
/// leave the surface unchanged on error.
pub trait DrawSurface {
    /// Surface dimensions.
    fn canvas(&self) -> Canvas;

    /// Discard everything drawn so far, leaving the surface fully transparent.
    fn clear(&mut self);

    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Fill a closed path (non-zero winding) with a solid color.
    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    /// Stroke the outline of `rect` with a line of `width` centered on the edges.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8);

    /// Draw `image` stretched to exactly cover `dst` (aspect ratio not preserved).
    fn draw_image(&mut self, image: &PreparedImage, dst: Rect) -> AdframeResult<()>;

    /// Advance width of `text` at `font_size` in the surface's body face.
    fn measure_text(&mut self, text: &str, font_size: f64) -> AdframeResult<f64>;

    /// Draw one line of `text` anchored at `at`.
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) -> AdframeResult<()>;

    /// Rasterize everything drawn since the last [`DrawSurface::clear`].
    fn snapshot(&mut self) -> AdframeResult<FrameRGBA>;
}
