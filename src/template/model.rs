use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{AdframeError, AdframeResult};
use crate::template::color::HexColor;

/// Template descriptor: the immutable geometry and style of one ad layout.
///
/// The JSON shape follows the editor's descriptor (`caption`, `cta`, `imageMask`, `urls`).
/// `caption` and `cta` are optional; a missing section skips that layer at render time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSpec {
    /// Output surface size.
    #[serde(default)]
    pub canvas: Canvas,
    /// Caption block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<CaptionSpec>,
    /// Call-to-action button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<CtaSpec>,
    /// Placement rectangle for the user image.
    pub image_mask: ImageMask,
    /// Remote asset references.
    pub urls: TemplateUrls,
}

/// Position in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text ends at the anchor.
    Right,
    /// Text is centered on the anchor.
    Center,
    /// Same as `Left` for left-to-right scripts.
    Start,
    /// Same as `Right` for left-to-right scripts.
    End,
}

impl TextAlign {
    /// Fraction of the measured width to shift left of the anchor.
    pub fn anchor_fraction(self) -> f64 {
        match self {
            Self::Left | Self::Start => 0.0,
            Self::Center => 0.5,
            Self::Right | Self::End => 1.0,
        }
    }
}

/// Caption block style and default text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSpec {
    /// Text shown before the user edits the caption.
    #[serde(rename = "text", alias = "defaultText")]
    pub default_text: String,
    /// Anchor of the first line's baseline.
    pub position: Position,
    /// Greedy wrap limit, in characters.
    #[serde(rename = "maxCharactersPerLine", alias = "maxCharsPerLine")]
    pub max_chars_per_line: usize,
    /// Font size in pixels.
    pub font_size: f64,
    /// Horizontal alignment of every line.
    #[serde(default)]
    pub alignment: TextAlign,
    /// Fill color of the text.
    pub text_color: HexColor,
}

/// Call-to-action button style and default label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CtaSpec {
    /// Label shown before the user edits it.
    #[serde(rename = "text", alias = "defaultText")]
    pub default_text: String,
    /// Center of the button.
    pub position: Position,
    /// Label color.
    pub text_color: HexColor,
    /// Button fill color.
    pub background_color: HexColor,
}

/// Rectangle the user image is stretched into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageMask {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ImageMask {
    /// The mask as a rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Remote asset references of a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateUrls {
    /// Default user image.
    #[serde(rename = "mask", alias = "maskUrl")]
    pub mask_url: String,
    /// Stroke artwork. Carried for completeness; the frame around the image is drawn
    /// procedurally.
    #[serde(rename = "stroke", alias = "strokeUrl")]
    pub stroke_url: String,
    /// Decorative pattern stretched over the whole canvas.
    #[serde(rename = "designPattern", alias = "patternUrl")]
    pub pattern_url: String,
}

impl TemplateSpec {
    /// Parse a template from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> AdframeResult<Self> {
        let template: Self = serde_json::from_reader(r)
            .map_err(|e| AdframeError::serde(format!("parse template JSON: {e}")))?;
        template.validate()?;
        Ok(template)
    }

    /// Parse a template from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> AdframeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AdframeError::validation(format!("open template JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> AdframeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AdframeError::serde(format!("serialize template JSON: {e}")))
    }

    /// Check the invariants the layer drawer relies on.
    pub fn validate(&self) -> AdframeResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;

        if let Some(caption) = &self.caption {
            if caption.max_chars_per_line == 0 {
                return Err(AdframeError::validation(
                    "caption maxCharactersPerLine must be > 0",
                ));
            }
            check_font_size("caption fontSize", caption.font_size)?;
            check_finite(
                "caption position",
                &[caption.position.x, caption.position.y],
            )?;
        }
        if let Some(cta) = &self.cta {
            check_finite("cta position", &[cta.position.x, cta.position.y])?;
        }

        let m = self.image_mask;
        check_finite("imageMask", &[m.x, m.y, m.width, m.height])?;
        if m.width < 0.0 || m.height < 0.0 {
            return Err(AdframeError::validation(
                "imageMask width/height must be >= 0",
            ));
        }
        Ok(())
    }
}

fn check_font_size(what: &str, v: f64) -> AdframeResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(AdframeError::validation(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}

fn check_finite(what: &str, vs: &[f64]) -> AdframeResult<()> {
    if vs.iter().any(|v| !v.is_finite()) {
        return Err(AdframeError::validation(format!("{what} must be finite")));
    }
    Ok(())
}

impl Default for TemplateSpec {
    /// The built-in landscape template.
    fn default() -> Self {
        const CDN: &str = "https://d273i1jagfl543.cloudfront.net/templates";
        Self {
            canvas: Canvas::default(),
            caption: Some(CaptionSpec {
                default_text: "1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs".to_owned(),
                position: Position { x: 50.0, y: 100.0 },
                max_chars_per_line: 31,
                font_size: 44.0,
                alignment: TextAlign::Left,
                text_color: HexColor::rgb(255, 255, 255),
            }),
            cta: Some(CtaSpec {
                default_text: "Shop Now".to_owned(),
                position: Position { x: 190.0, y: 320.0 },
                text_color: HexColor::rgb(255, 255, 255),
                background_color: HexColor::rgb(0, 0, 0),
            }),
            image_mask: ImageMask {
                x: 56.0,
                y: 442.0,
                width: 970.0,
                height: 600.0,
            },
            urls: TemplateUrls {
                mask_url: format!("{CDN}/global_temp_landscape_temp_10_mask.png"),
                stroke_url: format!("{CDN}/global_temp_landscape_temp_10_Mask_stroke.png"),
                pattern_url: format!("{CDN}/global_temp_landscape_temp_10_Design_Pattern.png"),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/model.rs"]
mod tests;
