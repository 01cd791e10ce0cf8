use std::collections::VecDeque;
use std::path::Path;

use crate::assets::source::data_uri_from_file;
use crate::foundation::error::AdframeResult;
use crate::template::color::HexColor;
use crate::template::model::TemplateSpec;

/// Color preselected by the editor.
pub const DEFAULT_COLOR: HexColor = HexColor::rgb(0x03, 0x69, 0xA1);

/// Most-recent custom colors, oldest first.
///
/// Holds at most [`ColorHistory::CAPACITY`] entries; pushing onto a full history evicts the
/// oldest entry. Duplicates are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorHistory {
    entries: VecDeque<HexColor>,
}

impl ColorHistory {
    /// Maximum number of retained colors.
    pub const CAPACITY: usize = 5;

    /// Empty history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Append `color`, evicting the oldest entry when full.
    pub fn push(&mut self, color: HexColor) {
        while self.entries.len() >= Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(color);
    }

    /// Entry at `index` (0 is the oldest).
    pub fn get(&self, index: usize) -> Option<HexColor> {
        self.entries.get(index).copied()
    }

    /// Number of retained colors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when no color is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = HexColor> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for ColorHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Current values of the editor's form controls.
///
/// Owned by the host. Every change is followed by a full re-render of the preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditState {
    /// Background fill.
    pub selected_color: HexColor,
    /// Caption text before wrapping.
    pub selected_caption: String,
    /// CTA label.
    pub selected_cta: String,
    /// User image: URL, data URI or local path.
    pub selected_mask_source: String,
    /// Recently picked custom colors.
    pub color_history: ColorHistory,
}

impl EditState {
    /// Initial state for `template`: default color, template texts and the template's image.
    pub fn from_template(template: &TemplateSpec) -> Self {
        let mut color_history = ColorHistory::new();
        color_history.push(DEFAULT_COLOR);
        Self {
            selected_color: DEFAULT_COLOR,
            selected_caption: template
                .caption
                .as_ref()
                .map(|c| c.default_text.clone())
                .unwrap_or_default(),
            selected_cta: template
                .cta
                .as_ref()
                .map(|c| c.default_text.clone())
                .unwrap_or_default(),
            selected_mask_source: template.urls.mask_url.clone(),
            color_history,
        }
    }

    /// Select a custom color from the picker and remember it.
    pub fn pick_custom_color(&mut self, color: HexColor) {
        self.selected_color = color;
        self.color_history.push(color);
    }

    /// Re-select a color from the history strip. Returns the color, or `None` for a bad index.
    pub fn select_history(&mut self, index: usize) -> Option<HexColor> {
        let color = self.color_history.get(index)?;
        self.selected_color = color;
        Some(color)
    }

    /// Replace the caption text.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.selected_caption = caption.into();
    }

    /// Replace the CTA label.
    pub fn set_cta(&mut self, cta: impl Into<String>) {
        self.selected_cta = cta.into();
    }

    /// Point the user image at a URL, data URI or path.
    pub fn set_mask_source(&mut self, source: impl Into<String>) {
        self.selected_mask_source = source.into();
    }

    /// Read a local upload and use it as the user image, embedded as a data URI.
    ///
    /// On error the previous image is kept.
    pub fn set_mask_file(&mut self, path: impl AsRef<Path>) -> AdframeResult<()> {
        self.selected_mask_source = data_uri_from_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edit/state.rs"]
mod tests;
