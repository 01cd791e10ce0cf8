use crate::assets::loader::{AssetLoader, FetchPolicy, load_image};
use crate::edit::state::EditState;
use crate::foundation::error::{AdframeError, AdframeResult};
use crate::render::layers::{RenderReport, draw_layers};
use crate::render::surface::{DrawSurface, FrameRGBA};
use crate::template::model::TemplateSpec;

/// Owns a template, the drawing surface and an asset loader, and redraws the preview on
/// request.
///
/// Each [`Compositor::render`] first loads the pattern (always fresh) and the user image
/// concurrently, then clears the surface and draws every layer in order. Nothing touches the
/// surface until both loads have settled, so dropping a render future part-way leaves the
/// previous picture intact and load timing can never reorder layers.
pub struct Compositor<S, L> {
    template: TemplateSpec,
    surface: S,
    loader: L,
}

impl<S, L> Compositor<S, L>
where
    S: DrawSurface,
    L: AssetLoader,
{
    /// Validate `template` and bind it to `surface` and `loader`.
    pub fn new(template: TemplateSpec, surface: S, loader: L) -> AdframeResult<Self> {
        template.validate()?;
        if surface.canvas() != template.canvas {
            return Err(AdframeError::validation(format!(
                "surface is {}x{} but template canvas is {}x{}",
                surface.canvas().width,
                surface.canvas().height,
                template.canvas.width,
                template.canvas.height
            )));
        }
        Ok(Self {
            template,
            surface,
            loader,
        })
    }

    /// The bound template.
    pub fn template(&self) -> &TemplateSpec {
        &self.template
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the drawing surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The asset loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Release the surface and loader.
    pub fn into_parts(self) -> (S, L) {
        (self.surface, self.loader)
    }

    /// Load the images for `edit` and redraw every layer.
    #[tracing::instrument(skip_all, fields(color = %edit.selected_color))]
    pub async fn render(&mut self, edit: &EditState) -> RenderReport {
        let (pattern, mask_image) = tokio::join!(
            load_image(
                &self.loader,
                &self.template.urls.pattern_url,
                FetchPolicy::Fresh
            ),
            load_image(
                &self.loader,
                &edit.selected_mask_source,
                FetchPolicy::Cached
            ),
        );
        let report = draw_layers(&mut self.surface, &self.template, edit, pattern, mask_image);
        tracing::debug!(?report, "preview redrawn");
        report
    }

    /// [`Compositor::render`], then rasterize the surface.
    pub async fn render_frame(
        &mut self,
        edit: &EditState,
    ) -> AdframeResult<(RenderReport, FrameRGBA)> {
        let report = self.render(edit).await;
        let frame = self.surface.snapshot()?;
        Ok((report, frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
