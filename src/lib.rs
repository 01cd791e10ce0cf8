//! adframe renders ad-creative previews.
//!
//! A preview is a fixed-size canvas composited bottom to top from a background color, a
//! decorative pattern image, a user photo framed inside a mask region, a wrapped caption and a
//! call-to-action button. The public API is compositor-oriented:
//!
//! - Load a [`TemplateSpec`] (or use the built-in default)
//! - Keep the editable values in an [`EditState`]
//! - Bind the template to a [`DrawSurface`] and an [`AssetLoader`] with a [`Compositor`]
//! - Render on demand, or keep a [`LivePreview`] redrawing as edits arrive
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image assets: sources, loaders and decoding.
pub mod assets;
/// Host-owned editing state.
pub mod edit;
/// Surfaces, layer drawing and the compositor.
pub mod render;
/// Template descriptor model.
pub mod template;
/// Caption line breaking.
pub mod text;

pub use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{AdframeError, AdframeResult};

pub use crate::assets::decode::PreparedImage;
pub use crate::assets::loader::{
    AssetLoader, FetchPolicy, HttpAssetLoader, LoaderOpts, MemoryAssetLoader,
};
pub use crate::assets::source::{AssetSource, data_uri_from_bytes, data_uri_from_file};
pub use crate::edit::picker::{ColorPickEvents, PickerSubscription};
pub use crate::edit::state::{ColorHistory, DEFAULT_COLOR, EditState};
pub use crate::render::compositor::Compositor;
pub use crate::render::cpu::{CpuSurface, CpuSurfaceOpts};
pub use crate::render::layers::{Layer, LayerStatus, RenderReport};
pub use crate::render::preview::{LivePreview, PreviewFrame};
pub use crate::render::record::{DrawCommand, RecordingSurface};
pub use crate::render::shapes::{fill_rounded_rect, rounded_rect_path};
pub use crate::render::surface::{DrawSurface, FrameRGBA, TextBaseline, TextStyle};
pub use crate::template::color::HexColor;
pub use crate::template::model::TemplateSpec;
pub use crate::text::wrap::wrap_lines;
