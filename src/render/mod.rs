//! Preview rendering.
//!
//! The [`compositor::Compositor`] owns a [`surface::DrawSurface`]; [`layers`] holds the
//! fixed-order layer drawer and its geometry, and [`preview::LivePreview`] keeps a compositor
//! redrawing as the host edits.

/// Async load-then-draw orchestration.
pub mod compositor;
/// CPU raster surface.
pub mod cpu;
/// Layer drawer and layer geometry.
pub mod layers;
/// Background redraw loop with cancellation.
pub mod preview;
/// Command-recording surface.
pub mod record;
/// Rounded-rectangle painter.
pub mod shapes;
/// Drawing surface seam and frame type.
pub mod surface;
