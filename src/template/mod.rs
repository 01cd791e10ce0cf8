//! Template descriptor model.
//!
//! A template is loaded once and never mutated; the editable values live in
//! [`crate::edit::state::EditState`].

/// Hex color parsing and formatting.
pub mod color;
/// Serde model of the template descriptor.
pub mod model;
