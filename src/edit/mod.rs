//! Host-owned editing state.

/// Screen color picking with scoped subscriptions.
pub mod picker;
/// Form values and the color history strip.
pub mod state;
