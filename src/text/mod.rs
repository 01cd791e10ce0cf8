//! Caption text handling: greedy line breaking and font-backed layout.

pub(crate) mod layout;
/// Greedy character-count line breaking.
pub mod wrap;
