//! Shared building blocks for the feature slices.

pub mod text;
mod text_field;
pub mod widgets;

pub use text_field::TextField;
