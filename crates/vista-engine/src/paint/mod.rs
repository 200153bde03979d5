//! Color model shared between scene models and renderers.

pub mod color;

pub use color::Color;
