//! Click-to-spawn triangle field.
//!
//! Triangles live in window pixel space (+Y down) and are drawn with a
//! pixel-space orthographic projection.

mod field;
mod palette;

pub use field::{SpawnedTriangle, TriangleField, DEFAULT_CAPACITY, DEFAULT_DIMENSIONS};
pub use palette::Palette;
