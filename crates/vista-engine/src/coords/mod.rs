//! Coordinate and geometry types shared across renderers and scene models.
//!
//! Two spaces are in use:
//! - normalized device coordinates (`[-1, 1]`, +Y up) for the parallax scene
//! - logical pixels (top-left origin, +Y down) for window/pointer positions
//!
//! The types here do not encode which one they carry.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
