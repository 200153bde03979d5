//! Draw stream types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands recorded by scene models
//! - provide deterministic ordering (z-index + insertion order, back-to-front)
//!
//! Scene models record into a [`DrawList`]; renderers consume it.

mod cmd;
mod key;
mod list;
mod z_index;

pub use cmd::{DrawCmd, FlatTriangleCmd, TexturedQuadCmd};
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use z_index::ZIndex;
