//! Parallax-scrolling scene model.
//!
//! An ordered stack of repeating background layers plus one foreground
//! entity. Input moves the entity horizontally; every layer scrolls at its
//! own speed in the same direction, nearer layers faster.
//!
//! The model is GPU-free: textures are opaque [`TextureId`]s resolved through
//! a [`TextureLoader`], and rendering only records into a [`DrawList`].
//!
//! [`TextureId`]: crate::assets::TextureId
//! [`TextureLoader`]: crate::assets::TextureLoader
//! [`DrawList`]: crate::draw::DrawList

mod config;
mod record;
mod scene;
mod update;

pub use config::{
    EntityConfig, LayerConfig, SceneConfig, DEFAULT_BASE_SPEED, MAX_SCROLL_SPEED, MIN_SCROLL_SPEED,
};
pub use scene::{Entity, Layer, Scene};
pub use update::{wrap_unit, MoveInput};
