//! Vista engine crate.
//!
//! Owns the platform + GPU runtime pieces and the small scene models used by
//! the exercise binaries.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod error;
pub mod logging;
pub mod coords;
pub mod paint;
pub mod draw;
pub mod geometry;
pub mod shader;
pub mod assets;
pub mod render;

pub mod parallax;
pub mod spawn;

pub use glam;
