//! Image loading and GPU texture ownership.
//!
//! - [`decode_image`]: file → RGBA8 pixels, flipped so row 0 is the bottom
//! - [`TextureStore`]: owns uploaded textures, hands out [`TextureId`]s
//! - [`TextureLoader`]: the seam scene construction loads through

mod decode;
mod store;

pub use decode::{decode_bytes, decode_image, DecodedImage};
pub use store::{check_texture_extent, GpuTexture, GpuTextureLoader, TextureId, TextureLoader, TextureStore};
