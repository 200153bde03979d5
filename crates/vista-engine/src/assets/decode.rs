use std::path::Path;

use ::image::imageops::{self, FilterType};
use ::image::RgbaImage;

use crate::error::VistaError;

/// Tightly packed RGBA8 pixels, bottom row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        4 * self.width
    }

    /// `self` followed by successively halved copies, down to 1x1.
    pub fn mip_chain(&self) -> Vec<DecodedImage> {
        let mut levels = vec![self.clone()];
        let Some(mut prev) = RgbaImage::from_raw(self.width, self.height, self.rgba.clone()) else {
            return levels;
        };

        let (mut w, mut h) = (self.width, self.height);
        while w > 1 || h > 1 {
            w = (w / 2).max(1);
            h = (h / 2).max(1);
            prev = imageops::resize(&prev, w, h, FilterType::Triangle);
            levels.push(DecodedImage {
                width: w,
                height: h,
                rgba: prev.as_raw().clone(),
            });
        }
        levels
    }

    fn from_dynamic(img: ::image::DynamicImage) -> Self {
        let rgba = img.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            rgba: rgba.into_raw(),
        }
    }
}

/// Decodes a PNG/JPEG/BMP file.
pub fn decode_image(path: &Path) -> Result<DecodedImage, VistaError> {
    let img = ::image::open(path).map_err(|e| VistaError::ResourceLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    check_extent(path, DecodedImage::from_dynamic(img))
}

/// Decodes an in-memory encoded image; `origin` is only used for diagnostics.
pub fn decode_bytes(origin: &Path, bytes: &[u8]) -> Result<DecodedImage, VistaError> {
    let img = ::image::load_from_memory(bytes).map_err(|e| VistaError::ResourceLoad {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;
    check_extent(origin, DecodedImage::from_dynamic(img))
}

fn check_extent(path: &Path, img: DecodedImage) -> Result<DecodedImage, VistaError> {
    if img.width == 0 || img.height == 0 {
        return Err(VistaError::ResourceLoad {
            path: path.to_path_buf(),
            reason: format!("empty image ({}x{})", img.width, img.height),
        });
    }
    Ok(img)
}
