use std::path::Path;

use crate::error::VistaError;

use super::{decode_image, DecodedImage};

/// Opaque handle into a [`TextureStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    /// Handle produced by a failed load. Never resolves to a texture.
    pub const INVALID: TextureId = TextureId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for TextureId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Resolves a path to a texture handle.
///
/// Loading never fails from the caller's point of view: implementations log
/// the problem and return [`TextureId::INVALID`].
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> TextureId;
}

/// A 2D RGBA8 texture resident on the GPU.
#[derive(Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

/// Rejects images the device cannot hold in a single 2D texture.
pub fn check_texture_extent(
    path: &Path,
    width: u32,
    height: u32,
    max_dimension: u32,
) -> Result<(), VistaError> {
    if width > max_dimension || height > max_dimension {
        return Err(VistaError::ResourceLoad {
            path: path.to_path_buf(),
            reason: format!("{width}x{height} exceeds max texture dimension {max_dimension}"),
        });
    }
    Ok(())
}

impl GpuTexture {
    /// Uploads `img` with a full mip chain. The caller checks the extent
    /// against the device limits first (see [`check_texture_extent`]).
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        img: &DecodedImage,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: img.width,
            height: img.height,
            depth_or_array_layers: 1,
        };

        let levels = img.mip_chain();

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (mip_level, level) in levels.iter().enumerate() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: mip_level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &level.rgba,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.bytes_per_row()),
                    rows_per_image: Some(level.height),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width: img.width,
            height: img.height,
        }
    }
}

/// Append-only owner of uploaded textures.
///
/// Handles are indices and stay valid for the store's lifetime.
#[derive(Debug, Default)]
pub struct TextureStore {
    textures: Vec<GpuTexture>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    pub fn insert(&mut self, texture: GpuTexture) -> TextureId {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(texture);
        id
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        img: &DecodedImage,
    ) -> TextureId {
        self.insert(GpuTexture::from_image(device, queue, label, img))
    }

    /// Returns `None` for [`TextureId::INVALID`] and unknown handles.
    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&GpuTexture> {
        self.textures.get(id.0 as usize)
    }

    /// Decodes and uploads `path`. Failures, including images larger than
    /// the device's max 2D texture dimension, are logged.
    pub fn load(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) -> TextureId {
        let max_dimension = device.limits().max_texture_dimension_2d;
        let decoded = decode_image(path).and_then(|img| {
            check_texture_extent(path, img.width, img.height, max_dimension)?;
            Ok(img)
        });
        match decoded {
            Ok(img) => {
                let label = path.display().to_string();
                let id = self.upload(device, queue, &label, &img);
                log::debug!(
                    "loaded texture {label} ({}x{}) as {:?}",
                    img.width,
                    img.height,
                    id
                );
                id
            }
            Err(e) => {
                log::error!("{e}");
                TextureId::INVALID
            }
        }
    }

    /// Borrows the store together with the device/queue as a [`TextureLoader`].
    pub fn loader<'a>(
        &'a mut self,
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
    ) -> GpuTextureLoader<'a> {
        GpuTextureLoader {
            store: self,
            device,
            queue,
        }
    }
}

pub struct GpuTextureLoader<'a> {
    store: &'a mut TextureStore,
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
}

impl TextureLoader for GpuTextureLoader<'_> {
    fn load_texture(&mut self, path: &Path) -> TextureId {
        self.store.load(self.device, self.queue, path)
    }
}
