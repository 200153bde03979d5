use crate::assets::{TextureId, TextureLoader};
use crate::coords::{Rect, Vec2};

use super::SceneConfig;

/// One repeating background layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub texture: TextureId,
    pub scroll_speed: f32,
    /// Horizontal UV shift, always in `[0, 1)`.
    pub scroll_offset: f32,
}

/// The foreground sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub texture: TextureId,
    /// Center, in NDC.
    pub position: Vec2,
    /// Width and height, in NDC.
    pub size: Vec2,
}

impl Entity {
    /// Axis-aligned bounds: `position ± size / 2`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }
}

/// Layers (back to front) plus the entity.
///
/// Layer count and speeds are fixed at construction; only offsets and the
/// entity position change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub(super) layers: Vec<Layer>,
    pub(super) entity: Entity,
    pub(super) base_speed: f32,
}

impl Scene {
    /// Loads every texture through `loader`. Never fails: a texture that
    /// could not be loaded leaves [`TextureId::INVALID`] in its slot.
    pub fn from_config(config: &SceneConfig, loader: &mut dyn TextureLoader) -> Self {
        let layers = config
            .layers
            .iter()
            .map(|l| Layer {
                texture: loader.load_texture(&l.path),
                scroll_speed: l.scroll_speed,
                scroll_offset: 0.0,
            })
            .collect();

        let entity = Entity {
            texture: loader.load_texture(&config.entity.path),
            position: config.entity.position,
            size: config.entity.size,
        };

        log::debug!(
            "parallax scene: {} layer(s), base speed {}",
            config.layers.len(),
            config.base_speed
        );

        Self {
            layers,
            entity,
            base_speed: config.base_speed,
        }
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }
}

#[cfg(test)]
pub(super) mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    /// Hands out sequential ids and records requested paths; paths containing
    /// `missing` fail.
    #[derive(Default)]
    pub(in crate::parallax) struct FakeLoader {
        pub requested: Vec<PathBuf>,
    }

    impl TextureLoader for FakeLoader {
        fn load_texture(&mut self, path: &Path) -> TextureId {
            self.requested.push(path.to_path_buf());
            if path.to_string_lossy().contains("missing") {
                TextureId::INVALID
            } else {
                TextureId(self.requested.len() as u32 - 1)
            }
        }
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_config_loads_layers_in_order_then_entity() {
        let cfg = SceneConfig::default();
        let mut loader = FakeLoader::default();
        let scene = Scene::from_config(&cfg, &mut loader);

        assert_eq!(loader.requested.len(), 5);
        assert_eq!(loader.requested[4], cfg.entity.path);
        assert_eq!(scene.layers().len(), 4);
        for (i, layer) in scene.layers().iter().enumerate() {
            assert_eq!(layer.texture, TextureId(i as u32));
            assert_eq!(layer.scroll_offset, 0.0);
            assert_eq!(layer.scroll_speed, cfg.layers[i].scroll_speed);
        }
        assert_eq!(scene.entity().texture, TextureId(4));
        assert_eq!(scene.base_speed(), 0.5);
    }

    #[test]
    fn failed_load_leaves_invalid_handle() {
        let cfg = SceneConfig::evenly_spaced(["missing.png", "ok.png"], 0.1, 0.2);
        let scene = Scene::from_config(&cfg, &mut FakeLoader::default());

        assert_eq!(scene.layers()[0].texture, TextureId::INVALID);
        assert_eq!(scene.layers()[1].texture, TextureId(1));
    }

    #[test]
    fn entity_bounds_are_center_plus_minus_half_size() {
        let scene = Scene::from_config(&SceneConfig::default(), &mut FakeLoader::default());
        let b = scene.entity().bounds();
        assert!((b.min().x - -0.1).abs() < 1e-6);
        assert!((b.max().x - 0.1).abs() < 1e-6);
        assert!((b.min().y - -0.7).abs() < 1e-6);
        assert!((b.max().y - -0.3).abs() < 1e-6);
    }
}
