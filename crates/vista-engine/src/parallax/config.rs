use std::path::{Path, PathBuf};

use crate::coords::Vec2;

/// Scroll speed of the farthest layer.
pub const MIN_SCROLL_SPEED: f32 = 0.05;
/// Scroll speed of the nearest layer.
pub const MAX_SCROLL_SPEED: f32 = 1.50;
/// Entity speed in NDC units per second.
pub const DEFAULT_BASE_SPEED: f32 = 0.5;

const DEFAULT_LAYER_FILES: [&str; 4] = [
    "parallax/Double_Jump.png",
    "parallax/Platform.png",
    "parallax/Running.png",
    "parallax/Side_Jump.png",
];
const DEFAULT_ENTITY_FILE: &str = "parallax/Crouch.png";

#[derive(Debug, Clone, PartialEq)]
pub struct LayerConfig {
    pub path: PathBuf,
    /// Multiplier on the entity speed; `0.0` keeps the layer still.
    pub scroll_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntityConfig {
    pub path: PathBuf,
    /// Center, in NDC.
    pub position: Vec2,
    /// Width and height, in NDC.
    pub size: Vec2,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENTITY_FILE),
            position: Vec2::new(0.0, -0.5),
            size: Vec2::new(0.2, 0.4),
        }
    }
}

/// Everything a [`Scene`](super::Scene) is built from.
///
/// Layers are listed back to front. Paths are taken as-is; use
/// [`with_asset_root`](Self::with_asset_root) to anchor relative ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub layers: Vec<LayerConfig>,
    pub base_speed: f32,
    pub entity: EntityConfig,
}

impl Default for SceneConfig {
    /// Four layers at speeds 0.05..1.50 with the default entity.
    fn default() -> Self {
        Self::evenly_spaced(
            DEFAULT_LAYER_FILES.iter().map(PathBuf::from),
            MIN_SCROLL_SPEED,
            MAX_SCROLL_SPEED,
        )
    }
}

impl SceneConfig {
    /// Layers with speeds interpolated linearly from `min_speed` (first) to
    /// `max_speed` (last). A single layer gets `min_speed`.
    pub fn evenly_spaced<I, P>(paths: I, min_speed: f32, max_speed: f32) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let n = paths.len();

        let layers = paths
            .into_iter()
            .enumerate()
            .map(|(i, path)| {
                let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
                LayerConfig {
                    path,
                    scroll_speed: min_speed + (max_speed - min_speed) * t,
                }
            })
            .collect();

        Self {
            layers,
            base_speed: DEFAULT_BASE_SPEED,
            entity: EntityConfig::default(),
        }
    }

    pub fn with_base_speed(mut self, base_speed: f32) -> Self {
        self.base_speed = base_speed;
        self
    }

    pub fn with_entity(mut self, entity: EntityConfig) -> Self {
        self.entity = entity;
        self
    }

    /// Joins `root` onto every relative path.
    pub fn with_asset_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for layer in &mut self.layers {
            layer.path = root.join(&layer.path);
        }
        self.entity.path = root.join(&self.entity.path);
        self
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn default_has_four_layers_from_slow_to_fast() {
        let cfg = SceneConfig::default();
        assert_eq!(cfg.layer_count(), 4);
        assert_eq!(cfg.base_speed, 0.5);

        let speeds: Vec<f32> = cfg.layers.iter().map(|l| l.scroll_speed).collect();
        let expected = [0.05, 0.05 + 1.45 / 3.0, 0.05 + 2.0 * 1.45 / 3.0, 1.50];
        for (got, want) in speeds.iter().zip(expected) {
            assert!((got - want).abs() < EPS, "{got} vs {want}");
        }

        assert_eq!(cfg.entity.position, Vec2::new(0.0, -0.5));
        assert_eq!(cfg.entity.size, Vec2::new(0.2, 0.4));
    }

    // ── evenly_spaced ─────────────────────────────────────────────────────

    #[test]
    fn single_layer_gets_min_speed() {
        let cfg = SceneConfig::evenly_spaced(["only.png"], 0.3, 2.0);
        assert_eq!(cfg.layer_count(), 1);
        assert_eq!(cfg.layers[0].scroll_speed, 0.3);
    }

    #[test]
    fn no_layers_is_allowed() {
        let cfg = SceneConfig::evenly_spaced(Vec::<PathBuf>::new(), 0.0, 1.0);
        assert_eq!(cfg.layer_count(), 0);
    }

    #[test]
    fn two_layers_hit_both_ends() {
        let cfg = SceneConfig::evenly_spaced(["a.png", "b.png"], 0.2, 0.8);
        assert_eq!(cfg.layers[0].scroll_speed, 0.2);
        assert!((cfg.layers[1].scroll_speed - 0.8).abs() < EPS);
    }

    // ── builders ──────────────────────────────────────────────────────────

    #[test]
    fn asset_root_prefixes_every_path() {
        let cfg = SceneConfig::evenly_spaced(["a.png"], 0.1, 0.1).with_asset_root("/assets");
        assert_eq!(cfg.layers[0].path, PathBuf::from("/assets/a.png"));
        assert_eq!(cfg.entity.path, PathBuf::from("/assets").join(DEFAULT_ENTITY_FILE));
    }
}
