//! Parallax exercise: four scrolling background layers and a sprite.
//!
//! A / ← and D / → move the sprite; the layers scroll with it, farther
//! layers slower. Images are read from `assets/parallax/` next to this
//! crate's manifest; a missing image is logged and its quad is skipped.

use std::path::PathBuf;

use anyhow::Result;
use vista_engine::assets::TextureStore;
use vista_engine::core::{App, AppControl, FrameCtx};
use vista_engine::device::GpuInit;
use vista_engine::draw::DrawList;
use vista_engine::logging::{init_logging, LoggingConfig};
use vista_engine::paint::Color;
use vista_engine::parallax::{MoveInput, Scene, SceneConfig};
use vista_engine::render::TexturedQuadRenderer;
use vista_engine::window::{Runtime, RuntimeConfig};

const CLEAR: Color = Color::rgb(0.2, 0.3, 0.3);

fn asset_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

struct Parallax {
    config: SceneConfig,
    /// Built on the first frame, once a device exists to upload textures to.
    scene: Option<Scene>,
    textures: TextureStore,
    renderer: TexturedQuadRenderer,
    draw_list: DrawList,
}

impl Parallax {
    fn new(config: SceneConfig) -> Self {
        Self {
            config,
            scene: None,
            textures: TextureStore::new(),
            renderer: TexturedQuadRenderer::new(),
            draw_list: DrawList::new(),
        }
    }
}

impl App for Parallax {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if self.scene.is_none() {
            let mut loader = self.textures.loader(ctx.gpu.device(), ctx.gpu.queue());
            self.scene = Some(Scene::from_config(&self.config, &mut loader));
            log::info!("{} texture(s) loaded", self.textures.len());
        }
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        scene.update(ctx.time.dt, MoveInput::from_keys(ctx.input));

        self.draw_list.clear();
        scene.record(&mut self.draw_list);

        let Self { textures, renderer, draw_list, .. } = self;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, draw_list, textures);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = SceneConfig::default().with_asset_root(asset_root());
    log::debug!("parallax layers: {:?}", config.layers);

    let runtime = RuntimeConfig::new("Parallax").with_size(800.0, 600.0);
    Runtime::run(runtime, GpuInit::default(), Parallax::new(config))
}
