//! Exercise 3: left click spawns a pastel triangle under the cursor.

use anyhow::Result;
use vista_engine::coords::{Vec2, Viewport};
use vista_engine::core::{App, AppControl, FrameCtx};
use vista_engine::device::GpuInit;
use vista_engine::draw::DrawList;
use vista_engine::input::MouseButton;
use vista_engine::logging::{init_logging, LoggingConfig};
use vista_engine::paint::Color;
use vista_engine::render::FlatTriangleRenderer;
use vista_engine::spawn::TriangleField;
use vista_engine::window::{Runtime, RuntimeConfig};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const CLEAR: Color = Color::rgb(0.0, 0.0, 0.0);

struct ClickTriangles {
    field: TriangleField,
    renderer: FlatTriangleRenderer,
    draw_list: DrawList,
}

impl App for ClickTriangles {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        for (x, y) in ctx.input_frame.clicks_of(MouseButton::Left) {
            let tri = self.field.spawn(Vec2::new(x, y));
            log::debug!("{} triangle(s), newest {:?}", self.field.len(), tri.color);
        }

        self.draw_list.clear();
        self.field.record(&mut self.draw_list);

        let projection = TriangleField::projection(ctx.window.viewport());
        let Self { renderer, draw_list, .. } = self;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, draw_list, projection);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = ClickTriangles {
        field: TriangleField::with_initial(Viewport::new(WIDTH as f32, HEIGHT as f32)),
        renderer: FlatTriangleRenderer::new(),
        draw_list: DrawList::new(),
    };

    let config = RuntimeConfig::new("Exercise 3 - click to spawn triangles").with_size(WIDTH, HEIGHT);
    Runtime::run(config, GpuInit::default(), app)
}
