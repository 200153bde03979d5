//! Exercise 1: one blue triangle from six explicit coordinates.

use anyhow::Result;
use vista_engine::core::{App, AppControl, FrameCtx};
use vista_engine::device::GpuInit;
use vista_engine::draw::{DrawList, ZIndex};
use vista_engine::geometry::Triangle;
use vista_engine::glam::Mat4;
use vista_engine::logging::{init_logging, LoggingConfig};
use vista_engine::paint::Color;
use vista_engine::render::FlatTriangleRenderer;
use vista_engine::window::{Runtime, RuntimeConfig};

const TRIANGLE: Triangle = Triangle::new((-0.65, 0.33), (-0.27, 0.53), (-0.61, 0.79));
const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const CLEAR: Color = Color::rgb(0.0, 0.0, 0.0);

#[derive(Default)]
struct SingleTriangle {
    renderer: FlatTriangleRenderer,
    draw_list: DrawList,
}

impl App for SingleTriangle {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.draw_list.clear();
        self.draw_list
            .push_flat_triangle(ZIndex::default(), TRIANGLE.vertices, Mat4::IDENTITY, BLUE);

        let projection = Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        let Self { renderer, draw_list } = self;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, draw_list, projection);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::new("Exercise 1 - single triangle").with_size(800.0, 600.0);
    Runtime::run(config, GpuInit::default(), SingleTriangle::default())
}
