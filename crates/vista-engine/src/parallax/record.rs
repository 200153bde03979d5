use crate::coords::Vec2;
use crate::draw::{DrawList, ZIndex};
use crate::geometry::{fullscreen_quad, textured_quad};

use super::Scene;

impl Scene {
    /// Records one full-screen quad per layer (z = layer index) and the
    /// entity quad above all of them.
    pub fn record(&self, list: &mut DrawList) {
        let quad = fullscreen_quad();
        for (i, layer) in self.layers.iter().enumerate() {
            list.push_textured_quad(
                ZIndex::new(i as i32),
                layer.texture,
                Vec2::new(layer.scroll_offset, 0.0),
                1.0,
                quad,
            );
        }

        list.push_textured_quad(
            ZIndex::new(self.layers.len() as i32),
            self.entity.texture,
            Vec2::zero(),
            1.0,
            textured_quad(self.entity.bounds()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureId;
    use crate::draw::{DrawCmd, TexturedQuadCmd};
    use crate::parallax::scene::tests::FakeLoader;
    use crate::parallax::{MoveInput, SceneConfig};

    fn quads(list: &mut DrawList) -> Vec<TexturedQuadCmd> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::TexturedQuad(cmd) => cmd.clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    // ── paint order ───────────────────────────────────────────────────────

    #[test]
    fn layers_in_order_then_entity_last() {
        let scene = Scene::from_config(&SceneConfig::default(), &mut FakeLoader::default());
        let mut list = DrawList::new();
        scene.record(&mut list);

        let textures: Vec<TextureId> = quads(&mut list).iter().map(|q| q.texture).collect();
        assert_eq!(textures, (0..5).map(TextureId).collect::<Vec<_>>());
    }

    #[test]
    fn layer_quads_carry_scroll_offset_and_cover_ndc() {
        let mut scene = Scene::from_config(&SceneConfig::default(), &mut FakeLoader::default());
        scene.update(0.1, MoveInput::new(false, true));

        let mut list = DrawList::new();
        scene.record(&mut list);
        let cmds = quads(&mut list);

        for (cmd, layer) in cmds.iter().zip(scene.layers()) {
            assert_eq!(cmd.uv_offset, Vec2::new(layer.scroll_offset, 0.0));
            assert_eq!(cmd.scale, 1.0);
            assert_eq!(cmd.vertices, fullscreen_quad());
        }
    }

    // ── entity quad ───────────────────────────────────────────────────────

    #[test]
    fn entity_quad_spans_position_plus_minus_half_size() {
        let scene = Scene::from_config(&SceneConfig::default(), &mut FakeLoader::default());
        let mut list = DrawList::new();
        scene.record(&mut list);

        let entity = quads(&mut list).pop().expect("entity quad");
        assert_eq!(entity.uv_offset, Vec2::zero());
        assert_eq!(entity.scale, 1.0);

        let span = |axis: usize| {
            entity.vertices.iter().map(|v| v.pos[axis]).fold((f32::MAX, f32::MIN), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            })
        };
        let (min_x, max_x) = span(0);
        let (min_y, max_y) = span(1);
        assert!((min_x - -0.1).abs() < 1e-6 && (max_x - 0.1).abs() < 1e-6);
        assert!((min_y - -0.7).abs() < 1e-6 && (max_y - -0.3).abs() < 1e-6);
    }
}
