use crate::input::{InputState, Key};

use super::Scene;

/// Movement intent for one frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MoveInput {
    pub moving_left: bool,
    pub moving_right: bool,
}

impl MoveInput {
    pub const LEFT_KEYS: [Key; 2] = [Key::A, Key::ArrowLeft];
    pub const RIGHT_KEYS: [Key; 2] = [Key::D, Key::ArrowRight];

    #[inline]
    pub const fn new(moving_left: bool, moving_right: bool) -> Self {
        Self { moving_left, moving_right }
    }

    /// Reads held keys: A / ← move left, D / → move right.
    pub fn from_keys(input: &InputState) -> Self {
        Self {
            moving_left: input.any_key_down(&Self::LEFT_KEYS),
            moving_right: input.any_key_down(&Self::RIGHT_KEYS),
        }
    }

    /// `-1`, `0` or `+1`. Right wins when both are held.
    #[inline]
    pub fn direction(self) -> f32 {
        if self.moving_right {
            1.0
        } else if self.moving_left {
            -1.0
        } else {
            0.0
        }
    }
}

/// Maps `x` into `[0, 1)` by whole-unit steps.
///
/// A result that rounds to exactly `1.0` folds to `0.0`; non-finite input
/// resets to `0.0`.
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }
    let w = x.rem_euclid(1.0);
    if w >= 1.0 { 0.0 } else { w }
}

impl Scene {
    /// Advances layer offsets and the entity by one frame.
    ///
    /// Negative `dt` is treated as zero. With no movement nothing changes.
    pub fn update(&mut self, dt: f32, input: MoveInput) {
        let dir = input.direction();
        let dt = dt.max(0.0);
        if dir == 0.0 || dt == 0.0 {
            return;
        }

        let move_speed = self.base_speed * dir;
        for layer in &mut self.layers {
            layer.scroll_offset = wrap_unit(layer.scroll_offset + layer.scroll_speed * move_speed * dt);
        }
        self.entity.position.x += move_speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, InputFrame, KeyState, Modifiers};
    use crate::parallax::scene::tests::FakeLoader;
    use crate::parallax::SceneConfig;

    const EPS: f32 = 1e-5;

    fn scene(cfg: &SceneConfig) -> Scene {
        Scene::from_config(cfg, &mut FakeLoader::default())
    }

    fn held(keys: &[Key]) -> InputState {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            state.apply_event(
                &mut frame,
                InputEvent::Key { key, state: KeyState::Pressed, modifiers: Modifiers::default(), repeat: false },
            );
        }
        state
    }

    const RIGHT: MoveInput = MoveInput::new(false, true);
    const LEFT: MoveInput = MoveInput::new(true, false);

    // ── direction ─────────────────────────────────────────────────────────

    #[test]
    fn direction_prefers_right() {
        assert_eq!(MoveInput::new(false, false).direction(), 0.0);
        assert_eq!(LEFT.direction(), -1.0);
        assert_eq!(RIGHT.direction(), 1.0);
        assert_eq!(MoveInput::new(true, true).direction(), 1.0);
    }

    #[test]
    fn keys_map_to_move_flags() {
        assert_eq!(MoveInput::from_keys(&held(&[Key::A])), LEFT);
        assert_eq!(MoveInput::from_keys(&held(&[Key::ArrowRight])), RIGHT);
        assert_eq!(MoveInput::from_keys(&held(&[Key::W])), MoveInput::default());
        assert_eq!(MoveInput::from_keys(&held(&[Key::A, Key::D])).direction(), 1.0);
    }

    // ── wrap ──────────────────────────────────────────────────────────────

    #[test]
    fn wrap_stays_in_unit_interval() {
        for x in [-3.75_f32, -1.0, -0.25, 0.0, 0.5, 0.999, 1.0, 1.25, 17.5, -1e-9] {
            let w = wrap_unit(x);
            assert!((0.0..1.0).contains(&w), "wrap({x}) = {w}");
        }
        assert!((wrap_unit(1.25) - 0.25).abs() < EPS);
        assert!((wrap_unit(-0.25) - 0.75).abs() < EPS);
        assert_eq!(wrap_unit(1.0), 0.0);
    }

    #[test]
    fn wrap_resets_non_finite() {
        assert_eq!(wrap_unit(f32::NAN), 0.0);
        assert_eq!(wrap_unit(f32::INFINITY), 0.0);
        assert_eq!(wrap_unit(f32::NEG_INFINITY), 0.0);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn offset_wraps_past_one() {
        let cfg = SceneConfig::evenly_spaced(["l.png"], 1.0, 1.0).with_base_speed(0.5);
        let mut s = scene(&cfg);
        s.layers[0].scroll_offset = 0.95;

        s.update(0.2, RIGHT);
        // 0.95 + 1.0 * 0.5 * 0.2 = 1.05 → 0.05
        assert!((s.layers()[0].scroll_offset - 0.05).abs() < EPS);
    }

    #[test]
    fn entity_moves_by_base_speed_times_dt() {
        let cfg = SceneConfig::default().with_base_speed(0.5);
        let mut s = scene(&cfg);
        s.entity.position.x = 0.0;

        s.update(0.2, RIGHT);
        assert!((s.entity().position.x - 0.1).abs() < EPS);

        s.update(0.2, LEFT);
        assert!(s.entity().position.x.abs() < EPS);
        assert_eq!(s.entity().position.y, -0.5);
    }

    #[test]
    fn no_motion_leaves_scene_untouched() {
        let mut s = scene(&SceneConfig::default());
        s.update(0.3, RIGHT);
        let before = s.clone();

        s.update(0.5, MoveInput::default());
        assert_eq!(s, before);
    }

    #[test]
    fn negative_dt_is_a_no_op() {
        let mut s = scene(&SceneConfig::default());
        let before = s.clone();
        s.update(-1.0, RIGHT);
        assert_eq!(s, before);
    }

    #[test]
    fn faster_layers_move_further() {
        let mut s = scene(&SceneConfig::default());
        // Small enough that no layer wraps.
        s.update(0.1, RIGHT);

        let offsets: Vec<f32> = s.layers().iter().map(|l| l.scroll_offset).collect();
        for pair in offsets.windows(2) {
            assert!(pair[0] < pair[1], "{offsets:?}");
        }
    }

    /// Distance between two offsets on the unit circle.
    fn circular_gap(a: f32, b: f32) -> f32 {
        let d = wrap_unit(a - b);
        d.min(1.0 - d)
    }

    #[test]
    fn layer_gaps_are_proportional_to_speed_differences() {
        let cfg = SceneConfig::default();
        // 0.1 keeps every layer below 1; 2.0 wraps the two fastest layers.
        for (dt, input) in [(0.1, RIGHT), (2.0, RIGHT), (0.1, LEFT), (2.0, LEFT)] {
            let mut s = scene(&cfg);
            s.update(dt, input);

            let move_speed = cfg.base_speed * input.direction();
            let layers = s.layers();
            for a in 0..layers.len() {
                for b in a + 1..layers.len() {
                    let gap = wrap_unit(layers[b].scroll_offset - layers[a].scroll_offset);
                    let expected = wrap_unit(
                        (layers[b].scroll_speed - layers[a].scroll_speed) * move_speed * dt,
                    );
                    assert!(
                        circular_gap(gap, expected) < EPS,
                        "dt {dt}, layers {a}/{b}: gap {gap}, expected {expected}"
                    );
                }
            }
        }
    }

    #[test]
    fn fastest_layer_wraps_while_slowest_does_not() {
        let mut s = scene(&SceneConfig::default().with_base_speed(0.5));
        s.update(2.0, RIGHT);

        let layers = s.layers();
        let slow = &layers[0];
        let fast = &layers[layers.len() - 1];
        // 0.05 * 0.5 * 2.0 = 0.05; 1.5 * 0.5 * 2.0 = 1.5 → 0.5
        assert!((slow.scroll_offset - 0.05).abs() < EPS);
        assert!((fast.scroll_offset - 0.5).abs() < EPS);
        assert!((wrap_unit(fast.scroll_offset - slow.scroll_offset) - 0.45).abs() < EPS);
    }

    #[test]
    fn offsets_stay_wrapped_over_many_frames() {
        let mut s = scene(&SceneConfig::default());
        for i in 0..500 {
            let input = if i % 7 < 4 { RIGHT } else { LEFT };
            s.update(1.0 / 60.0 * (1 + i % 5) as f32, input);
            for layer in s.layers() {
                assert!((0.0..1.0).contains(&layer.scroll_offset));
            }
        }
    }
}
