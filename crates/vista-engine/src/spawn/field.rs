use std::collections::VecDeque;

use glam::{Mat4, Vec3};

use crate::coords::{Vec2, Viewport};
use crate::draw::{DrawList, ZIndex};
use crate::geometry::Triangle;
use crate::paint::Color;

use super::Palette;

/// Triangles kept before the oldest is evicted.
pub const DEFAULT_CAPACITY: usize = 256;
/// Width and height of a spawned triangle, in pixels.
pub const DEFAULT_DIMENSIONS: Vec2 = Vec2::new(100.0, 100.0);

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpawnedTriangle {
    /// Center, in window pixels.
    pub position: Vec2,
    pub dimensions: Vec2,
    pub color: Color,
}

impl SpawnedTriangle {
    /// `translate(position) * rotate_z(180°) * scale(w, h, 1)`.
    ///
    /// The half turn makes the unit triangle point up on screen under a
    /// +Y-down projection.
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0))
            * Mat4::from_rotation_z(std::f32::consts::PI)
            * Mat4::from_scale(Vec3::new(self.dimensions.x, self.dimensions.y, 1.0))
    }
}

/// Capped, insertion-ordered collection of spawned triangles.
#[derive(Debug, Clone)]
pub struct TriangleField {
    triangles: VecDeque<SpawnedTriangle>,
    capacity: usize,
    palette: Palette,
    dimensions: Vec2,
}

impl TriangleField {
    /// An empty field. `capacity` is raised to at least 1.
    pub fn new(palette: Palette, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            triangles: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
            palette,
            dimensions: DEFAULT_DIMENSIONS,
        }
    }

    /// Pastel palette, default capacity, one triangle at the center of `viewport`.
    pub fn with_initial(viewport: Viewport) -> Self {
        let mut field = Self::new(Palette::pastel(), DEFAULT_CAPACITY);
        let (cx, cy) = viewport.center();
        field.spawn(Vec2::new(cx, cy));
        field
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn triangles(&self) -> impl Iterator<Item = &SpawnedTriangle> {
        self.triangles.iter()
    }

    /// Appends a triangle with the next palette color, evicting the oldest
    /// one when the field is full.
    pub fn spawn(&mut self, position: Vec2) -> SpawnedTriangle {
        if self.triangles.len() >= self.capacity {
            self.triangles.pop_front();
        }
        let tri = SpawnedTriangle {
            position,
            dimensions: self.dimensions,
            color: self.palette.next_color(),
        };
        self.triangles.push_back(tri);
        log::trace!("spawned triangle at ({}, {})", position.x, position.y);
        tri
    }

    /// One flat triangle per entry, in insertion order.
    pub fn record(&self, list: &mut DrawList) {
        let unit = Triangle::unit().vertices;
        for tri in &self.triangles {
            list.push_flat_triangle(ZIndex::default(), unit, tri.model(), tri.color);
        }
    }

    /// `ortho(0, width, height, 0, -1, 1)`: pixel space, origin top-left.
    pub fn projection(viewport: Viewport) -> Mat4 {
        Mat4::orthographic_rh_gl(0.0, viewport.width, viewport.height, 0.0, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::draw::DrawCmd;

    const EPS: f32 = 1e-4;

    fn approx(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < EPS
    }

    // ── spawn ─────────────────────────────────────────────────────────────

    #[test]
    fn initial_triangle_sits_at_window_center() {
        let field = TriangleField::with_initial(Viewport::new(800.0, 600.0));
        assert_eq!(field.len(), 1);
        let first = field.triangles().next().expect("initial triangle");
        assert_eq!(first.position, Vec2::new(400.0, 300.0));
        assert_eq!(first.dimensions, Vec2::new(100.0, 100.0));
        assert_eq!(first.color, Palette::pastel().colors()[0]);
    }

    #[test]
    fn spawn_cycles_palette_colors() {
        let mut field = TriangleField::new(Palette::pastel(), 64);
        let colors: Vec<Color> = (0..11).map(|i| field.spawn(Vec2::new(i as f32, 0.0)).color).collect();
        let pastel = Palette::pastel();
        assert_eq!(colors[0], pastel.colors()[0]);
        assert_eq!(colors[9], pastel.colors()[9]);
        assert_eq!(colors[10], pastel.colors()[0]);
    }

    #[test]
    fn full_field_evicts_oldest_first() {
        let mut field = TriangleField::new(Palette::pastel(), 3);
        for i in 0..5 {
            field.spawn(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(field.len(), 3);
        let xs: Vec<f32> = field.triangles().map(|t| t.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut field = TriangleField::new(Palette::pastel(), 0);
        field.spawn(Vec2::new(1.0, 1.0));
        field.spawn(Vec2::new(2.0, 2.0));
        assert_eq!(field.capacity(), 1);
        assert_eq!(field.len(), 1);
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn model_turns_unit_triangle_apex_up_on_screen() {
        let tri = SpawnedTriangle {
            position: Vec2::new(400.0, 300.0),
            dimensions: Vec2::new(100.0, 100.0),
            color: Color::rgb(1.0, 1.0, 1.0),
        };
        let m = tri.model();

        // apex (0, 0.5) → (400, 250): above the center on a +Y-down screen
        assert!(approx(m * Vec4::new(0.0, 0.5, 0.0, 1.0), Vec4::new(400.0, 250.0, 0.0, 1.0)));
        // (-0.5, -0.5) → (450, 350)
        assert!(approx(m * Vec4::new(-0.5, -0.5, 0.0, 1.0), Vec4::new(450.0, 350.0, 0.0, 1.0)));
        // (0.5, -0.5) → (350, 350)
        assert!(approx(m * Vec4::new(0.5, -0.5, 0.0, 1.0), Vec4::new(350.0, 350.0, 0.0, 1.0)));
    }

    #[test]
    fn projection_maps_pixel_corners_to_ndc() {
        let p = TriangleField::projection(Viewport::new(800.0, 600.0));
        assert!(approx(p * Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(-1.0, 1.0, 0.0, 1.0)));
        assert!(approx(p * Vec4::new(800.0, 600.0, 0.0, 1.0), Vec4::new(1.0, -1.0, 0.0, 1.0)));
        assert!(approx(p * Vec4::new(400.0, 300.0, 0.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0)));
    }

    // ── record ────────────────────────────────────────────────────────────

    #[test]
    fn record_pushes_one_command_per_triangle_in_order() {
        let mut field = TriangleField::new(Palette::pastel(), 8);
        field.spawn(Vec2::new(10.0, 20.0));
        field.spawn(Vec2::new(30.0, 40.0));

        let mut list = DrawList::new();
        field.record(&mut list);

        let models: Vec<Mat4> = list
            .iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::FlatTriangle(cmd) => {
                    assert_eq!(cmd.vertices, Triangle::unit().vertices);
                    cmd.model
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        let expected: Vec<Mat4> = field.triangles().map(SpawnedTriangle::model).collect();
        assert_eq!(models, expected);
    }
}
