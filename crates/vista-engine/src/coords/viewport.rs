/// Viewport size in logical pixels.
///
/// Pixel-space projections (e.g. the click-to-spawn field) are built from this.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Center point `(width / 2, height / 2)`.
    #[inline]
    pub fn center(self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}
