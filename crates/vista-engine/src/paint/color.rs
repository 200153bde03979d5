/// Premultiplied RGBA color in display (sRGB-encoded) space.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Components are the values a non-sRGB framebuffer would show as-is; use
/// [`Color::for_target`] before handing them to a render target.
///
/// Every color the exercises use is opaque, where premultiplied and straight
/// alpha coincide.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    /// Opaque color from `[0, 1]` components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a premultiplied color from straight RGBA bytes (`0`–`255`).
    ///
    /// Each channel is divided by 255.
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Components to write into a target of `format`.
    ///
    /// sRGB targets encode on write, so the color is linearized first and
    /// displays with the same values on either kind of target.
    pub fn for_target(self, format: wgpu::TextureFormat) -> Self {
        if !format.is_srgb() || self.a <= 0.0 {
            return self;
        }
        let a = self.a;
        Self {
            r: srgb_to_linear(self.r / a) * a,
            g: srgb_to_linear(self.g / a) * a,
            b: srgb_to_linear(self.b / a) * a,
            a,
        }
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

/// IEC 61966-2-1 decoding of one channel.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_to_srgb(c: f32) -> f32 {
        if c <= 0.0031308 {
            c * 12.92
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    }

    #[test]
    fn from_u8_normalizes_by_255() {
        let c = Color::from_u8(255, 0, 51, 255);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn from_straight_premultiplies() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn from_straight_clamps_out_of_range() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 3.0);
        assert_eq!(c, Color::rgb(1.0, 0.0, 0.5));
    }

    // ── target encoding ───────────────────────────────────────────────────

    #[test]
    fn linear_target_keeps_components() {
        let c = Color::rgb(0.2, 0.3, 0.3);
        assert_eq!(c.for_target(wgpu::TextureFormat::Bgra8Unorm), c);
    }

    #[test]
    fn srgb_target_linearizes_so_display_matches() {
        let format = wgpu::TextureFormat::Bgra8UnormSrgb;

        let clear = Color::rgb(0.2, 0.3, 0.3).for_target(format);
        assert!((clear.r - 0.0331).abs() < 1e-3);
        assert!((linear_to_srgb(clear.r) - 0.2).abs() < 1e-4);
        assert!((linear_to_srgb(clear.g) - 0.3).abs() < 1e-4);

        let pastel = Color::from_u8(200, 191, 231, 255).for_target(format);
        assert!((linear_to_srgb(pastel.r) * 255.0 - 200.0).abs() < 0.05);
        assert!((linear_to_srgb(pastel.b) * 255.0 - 231.0).abs() < 0.05);

        let white = Color::rgb(1.0, 1.0, 1.0).for_target(format);
        assert!((white.r - 1.0).abs() < 1e-6);
        assert_eq!(Color::rgb(0.0, 0.0, 0.0).for_target(format).r, 0.0);
    }

    #[test]
    fn srgb_target_keeps_alpha_and_premultiplication() {
        let c = Color::from_straight(0.5, 0.5, 0.5, 0.5).for_target(wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(c.a, 0.5);
        assert!((c.r - srgb_to_linear(0.5) * 0.5).abs() < 1e-6);
    }
}
