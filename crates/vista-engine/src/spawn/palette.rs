use crate::paint::Color;

const PASTEL: [(u8, u8, u8); 10] = [
    (200, 191, 231),
    (174, 217, 224),
    (181, 234, 215),
    (255, 241, 182),
    (255, 188, 188),
    (246, 193, 199),
    (255, 216, 190),
    (220, 198, 224),
    (208, 230, 165),
    (183, 201, 226),
];

/// Ordered colors handed out round-robin.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    cursor: usize,
}

impl Palette {
    /// Returns `None` for an empty color list.
    pub fn new(colors: Vec<Color>) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Some(Self { colors, cursor: 0 })
    }

    /// Opaque colors from 0..255 channels.
    pub fn from_rgb8(colors: &[(u8, u8, u8)]) -> Option<Self> {
        Self::new(colors.iter().map(|&(r, g, b)| Color::from_u8(r, g, b, 255)).collect())
    }

    /// The ten pastel colors of the click exercise.
    pub fn pastel() -> Self {
        Self {
            colors: PASTEL.iter().map(|&(r, g, b)| Color::from_u8(r, g, b, 255)).collect(),
            cursor: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Returns the color under the cursor and advances it, wrapping at the end.
    pub fn next_color(&mut self) -> Color {
        let color = self.colors[self.cursor];
        self.cursor = (self.cursor + 1) % self.colors.len();
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── normalization ─────────────────────────────────────────────────────

    #[test]
    fn pastel_channels_are_divided_by_255() {
        let p = Palette::pastel();
        assert_eq!(p.len(), 10);

        let first = p.colors()[0];
        assert!((first.r - 200.0 / 255.0).abs() < 1e-6);
        assert!((first.g - 191.0 / 255.0).abs() < 1e-6);
        assert!((first.b - 231.0 / 255.0).abs() < 1e-6);
        assert_eq!(first.a, 1.0);
    }

    // ── cycling ───────────────────────────────────────────────────────────

    #[test]
    fn next_color_wraps_around() {
        let mut p = Palette::from_rgb8(&[(255, 0, 0), (0, 255, 0), (0, 0, 255)]).expect("non-empty");
        let seq: Vec<Color> = (0..7).map(|_| p.next_color()).collect();
        assert_eq!(seq[0], seq[3]);
        assert_eq!(seq[1], seq[4]);
        assert_eq!(seq[0], seq[6]);
        assert_eq!(seq[0], Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new(Vec::new()).is_none());
    }
}
