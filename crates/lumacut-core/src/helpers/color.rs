// crates/lumacut-core/src/helpers/color.rs
//
// Colour math for the software render path.
//
// The matrices are the W3C Filter Effects definitions of the CSS
// shorthand functions, so `raster` output matches what a browser draws for
// the same render string. All functions work on sRGB components in [0, 1].
//
// Organised into sections:
//   - Clamp / lerp
//   - Byte conversion
//   - Colour matrices

// ── Clamp / lerp ─────────────────────────────────────────────────────────────

/// Clamp `v` to [0.0, 1.0].
#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` at `t` ∈ [0, 1].
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ── Byte conversion ──────────────────────────────────────────────────────────

#[inline]
pub fn to_unit(b: u8) -> f32 {
    b as f32 / 255.0
}

/// Round-to-nearest, clamped. `to_byte(to_unit(b)) == b` for every byte.
#[inline]
pub fn to_byte(v: f32) -> u8 {
    (clamp01(v) * 255.0).round() as u8
}

// ── Colour matrices ──────────────────────────────────────────────────────────

/// 3×3 RGB matrix, row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f32; 3]; 3]);

impl ColorMatrix {
    /// `saturate(s)`, `s` as a fraction (1.0 = identity). Not clamped above.
    pub fn saturate(s: f32) -> Self {
        let s = s.max(0.0);
        ColorMatrix([
            [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
            [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
        ])
    }

    /// `hue-rotate(deg)`.
    pub fn hue_rotate(deg: f32) -> Self {
        let (sin, cos) = deg.to_radians().sin_cos();
        ColorMatrix([
            [
                0.213 + cos * 0.787 - sin * 0.213,
                0.715 - cos * 0.715 - sin * 0.715,
                0.072 - cos * 0.072 + sin * 0.928,
            ],
            [
                0.213 - cos * 0.213 + sin * 0.143,
                0.715 + cos * 0.285 + sin * 0.140,
                0.072 - cos * 0.072 - sin * 0.283,
            ],
            [
                0.213 - cos * 0.213 - sin * 0.787,
                0.715 - cos * 0.715 + sin * 0.715,
                0.072 + cos * 0.928 + sin * 0.072,
            ],
        ])
    }

    /// `sepia(a)`, `a` as a fraction clamped to [0, 1].
    pub fn sepia(a: f32) -> Self {
        let k = 1.0 - clamp01(a);
        ColorMatrix([
            [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
            [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
            [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
        ])
    }

    /// `grayscale(a)`, `a` as a fraction clamped to [0, 1].
    pub fn grayscale(a: f32) -> Self {
        let k = 1.0 - clamp01(a);
        ColorMatrix([
            [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
            [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
            [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
        ])
    }

    /// Multiply and clamp each channel to [0, 1].
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let m = &self.0;
        [
            clamp01(m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2]),
            clamp01(m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2]),
            clamp01(m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2]),
        ]
    }
}

/// `brightness(a)`: linear slope.
#[inline]
pub fn brightness(c: f32, a: f32) -> f32 {
    clamp01(c * a.max(0.0))
}

/// `contrast(a)`: slope around mid-grey.
#[inline]
pub fn contrast(c: f32, a: f32) -> f32 {
    let a = a.max(0.0);
    clamp01((c - 0.5) * a + 0.5)
}

/// `invert(a)`, `a` clamped to [0, 1].
#[inline]
pub fn invert(c: f32, a: f32) -> f32 {
    lerp(c, 1.0 - c, clamp01(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn byte_round_trip_is_exact() {
        for b in 0..=255u8 {
            assert_eq!(to_byte(to_unit(b)), b);
        }
    }

    #[test]
    fn zero_saturation_is_luma_grey() {
        let out = ColorMatrix::saturate(0.0).apply([1.0, 0.0, 0.0]);
        assert!(close(out, [0.213, 0.213, 0.213]));
    }

    #[test]
    fn full_grayscale_equalizes_channels() {
        let out = ColorMatrix::grayscale(1.0).apply([0.2, 0.6, 0.9]);
        assert!((out[0] - out[1]).abs() < 1e-5 && (out[1] - out[2]).abs() < 1e-5);
    }

    #[test]
    fn hue_rotate_360_is_near_identity() {
        let rgb = [0.3, 0.5, 0.7];
        assert!(close(ColorMatrix::hue_rotate(360.0).apply(rgb), rgb));
    }

    #[test]
    fn contrast_pivots_on_mid_grey() {
        assert_eq!(contrast(0.5, 3.0), 0.5);
        assert_eq!(contrast(1.0, 0.0), 0.5);
        assert_eq!(brightness(0.6, 2.0), 1.0);
        assert_eq!(invert(0.25, 1.0), 0.75);
    }
}
