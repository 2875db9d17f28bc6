//! RGBA/HSVA value types and the conversions between them.
//!
//! HSVA is the canonical storage space for control points; RGBA is derived
//! on demand. All components are nominally in [0, 1].

/// Hue placeholder for achromatic colors (`max == min`).
///
/// Inherited from the legacy gradient file format, which stores this exact
/// value for grays instead of 0. Persisted files depend on it, so it is a
/// contract, not a choice.
pub const ACHROMATIC_HUE: f32 = 1.0 / 6.0;

/// Straight-alpha RGBA color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub fn from_hsva(c: Hsva) -> Self {
        hsva_to_rgba(c)
    }
}

/// Hue/saturation/value/alpha color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Hsva {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub a: f32,
}

impl Hsva {
    #[inline]
    pub const fn new(h: f32, s: f32, v: f32, a: f32) -> Self {
        Self { h, s, v, a }
    }

    #[inline]
    pub fn from_rgba(c: Rgba) -> Self {
        rgba_to_hsva(c)
    }
}

/// Converts RGBA to HSVA via the standard six-sector decomposition.
///
/// Achromatic input yields hue [`ACHROMATIC_HUE`], not 0.
pub fn rgba_to_hsva(c: Rgba) -> Hsva {
    let maxc = c.r.max(c.g).max(c.b);
    let minc = c.r.min(c.g).min(c.b);
    let delta = maxc - minc;

    let h = if delta == 0.0 {
        ACHROMATIC_HUE
    } else {
        let sector = if maxc == c.r {
            (c.g - c.b) / delta
        } else if maxc == c.g {
            2.0 + (c.b - c.r) / delta
        } else {
            4.0 + (c.r - c.g) / delta
        };
        // One sector is 1/6 of the hue circle; wrap into [0, 1).
        let h = sector / 6.0;
        if h < 0.0 { h + 1.0 } else { h }
    };

    let s = if maxc == 0.0 { 0.0 } else { delta / maxc };

    Hsva::new(h, s, maxc, c.a)
}

/// Converts HSVA to RGBA. Near-zero saturation short-circuits to gray.
pub fn hsva_to_rgba(c: Hsva) -> Rgba {
    if c.s < 1e-4 {
        return Rgba::new(c.v, c.v, c.v, c.a);
    }

    let deg = c.h * 360.0;
    let sector = (deg / 60.0).floor();
    let frac = deg / 60.0 - sector;

    let p = c.v * (1.0 - c.s);
    let q = c.v * (1.0 - frac * c.s);
    let t = c.v * (1.0 - (1.0 - frac) * c.s);

    let (r, g, b) = match sector as i32 {
        0 => (c.v, t, p),
        1 => (q, c.v, p),
        2 => (p, c.v, t),
        3 => (p, q, c.v),
        4 => (t, p, c.v),
        _ => (c.v, p, q),
    };

    Rgba::new(r, g, b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    fn round_trip(c: Rgba) {
        let back = hsva_to_rgba(rgba_to_hsva(c));
        assert_close(back.r, c.r);
        assert_close(back.g, c.g);
        assert_close(back.b, c.b);
        assert_close(back.a, c.a);
    }

    // ── chromatic round trips ─────────────────────────────────────────────

    #[test]
    fn round_trip_primaries() {
        round_trip(Rgba::new(1.0, 0.0, 0.0, 1.0));
        round_trip(Rgba::new(0.0, 1.0, 0.0, 1.0));
        round_trip(Rgba::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn round_trip_secondaries() {
        round_trip(Rgba::new(1.0, 1.0, 0.0, 0.5));
        round_trip(Rgba::new(0.0, 1.0, 1.0, 0.5));
        round_trip(Rgba::new(1.0, 0.0, 1.0, 0.5));
    }

    #[test]
    fn round_trip_chromatic_sweep() {
        // Deterministic sweep over mixed colors with max != min.
        for i in 0..6 {
            for j in 0..6 {
                for k in 0..6 {
                    if i == j && j == k {
                        continue;
                    }
                    let c = Rgba::new(i as f32 / 5.0, j as f32 / 5.0, k as f32 / 5.0, 0.8);
                    round_trip(c);
                }
            }
        }
    }

    // ── achromatic handling ───────────────────────────────────────────────

    #[test]
    fn gray_hue_is_one_sixth() {
        let c = rgba_to_hsva(Rgba::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(c.h, ACHROMATIC_HUE);
        assert_eq!(c.s, 0.0);
        assert_eq!(c.v, 0.5);
    }

    #[test]
    fn black_has_zero_saturation() {
        let c = rgba_to_hsva(Rgba::black());
        assert_eq!(c.s, 0.0);
        assert_eq!(c.v, 0.0);
        assert_eq!(c.h, ACHROMATIC_HUE);
    }

    #[test]
    fn gray_preserves_value_and_alpha() {
        let back = hsva_to_rgba(rgba_to_hsva(Rgba::new(0.3, 0.3, 0.3, 0.7)));
        assert_eq!(back, Rgba::new(0.3, 0.3, 0.3, 0.7));
    }

    #[test]
    fn zero_saturation_ignores_hue() {
        let a = hsva_to_rgba(Hsva::new(0.1, 0.0, 0.6, 1.0));
        let b = hsva_to_rgba(Hsva::new(0.9, 0.0, 0.6, 1.0));
        assert_eq!(a, b);
        assert_eq!(a, Rgba::new(0.6, 0.6, 0.6, 1.0));
    }

    // ── sector spot checks ────────────────────────────────────────────────

    #[test]
    fn pure_red_is_sector_zero() {
        let c = rgba_to_hsva(Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(c.h, 0.0);
        assert_eq!(c.s, 1.0);
        assert_eq!(c.v, 1.0);
    }

    #[test]
    fn pure_green_hue() {
        let c = rgba_to_hsva(Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_close(c.h, 1.0 / 3.0);
    }

    #[test]
    fn pure_blue_hue() {
        let c = rgba_to_hsva(Rgba::new(0.0, 0.0, 1.0, 1.0));
        assert_close(c.h, 2.0 / 3.0);
    }

    #[test]
    fn hue_wraps_into_unit_range() {
        // Magenta-ish: dominant red with more blue than green → negative
        // sector before the wrap.
        let c = rgba_to_hsva(Rgba::new(1.0, 0.0, 0.5, 1.0));
        assert!((0.0..1.0).contains(&c.h));
        assert!(c.h > 0.5);
    }
}
