//! Continuous color scales for the population bars.
//!
//! Each theme is a fixed ramp of color stops, sampled by linear
//! interpolation in RGB.

use crate::selection::ColorTheme;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

const BLUES: [Rgb; 9] = [
    Rgb::from_hex(0xf7fbff),
    Rgb::from_hex(0xdeebf7),
    Rgb::from_hex(0xc6dbef),
    Rgb::from_hex(0x9ecae1),
    Rgb::from_hex(0x6baed6),
    Rgb::from_hex(0x4292c6),
    Rgb::from_hex(0x2171b5),
    Rgb::from_hex(0x08519c),
    Rgb::from_hex(0x08306b),
];

const CIVIDIS: [Rgb; 10] = [
    Rgb::from_hex(0x00224e),
    Rgb::from_hex(0x123570),
    Rgb::from_hex(0x3b496c),
    Rgb::from_hex(0x575d6d),
    Rgb::from_hex(0x707173),
    Rgb::from_hex(0x8a8779),
    Rgb::from_hex(0xa69d75),
    Rgb::from_hex(0xc4b56c),
    Rgb::from_hex(0xe4cf5b),
    Rgb::from_hex(0xfee838),
];

const GREENS: [Rgb; 9] = [
    Rgb::from_hex(0xf7fcf5),
    Rgb::from_hex(0xe5f5e0),
    Rgb::from_hex(0xc7e9c0),
    Rgb::from_hex(0xa1d99b),
    Rgb::from_hex(0x74c476),
    Rgb::from_hex(0x41ab5d),
    Rgb::from_hex(0x238b45),
    Rgb::from_hex(0x006d2c),
    Rgb::from_hex(0x00441b),
];

const INFERNO: [Rgb; 10] = [
    Rgb::from_hex(0x000004),
    Rgb::from_hex(0x1b0c41),
    Rgb::from_hex(0x4a0c6b),
    Rgb::from_hex(0x781c6d),
    Rgb::from_hex(0xa52c60),
    Rgb::from_hex(0xcf4446),
    Rgb::from_hex(0xed6925),
    Rgb::from_hex(0xfb9b06),
    Rgb::from_hex(0xf7d13d),
    Rgb::from_hex(0xfcffa4),
];

const MAGMA: [Rgb; 10] = [
    Rgb::from_hex(0x000004),
    Rgb::from_hex(0x180f3d),
    Rgb::from_hex(0x440f76),
    Rgb::from_hex(0x721f81),
    Rgb::from_hex(0x9e2f7f),
    Rgb::from_hex(0xcd4071),
    Rgb::from_hex(0xf1605d),
    Rgb::from_hex(0xfd9668),
    Rgb::from_hex(0xfeca8d),
    Rgb::from_hex(0xfcfdbf),
];

const PLASMA: [Rgb; 10] = [
    Rgb::from_hex(0x0d0887),
    Rgb::from_hex(0x46039f),
    Rgb::from_hex(0x7201a8),
    Rgb::from_hex(0x9c179e),
    Rgb::from_hex(0xbd3786),
    Rgb::from_hex(0xd8576b),
    Rgb::from_hex(0xed7953),
    Rgb::from_hex(0xfb9f3a),
    Rgb::from_hex(0xfdca26),
    Rgb::from_hex(0xf0f921),
];

const REDS: [Rgb; 9] = [
    Rgb::from_hex(0xfff5f0),
    Rgb::from_hex(0xfee0d2),
    Rgb::from_hex(0xfcbba1),
    Rgb::from_hex(0xfc9272),
    Rgb::from_hex(0xfb6a4a),
    Rgb::from_hex(0xef3b2c),
    Rgb::from_hex(0xcb181d),
    Rgb::from_hex(0xa50f15),
    Rgb::from_hex(0x67000d),
];

const RAINBOW: [Rgb; 9] = [
    Rgb::from_hex(0x96005a),
    Rgb::from_hex(0x0000c8),
    Rgb::from_hex(0x0019ff),
    Rgb::from_hex(0x0098ff),
    Rgb::from_hex(0x2cff96),
    Rgb::from_hex(0x97ff00),
    Rgb::from_hex(0xffea00),
    Rgb::from_hex(0xff6f00),
    Rgb::from_hex(0xff0000),
];

const TURBO: [Rgb; 10] = [
    Rgb::from_hex(0x30123b),
    Rgb::from_hex(0x4662d7),
    Rgb::from_hex(0x36aaf9),
    Rgb::from_hex(0x1ae4b6),
    Rgb::from_hex(0x72fe5e),
    Rgb::from_hex(0xc8ef34),
    Rgb::from_hex(0xfabb39),
    Rgb::from_hex(0xf66b19),
    Rgb::from_hex(0xcb2a04),
    Rgb::from_hex(0x7a0403),
];

const VIRIDIS: [Rgb; 10] = [
    Rgb::from_hex(0x440154),
    Rgb::from_hex(0x482878),
    Rgb::from_hex(0x3e4989),
    Rgb::from_hex(0x31688e),
    Rgb::from_hex(0x26828e),
    Rgb::from_hex(0x1f9e89),
    Rgb::from_hex(0x35b779),
    Rgb::from_hex(0x6ece58),
    Rgb::from_hex(0xb5de2b),
    Rgb::from_hex(0xfde725),
];

/// Color stops from low to high values.
pub fn color_stops(theme: ColorTheme) -> &'static [Rgb] {
    match theme {
        ColorTheme::Blues => &BLUES,
        ColorTheme::Cividis => &CIVIDIS,
        ColorTheme::Greens => &GREENS,
        ColorTheme::Inferno => &INFERNO,
        ColorTheme::Magma => &MAGMA,
        ColorTheme::Plasma => &PLASMA,
        ColorTheme::Reds => &REDS,
        ColorTheme::Rainbow => &RAINBOW,
        ColorTheme::Turbo => &TURBO,
        ColorTheme::Viridis => &VIRIDIS,
    }
}

/// Sample a theme ramp at `t` in `[0, 1]` (clamped).
pub fn sample(theme: ColorTheme, t: f64) -> Rgb {
    let stops = color_stops(theme);
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (stops.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(stops.len() - 1);
    stops[lower].lerp(stops[upper], scaled - lower as f64)
}

/// Maps population values onto a theme over a fixed domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    theme: ColorTheme,
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Domain is the extent of `values`. An empty input gives `[0, 0]`.
    pub fn for_values(theme: ColorTheme, values: impl IntoIterator<Item = i64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold(None, |acc: Option<(i64, i64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0, 0));
        Self {
            theme,
            min: min as f64,
            max: max as f64,
        }
    }

    /// A single-valued domain maps everything to the middle of the ramp.
    pub fn color_for(&self, value: i64) -> Rgb {
        let span = self.max - self.min;
        let t = if span > 0.0 {
            (value as f64 - self.min) / span
        } else {
            0.5
        };
        sample(self.theme, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgb::from_hex(0x08306b);
        assert_eq!(color, Rgb { r: 8, g: 48, b: 107 });
        assert_eq!(color.to_hex(), "#08306b");
    }

    #[test]
    fn test_sample_endpoints() {
        for theme in ColorTheme::ALL {
            let stops = color_stops(theme);
            assert_eq!(sample(theme, 0.0), stops[0]);
            assert_eq!(sample(theme, 1.0), stops[stops.len() - 1]);
            assert_eq!(sample(theme, -3.0), stops[0]);
            assert_eq!(sample(theme, 7.5), stops[stops.len() - 1]);
        }
    }

    #[test]
    fn test_sample_interpolates_between_stops() {
        // Blues has 9 stops, so t = 1/16 sits halfway between the first two.
        let color = sample(ColorTheme::Blues, 1.0 / 16.0);
        assert_eq!(color, Rgb { r: 235, g: 243, b: 251 });
    }

    #[test]
    fn test_scale_maps_extent() {
        let scale = ColorScale::for_values(ColorTheme::Viridis, [500, 100, 300]);

        assert_eq!(scale.color_for(100), VIRIDIS[0]);
        assert_eq!(scale.color_for(500), VIRIDIS[9]);
    }

    #[test]
    fn test_scale_single_value_uses_middle() {
        let scale = ColorScale::for_values(ColorTheme::Reds, [42]);

        assert_eq!(scale.color_for(42), sample(ColorTheme::Reds, 0.5));
    }
}
