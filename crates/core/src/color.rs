//! Color types and conversions for the tint-engine.
//!
//! The scale engine speaks three surfaces: hex strings (input and copyable
//! output), CSS `oklch(...)` strings (display output), and OKLCH triples
//! (everything internal). This module is the bridge between them, built on
//! the chain sRGB <-> linear RGB <-> OKLab <-> OKLCh with `f64` throughout.
//! OKLab only ever appears as an intermediate, so it stays private.

use crate::error::ScaleError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space. Internal stop on the way to OKLCh.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OkLab {
    l: f64,
    a: f64,
    b: f64,
}

/// OKLCh: perceptually uniform lightness, chroma, hue.
///
/// Lightness is in [0, 1], chroma >= 0, hue in degrees [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl OkLch {
    /// Creates an OKLCh color from lightness, chroma, and hue.
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl Srgb {
    /// White, the default contrast reference.
    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses a hex color string like "#3355cc" or "3355cc" (case insensitive).
    ///
    /// Returns `ScaleError::InvalidColor` if the input is not a valid 6-digit
    /// hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, ScaleError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(ScaleError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| ScaleError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| ScaleError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| ScaleError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit (0-255) with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab to linear RGB via the inverse OKLab matrix transform.
fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// Converts OKLab to OKLCh (cylindrical form).
///
/// Hue guard: below 1e-6 chroma the hue angle is numerically meaningless
/// (for r=g=b inputs the matrix rounding alone leaves ~1e-8 of residual
/// chroma), so achromatic colors always report hue 0 instead of an
/// arbitrary `atan2` of rounding noise.
fn oklab_to_oklch(c: OkLab) -> OkLch {
    let ch = (c.a * c.a + c.b * c.b).sqrt();
    let h = if ch < 1e-6 {
        0.0
    } else {
        c.b.atan2(c.a).to_degrees().rem_euclid(360.0)
    };
    OkLch { l: c.l, c: ch, h }
}

/// Converts OKLCh to OKLab.
fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// Converts sRGB to OKLCh via the chain sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(c)))
}

/// Converts OKLCh to sRGB via the chain OKLCh -> OKLab -> linear -> sRGB.
///
/// Out-of-gamut colors clip: the output is clamped to [0, 1] per channel,
/// so high-chroma colors near the gamut edge lose saturation rather than
/// producing invalid components.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    let srgb = linear_to_srgb(oklab_to_linear(oklch_to_oklab(c)));
    Srgb {
        r: srgb.r.clamp(0.0, 1.0),
        g: srgb.g.clamp(0.0, 1.0),
        b: srgb.b.clamp(0.0, 1.0),
    }
}

/// Parses a hex color string directly to OKLCh.
///
/// Unparsable input is an error; callers that synchronize from free-form
/// text keep their previous color on `Err`. Achromatic inputs map hue to 0.
pub fn hex_to_oklch(hex: &str) -> Result<OkLch, ScaleError> {
    Srgb::from_hex(hex).map(srgb_to_oklch)
}

/// Renders an OKLCh color to a hex string.
///
/// With `alpha >= 1.0` the result is `"#rrggbb"`; a smaller alpha appends an
/// 8-bit alpha channel: `"#rrggbbaa"`. The color clips to the sRGB gamut.
pub fn oklch_to_hex(c: OkLch, alpha: f64) -> String {
    let hex = oklch_to_srgb(c).to_hex();
    if alpha >= 1.0 {
        hex
    } else {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{hex}{a:02x}")
    }
}

/// Renders an OKLCh color to a CSS Color 4 `oklch(L C H)` string.
///
/// Lightness and chroma are printed with 3 decimals, hue with 1.
pub fn oklch_to_css(c: OkLch) -> String {
    format!("oklch({:.3} {:.3} {:.1})", c.l, c.c, c.h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // -- sRGB <-> Linear round-trip tests --

    #[test]
    fn srgb_to_linear_black_is_zero() {
        let lin = srgb_to_linear(Srgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(lin.r, 0.0));
        assert!(approx_eq(lin.g, 0.0));
        assert!(approx_eq(lin.b, 0.0));
    }

    #[test]
    fn srgb_to_linear_white_is_one() {
        let lin = srgb_to_linear(Srgb::WHITE);
        assert!(approx_eq(lin.r, 1.0));
        assert!(approx_eq(lin.g, 1.0));
        assert!(approx_eq(lin.b, 1.0));
    }

    #[test]
    fn srgb_linear_round_trip_mid_gray() {
        let gray = Srgb {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        };
        let round_tripped = linear_to_srgb(srgb_to_linear(gray));
        assert!(approx_eq(round_tripped.r, 0.5));
        assert!(approx_eq(round_tripped.g, 0.5));
        assert!(approx_eq(round_tripped.b, 0.5));
    }

    #[test]
    fn srgb_gamma_boundary_at_0_04045() {
        // Value exactly at the boundary between linear and gamma segments.
        let lin = srgb_to_linear(Srgb {
            r: 0.04045,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(lin.r, 0.04045 / 12.92));

        // Just above the boundary the power segment takes over.
        let lin_above = srgb_to_linear(Srgb {
            r: 0.04046,
            g: 0.0,
            b: 0.0,
        });
        let expected = ((0.04046 + 0.055) / 1.055_f64).powf(2.4);
        assert!(approx_eq(lin_above.r, expected));
    }

    // -- OKLCh conversion tests --

    #[test]
    fn white_has_l_near_one_and_zero_chroma() {
        let lch = srgb_to_oklch(Srgb::WHITE);
        assert!(approx_eq(lch.l, 1.0), "expected L~1.0, got {}", lch.l);
        assert!(lch.c < 1e-6, "expected chroma~0, got {}", lch.c);
    }

    #[test]
    fn black_has_l_near_zero() {
        let lch = srgb_to_oklch(Srgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(approx_eq(lch.l, 0.0), "expected L~0.0, got {}", lch.l);
        assert!(lch.c < 1e-6, "expected chroma~0, got {}", lch.c);
    }

    #[test]
    fn pure_red_has_hue_near_29_degrees() {
        let lch = srgb_to_oklch(Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        });
        assert!(
            (lch.h - 29.2).abs() < 1.0,
            "expected red hue ~29.2, got {}",
            lch.h
        );
        assert!(lch.c > 0.0, "expected positive chroma for red");
    }

    #[test]
    fn pure_blue_has_hue_near_264_degrees() {
        let lch = srgb_to_oklch(Srgb {
            r: 0.0,
            g: 0.0,
            b: 1.0,
        });
        assert!(
            (lch.h - 264.1).abs() < 1.0,
            "expected blue hue ~264.1, got {}",
            lch.h
        );
    }

    #[test]
    fn achromatic_gray_maps_hue_to_zero() {
        let lch = hex_to_oklch("#808080").unwrap();
        assert_eq!(lch.h, 0.0, "achromatic color should have hue=0");
        assert!(lch.c < 1e-6, "achromatic color should have chroma~0");
        assert!(!lch.h.is_nan(), "hue must not be NaN");
    }

    #[test]
    fn srgb_oklch_round_trip_known_colors() {
        let colors = [
            Srgb {
                r: 1.0,
                g: 0.0,
                b: 0.0,
            },
            Srgb {
                r: 0.0,
                g: 1.0,
                b: 0.0,
            },
            Srgb {
                r: 0.0,
                g: 0.0,
                b: 1.0,
            },
            Srgb::WHITE,
            Srgb {
                r: 0.0,
                g: 0.0,
                b: 0.0,
            },
            Srgb {
                r: 0.5,
                g: 0.3,
                b: 0.8,
            },
        ];
        for (i, &color) in colors.iter().enumerate() {
            let round_tripped = oklch_to_srgb(srgb_to_oklch(color));
            assert!(
                approx_eq(round_tripped.r, color.r),
                "color {i}: r={} vs {}",
                round_tripped.r,
                color.r
            );
            assert!(
                approx_eq(round_tripped.g, color.g),
                "color {i}: g={} vs {}",
                round_tripped.g,
                color.g
            );
            assert!(
                approx_eq(round_tripped.b, color.b),
                "color {i}: b={} vs {}",
                round_tripped.b,
                color.b
            );
        }
    }

    #[test]
    fn oklch_to_srgb_clips_out_of_gamut() {
        // Very high chroma at some hues produces out-of-gamut linear RGB.
        let srgb = oklch_to_srgb(OkLch::new(0.9, 0.4, 150.0));
        assert!(srgb.r >= 0.0 && srgb.r <= 1.0, "r out of range: {}", srgb.r);
        assert!(srgb.g >= 0.0 && srgb.g <= 1.0, "g out of range: {}", srgb.g);
        assert!(srgb.b >= 0.0 && srgb.b <= 1.0, "b out of range: {}", srgb.b);
    }

    // -- Hex parsing tests --

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let with = Srgb::from_hex("#ff0000").unwrap();
        let without = Srgb::from_hex("ff0000").unwrap();
        assert!(approx_eq(with.r, 1.0));
        assert!(approx_eq(with.g, 0.0));
        assert!(approx_eq(without.r, 1.0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Srgb::from_hex("#FF00AA").unwrap();
        let lower = Srgb::from_hex("#ff00aa").unwrap();
        assert!(approx_eq(upper.r, lower.r));
        assert!(approx_eq(upper.g, lower.g));
        assert!(approx_eq(upper.b, lower.b));
    }

    #[test]
    fn from_hex_returns_error_for_invalid_input() {
        assert!(Srgb::from_hex("#gggggg").is_err());
        assert!(Srgb::from_hex("#fff").is_err()); // shorthand not accepted
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#ff00ff00").is_err()); // too long
        assert!(Srgb::from_hex("not a color").is_err());
    }

    #[test]
    fn to_hex_known_color() {
        let color = Srgb {
            r: 0x80 as f64 / 255.0,
            g: 0x40 as f64 / 255.0,
            b: 0x20 as f64 / 255.0,
        };
        assert_eq!(color.to_hex(), "#804020");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let color = Srgb {
            r: 1.5,
            g: -0.1,
            b: 0.5,
        };
        assert_eq!(color.to_hex(), "#ff0080");
    }

    #[test]
    fn hex_oklch_round_trip_within_quantization() {
        let original = "#3355cc";
        let lch = hex_to_oklch(original).unwrap();
        assert_eq!(oklch_to_hex(lch, 1.0), original);
    }

    #[test]
    fn hex_to_oklch_rejects_garbage() {
        assert!(hex_to_oklch("zz0011").is_err());
    }

    // -- Rendering tests --

    #[test]
    fn oklch_to_hex_opaque_has_six_digits() {
        let hex = oklch_to_hex(OkLch::new(0.52, 0.15, 260.0), 1.0);
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }

    #[test]
    fn oklch_to_hex_translucent_appends_alpha() {
        let hex = oklch_to_hex(OkLch::new(0.52, 0.15, 260.0), 0.5);
        assert_eq!(hex.len(), 9);
        assert!(hex.ends_with("80"), "alpha 0.5 should encode as 80: {hex}");
    }

    #[test]
    fn oklch_to_css_formats_triple() {
        let css = oklch_to_css(OkLch::new(0.97, 0.15, 260.0));
        assert_eq!(css, "oklch(0.970 0.150 260.0)");
    }

    #[test]
    fn oklch_to_css_white_point() {
        let css = oklch_to_css(OkLch::new(1.0, 0.0, 0.0));
        assert_eq!(css, "oklch(1.000 0.000 0.0)");
    }

    // -- Serde tests --

    #[test]
    fn srgb_serializes_as_hex_string() {
        let red = Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        };
        let json = serde_json::to_string(&red).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn srgb_deserializes_from_hex_string() {
        let green: Srgb = serde_json::from_str("\"#00ff00\"").unwrap();
        assert!(approx_eq(green.r, 0.0));
        assert!(approx_eq(green.g, 1.0));
        assert!(approx_eq(green.b, 0.0));
    }

    #[test]
    fn srgb_deserialize_rejects_invalid_hex() {
        let result: Result<Srgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Strategy for sRGB component values in [0, 1].
        fn srgb_component() -> impl Strategy<Value = f64> {
            0.0_f64..=1.0
        }

        proptest! {
            #[test]
            fn srgb_to_oklch_round_trip_within_epsilon(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let original = Srgb { r, g, b };
                let round_tripped = oklch_to_srgb(srgb_to_oklch(original));
                prop_assert!(
                    (round_tripped.r - original.r).abs() < 1e-5,
                    "r: {} vs {}", round_tripped.r, original.r
                );
                prop_assert!(
                    (round_tripped.g - original.g).abs() < 1e-5,
                    "g: {} vs {}", round_tripped.g, original.g
                );
                prop_assert!(
                    (round_tripped.b - original.b).abs() < 1e-5,
                    "b: {} vs {}", round_tripped.b, original.b
                );
            }

            #[test]
            fn oklch_to_srgb_always_produces_valid_range(
                l in 0.0_f64..=1.0,
                c in 0.0_f64..=0.4,
                h in 0.0_f64..360.0,
            ) {
                let srgb = oklch_to_srgb(OkLch::new(l, c, h));
                prop_assert!(
                    srgb.r >= 0.0 && srgb.r <= 1.0,
                    "r out of range: {}", srgb.r
                );
                prop_assert!(
                    srgb.g >= 0.0 && srgb.g <= 1.0,
                    "g out of range: {}", srgb.g
                );
                prop_assert!(
                    srgb.b >= 0.0 && srgb.b <= 1.0,
                    "b out of range: {}", srgb.b
                );
            }

            #[test]
            fn srgb_to_oklch_hue_is_never_nan(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let lch = srgb_to_oklch(Srgb { r, g, b });
                prop_assert!(!lch.h.is_nan(), "hue is NaN for ({r}, {g}, {b})");
                prop_assert!(!lch.c.is_nan(), "chroma is NaN for ({r}, {g}, {b})");
                prop_assert!(
                    lch.h >= 0.0 && lch.h < 360.0,
                    "hue {} out of [0, 360)", lch.h
                );
            }

            #[test]
            fn srgb_hex_round_trip_within_quantization(
                r in srgb_component(),
                g in srgb_component(),
                b in srgb_component(),
            ) {
                let original = Srgb { r, g, b };
                let round_tripped = Srgb::from_hex(&original.to_hex()).unwrap();
                // Hex is 8-bit: max error is 0.5/255
                let max_err = 0.5 / 255.0 + 1e-10;
                prop_assert!(
                    (round_tripped.r - original.r).abs() < max_err,
                    "r: {} vs {}", round_tripped.r, original.r
                );
                prop_assert!(
                    (round_tripped.g - original.g).abs() < max_err,
                    "g: {} vs {}", round_tripped.g, original.g
                );
                prop_assert!(
                    (round_tripped.b - original.b).abs() < max_err,
                    "b: {} vs {}", round_tripped.b, original.b
                );
            }
        }
    }
}
