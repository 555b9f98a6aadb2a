//! Colors and the per-arbor color scheme

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::arbor::ArborKind;
use crate::domain::error::DomainError;

/// sRGB color with channels in `0.0..=1.0`.
///
/// Deserializes from either `"#rrggbb"` or `[r, g, b]`; serializes as hex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorValue", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Hex(String),
    Triple([f32; 3]),
}

impl TryFrom<ColorValue> for Rgb {
    type Error = DomainError;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Hex(s) => s.parse(),
            ColorValue::Triple([r, g, b]) => Rgb::new(r, g, b),
        }
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    pub const DIM_GREY: Rgb = Rgb {
        r: 105.0 / 255.0,
        g: 105.0 / 255.0,
        b: 105.0 / 255.0,
    };
    pub const BLUE: Rgb = Rgb { r: 0.0, g: 0.0, b: 1.0 };

    /// Build from float channels, rejecting values outside `0.0..=1.0`.
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self, DomainError> {
        let valid = |c: f32| c.is_finite() && (0.0..=1.0).contains(&c);
        if valid(r) && valid(g) && valid(b) {
            Ok(Self { r, g, b })
        } else {
            Err(DomainError::InvalidColor(format!("[{r}, {g}, {b}]")))
        }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Blend towards white by `amount` (0 keeps the color, 1 gives white).
    pub fn lighten(&self, amount: f32) -> Self {
        let t = amount.clamp(0.0, 1.0);
        let mix = |c: f32| c + (1.0 - c) * t;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }

    /// Blend towards black by `amount` (0 keeps the color, 1 gives black).
    pub fn darken(&self, amount: f32) -> Self {
        let t = 1.0 - amount.clamp(0.0, 1.0);
        Self {
            r: self.r * t,
            g: self.g * t,
            b: self.b * t,
        }
    }
}

impl FromStr for Rgb {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(DomainError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| DomainError::InvalidColor(s.to_string()))
        };
        Ok(Rgb::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One color per arbor kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub axon: Rgb,
    pub basal_dendrites: Rgb,
    pub apical_dendrite: Rgb,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            axon: Rgb::from_u8(0xd6, 0x27, 0x28),
            basal_dendrites: Rgb::from_u8(0x1f, 0x77, 0xb4),
            apical_dendrite: Rgb::from_u8(0x2c, 0xa0, 0x2c),
        }
    }
}

impl ColorScheme {
    pub fn color_for(&self, kind: ArborKind) -> Rgb {
        match kind {
            ArborKind::Axon => self.axon,
            ArborKind::Basal => self.basal_dendrites,
            ArborKind::Apical => self.apical_dendrite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#ff0000", "#ff0000")]
    #[case("00FF7f", "#00ff7f")]
    #[case("  #1f77b4 ", "#1f77b4")]
    fn given_hex_when_parsing_then_roundtrips_lowercase(#[case] input: &str, #[case] expected: &str) {
        let color: Rgb = input.parse().unwrap();
        assert_eq!(color.to_hex(), expected);
    }

    #[rstest]
    #[case("#fff")]
    #[case("#gg0000")]
    #[case("")]
    fn given_malformed_hex_when_parsing_then_invalid_color(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Rgb>(),
            Err(DomainError::InvalidColor(_))
        ));
    }

    #[test]
    fn given_out_of_range_channel_when_creating_then_rejected() {
        assert!(Rgb::new(1.2, 0.0, 0.0).is_err());
        assert!(Rgb::new(f32::NAN, 0.0, 0.0).is_err());
        assert_eq!(Rgb::new(1.0, 0.0, 0.0).unwrap().to_hex(), "#ff0000");
    }

    #[test]
    fn given_toml_with_mixed_color_forms_when_parsing_then_both_accepted() {
        let scheme: ColorScheme = toml::from_str(
            r##"
axon = "#ff0000"
basal_dendrites = [0.0, 0.0, 1.0]
"##,
        )
        .unwrap();

        assert_eq!(scheme.axon.to_hex(), "#ff0000");
        assert_eq!(scheme.basal_dendrites.to_hex(), "#0000ff");
        assert_eq!(scheme.apical_dendrite, ColorScheme::default().apical_dendrite);
    }

    #[test]
    fn given_color_when_lightening_and_darkening_then_moves_towards_white_and_black() {
        let base = Rgb::from_u8(100, 100, 100);
        assert_eq!(base.lighten(1.0).to_hex(), "#ffffff");
        assert_eq!(base.darken(1.0).to_hex(), "#000000");
        assert_eq!(base.lighten(0.0), base);
    }

    #[test]
    fn given_scheme_when_looking_up_kind_then_matching_color() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.color_for(ArborKind::Axon), scheme.axon);
        assert_eq!(scheme.color_for(ArborKind::Basal), scheme.basal_dendrites);
        assert_eq!(scheme.color_for(ArborKind::Apical), scheme.apical_dendrite);
    }
}
