//! Color list entries from ColorListGet.

use serde::{Deserialize, Serialize};

use super::ColorCode;

/// One fixed color as reported by `/ColorListGet.json`.
///
/// Hue is an angle on the color wheel (0-360 degrees) and saturation a
/// percentage (0-100), the same convention as the Luxor mobile app.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    #[serde(rename = "C")]
    pub code: ColorCode,
    #[serde(rename = "Hue")]
    pub hue: u16,
    #[serde(rename = "Sat")]
    pub saturation: u8,
}

impl ColorEntry {
    /// Default hue written when a color slot is created on demand.
    pub const DEFAULT_HUE: u16 = 360;
    /// Default saturation written when a color slot is created on demand.
    pub const DEFAULT_SATURATION: u8 = 100;

    pub fn new(code: ColorCode, hue: u16, saturation: u8) -> Self {
        ColorEntry {
            code,
            hue,
            saturation,
        }
    }

    /// The entry synthesized when a requested color is absent from the
    /// controller's list.
    pub fn fallback(code: ColorCode) -> Self {
        ColorEntry {
            code,
            hue: Self::DEFAULT_HUE,
            saturation: Self::DEFAULT_SATURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_defaults() {
        let entry = ColorEntry::fallback(ColorCode::new(9));
        assert_eq!(entry.hue, 360);
        assert_eq!(entry.saturation, 100);
        assert_eq!(entry.code.value(), 9);
    }

    #[test]
    fn test_wire_keys() {
        let entry: ColorEntry =
            serde_json::from_str(r#"{"C": 5, "Hue": 120, "Sat": 80}"#).unwrap();
        assert_eq!(entry, ColorEntry::new(ColorCode::new(5), 120, 80));
    }
}
