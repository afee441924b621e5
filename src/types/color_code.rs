//! Luxor color list indices.

use serde::{Deserialize, Serialize};

/// Classification of a [`ColorCode`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCodeKind {
    /// Fixed palette entry (0-250), editable through ColorListSet.
    Fixed,
    /// Color wheel slot (251-260), cycling on the controller itself.
    ColorWheel,
    /// 65535: the group is under external DMX control.
    DmxControl,
    /// Anything else the firmware might hand back.
    Reserved,
}

/// A color list index as stored on the controller.
///
/// Fixed colors occupy 0-250, 251-260 are color wheels, and 65535 is a
/// sentinel meaning the group follows an external DMX source. Only fixed
/// colors carry a hue/saturation pair that can be read or written.
///
/// # Examples
///
/// ```
/// use luxor_lights_rs::{ColorCode, ColorCodeKind};
///
/// assert_eq!(ColorCode::new(42).kind(), ColorCodeKind::Fixed);
/// assert_eq!(ColorCode::new(255).kind(), ColorCodeKind::ColorWheel);
/// assert_eq!(ColorCode::DMX.kind(), ColorCodeKind::DmxControl);
/// ```
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct ColorCode(pub(crate) u16);

impl ColorCode {
    const FIXED_MAX: u16 = 250;
    const WHEEL_MAX: u16 = 260;

    /// Sentinel reported when a group is driven by external DMX.
    pub const DMX: ColorCode = ColorCode(65535);

    pub fn new(code: u16) -> Self {
        ColorCode(code)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn kind(&self) -> ColorCodeKind {
        match self.0 {
            0..=Self::FIXED_MAX => ColorCodeKind::Fixed,
            251..=Self::WHEEL_MAX => ColorCodeKind::ColorWheel,
            65535 => ColorCodeKind::DmxControl,
            _ => ColorCodeKind::Reserved,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.kind() == ColorCodeKind::Fixed
    }

    pub fn is_color_wheel(&self) -> bool {
        self.kind() == ColorCodeKind::ColorWheel
    }

    pub fn is_dmx(&self) -> bool {
        self.kind() == ColorCodeKind::DmxControl
    }
}

impl From<u16> for ColorCode {
    fn from(code: u16) -> Self {
        ColorCode(code)
    }
}

impl std::fmt::Display for ColorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ranges() {
        assert_eq!(ColorCode::new(0).kind(), ColorCodeKind::Fixed);
        assert_eq!(ColorCode::new(250).kind(), ColorCodeKind::Fixed);
        assert_eq!(ColorCode::new(251).kind(), ColorCodeKind::ColorWheel);
        assert_eq!(ColorCode::new(260).kind(), ColorCodeKind::ColorWheel);
        assert_eq!(ColorCode::new(261).kind(), ColorCodeKind::Reserved);
        assert_eq!(ColorCode::new(65535).kind(), ColorCodeKind::DmxControl);
    }

    #[test]
    fn test_serde_transparent() {
        let code: ColorCode = serde_json::from_str("65535").unwrap();
        assert!(code.is_dmx());
        assert_eq!(serde_json::to_string(&ColorCode::new(7)).unwrap(), "7");
    }
}
