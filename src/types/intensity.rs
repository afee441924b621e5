//! Group intensity (brightness) values.

use serde::{Deserialize, Serialize};

/// Intensity level from 0 to 100 percent.
///
/// 0 means the group is off; any non-zero value means it is illuminated.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(transparent)]
pub struct Intensity {
    pub(crate) value: u8,
}

impl Intensity {
    const MAX: u8 = 100;

    /// Intensity used when switching a group on without an explicit level.
    pub const POWER_ON: Intensity = Intensity { value: 50 };
    pub const OFF: Intensity = Intensity { value: 0 };

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_off(&self) -> bool {
        self.value == 0
    }

    /// Returns None if value is outside valid range (0-100).
    pub fn create(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Intensity { value })
        } else {
            None
        }
    }

    /// Returns the value clamped into 0-100.
    pub fn create_or_clamp(value: u8) -> Self {
        Intensity {
            value: value.min(Self::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_bounds() {
        assert_eq!(Intensity::create(0).unwrap().value(), 0);
        assert_eq!(Intensity::create(100).unwrap().value(), 100);
        assert!(Intensity::create(101).is_none());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Intensity::create_or_clamp(250).value(), 100);
        assert_eq!(Intensity::create_or_clamp(30).value(), 30);
    }

    #[test]
    fn test_is_off() {
        assert!(Intensity::OFF.is_off());
        assert!(!Intensity::POWER_ON.is_off());
    }
}
