//! Controller response status codes.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Response codes returned by ZDC/ZDTWO controllers in the `Status` field.
///
/// Every JSON reply from the controller carries a numeric `Status`. The set of
/// codes is fixed per firmware; codes outside this set are reported as
/// "Unknown status" by [`DeviceStatus::describe`].
///
/// # Examples
///
/// ```
/// use luxor_lights_rs::DeviceStatus;
///
/// assert_eq!(DeviceStatus::create(0), Some(DeviceStatus::Ok));
/// assert_eq!(DeviceStatus::create(9999), None);
/// assert_eq!(DeviceStatus::describe(205), "Group Number In Use");
/// assert_eq!(DeviceStatus::describe(9999), "Unknown status");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, EnumIter, PartialEq, Eq)]
pub enum DeviceStatus {
    Ok = 0,
    UnknownMethod = 1,
    UnparseableRequest = 101,
    InvalidRequest = 102,
    ColorValueOutOfRange = 151,
    PreconditionFailed = 201,
    GroupNameInUse = 202,
    GroupNumberInUse = 205,
    ItemDoesNotExist = 241,
    BadGroupNumber = 242,
    ThemeIndexOutOfRange = 243,
    BadThemeIndex = 251,
    ThemeChangesRestricted = 252,
}

impl DeviceStatus {
    pub fn create(code: u16) -> Option<Self> {
        DeviceStatus::iter().find(|status| *status as u16 == code)
    }

    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this status indicates success.
    pub fn is_ok(&self) -> bool {
        matches!(self, DeviceStatus::Ok)
    }

    /// Get the human-readable description for this status.
    pub fn description(&self) -> &'static str {
        match self {
            DeviceStatus::Ok => "Ok",
            DeviceStatus::UnknownMethod => "Unknown Method",
            DeviceStatus::UnparseableRequest => "Unparseable Request",
            DeviceStatus::InvalidRequest => "Invalid Request",
            DeviceStatus::ColorValueOutOfRange => "Color Value Out of Range",
            DeviceStatus::PreconditionFailed => "Precondition Failed",
            DeviceStatus::GroupNameInUse => "Group Name In Use",
            DeviceStatus::GroupNumberInUse => "Group Number In Use",
            DeviceStatus::ItemDoesNotExist => "Item Does Not Exist",
            DeviceStatus::BadGroupNumber => "Bad Group Number",
            DeviceStatus::ThemeIndexOutOfRange => "Theme Index Out Of Range",
            DeviceStatus::BadThemeIndex => "Bad Theme Index",
            DeviceStatus::ThemeChangesRestricted => "Theme Changes Restricted",
        }
    }

    /// Describe an arbitrary code, known or not.
    pub fn describe(code: u16) -> &'static str {
        match Self::create(code) {
            Some(status) => status.description(),
            None => "Unknown status",
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_documented_strings() {
        let table = [
            (0, "Ok"),
            (1, "Unknown Method"),
            (101, "Unparseable Request"),
            (102, "Invalid Request"),
            (151, "Color Value Out of Range"),
            (201, "Precondition Failed"),
            (202, "Group Name In Use"),
            (205, "Group Number In Use"),
            (241, "Item Does Not Exist"),
            (242, "Bad Group Number"),
            (243, "Theme Index Out Of Range"),
            (251, "Bad Theme Index"),
            (252, "Theme Changes Restricted"),
        ];
        for (code, text) in table {
            assert_eq!(DeviceStatus::describe(code), text, "code {code}");
            assert_eq!(DeviceStatus::create(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [2, 100, 150, 253, 500, u16::MAX] {
            assert!(DeviceStatus::create(code).is_none());
            assert_eq!(DeviceStatus::describe(code), "Unknown status");
        }
    }

    #[test]
    fn test_is_ok() {
        assert!(DeviceStatus::Ok.is_ok());
        assert!(!DeviceStatus::PreconditionFailed.is_ok());
    }

    #[test]
    fn test_every_variant_round_trips() {
        for status in DeviceStatus::iter() {
            assert_eq!(DeviceStatus::create(status.code()), Some(status));
        }
    }
}
