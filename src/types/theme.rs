//! Theme entries from ThemeListGet.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One stored theme as reported by `/ThemeListGet.json`.
///
/// Themes are preset scenes stored on the controller and toggled by index.
/// ZDC controllers store indices 0-25, ZDTWO 0-39.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ThemeEntry {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "ThemeIndex")]
    pub index: u8,
    #[serde(
        rename = "OnOff",
        serialize_with = "serialize_on_off",
        deserialize_with = "deserialize_on_off"
    )]
    pub on: bool,
}

// The firmware encodes OnOff as 0/1 rather than JSON booleans.
fn serialize_on_off<S: Serializer>(on: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*on))
}

fn deserialize_on_off<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = u8::deserialize(deserializer)?;
    Ok(value != 0)
}
