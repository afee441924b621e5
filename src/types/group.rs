//! Light group entries from GroupListGet.

use serde::{Deserialize, Serialize};

use super::{ColorCode, Intensity};

/// One light group as reported by `/GroupListGet.json`.
///
/// Controllers number groups 1-250. ZDC firmware reports the long key names
/// (`GroupNumber`, `Intensity`, `Color`) while ZDTWO reports the abbreviated
/// ones (`Grp`, `Inten`, `Colr`); both deserialize into this struct.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "GroupNumber", alias = "Grp")]
    pub number: u8,
    #[serde(rename = "Intensity", alias = "Inten")]
    pub intensity: Intensity,
    #[serde(rename = "Color", alias = "Colr")]
    pub color: ColorCode,
}

impl GroupEntry {
    /// Whether any light in the group is currently emitting.
    pub fn is_on(&self) -> bool {
        !self.intensity.is_off()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_long_keys() {
        let entry: GroupEntry = serde_json::from_value(json!({
            "Name": "Front Path",
            "GroupNumber": 3,
            "Intensity": 40,
            "Color": 12,
        }))
        .unwrap();
        assert_eq!(entry.number, 3);
        assert_eq!(entry.intensity.value(), 40);
        assert_eq!(entry.color.value(), 12);
        assert!(entry.is_on());
    }

    #[test]
    fn test_parse_short_keys() {
        let entry: GroupEntry = serde_json::from_value(json!({
            "Name": "Back Yard",
            "Grp": 7,
            "Inten": 0,
            "Colr": 65535,
        }))
        .unwrap();
        assert_eq!(entry.number, 7);
        assert!(entry.color.is_dmx());
        assert!(!entry.is_on());
    }
}
