//! Accessory configuration as the hub supplies it.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

fn default_group_number() -> u8 {
    // Luxor group numbers start at 1.
    1
}

/// Configuration for one group accessory, in the hub's config.json shape.
///
/// `ipAddr` is mandatory; everything else falls back: `service` to "Lights",
/// `groupName` to the accessory name, `groupNumber` to 1.
///
/// # Examples
///
/// ```
/// use luxor_lights_rs::AccessoryConfig;
///
/// let config: AccessoryConfig = serde_json::from_str(
///     r#"{"name": "Front Yard", "ipAddr": "192.168.1.42"}"#,
/// ).unwrap();
/// assert_eq!(config.group_name(), "Front Yard");
/// assert_eq!(config.group_number, 1);
/// assert_eq!(config.service(), "Lights");
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryConfig {
    pub name: String,
    /// Service label shown by the hub.
    #[serde(default)]
    pub service: Option<String>,
    /// Group name on the controller; defaults to the accessory name.
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default = "default_group_number")]
    pub group_number: u8,
    /// Controller address. Mandatory.
    pub ip_addr: Ipv4Addr,
}

impl AccessoryConfig {
    pub fn new(name: &str, group_number: u8, ip_addr: Ipv4Addr) -> Self {
        AccessoryConfig {
            name: name.to_string(),
            service: None,
            group_name: None,
            group_number,
            ip_addr,
        }
    }

    /// The configured group name, falling back to the accessory name.
    pub fn group_name(&self) -> &str {
        self.group_name.as_deref().unwrap_or(&self.name)
    }

    /// The service label, falling back to "Lights".
    pub fn service(&self) -> &str {
        self.service.as_deref().unwrap_or("Lights")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_full_config_parses() {
        let config: AccessoryConfig = serde_json::from_str(
            r#"{
                "name": "Side Yard",
                "service": "Landscape",
                "groupName": "SideYardLights",
                "groupNumber": 6,
                "ipAddr": "10.0.0.5"
            }"#,
        )
        .unwrap();
        assert_eq!(config.group_name(), "SideYardLights");
        assert_eq!(config.service(), "Landscape");
        assert_eq!(config.group_number, 6);
        assert_eq!(config.ip_addr, Ipv4Addr::from_str("10.0.0.5").unwrap());
    }

    #[test]
    fn test_defaults_resolve() {
        let config: AccessoryConfig =
            serde_json::from_str(r#"{"name": "Deck", "ipAddr": "10.0.0.5"}"#).unwrap();
        assert_eq!(config.group_name(), "Deck");
        assert_eq!(config.service(), "Lights");
        assert_eq!(config.group_number, 1);
    }

    #[test]
    fn test_missing_ip_addr_is_rejected() {
        let result = serde_json::from_str::<AccessoryConfig>(r#"{"name": "Deck"}"#);
        assert!(result.is_err());
    }
}
