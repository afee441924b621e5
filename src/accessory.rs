//! Hub-facing accessory adapters.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::AccessoryConfig;
use crate::controller::Controller;
use crate::errors::Error;
use crate::types::Intensity;

type Result<T> = std::result::Result<T, Error>;

/// One light group exposed to the hub as a dimmable bulb.
///
/// The adapter translates the hub's On/Brightness properties into controller
/// calls. Get operations await the underlying group list fetch (subject to
/// the controller's cache window) before answering, so the hub always sees a
/// value the device actually reported. Connection resets during a refresh
/// are logged and never surface; the last-known state answers instead.
pub struct GroupAccessory {
    config: AccessoryConfig,
    controller: Arc<Controller>,
    group_name: String,
    brightness: Intensity,
    power: bool,
}

impl GroupAccessory {
    pub fn new(config: AccessoryConfig, controller: Arc<Controller>) -> Self {
        let group_name = config.group_name().to_string();
        GroupAccessory {
            config,
            controller,
            group_name,
            brightness: Intensity::OFF,
            power: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The group name, adopted from the controller after [`connect`](Self::connect).
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn group_number(&self) -> u8 {
        self.config.group_number
    }

    pub fn config(&self) -> &AccessoryConfig {
        &self.config
    }

    /// Last-known brightness without touching the network.
    pub fn brightness(&self) -> Intensity {
        self.brightness
    }

    /// Last-known power state without touching the network.
    pub fn is_on(&self) -> bool {
        self.power
    }

    /// Verify the configured group exists on the controller.
    ///
    /// Adopts the group's device-side name and current intensity. A group
    /// number with no matching entry is a configuration error and fatal:
    /// unlike refreshes, this surfaces [`Error::GroupNotFound`].
    pub async fn connect(&mut self) -> Result<()> {
        let groups = self.controller.group_list_get().await?;
        let entry = groups
            .iter()
            .find(|entry| entry.number == self.config.group_number)
            .ok_or_else(|| Error::GroupNotFound {
                group: self.config.group_number,
                controller: self.controller.host().to_string(),
            })?;

        self.group_name = entry.name.clone();
        self.brightness = entry.intensity;
        self.power = entry.is_on();
        debug!(
            "accessory '{}' bound to group {} ('{}')",
            self.config.name, entry.number, self.group_name
        );
        Ok(())
    }

    /// Whether the group is currently on, per the device.
    pub async fn get_power(&mut self) -> Result<bool> {
        self.refresh().await?;
        Ok(self.power)
    }

    /// Turn the group on (intensity 50) or off (intensity 0).
    pub async fn set_power(&mut self, on: bool) -> Result<()> {
        let intensity = if on {
            Intensity::POWER_ON
        } else {
            Intensity::OFF
        };
        self.set_brightness(intensity).await
    }

    /// Current group intensity, per the device.
    pub async fn get_brightness(&mut self) -> Result<Intensity> {
        self.refresh().await?;
        Ok(self.brightness)
    }

    /// Set the group intensity; power state follows (on iff > 0).
    ///
    /// State only advances when the controller answers Ok. Any other status
    /// the controller answers with, including codes outside the known table,
    /// is warned about and leaves the last-known state untouched.
    pub async fn set_brightness(&mut self, intensity: Intensity) -> Result<()> {
        let result = self
            .controller
            .illuminate_group(self.config.group_number, intensity)
            .await;
        match result {
            Ok(status) if status.is_ok() => {
                self.brightness = intensity;
                self.power = !intensity.is_off();
                debug!(
                    "set '{}' intensity to {}",
                    self.group_name,
                    intensity.value()
                );
                Ok(())
            }
            Ok(status) => {
                warn!(
                    "request to set '{}' intensity to {} answered: {status}",
                    self.group_name,
                    intensity.value()
                );
                Ok(())
            }
            Err(err @ Error::Status { .. }) => {
                warn!(
                    "request to set '{}' intensity to {} answered: {err}",
                    self.group_name,
                    intensity.value()
                );
                Ok(())
            }
            Err(err) if err.is_connection_reset() => {
                debug!("ignoring connection reset while setting '{}': {err}", self.group_name);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Re-read this group's state from the controller's group list.
    ///
    /// Connection resets and a temporarily empty (best-effort) list leave
    /// the last-known state in place.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.controller.group_list_get().await {
            Ok(groups) => {
                match groups
                    .iter()
                    .find(|entry| entry.number == self.config.group_number)
                {
                    Some(entry) => {
                        self.group_name = entry.name.clone();
                        self.brightness = entry.intensity;
                        self.power = entry.is_on();
                    }
                    None if groups.is_empty() => {
                        // Best-effort cache answer before the first fetch landed.
                        debug!("empty group list for '{}'; keeping last-known state", self.group_name);
                    }
                    None => {
                        warn!(
                            "could not match group {} on controller {}",
                            self.config.group_number,
                            self.controller.host()
                        );
                    }
                }
                Ok(())
            }
            Err(err) if err.is_connection_reset() => {
                debug!(
                    "ignoring connection reset during refresh of '{}': {err}",
                    self.group_name
                );
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

/// One stored theme exposed to the hub as an on/off switch.
pub struct ThemeAccessory {
    name: String,
    index: u8,
    controller: Arc<Controller>,
    on: bool,
}

impl ThemeAccessory {
    pub fn new(name: &str, index: u8, controller: Arc<Controller>) -> Self {
        ThemeAccessory {
            name: name.to_string(),
            index,
            controller,
            on: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// Last-known on/off state without touching the network.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Whether the theme is active, per the device.
    pub async fn get_on(&mut self) -> Result<bool> {
        match self.controller.theme_list_get().await {
            Ok(themes) => {
                if let Some(entry) = themes.iter().find(|entry| entry.index == self.index) {
                    self.on = entry.on;
                }
                Ok(self.on)
            }
            Err(err) if err.is_connection_reset() => {
                debug!("ignoring connection reset during theme refresh: {err}");
                Ok(self.on)
            }
            Err(err) => Err(err),
        }
    }

    /// Activate or deactivate the theme.
    pub async fn set_on(&mut self, on: bool) -> Result<()> {
        let result = self.controller.illuminate_theme(self.index, on).await;
        match result {
            Ok(status) if status.is_ok() => {
                self.on = on;
                Ok(())
            }
            Ok(status) => {
                warn!("request to toggle theme '{}' answered: {status}", self.name);
                Ok(())
            }
            Err(err @ Error::Status { .. }) => {
                warn!("request to toggle theme '{}' answered: {err}", self.name);
                Ok(())
            }
            Err(err) if err.is_connection_reset() => {
                debug!("ignoring connection reset while toggling '{}': {err}", self.name);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerKind;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;
    use std::net::Ipv4Addr;

    fn accessory(server: &ServerGuard, group_number: u8) -> GroupAccessory {
        let config =
            AccessoryConfig::new("Test Lights", group_number, Ipv4Addr::new(127, 0, 0, 1));
        let controller = Arc::new(Controller::with_host(
            &server.host_with_port(),
            ControllerKind::Zdtwo,
        ));
        GroupAccessory::new(config, controller)
    }

    fn group_list_body() -> String {
        json!({
            "Status": 0,
            "GroupList": [
                {"Name": "Front Path", "Grp": 1, "Inten": 35, "Colr": 4},
                {"Name": "Deck", "Grp": 2, "Inten": 0, "Colr": 5},
            ],
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_connect_adopts_device_state() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/GroupListGet.json")
            .with_body(group_list_body())
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        accessory.connect().await.unwrap();

        assert_eq!(accessory.group_name(), "Front Path");
        assert_eq!(accessory.brightness().value(), 35);
        assert!(accessory.is_on());
    }

    #[tokio::test]
    async fn test_connect_with_unknown_group_is_fatal() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/GroupListGet.json")
            .with_body(group_list_body())
            .create_async()
            .await;

        let mut accessory = accessory(&server, 9);
        let err = accessory.connect().await.unwrap_err();
        assert!(matches!(err, Error::GroupNotFound { group: 9, .. }));
    }

    #[tokio::test]
    async fn test_set_brightness_zero_turns_power_off() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/IlluminateGroup.json")
            .match_body(Matcher::Json(json!({"GroupNumber": 1, "Intensity": 0})))
            .with_body(r#"{"Status": 0}"#)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        accessory
            .set_brightness(Intensity::create(0).unwrap())
            .await
            .unwrap();
        assert!(!accessory.is_on());
    }

    #[tokio::test]
    async fn test_set_brightness_nonzero_turns_power_on() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/IlluminateGroup.json")
            .with_body(r#"{"Status": 0}"#)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        accessory
            .set_brightness(Intensity::create(80).unwrap())
            .await
            .unwrap();
        assert!(accessory.is_on());
        assert_eq!(accessory.brightness().value(), 80);
    }

    #[tokio::test]
    async fn test_set_power_maps_to_fifty_or_zero() {
        let mut server = Server::new_async().await;
        let on = server
            .mock("POST", "/IlluminateGroup.json")
            .match_body(Matcher::Json(json!({"GroupNumber": 2, "Intensity": 50})))
            .with_body(r#"{"Status": 0}"#)
            .expect(1)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 2);
        accessory.set_power(true).await.unwrap();
        assert!(accessory.is_on());
        assert_eq!(accessory.brightness().value(), 50);
        on.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_ok_status_keeps_last_known_state() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/IlluminateGroup.json")
            .with_body(r#"{"Status": 242}"#)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        accessory
            .set_brightness(Intensity::create(60).unwrap())
            .await
            .unwrap();
        assert!(!accessory.is_on());
        assert_eq!(accessory.brightness().value(), 0);
    }

    #[tokio::test]
    async fn test_unknown_status_code_keeps_last_known_state() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/IlluminateGroup.json")
            .with_body(r#"{"Status": 999}"#)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        accessory
            .set_brightness(Intensity::create(60).unwrap())
            .await
            .unwrap();
        assert!(!accessory.is_on());
        assert_eq!(accessory.brightness().value(), 0);
    }

    #[tokio::test]
    async fn test_connection_reset_is_swallowed() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                // Closing with linger zero makes the kernel send an RST,
                // the way Luxor firmware drops connections under load.
                stream.set_linger(Some(std::time::Duration::ZERO)).unwrap();
                drop(stream);
            }
        });

        let config = AccessoryConfig::new("Test Lights", 1, Ipv4Addr::new(127, 0, 0, 1));
        let controller = Arc::new(Controller::with_host(
            &addr.to_string(),
            ControllerKind::Zdtwo,
        ));
        let mut accessory = GroupAccessory::new(config, controller);

        // Reads answer from last-known state instead of failing.
        assert!(!accessory.get_power().await.unwrap());

        // Writes report success too, without advancing state.
        accessory.set_power(true).await.unwrap();
        assert!(!accessory.is_on());
    }

    #[tokio::test]
    async fn test_get_brightness_reads_from_group_list() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/GroupListGet.json")
            .with_body(group_list_body())
            .expect(1)
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        let brightness = accessory.get_brightness().await.unwrap();
        assert_eq!(brightness.value(), 35);
        assert!(accessory.get_power().await.unwrap());
    }

    #[tokio::test]
    async fn test_non_reset_transport_error_propagates() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/GroupListGet.json")
            .with_body("not json at all")
            .create_async()
            .await;

        let mut accessory = accessory(&server, 1);
        let err = accessory.get_power().await.unwrap_err();
        assert!(matches!(err, Error::JsonLoad { .. }));
    }

    #[tokio::test]
    async fn test_theme_accessory_toggle_and_refresh() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/IlluminateTheme.json")
            .match_body(Matcher::Json(json!({"ThemeIndex": 3, "OnOff": 1})))
            .with_body(r#"{"Status": 0}"#)
            .create_async()
            .await;
        let _mock = server
            .mock("POST", "/ThemeListGet.json")
            .with_body(
                json!({
                    "Status": 0,
                    "ThemeList": [{"Name": "Evening", "ThemeIndex": 3, "OnOff": 1}],
                })
                .to_string(),
            )
            .create_async()
            .await;

        let controller = Arc::new(Controller::with_host(
            &server.host_with_port(),
            ControllerKind::Zdc,
        ));
        let mut theme = ThemeAccessory::new("Evening", 3, controller);

        theme.set_on(true).await.unwrap();
        assert!(theme.is_on());
        assert!(theme.get_on().await.unwrap());
    }
}
