//! Controller client for the Luxor HTTP API.

use std::net::Ipv4Addr;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::cache::{CachePolicy, ListCache};
use crate::errors::Error;
use crate::payload::{
    ColorListSetPayload, GroupListEditPayload, IlluminateGroupPayload, IlluminateThemePayload,
};
use crate::response::{
    ColorListResponse, ControllerNameResponse, GroupListResponse, StatusResponse,
    ThemeListResponse,
};
use crate::status::DeviceStatus;
use crate::types::{ColorCode, ColorEntry, GroupEntry, Intensity, ThemeEntry};

type Result<T> = std::result::Result<T, Error>;

/// The controller model family behind an IP address.
///
/// The two families speak the same protocol; they differ in how many themes
/// they store and in the abbreviated group list keys newer ZDTWO firmware
/// emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerKind {
    Zdc,
    Zdtwo,
}

impl ControllerKind {
    /// Highest theme index the controller stores (0-based).
    pub fn max_theme_index(&self) -> u8 {
        match self {
            ControllerKind::Zdc => 25,
            ControllerKind::Zdtwo => 39,
        }
    }

    /// Detect the kind from the name reported by `/ControllerName.json`.
    ///
    /// Controllers ship with names like `lxzdc01` or `lxtwo02`; plain
    /// `luxor` prefixes come from first-generation ZD firmware.
    ///
    /// # Examples
    ///
    /// ```
    /// use luxor_lights_rs::ControllerKind;
    ///
    /// assert_eq!(ControllerKind::from_controller_name("LXTWO03"), Some(ControllerKind::Zdtwo));
    /// assert_eq!(ControllerKind::from_controller_name("lxzdc01"), Some(ControllerKind::Zdc));
    /// assert_eq!(ControllerKind::from_controller_name("toaster"), None);
    /// ```
    pub fn from_controller_name(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name.starts_with("lxtwo") {
            Some(ControllerKind::Zdtwo)
        } else if name.starts_with("lxzdc") || name.starts_with("luxor") {
            Some(ControllerKind::Zdc)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerKind::Zdc => write!(f, "ZDC"),
            ControllerKind::Zdtwo => write!(f, "ZDTWO"),
        }
    }
}

/// A client for one Luxor ZDC/ZDTWO controller.
///
/// Every operation issues a single HTTP POST to a fixed path on the device
/// and decodes the numeric `Status` field of the JSON reply through
/// [`DeviceStatus`]. The three list endpoints are answered from a
/// per-controller cache (see [`CachePolicy`]); everything else hits the
/// device directly.
///
/// All failures surface as [`Error`] values. Callers that want the
/// traditional polling behavior of ignoring dropped connections can test
/// with [`Error::is_connection_reset`].
///
/// # Example
///
/// ```no_run
/// use std::net::Ipv4Addr;
/// use std::str::FromStr;
/// use luxor_lights_rs::{Controller, ControllerKind, Intensity};
///
/// async fn porch_lights_on() -> Result<(), luxor_lights_rs::Error> {
///     let controller = Controller::new(
///         Ipv4Addr::from_str("192.168.1.42").unwrap(),
///         ControllerKind::Zdtwo,
///     );
///     let status = controller
///         .illuminate_group(2, Intensity::create(80).unwrap())
///         .await?;
///     println!("controller said: {status}");
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Controller {
    host: String,
    kind: ControllerKind,
    client: reqwest::Client,
    groups: ListCache<Vec<GroupEntry>>,
    colors: ListCache<Vec<ColorEntry>>,
    themes: ListCache<Vec<ThemeEntry>>,
}

impl Controller {
    const ILLUMINATE_ALL: &'static str = "/IlluminateAll.json";
    const EXTINGUISH_ALL: &'static str = "/ExtinguishAll.json";
    const GROUP_LIST_GET: &'static str = "/GroupListGet.json";
    const GROUP_LIST_EDIT: &'static str = "/GroupListEdit.json";
    const ILLUMINATE_GROUP: &'static str = "/IlluminateGroup.json";
    const COLOR_LIST_GET: &'static str = "/ColorListGet.json";
    const COLOR_LIST_SET: &'static str = "/ColorListSet.json";
    const THEME_LIST_GET: &'static str = "/ThemeListGet.json";
    const ILLUMINATE_THEME: &'static str = "/IlluminateTheme.json";
    const CONTROLLER_NAME: &'static str = "/ControllerName.json";

    /// Create a client for a controller listening on port 80.
    pub fn new(ip: Ipv4Addr, kind: ControllerKind) -> Self {
        Self::with_host(&ip.to_string(), kind)
    }

    /// Create a client for a `host` or `host:port` authority.
    pub fn with_host(host: &str, kind: ControllerKind) -> Self {
        Self::with_policy(host, kind, CachePolicy::default())
    }

    /// Create a client with an explicit list-cache policy.
    pub fn with_policy(host: &str, kind: ControllerKind, policy: CachePolicy) -> Self {
        Controller {
            host: host.to_string(),
            kind,
            client: reqwest::Client::new(),
            groups: ListCache::new(policy),
            colors: ListCache::new(policy),
            themes: ListCache::new(policy),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    /// Query the name the controller reports for itself.
    pub async fn controller_name(&self) -> Result<String> {
        let resp: ControllerNameResponse = self.post(Self::CONTROLLER_NAME).await?;
        Ok(resp.controller)
    }

    /// Turn on all lights.
    pub async fn illuminate_all(&self) -> Result<DeviceStatus> {
        debug!("turning on all lights at {}", self.host);
        let resp: StatusResponse = self.post(Self::ILLUMINATE_ALL).await?;
        decode_status(Self::ILLUMINATE_ALL, resp.status)
    }

    /// Turn off all lights.
    pub async fn extinguish_all(&self) -> Result<DeviceStatus> {
        debug!("turning off all lights at {}", self.host);
        let resp: StatusResponse = self.post(Self::EXTINGUISH_ALL).await?;
        decode_status(Self::EXTINGUISH_ALL, resp.status)
    }

    /// Set one group to the given intensity.
    ///
    /// The group number is passed through untouched; the controller rejects
    /// out-of-range values itself with a non-Ok status, which is returned
    /// here as a value for the caller to inspect.
    pub async fn illuminate_group(
        &self,
        group_number: u8,
        intensity: Intensity,
    ) -> Result<DeviceStatus> {
        debug!(
            "setting group {group_number} at {} to intensity {}",
            self.host,
            intensity.value()
        );
        let payload = IlluminateGroupPayload {
            group_number,
            intensity,
        };
        let resp: StatusResponse = self.post_json(Self::ILLUMINATE_GROUP, &payload).await?;
        decode_status(Self::ILLUMINATE_GROUP, resp.status)
    }

    /// Toggle one stored theme on or off.
    ///
    /// Like [`illuminate_group`](Self::illuminate_group), the index is not
    /// validated locally.
    pub async fn illuminate_theme(&self, theme_index: u8, on: bool) -> Result<DeviceStatus> {
        debug!(
            "turning theme {theme_index} at {} {}",
            self.host,
            if on { "on" } else { "off" }
        );
        let payload = IlluminateThemePayload::new(theme_index, on);
        let resp: StatusResponse = self.post_json(Self::ILLUMINATE_THEME, &payload).await?;
        decode_status(Self::ILLUMINATE_THEME, resp.status)
    }

    /// Get the list of light groups, answered from the cache when fresh.
    pub async fn group_list_get(&self) -> Result<Vec<GroupEntry>> {
        debug!("retrieving light groups from {}", self.host);
        self.groups.get_or_fetch(|| self.fetch_group_list()).await
    }

    /// Rename a group and assign it a color.
    ///
    /// A non-Ok status is an [`Error::Status`].
    pub async fn group_list_edit(
        &self,
        name: &str,
        group_number: u8,
        color: ColorCode,
    ) -> Result<()> {
        let payload = GroupListEditPayload {
            name: name.to_string(),
            group_number,
            color,
        };
        let resp: StatusResponse = self.post_json(Self::GROUP_LIST_EDIT, &payload).await?;
        expect_ok(Self::GROUP_LIST_EDIT, resp.status)
    }

    /// Look up one fixed color, creating it on the controller if absent.
    ///
    /// When the requested code is not in the controller's color list, the
    /// slot is written with hue 360 / saturation 100 via
    /// [`color_list_set`](Self::color_list_set) and that synthesized entry is
    /// returned. The underlying list fetch goes through the cache.
    pub async fn color_list_get(&self, code: ColorCode) -> Result<ColorEntry> {
        let list = self.colors.get_or_fetch(|| self.fetch_color_list()).await?;
        if let Some(entry) = list.into_iter().find(|entry| entry.code == code) {
            return Ok(entry);
        }

        debug!("color {code} missing at {}; creating it", self.host);
        self.color_list_set(code, ColorEntry::DEFAULT_HUE, ColorEntry::DEFAULT_SATURATION)
            .await?;
        Ok(ColorEntry::fallback(code))
    }

    /// Write one fixed color slot.
    ///
    /// A non-Ok status is an [`Error::Status`].
    pub async fn color_list_set(&self, code: ColorCode, hue: u16, saturation: u8) -> Result<()> {
        let payload = ColorListSetPayload {
            color: code,
            hue,
            saturation,
        };
        let resp: StatusResponse = self.post_json(Self::COLOR_LIST_SET, &payload).await?;
        expect_ok(Self::COLOR_LIST_SET, resp.status)
    }

    /// Get the list of stored themes, answered from the cache when fresh.
    pub async fn theme_list_get(&self) -> Result<Vec<ThemeEntry>> {
        debug!("retrieving themes from {}", self.host);
        self.themes.get_or_fetch(|| self.fetch_theme_list()).await
    }

    async fn fetch_group_list(&self) -> Result<Vec<GroupEntry>> {
        let resp: GroupListResponse = self.post(Self::GROUP_LIST_GET).await?;
        for entry in &resp.group_list {
            if !entry.color.is_fixed() {
                warn!(
                    "group {} reports color {}: 251-260 are color wheels and 65535 means \
                     the group is under DMX control; pick a color 0-250 to control it here",
                    entry.number, entry.color
                );
            }
        }
        Ok(resp.group_list)
    }

    async fn fetch_color_list(&self) -> Result<Vec<ColorEntry>> {
        let resp: ColorListResponse = self.post(Self::COLOR_LIST_GET).await?;
        expect_ok(Self::COLOR_LIST_GET, resp.status)?;
        Ok(resp.color_list)
    }

    async fn fetch_theme_list(&self) -> Result<Vec<ThemeEntry>> {
        let resp: ThemeListResponse = self.post(Self::THEME_LIST_GET).await?;
        Ok(resp.theme_list)
    }

    async fn post<R: DeserializeOwned>(&self, path: &'static str) -> Result<R> {
        let request = self.client.post(self.url(path));
        self.send(path, request).await
    }

    async fn post_json<R: DeserializeOwned>(
        &self,
        path: &'static str,
        payload: &impl Serialize,
    ) -> Result<R> {
        let request = self.client.post(self.url(path)).json(payload);
        self.send(path, request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        path: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<R> {
        let response = request
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|err| Error::http(path, err))?;

        // Some firmware revisions label the body text/plain, so read it as
        // text and parse it ourselves.
        let body = response
            .text()
            .await
            .map_err(|err| Error::http(path, err))?;
        serde_json::from_str(&body).map_err(|err| Error::json_load(path, err))
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.host, path)
    }
}

fn decode_status(path: &'static str, code: u16) -> Result<DeviceStatus> {
    DeviceStatus::create(code).ok_or_else(|| Error::status(path, code))
}

fn expect_ok(path: &'static str, code: u16) -> Result<()> {
    match DeviceStatus::create(code) {
        Some(status) if status.is_ok() => Ok(()),
        _ => Err(Error::status(path, code)),
    }
}
