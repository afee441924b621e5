//! Response envelopes for the controller's JSON replies.

use serde::Deserialize;

use crate::types::{ColorEntry, GroupEntry, ThemeEntry};

/// Reply of the command endpoints that carry nothing but a status.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct StatusResponse {
    #[serde(rename = "Status")]
    pub status: u16,
}

/// Reply of `/GroupListGet.json`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct GroupListResponse {
    #[serde(rename = "GroupList", default)]
    pub group_list: Vec<GroupEntry>,
}

/// Reply of `/ColorListGet.json`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ColorListResponse {
    #[serde(rename = "Status")]
    pub status: u16,
    #[serde(rename = "ColorList", default)]
    pub color_list: Vec<ColorEntry>,
}

/// Reply of `/ThemeListGet.json`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ThemeListResponse {
    #[serde(rename = "ThemeList", default)]
    pub theme_list: Vec<ThemeEntry>,
}

/// Reply of `/ControllerName.json`.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ControllerNameResponse {
    #[serde(rename = "Controller")]
    pub controller: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_list_defaults_empty() {
        let resp: GroupListResponse = serde_json::from_str(r#"{"Status": 0}"#).unwrap();
        assert!(resp.group_list.is_empty());
    }

    #[test]
    fn test_controller_name() {
        let resp: ControllerNameResponse =
            serde_json::from_str(r#"{"Controller": "lxtwo01", "Status": 0}"#).unwrap();
        assert_eq!(resp.controller, "lxtwo01");
    }
}
