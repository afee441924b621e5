//! Request payloads for the controller's POST endpoints.
//!
//! Field names mirror the JSON keys the firmware expects, so these structs
//! serialize directly into request bodies.

use serde::Serialize;

use crate::types::{ColorCode, Intensity};

/// Body of `/IlluminateGroup.json`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub(crate) struct IlluminateGroupPayload {
    #[serde(rename = "GroupNumber")]
    pub group_number: u8,
    #[serde(rename = "Intensity")]
    pub intensity: Intensity,
}

/// Body of `/ColorListSet.json`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub(crate) struct ColorListSetPayload {
    #[serde(rename = "C")]
    pub color: ColorCode,
    #[serde(rename = "Hue")]
    pub hue: u16,
    #[serde(rename = "Sat")]
    pub saturation: u8,
}

/// Body of `/GroupListEdit.json`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub(crate) struct GroupListEditPayload {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "GroupNumber")]
    pub group_number: u8,
    #[serde(rename = "Color")]
    pub color: ColorCode,
}

/// Body of `/IlluminateTheme.json`. `OnOff` is 0/1 on the wire.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub(crate) struct IlluminateThemePayload {
    #[serde(rename = "ThemeIndex")]
    pub theme_index: u8,
    #[serde(rename = "OnOff")]
    pub on_off: u8,
}

impl IlluminateThemePayload {
    pub fn new(theme_index: u8, on: bool) -> Self {
        IlluminateThemePayload {
            theme_index,
            on_off: u8::from(on),
        }
    }
}
