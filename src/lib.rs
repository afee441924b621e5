//! # luxor_lights_rs
//!
//! An async Rust library for controlling Luxor ZDC/ZDTWO landscape lighting
//! controllers over their JSON-over-HTTP API.
//!
//! This crate wraps the controller's POST endpoints (illuminate/extinguish,
//! group and theme control, color list editing) and exposes each configured
//! light group to a home-automation hub as a dimmable bulb accessory.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::net::Ipv4Addr;
//! use std::str::FromStr;
//! use luxor_lights_rs::{Controller, ControllerKind, Intensity};
//!
//! async fn evening() -> Result<(), Box<dyn std::error::Error>> {
//!     let controller = Controller::new(
//!         Ipv4Addr::from_str("192.168.1.42")?,
//!         ControllerKind::Zdtwo,
//!     );
//!
//!     // Bring the front path up to 80%.
//!     controller.illuminate_group(2, Intensity::create(80).unwrap()).await?;
//!
//!     // Or activate a stored theme.
//!     controller.illuminate_theme(3, true).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Group Control**: Set any group's intensity (0-100%) with
//!   [`Controller::illuminate_group`], or hit everything at once with
//!   [`Controller::illuminate_all`] / [`Controller::extinguish_all`]
//! - **Themes**: Toggle controller-stored preset scenes by index
//! - **Color Lists**: Read and write fixed colors (hue/saturation), with
//!   create-on-miss lookup via [`Controller::color_list_get`]
//! - **Status Decoding**: Every controller reply decoded through the closed
//!   [`DeviceStatus`] code table
//! - **Polling-friendly Caching**: The three list endpoints are cached per
//!   controller for 5 seconds ([`CachePolicy`]) so a hub polling many
//!   accessories issues at most one fetch per window
//! - **Accessories**: [`GroupAccessory`] / [`ThemeAccessory`] adapters
//!   exposing On/Brightness semantics, managed by a [`Platform`] registry
//!
//! ## Communication
//!
//! Controllers listen on port 80 and speak plain HTTP with JSON bodies; no
//! authentication or TLS. Every operation is one POST to a fixed path like
//! `/IlluminateGroup.json`, answered with a numeric `Status` field. The
//! firmware drops connections freely under load. Transport errors surface
//! as [`Error`] values and [`Error::is_connection_reset`] identifies the
//! benign case, which the accessory layer logs and ignores.

mod accessory;
mod cache;
mod config;
mod controller;
mod errors;
mod payload;
mod platform;
mod response;
mod status;
mod types;

// Re-export public API
pub use accessory::{GroupAccessory, ThemeAccessory};
pub use cache::CachePolicy;
pub use config::AccessoryConfig;
pub use controller::{Controller, ControllerKind};
pub use errors::Error;
pub use platform::Platform;
pub use status::DeviceStatus;
pub use types::{ColorCode, ColorCodeKind, ColorEntry, GroupEntry, Intensity, ThemeEntry};
