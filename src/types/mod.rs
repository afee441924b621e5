//! Domain types for Luxor controllers.

mod color;
mod color_code;
mod group;
mod intensity;
mod theme;

pub use color::ColorEntry;
pub use color_code::{ColorCode, ColorCodeKind};
pub use group::GroupEntry;
pub use intensity::Intensity;
pub use theme::ThemeEntry;
