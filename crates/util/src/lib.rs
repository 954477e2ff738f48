//! Utility helpers shared by the argform crates.
//!
//! Small, dependency-light helpers: display-text cosmetics, base24 theme
//! palettes for the rendering backend, and a line-capped file reader used
//! by menu popups.

pub mod files;
pub mod text;
pub mod themes;

pub use files::read_file;
pub use text::{sentence_case, title_case};
pub use themes::{base24_theme, hex_to_rgb};
