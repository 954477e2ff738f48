//! Base24 theme palettes for rendering backends.
//!
//! A base24 scheme is 24 hex colors: the base16 shades plus eight extra
//! accents. The backend indexes into the list by convention (16 = window
//! background, 17 = input background, 6 = foreground, 13/14 = accents).

/// Built-in dark scheme (one-dark flavoured).
pub const DARK: [&str; 24] = [
    "#282c34", "#3f4451", "#4f5666", "#545862", "#9196a1", "#abb2bf",
    "#e6e6e6", "#ffffff", "#e06c75", "#d19a66", "#e5c07b", "#98c379",
    "#56b6c2", "#61afef", "#c678dd", "#be5046", "#21252b", "#181a1f",
    "#5c6370", "#828997", "#7f848e", "#a8afbc", "#ced2da", "#f0f0f0",
];

/// Built-in light scheme.
pub const LIGHT: [&str; 24] = [
    "#fafafa", "#eaeaeb", "#dbdbdc", "#a0a1a7", "#696c77", "#383a42",
    "#202227", "#090a0b", "#ca1243", "#c18401", "#b68300", "#50a14f",
    "#0184bc", "#4078f2", "#a626a4", "#986801", "#ffffff", "#f0f0f1",
    "#bebec2", "#8c8d92", "#55565c", "#35363b", "#2c2d31", "#131418",
];

/// Resolves the active palette: a caller-supplied 24-entry scheme wins,
/// otherwise the built-in dark or light default is used.
pub fn base24_theme(custom: Option<&[String]>, dark: bool) -> Vec<String> {
    if let Some(theme) = custom {
        if theme.len() == 24 {
            return theme.to_vec();
        }
    }
    let builtin = if dark { DARK } else { LIGHT };
    builtin.iter().map(|s| s.to_string()).collect()
}

/// Parses a `#rrggbb` hex code into an RGB triple. Returns black for
/// malformed input so a broken custom theme degrades instead of panicking.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    // Byte-offset slicing below requires ASCII; a multibyte entry is
    // malformed like any other bad code.
    if hex.len() != 6 || !hex.is_ascii() {
        return (0, 0, 0);
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(0);
    (channel(0..2), channel(2..4), channel(4..6))
}
