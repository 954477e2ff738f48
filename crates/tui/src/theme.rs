//! Styling for the terminal form, derived from a base24 palette.
//!
//! The active theme is explicit per render session: built from the build
//! spec's hints at the start of `run` and threaded through the draw calls,
//! so multiple sessions never interfere through process-wide state.

use argform_util::hex_to_rgb;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colors for one render session.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub fg: Color,
    pub fg_muted: Color,
    pub border: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub warn: Color,
    pub ok: Color,
}

fn color(palette: &[String], idx: usize) -> Color {
    let (r, g, b) = palette
        .get(idx)
        .map(|hex| hex_to_rgb(hex))
        .unwrap_or((0, 0, 0));
    Color::Rgb(r, g, b)
}

impl Theme {
    /// Builds a theme from a 24-entry base24 palette. Index conventions:
    /// 16 window background, 17 highlight background, 6 foreground,
    /// 2 borders, 13 accent, 8 warning, 11 success, 18 muted text.
    pub fn from_base24(palette: &[String]) -> Self {
        Theme {
            accent: color(palette, 13),
            fg: color(palette, 6),
            fg_muted: color(palette, 18),
            border: color(palette, 2),
            bg_panel: color(palette, 16),
            bg_highlight: color(palette, 17),
            warn: color(palette, 8),
            ok: color(palette, 11),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().bg(self.bg_highlight)
    }

    pub fn section_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn warn_style(&self) -> Style {
        Style::default().fg(self.warn)
    }

    pub fn ok_style(&self) -> Style {
        Style::default().fg(self.ok)
    }
}
