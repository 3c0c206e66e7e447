//! Colour palette and text styles used across the UI.
//!
//! The page is dark with a single green accent.  Scroll-bound opacity is
//! emulated by blending a colour toward the page background.

use ratatui::style::{Color, Modifier, Style};

type Rgb = (u8, u8, u8);

const BACKGROUND: Rgb = (10, 10, 10);
const TEXT: Rgb = (236, 236, 232);
const MUTED: Rgb = (140, 140, 136);
const ACCENT: Rgb = (126, 224, 164);
const GLASS_EDGE: Rgb = (70, 72, 76);

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Blend `rgb` toward the background; `opacity` 1 is the full colour.
    pub fn fade(rgb: Rgb, opacity: f64) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f64::from(bg) + (f64::from(fg) - f64::from(bg)) * t).round() as u8;
        Color::Rgb(
            mix(rgb.0, BACKGROUND.0),
            mix(rgb.1, BACKGROUND.1),
            mix(rgb.2, BACKGROUND.2),
        )
    }

    /// Text style at `opacity`, dimmed further while `blur` is noticeable.
    pub fn text(opacity: f64, blur: f64) -> Style {
        let style = Style::default().fg(Self::fade(TEXT, opacity));
        if blur >= 4.0 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub fn muted(opacity: f64) -> Style {
        Style::default().fg(Self::fade(MUTED, opacity))
    }

    pub fn accent(opacity: f64) -> Style {
        Style::default().fg(Self::fade(ACCENT, opacity))
    }

    pub fn glass_border(opacity: f64) -> Style {
        Style::default().fg(Self::fade(GLASS_EDGE, opacity))
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default()
            .bg(Color::Rgb(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2))
            .fg(Color::Rgb(TEXT.0, TEXT.1, TEXT.2))
    }

    pub fn headline_style(opacity: f64) -> Style {
        Self::text(opacity, 0.0).add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style() -> Style {
        Style::default().bg(Color::Rgb(28, 28, 30)).fg(Self::fade(TEXT, 0.7))
    }

    pub fn nav_title_style() -> Style {
        Style::default()
            .bg(Color::Rgb(28, 28, 30))
            .fg(Color::Rgb(TEXT.0, TEXT.1, TEXT.2))
            .add_modifier(Modifier::BOLD)
    }

    pub fn dot_style(active: bool) -> Style {
        if active {
            Self::accent(1.0).add_modifier(Modifier::BOLD)
        } else {
            Self::muted(0.8)
        }
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Rgb(ACCENT.0, ACCENT.1, ACCENT.2))
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_blends_toward_background() {
        assert_eq!(Theme::fade(TEXT, 1.0), Color::Rgb(236, 236, 232));
        assert_eq!(Theme::fade(TEXT, 0.0), Color::Rgb(10, 10, 10));
        assert_eq!(Theme::fade((110, 110, 110), 0.5), Color::Rgb(60, 60, 60));
    }

    #[test]
    fn heavy_blur_dims_text() {
        assert!(Theme::text(1.0, 14.0).add_modifier.contains(Modifier::DIM));
        assert!(!Theme::text(1.0, 0.0).add_modifier.contains(Modifier::DIM));
    }
}
