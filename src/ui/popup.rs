//! Overlay widgets: the key binding help popup and the scroll debug HUD.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};
use crate::core::controller::{ScrollState, SnapMode};

use super::theme::Theme;

// ───────────────────────────────────────── help popup ────────

/// Lists every action with its current bindings.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
    pub snap_enabled: bool,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + blank + snap line + blank + hint + 2 border
        let height = (Action::ALL.len() as u16) + 6;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(Theme::popup_title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        for &action in Action::ALL {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", action.label()), Style::default().fg(Color::White)),
                Span::styled(
                    self.config.display_bindings(action),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        lines.push(Line::raw(""));
        let (state, style) = if self.snap_enabled {
            ("[ON]", Style::default().fg(Color::Green))
        } else {
            ("[OFF]", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(vec![
            Span::styled("  Section snapping    ", Style::default().fg(Color::White)),
            Span::styled(state, style),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── scroll HUD ────────

/// Small top-left overlay with the live scroll state.
pub struct ScrollHud {
    pub state: ScrollState,
    pub anchors: usize,
    /// Page scrolling frozen by an overlay.
    pub paused: bool,
}

impl ScrollHud {
    fn mode_label(mode: SnapMode) -> String {
        match mode {
            SnapMode::Idle => "idle".to_string(),
            SnapMode::Correcting { target } => format!("correcting → {target}"),
        }
    }
}

impl Widget for ScrollHud {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Rect::new(area.x + 1, area.y, 30.min(area.width), 8.min(area.height));
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" scroll ")
            .title_style(Theme::popup_title_style())
            .borders(Borders::ALL)
            .border_style(Theme::popup_border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let row = |k: &'static str, v: String| {
            Line::from(vec![Span::styled(format!("{k:<10}"), key), Span::styled(v, value)])
        };
        let s = &self.state;
        Paragraph::new(vec![
            row(
                "offset",
                format!("{:.0}px ({:+.0})", s.current_offset, s.current_offset - s.last_offset),
            ),
            row("direction", s.direction.label().to_string()),
            row("anchor", format!("{} / {}", s.current_anchor_index + 1, self.anchors)),
            row("mode", Self::mode_label(s.mode)),
            row("program", s.is_programmatic_scroll().to_string()),
            row("page", if self.paused { "paused" } else { "live" }.to_string()),
        ])
        .render(inner, buf);
    }
}

/// Centre a fixed-size rect inside `area`, clamping to available space.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
