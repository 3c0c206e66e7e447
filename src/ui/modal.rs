//! Project detail modal.
//!
//! A centred glass panel with the project's header, meta line and detail
//! sections.  It scrolls on its own (the page behind it is paused) and shows
//! a reading-progress bar along its right edge.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, StatefulWidget, Widget},
};

use crate::app::state::ProjectModal;
use crate::core::portfolio::Project;

use super::popup::centered_fixed;
use super::theme::Theme;

pub struct ProjectDetail<'a> {
    pub project: &'a Project,
}

impl ProjectDetail<'_> {
    /// Wrapped body lines for a text column `width` cells wide.
    fn content_lines(&self, width: u16) -> Vec<Line<'static>> {
        let width = usize::from(width.max(8));
        let p = self.project;
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(p.category.to_uppercase(), Theme::accent(1.0))));
        lines.push(Line::from(Span::styled(p.title.clone(), Theme::headline_style(1.0))));

        let mut meta = Vec::new();
        if let Some(year) = p.year {
            meta.push(year.to_string());
        }
        if let Some(role) = &p.role {
            meta.push(role.clone());
        }
        if !meta.is_empty() {
            lines.push(Line::from(Span::styled(meta.join("  ·  "), Theme::muted(0.8))));
        }
        lines.push(Line::raw(""));

        for row in textwrap::wrap(&p.summary, width) {
            lines.push(Line::from(Span::styled(row.into_owned(), Theme::text(1.0, 0.0))));
        }

        for section in &p.sections {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                section.heading.to_uppercase(),
                Theme::muted(0.6),
            )));
            for row in textwrap::wrap(&section.body, width) {
                lines.push(Line::from(Span::styled(row.into_owned(), Theme::text(0.9, 0.0))));
            }
        }
        lines
    }
}

/// Vertical reading-progress bar in column `x`.
fn render_progress(x: u16, area: Rect, fraction: f64, buf: &mut Buffer) {
    let filled = (f64::from(area.height) * fraction.clamp(0.0, 1.0)).round() as u16;
    for row in 0..area.height {
        let (symbol, style) = if row < filled {
            ("┃", Theme::accent(1.0))
        } else {
            ("│", Theme::glass_border(1.0))
        };
        if let Some(cell) = buf.cell_mut(Position::new(x, area.y + row)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

impl StatefulWidget for ProjectDetail<'_> {
    type State = ProjectModal;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = (area.width * 4 / 5).clamp(20, 90);
        let height = area.height.saturating_sub(4).max(6);
        let popup = centered_fixed(width, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(format!(" Case study #{:02} ", self.project.id))
            .title_style(Theme::popup_title_style())
            .title_bottom(Line::from(" ↑↓ scroll · Esc close ").right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style())
            .style(Theme::page_style());
        let inner = block.inner(popup);
        block.render(popup, buf);
        if inner.width < 4 || inner.height == 0 {
            return;
        }

        // One column gap plus the progress bar on the right.
        let text_area = Rect::new(inner.x + 1, inner.y, inner.width - 3, inner.height);
        let lines = self.content_lines(text_area.width);
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let max_scroll = total.saturating_sub(text_area.height);
        state.scroll = state.scroll.min(max_scroll);

        Paragraph::new(lines)
            .scroll((state.scroll, 0))
            .render(text_area, buf);

        let fraction = if max_scroll == 0 {
            1.0
        } else {
            f64::from(state.scroll) / f64::from(max_scroll)
        };
        render_progress(inner.right() - 1, inner, fraction, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::portfolio::Portfolio;

    fn screen(buf: &Buffer) -> String {
        let mut out = String::new();
        for y in buf.area.top()..buf.area.bottom() {
            for x in buf.area.left()..buf.area.right() {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_header_meta_and_sections() {
        let portfolio = Portfolio::default();
        let project = &portfolio.projects[0];
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        let mut modal = ProjectModal { project: 0, scroll: 0 };
        ProjectDetail { project }.render(area, &mut buf, &mut modal);
        let text = screen(&buf);
        assert!(text.contains("HEALTH / WEARABLE"));
        assert!(text.contains("Lumina"));
        assert!(text.contains("2024  ·  Lead Product Designer"));
        assert!(text.contains("CHALLENGE"));
        assert!(text.contains("Case study #03"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let portfolio = Portfolio::default();
        let project = &portfolio.projects[0];
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        let mut modal = ProjectModal { project: 0, scroll: 500 };
        ProjectDetail { project }.render(area, &mut buf, &mut modal);
        assert!(modal.scroll > 0);
        assert!(modal.scroll < 500);

        let clamped = modal.scroll;
        modal.scroll = 500;
        ProjectDetail { project }.render(area, &mut buf, &mut modal);
        assert_eq!(modal.scroll, clamped);
    }

    #[test]
    fn short_content_does_not_scroll() {
        let portfolio = Portfolio::default();
        let project = &portfolio.projects[3];
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        let mut modal = ProjectModal { project: 3, scroll: 9 };
        ProjectDetail { project }.render(area, &mut buf, &mut modal);
        assert_eq!(modal.scroll, 0);
    }
}
