//! Drawing of individual page sections.
//!
//! Each function paints one full section into a buffer whose area is exactly
//! that section's size; the stack widget then copies the visible rows onto
//! the screen.  Scroll-bound values arrive as a [`SectionVisual`].

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::bindings::{CardFrame, SectionVisual};
use crate::core::portfolio::{Portfolio, Project};

use super::theme::Theme;

/// Inputs shared by every section painter.
pub struct SectionContext<'a> {
    pub portfolio: &'a Portfolio,
    pub px_per_row: f64,
    pub year: i32,
}

impl SectionContext<'_> {
    /// Vertical document-pixel shift expressed in whole rows.
    fn rows(&self, px: f64) -> u16 {
        (px / self.px_per_row).round().clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

/// Rect of `height` rows vertically centred in `area`.
fn centred_rows(area: Rect, height: u16) -> Rect {
    let h = height.min(area.height);
    Rect::new(area.x, area.y + (area.height - h) / 2, area.width, h)
}

/// Shift `rect` down by `rows`, clipped to `bounds`.
fn shifted(rect: Rect, rows: u16, bounds: Rect) -> Rect {
    let moved = Rect::new(rect.x, rect.y.saturating_add(rows), rect.width, rect.height);
    moved.intersection(bounds)
}

fn horizontal_inset(area: Rect, cols: u16) -> Rect {
    let cols = cols.min(area.width / 2);
    Rect::new(area.x + cols, area.y, area.width - 2 * cols, area.height)
}

// ───────────────────────────────────────── hero ──────────────

pub fn render_hero(ctx: &SectionContext, area: Rect, buf: &mut Buffer) {
    let p = ctx.portfolio;
    let inner = horizontal_inset(area, area.width / 20);
    let body = centred_rows(inner, 5);

    let spaced_role: String = p.role.to_uppercase();
    let lines = vec![
        Line::from(Span::styled(spaced_role, Theme::muted(0.7))),
        Line::raw(""),
        Line::from(Span::styled(p.headline.clone(), Theme::headline_style(1.0))),
    ];
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(body, buf);

    if area.height > 2 {
        let hint = Rect::new(area.x, area.bottom() - 2, area.width, 1);
        Paragraph::new(Line::from(Span::styled("scroll ↓", Theme::muted(0.5))))
            .alignment(Alignment::Center)
            .render(hint, buf);
    }
}

// ───────────────────────────────────────── selected works ────

/// Letter spacing standing in for the heading's scale: none while small,
/// one space at rest, two at the overshoot peak.
fn letter_spacing(scale: f64) -> usize {
    (((scale - 0.82) / (1.08 - 0.82)) * 2.0).round().clamp(0.0, 2.0) as usize
}

fn spaced(text: &str, gap: usize) -> String {
    if gap == 0 {
        return text.to_string();
    }
    let sep = " ".repeat(gap);
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(&sep)
}

pub fn render_selected_works(ctx: &SectionContext, visual: &SectionVisual, area: Rect, buf: &mut Buffer) {
    let gap = letter_spacing(visual.scale);
    let heading = spaced("Selected Works", gap);
    let line = Line::from(vec![
        Span::styled(heading, Theme::headline_style(visual.opacity).patch(Theme::text(visual.opacity, visual.blur))),
        Span::raw("  "),
        Span::styled("●", Theme::accent(visual.opacity)),
    ]);

    let row = centred_rows(area, 1);
    let row = shifted(row, ctx.rows(visual.y_offset), area);
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(row, buf);
}

// ───────────────────────────────────────── project card ──────

fn glass_block(opacity: f64) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::glass_border(opacity))
}

/// Placeholder for the project image: a shaded panel that grows with
/// `image_scale` and sharpens as `image_blur` drops.
fn render_image(project: &Project, frame: &CardFrame, opacity: f64, area: Rect, buf: &mut Buffer) {
    let block = glass_block(opacity);
    let inner = block.inner(area);
    block.render(area, buf);

    let shrink = (1.0 - frame.image_scale).max(0.0) / 2.0;
    let dx = (f64::from(inner.width) * shrink).round() as u16;
    let dy = (f64::from(inner.height) * shrink).round() as u16;
    let panel = Rect::new(
        inner.x + dx.min(inner.width / 2),
        inner.y + dy.min(inner.height / 2),
        inner.width.saturating_sub(2 * dx),
        inner.height.saturating_sub(2 * dy),
    );

    let shade = match frame.image_blur {
        b if b > 8.0 => "░",
        b if b > 3.0 => "▒",
        _ => "▓",
    };
    let style = Theme::accent(opacity * 0.35);
    for y in panel.top()..panel.bottom() {
        for x in panel.left()..panel.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(shade).set_style(style);
            }
        }
    }

    let label = centred_rows(panel, 1);
    Paragraph::new(Line::from(Span::styled(
        format!(" {} ", project.category),
        Theme::text(opacity * frame.title_opacity, frame.image_blur),
    )))
    .alignment(Alignment::Center)
    .render(label, buf);
}

fn render_info(
    ctx: &SectionContext,
    project: &Project,
    number: usize,
    frame: &CardFrame,
    opacity: f64,
    area: Rect,
    buf: &mut Buffer,
) {
    let [head, info, small] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4), Constraint::Length(4)])
        .areas(area);

    let title_opacity = opacity * frame.title_opacity;
    Paragraph::new(vec![
        Line::from(Span::styled(format!("{number:02}"), Theme::accent(title_opacity))),
        Line::from(Span::styled(project.title.clone(), Theme::headline_style(title_opacity))),
        Line::from(Span::styled(project.category.clone(), Theme::muted(title_opacity))),
    ])
    .render(head, buf);

    let info_opacity = opacity * frame.info_opacity;
    if info_opacity > 0.02 {
        let card = shifted(info, ctx.rows(frame.info_y), info);
        let block = glass_block(info_opacity);
        let inner = block.inner(card);
        block.render(card, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(project.summary.clone(), Theme::text(info_opacity, 0.0))),
            Line::raw(""),
            Line::from(Span::styled("Enter ↵  case study", Theme::accent(info_opacity))),
        ])
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    }

    let small_opacity = opacity * frame.small_opacity;
    if small_opacity > 0.02 {
        let card = shifted(small, ctx.rows(frame.small_y), small);
        let block = glass_block(small_opacity);
        let inner = block.inner(card);
        block.render(card, buf);
        let year = project.year.map_or_else(|| "—".to_string(), |y| y.to_string());
        let role = project.role.clone().unwrap_or_else(|| "Exploration".into());
        Paragraph::new(Line::from(vec![
            Span::styled(year, Theme::accent(small_opacity)),
            Span::styled(format!("  {role}"), Theme::muted(small_opacity)),
        ]))
        .render(inner, buf);
    }
}

pub fn render_project(
    ctx: &SectionContext,
    index: usize,
    visual: &SectionVisual,
    area: Rect,
    buf: &mut Buffer,
) {
    let Some(project) = ctx.portfolio.project(index) else {
        return;
    };
    let frame = visual.card.unwrap_or(CardFrame {
        image_scale: 1.0,
        image_blur: 0.0,
        title_opacity: 1.0,
        info_opacity: 1.0,
        info_y: 0.0,
        small_opacity: 1.0,
        small_y: 0.0,
    });

    // 90% wide card, narrowed further by the wrapper scale.
    let margin = area.width / 20;
    let scale_inset = (f64::from(area.width) * (1.0 - visual.scale).max(0.0) / 2.0).round() as u16;
    let card_area = horizontal_inset(area, margin + scale_inset);
    let card_area = Rect::new(
        card_area.x,
        card_area.y + 1.min(card_area.height),
        card_area.width,
        card_area.height.saturating_sub(2),
    );

    let image_first = index % 2 == 0;
    let constraints = if image_first {
        [Constraint::Ratio(5, 7), Constraint::Ratio(2, 7)]
    } else {
        [Constraint::Ratio(2, 7), Constraint::Ratio(5, 7)]
    };
    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(2)
        .areas(card_area);
    let (image_area, info_area) = if image_first { (left, right) } else { (right, left) };

    render_image(project, &frame, visual.opacity, image_area, buf);
    render_info(ctx, project, index + 1, &frame, visual.opacity, info_area, buf);
}

// ───────────────────────────────────────── footer ────────────

pub fn render_footer(ctx: &SectionContext, area: Rect, buf: &mut Buffer) {
    let p = ctx.portfolio;
    let card = horizontal_inset(area, area.width / 10);
    let card = centred_rows(card, 12.min(area.height));
    let block = glass_block(1.0);
    let inner = block.inner(card);
    block.render(card, buf);

    let [top, bottom] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .areas(inner);
    let [about, social, contact] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16), Constraint::Length(24)])
        .areas(top);

    Paragraph::new(vec![
        Line::from(Span::styled(p.owner.clone(), Theme::headline_style(1.0))),
        Line::from(Span::styled(p.location.clone(), Theme::muted(0.6))),
    ])
    .wrap(Wrap { trim: true })
    .render(about, buf);

    let mut social_lines = vec![Line::from(Span::styled("SOCIAL", Theme::muted(0.5)))];
    social_lines.extend(
        p.socials
            .iter()
            .map(|s| Line::from(Span::styled(s.clone(), Theme::text(1.0, 0.0)))),
    );
    Paragraph::new(social_lines).render(social, buf);

    Paragraph::new(vec![
        Line::from(Span::styled("CONTACT", Theme::muted(0.5))),
        Line::from(Span::styled(p.email.clone(), Theme::text(1.0, 0.0))),
    ])
    .render(contact, buf);

    let [copyright, tag] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .areas(bottom);
    let owner = title_case(&p.owner);
    Paragraph::new(Line::from(Span::styled(
        format!("© {} {owner}. All Rights Reserved.", ctx.year),
        Theme::muted(0.5),
    )))
    .render(copyright, buf);
    Paragraph::new(Line::from(Span::styled("Liquid Logic Portfolio", Theme::muted(0.5))))
        .alignment(Alignment::Right)
        .render(tag, buf);
}

/// "AURIA ZHANG" → "Auria Zhang".
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn contains(buf: &Buffer, needle: &str) -> bool {
        (buf.area.top()..buf.area.bottom()).any(|y| row_text(buf, y).contains(needle))
    }

    fn ctx(portfolio: &Portfolio) -> SectionContext<'_> {
        SectionContext {
            portfolio,
            px_per_row: 16.0,
            year: 2026,
        }
    }

    #[test]
    fn heading_spacing_follows_scale() {
        assert_eq!(letter_spacing(0.82), 0);
        assert_eq!(letter_spacing(1.0), 1);
        assert_eq!(letter_spacing(1.08), 2);
        assert_eq!(spaced("ab", 1), "a b");
    }

    #[test]
    fn heading_drops_by_y_offset() {
        let p = Portfolio::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let visual = SectionVisual {
            opacity: 1.0,
            scale: 0.82,
            y_offset: 64.0,
            blur: 0.0,
            card: None,
        };
        render_selected_works(&ctx(&p), &visual, area, &mut buf);
        // Centred row 9/10, pushed 4 rows down.
        assert!(row_text(&buf, 13).contains("Selected Works"));
    }

    #[test]
    fn project_card_shows_title_and_summary() {
        let p = Portfolio::default();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        render_project(&ctx(&p), 1, &SectionVisual::default(), area, &mut buf);
        assert!(contains(&buf, "Prelo"));
        assert!(contains(&buf, "02"));
        assert!(contains(&buf, "case study"));
    }

    #[test]
    fn hidden_info_card_is_not_drawn() {
        let p = Portfolio::default();
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        let visual = SectionVisual {
            card: Some(CardFrame {
                image_scale: 0.8,
                image_blur: 12.0,
                title_opacity: 0.6,
                info_opacity: 0.0,
                info_y: 100.0,
                small_opacity: 0.0,
                small_y: 100.0,
            }),
            ..SectionVisual::default()
        };
        render_project(&ctx(&p), 0, &visual, area, &mut buf);
        assert!(contains(&buf, "Lumina"));
        assert!(!contains(&buf, "case study"));
        assert!(contains(&buf, "░"));
    }

    #[test]
    fn footer_carries_year_and_owner() {
        let p = Portfolio::default();
        let area = Rect::new(0, 0, 120, 18);
        let mut buf = Buffer::empty(area);
        render_footer(&ctx(&p), area, &mut buf);
        assert!(contains(&buf, "© 2026 Auria Zhang. All Rights Reserved."));
        assert!(contains(&buf, "hello@auria.design"));
    }
}
