//! Glass nav bar across the top and the section dot rail on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::theme::Theme;

/// Links shown in the nav bar, right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Work,
    About,
    Contact,
}

impl NavLink {
    pub const ALL: [NavLink; 3] = [NavLink::Work, NavLink::About, NavLink::Contact];

    pub fn label(self) -> &'static str {
        match self {
            NavLink::Work => "Work",
            NavLink::About => "About",
            NavLink::Contact => "Contact",
        }
    }

    /// Anchor the link scrolls to, given the number of anchors.
    pub fn anchor(self, anchor_count: usize) -> usize {
        match self {
            NavLink::Work => 1.min(anchor_count.saturating_sub(1)),
            NavLink::About => 0,
            NavLink::Contact => anchor_count.saturating_sub(1),
        }
    }
}

const LINK_GAP: u16 = 3;

fn links_width() -> u16 {
    NavLink::ALL
        .iter()
        .map(|l| l.label().len() as u16 + LINK_GAP)
        .sum()
}

pub struct NavBar<'a> {
    pub owner: &'a str,
    pub active_link: Option<NavLink>,
}

impl NavBar<'_> {
    /// Which link, if any, sits at `column` of a bar drawn in `area`.
    pub fn link_at(area: Rect, column: u16) -> Option<NavLink> {
        let mut x = area.right().saturating_sub(links_width());
        for link in NavLink::ALL {
            let w = link.label().len() as u16;
            if column >= x && column < x + w {
                return Some(link);
            }
            x += w + LINK_GAP;
        }
        None
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::nav_style());
        Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(self.owner.to_string(), Theme::nav_title_style()),
        ]))
        .render(area, buf);

        let mut spans = Vec::new();
        for link in NavLink::ALL {
            let style = if self.active_link == Some(link) {
                Theme::nav_title_style()
            } else {
                Theme::nav_style()
            };
            spans.push(Span::styled(link.label(), style));
            spans.push(Span::raw(" ".repeat(LINK_GAP as usize)));
        }
        let width = links_width().min(area.width);
        let links = Rect::new(area.right() - width, area.y, width, area.height.min(1));
        Paragraph::new(Line::from(spans)).render(links, buf);
    }
}

/// Vertical active-section indicator: one dot per anchor.
pub struct NavRail {
    pub count: usize,
    pub active: usize,
}

impl NavRail {
    /// Row of dot `i` when the rail is drawn in `area`.
    pub fn dot_row(area: Rect, count: usize, i: usize) -> Option<u16> {
        let span = u16::try_from(count.checked_mul(2)?.checked_sub(1)?).ok()?;
        if span > area.height || i >= count {
            return None;
        }
        let top = area.y + (area.height - span) / 2;
        Some(top + 2 * i as u16)
    }

    /// Anchor index for a click at `row`, if it lands on a dot.
    pub fn hit_test(area: Rect, count: usize, row: u16) -> Option<usize> {
        (0..count).find(|&i| Self::dot_row(area, count, i) == Some(row))
    }
}

impl Widget for NavRail {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        let x = area.x + area.width / 2;
        for i in 0..self.count {
            let Some(y) = Self::dot_row(area, self.count, i) else {
                continue;
            };
            let active = i == self.active;
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_symbol(if active { "●" } else { "·" })
                    .set_style(Theme::dot_style(active));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_are_centred_two_rows_apart() {
        let area = Rect::new(117, 1, 3, 38);
        // 7 dots span 13 rows: (38 - 13) / 2 = 12.
        assert_eq!(NavRail::dot_row(area, 7, 0), Some(13));
        assert_eq!(NavRail::dot_row(area, 7, 6), Some(25));
        assert_eq!(NavRail::hit_test(area, 7, 15), Some(1));
        assert_eq!(NavRail::hit_test(area, 7, 14), None);
    }

    #[test]
    fn rail_too_short_shows_nothing() {
        let area = Rect::new(0, 0, 3, 4);
        assert_eq!(NavRail::dot_row(area, 7, 0), None);
        assert_eq!(NavRail::dot_row(area, 0, 0), None);
    }

    #[test]
    fn rail_marks_active_dot() {
        let area = Rect::new(0, 0, 3, 20);
        let mut buf = Buffer::empty(area);
        NavRail { count: 3, active: 1 }.render(area, &mut buf);
        let row = NavRail::dot_row(area, 3, 1).unwrap_or_default();
        assert_eq!(buf[(1, row)].symbol(), "●");
    }

    #[test]
    fn nav_links_hit_test() {
        let area = Rect::new(0, 0, 80, 1);
        // "Work   About   Contact   " ends at the right edge.
        let start = 80 - links_width();
        assert_eq!(NavBar::link_at(area, start), Some(NavLink::Work));
        assert_eq!(NavBar::link_at(area, start + 7), Some(NavLink::About));
        assert_eq!(NavBar::link_at(area, start + 5), None);
        assert_eq!(NavBar::link_at(area, 2), None);
        assert_eq!(NavLink::Contact.anchor(7), 6);
        assert_eq!(NavLink::Work.anchor(7), 1);
    }
}
