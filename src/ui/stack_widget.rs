//! The scrolling section stack.
//!
//! Sections live in document pixels; this widget converts the visible slice
//! to terminal rows, paints each section into a scratch buffer of its full
//! height and copies the rows that fall inside the viewport.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::Widget,
};

use crate::core::bindings::MotionBindings;
use crate::core::page::{PageLayout, SectionKind, SectionRect};
use crate::core::portfolio::Portfolio;

use super::sections::{self, SectionContext};
use super::theme::Theme;

pub struct StackView<'a> {
    pub layout: &'a PageLayout,
    pub motion: &'a MotionBindings,
    pub portfolio: &'a Portfolio,
    pub offset: f64,
    pub px_per_row: f64,
    pub year: i32,
}

impl StackView<'_> {
    fn row_of(&self, px: f64) -> i64 {
        (px / self.px_per_row).round() as i64
    }

    fn paint(&self, ctx: &SectionContext, rect: &SectionRect, area: Rect, buf: &mut Buffer) {
        let visual = self.motion.visual(rect.index);
        match rect.kind {
            SectionKind::Hero => sections::render_hero(ctx, area, buf),
            SectionKind::SelectedWorks => sections::render_selected_works(ctx, &visual, area, buf),
            SectionKind::Project(i) => sections::render_project(ctx, i, &visual, area, buf),
            SectionKind::Footer => sections::render_footer(ctx, area, buf),
        }
    }
}

impl Widget for StackView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        if area.is_empty() || self.px_per_row <= 0.0 {
            return;
        }

        let ctx = SectionContext {
            portfolio: self.portfolio,
            px_per_row: self.px_per_row,
            year: self.year,
        };
        let first_row = self.row_of(self.offset);

        for rect in self.layout.visible(self.offset) {
            let top = self.row_of(rect.top) - first_row;
            let bottom = self.row_of(rect.bottom()) - first_row;
            let rows = bottom - top;
            if rows <= 0 || bottom <= 0 || top >= i64::from(area.height) {
                continue;
            }
            let Ok(rows) = u16::try_from(rows) else {
                continue;
            };

            let scratch_area = Rect::new(0, 0, area.width, rows);
            let mut scratch = Buffer::empty(scratch_area);
            scratch.set_style(scratch_area, Theme::page_style());
            self.paint(&ctx, rect, scratch_area, &mut scratch);

            let from = (-top).max(0);
            let to = bottom.min(i64::from(area.height)) - top;
            for src_row in from..to {
                let dst_row = top + src_row;
                let (Ok(src_y), Ok(dst_y)) = (u16::try_from(src_row), u16::try_from(dst_row)) else {
                    continue;
                };
                for x in 0..area.width {
                    let Some(cell) = scratch.cell(Position::new(x, src_y)) else {
                        continue;
                    };
                    if let Some(dst) = buf.cell_mut(Position::new(area.x + x, area.y + dst_y)) {
                        *dst = cell.clone();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::Page;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn render_at(offset: f64) -> Buffer {
        let portfolio = Portfolio::default();
        let layout = Page::from_portfolio(&portfolio).layout(800.0);
        let motion = MotionBindings::new(&layout, offset);
        let area = Rect::new(0, 0, 120, 50);
        let mut buf = Buffer::empty(area);
        StackView {
            layout: &layout,
            motion: &motion,
            portfolio: &portfolio,
            offset,
            px_per_row: 16.0,
            year: 2026,
        }
        .render(area, &mut buf);
        buf
    }

    fn screen_contains(buf: &Buffer, needle: &str) -> bool {
        (0..buf.area.height).any(|y| row_text(buf, y).contains(needle))
    }

    #[test]
    fn hero_fills_the_first_screen() {
        let buf = render_at(0.0);
        assert!(screen_contains(&buf, "scroll ↓"));
        assert!(!screen_contains(&buf, "Lumina"));
    }

    #[test]
    fn two_sections_share_the_screen_mid_scroll() {
        // Prelo's section starts 8 rows down; Lumina's card closes above it.
        let buf = render_at(2400.0 - 8.0 * 16.0);
        assert!(row_text(&buf, 6).contains('╰'));
        assert!(row_text(&buf, 10).contains("Prelo"));
    }

    #[test]
    fn footer_is_reachable_at_max_offset() {
        let buf = render_at(4480.0);
        assert!(screen_contains(&buf, "Liquid Logic Portfolio"));
    }
}
