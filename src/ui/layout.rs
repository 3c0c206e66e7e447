//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the section indicator rail on the right.
const RAIL_WIDTH: u16 = 3;

/// Primary screen layout: nav bar, the scrolling stack with its indicator
/// rail, and a bottom status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    /// The viewport.  Its height in rows defines the page's viewport height.
    pub stack_area: Rect,
    pub rail_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // glass nav bar
                Constraint::Min(3),    // stack (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(RAIL_WIDTH)])
            .split(rows[1]);

        Self {
            nav_area: rows[0],
            stack_area: body[0],
            rail_area: body[1],
            status_area: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_gets_everything_but_chrome() {
        let l = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(l.nav_area.height, 1);
        assert_eq!(l.status_area.y, 39);
        assert_eq!(l.stack_area, Rect::new(0, 1, 117, 38));
        assert_eq!(l.rail_area, Rect::new(117, 1, 3, 38));
    }
}
