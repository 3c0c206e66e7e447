//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    bindings::MotionBindings,
    controller::{ScrollControl, SnapController},
    page::{Page, PageLayout, SectionKind},
    portfolio::Portfolio,
};

use super::viewport::Viewport;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Stack,
    Project,
    Help,
}

/// An open case-study overlay.
///
/// Opening takes the page's scroll capability and pauses it; closing hands
/// it back and resumes.  The modal never looks the page up on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectModal {
    /// Index into [`Portfolio::projects`].
    pub project: usize,
    /// First visible content line.
    pub scroll: u16,
}

impl ProjectModal {
    pub fn open(project: usize, page_scroll: &mut dyn ScrollControl) -> Self {
        page_scroll.pause();
        Self { project, scroll: 0 }
    }

    pub fn close(self, page_scroll: &mut dyn ScrollControl) {
        page_scroll.resume();
    }
}

/// Top-level application state.
pub struct AppState {
    pub portfolio: Portfolio,
    pub page: Page,
    /// Layout for the current viewport height.
    pub layout: PageLayout,
    pub viewport: Viewport,
    pub controller: SnapController,
    /// Scroll-bound animation values per section.
    pub motion: MotionBindings,
    /// Keybindings and tuning.
    pub config: AppConfig,
    pub active_view: ActiveView,
    pub modal: Option<ProjectModal>,
    /// Show the scroll-state overlay.
    pub show_hud: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Time of the last advanced frame.
    pub last_frame: Instant,
    /// Full terminal area (for mouse hit-testing).
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(portfolio: Portfolio, config: AppConfig, now: Instant) -> Self {
        let page = Page::from_portfolio(&portfolio);
        let layout = page.layout(0.0);
        let motion = MotionBindings::new(&layout, 0.0);
        Self {
            viewport: Viewport::new(config.glide),
            controller: SnapController::new(config.tuning),
            portfolio,
            page,
            layout,
            motion,
            config,
            active_view: ActiveView::default(),
            modal: None,
            show_hud: false,
            should_quit: false,
            status_message: None,
            last_frame: now,
            terminal_area: Rect::default(),
        }
    }

    /// Project shown by the section at the active anchor, if any.
    pub fn active_project(&self) -> Option<usize> {
        match self.layout.snap_section(self.controller.active_index())?.kind {
            SectionKind::Project(i) => Some(i),
            _ => None,
        }
    }

    pub fn open_project(&mut self, project: usize) {
        if self.portfolio.project(project).is_none() {
            return;
        }
        if let Some(old) = self.modal.take() {
            old.close(&mut self.viewport);
        }
        self.modal = Some(ProjectModal::open(project, &mut self.viewport));
        self.active_view = ActiveView::Project;
        tracing::info!(project, "opened case study");
    }

    pub fn close_project(&mut self) {
        if let Some(modal) = self.modal.take() {
            modal.close(&mut self.viewport);
        }
        self.active_view = ActiveView::Stack;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_pauses_page_scrolling_until_closed() {
        let mut state = AppState::new(Portfolio::default(), AppConfig::default(), Instant::now());
        state.open_project(1);
        assert!(state.viewport.is_paused());
        assert_eq!(state.active_view, ActiveView::Project);

        state.close_project();
        assert!(!state.viewport.is_paused());
        assert_eq!(state.active_view, ActiveView::Stack);
        assert!(state.modal.is_none());
    }

    #[test]
    fn unknown_project_does_not_open() {
        let mut state = AppState::new(Portfolio::default(), AppConfig::default(), Instant::now());
        state.open_project(42);
        assert!(state.modal.is_none());
        assert!(!state.viewport.is_paused());
    }
}
