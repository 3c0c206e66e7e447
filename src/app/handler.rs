//! Input handling: maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::page::SectionKind;
use crate::ui::layout::AppLayout;
use crate::ui::nav::{NavBar, NavRail};

use super::scroll_runtime;
use super::state::{ActiveView, AppState};

/// Modal lines moved per wheel notch.
const MODAL_WHEEL_LINES: u16 = 3;
/// Modal lines moved by a page key.
const MODAL_PAGE_LINES: u16 = 10;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Stack => handle_stack_key(state, key, now),
        ActiveView::Project => handle_project_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
    }
}

// ── Stack view (configurable bindings) ──────────────────────────

fn handle_stack_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;
    let step_px = state.config.wheel_step_px;

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => scroll_runtime::scroll_by(state, -step_px),
        Action::ScrollDown => scroll_runtime::scroll_by(state, step_px),
        Action::PrevSection => scroll_runtime::step_section(state, -1, now),
        Action::NextSection => scroll_runtime::step_section(state, 1, now),
        Action::FirstSection => scroll_runtime::go_to_section(state, 0, now),
        Action::LastSection => {
            if let Some(last) = state.controller.registry().last_index() {
                scroll_runtime::go_to_section(state, last, now);
            }
        }
        Action::OpenProject => match state.active_project() {
            Some(project) => state.open_project(project),
            None => state.status_message = Some("Scroll to a project to open it".into()),
        },
        Action::ToggleSnap => {
            let enabled = !state.controller.is_enabled();
            state.controller.set_enabled(enabled);
            state.status_message = Some(format!(
                "Section snapping {}",
                if enabled { "on" } else { "off" }
            ));
        }
        Action::ToggleHud => state.show_hud = !state.show_hud,
        Action::Help => state.active_view = ActiveView::Help,
    }
}

// ── Project modal ───────────────────────────────────────────────

fn scroll_modal(state: &mut AppState, delta: i32) {
    if let Some(modal) = state.modal.as_mut() {
        let next = (i32::from(modal.scroll) + delta).clamp(0, i32::from(u16::MAX));
        // Upper bound is applied when the modal renders.
        modal.scroll = u16::try_from(next).unwrap_or(u16::MAX);
    }
}

fn handle_project_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.close_project();
        return;
    }
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::Quit | Action::OpenProject => state.close_project(),
        Action::ScrollUp => scroll_modal(state, -1),
        Action::ScrollDown => scroll_modal(state, 1),
        Action::PrevSection => scroll_modal(state, -i32::from(MODAL_PAGE_LINES)),
        Action::NextSection => scroll_modal(state, i32::from(MODAL_PAGE_LINES)),
        Action::FirstSection => {
            if let Some(modal) = state.modal.as_mut() {
                modal.scroll = 0;
            }
        }
        Action::LastSection => {
            if let Some(modal) = state.modal.as_mut() {
                modal.scroll = u16::MAX;
            }
        }
        _ => {}
    }
}

// ── Help popup ──────────────────────────────────────────────────

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    let closes = key.code == KeyCode::Esc
        || matches!(
            state.config.match_key(key),
            Some(Action::Help | Action::Quit)
        );
    if closes {
        state.active_view = ActiveView::Stack;
    }
}

// ── Mouse ───────────────────────────────────────────────────────

fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Wheel input: page scroll on the stack, content scroll in the modal.
pub fn handle_wheel(state: &mut AppState, notches: i8) {
    match state.active_view {
        ActiveView::Stack => {
            let delta = f64::from(notches) * state.config.wheel_step_px;
            scroll_runtime::scroll_by(state, delta);
        }
        ActiveView::Project => {
            scroll_modal(state, i32::from(notches) * i32::from(MODAL_WHEEL_LINES));
        }
        ActiveView::Help => {}
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Stack {
        return;
    }
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let layout = AppLayout::from_area(state.terminal_area);
    let anchors = state.controller.registry().len();

    if point_in_rect(layout.rail_area, mouse.column, mouse.row) {
        if let Some(index) = NavRail::hit_test(layout.rail_area, anchors, mouse.row) {
            scroll_runtime::go_to_section(state, index, now);
        }
        return;
    }

    if point_in_rect(layout.nav_area, mouse.column, mouse.row) {
        if let Some(link) = NavBar::link_at(layout.nav_area, mouse.column) {
            scroll_runtime::go_to_section(state, link.anchor(anchors), now);
        }
        return;
    }

    if point_in_rect(layout.stack_area, mouse.column, mouse.row) {
        let y = state.viewport.offset()
            + f64::from(mouse.row - layout.stack_area.y) * state.config.px_per_row;
        let clicked = state
            .layout
            .sections
            .iter()
            .find(|s| y >= s.top && y < s.bottom())
            .map(|s| s.kind);
        if let Some(SectionKind::Project(project)) = clicked {
            state.open_project(project);
        }
    }
}

/// Terminal resized to `width` × `height` cells.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = Rect::new(0, 0, width, height);
    let layout = AppLayout::from_area(state.terminal_area);
    scroll_runtime::resize(state, layout.stack_area.height);
}
