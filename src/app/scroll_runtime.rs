//! Per-frame scroll plumbing between the viewport and the snap controller.
//!
//! The main loop calls [`advance`] after every wake-up.  It moves the
//! viewport, reports any offset change to the controller as a scroll event,
//! fires due controller timers and executes the commands they produce, then
//! refreshes the scroll-bound animation values.

use std::time::{Duration, Instant};

use crate::core::bindings::MotionBindings;
use crate::core::controller::ScrollCommand;
use crate::core::timer::earliest;

use super::state::AppState;

/// How long to sleep when nothing is moving and no timer is pending.
const IDLE_WAKEUP: Duration = Duration::from_millis(500);

/// Longest frame step fed to the animations (avoids jumps after a stall).
const MAX_FRAME_DT: Duration = Duration::from_millis(100);

/// Re-lay the page out for a viewport of `rows` terminal rows.
pub fn resize(state: &mut AppState, rows: u16) {
    let height = f64::from(rows) * state.config.px_per_row;
    if height == state.layout.viewport_height {
        return;
    }
    state.layout = state.page.layout(height);
    state.viewport.set_max_offset(state.layout.max_offset());

    if let Some(anchor_offset) = state.controller.on_layout(&state.layout) {
        // Keep the same section in view at the new size.
        state.viewport.jump_to(anchor_offset);
    }
    state.controller.sync_offset(state.viewport.offset());
    state.motion = MotionBindings::new(&state.layout, state.viewport.offset());
    tracing::debug!(rows, height, offset = state.viewport.offset(), "resized");
}

/// Execute a controller command on the viewport.
pub fn apply_command(state: &mut AppState, command: ScrollCommand, now: Instant) {
    match command {
        ScrollCommand::SmoothScrollTo { offset, anchor } => {
            tracing::debug!(offset, anchor, "corrective scroll");
            state
                .viewport
                .smooth_scroll_to(offset, now, state.controller.tuning().settle_window);
        }
    }
}

/// User scroll of `delta` pixels.
pub fn scroll_by(state: &mut AppState, delta: f64) {
    state.viewport.scroll_by(delta);
}

/// Navigate `step` anchors from the active one.
pub fn step_section(state: &mut AppState, step: isize, now: Instant) {
    if let Some(cmd) = state.controller.request_step(step, now) {
        apply_command(state, cmd, now);
    }
}

/// Navigate to anchor `index` (clamped to the registry).
pub fn go_to_section(state: &mut AppState, index: usize, now: Instant) {
    if let Some(cmd) = state.controller.request_anchor(index, now) {
        apply_command(state, cmd, now);
    }
}

/// Advance everything to `now`.
pub fn advance(state: &mut AppState, now: Instant) {
    let dt = now
        .saturating_duration_since(state.last_frame)
        .min(MAX_FRAME_DT);
    state.last_frame = now;

    if state.viewport.tick(now, dt) {
        state.controller.on_scroll(state.viewport.offset(), now);
    }
    if let Some(cmd) = state.controller.poll(now) {
        apply_command(state, cmd, now);
    }
    state
        .motion
        .update(&state.layout, state.viewport.offset(), dt.as_secs_f64());
}

/// When the main loop should wake up next if no input arrives.
pub fn next_wakeup(state: &AppState, now: Instant, frame: Duration) -> Instant {
    if state.viewport.is_animating() || state.motion.is_animating() {
        return now + frame;
    }
    let idle = now + IDLE_WAKEUP;
    earliest(state.controller.next_deadline(), Some(idle)).unwrap_or(idle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::controller::SnapMode;
    use crate::core::portfolio::Portfolio;

    const FRAME: Duration = Duration::from_millis(16);

    /// 50 rows × 16 px = 800 px viewport.
    fn state(now: Instant) -> AppState {
        let mut s = AppState::new(Portfolio::default(), AppConfig::default(), now);
        resize(&mut s, 50);
        s
    }

    /// Run frames until `until`, returning the last frame time.
    fn run_until(s: &mut AppState, from: Instant, until: Instant) -> Instant {
        let mut now = from;
        while now < until {
            now += FRAME;
            advance(s, now);
        }
        now
    }

    #[test]
    fn scroll_past_threshold_settles_on_next_section() {
        let t0 = Instant::now();
        let mut s = state(t0);
        scroll_by(&mut s, 430.0);
        // The glide takes ~320ms, then the 260ms debounce elapses.
        let t = run_until(&mut s, t0, t0 + Duration::from_millis(700));
        assert!(s.controller.is_programmatic_scroll());

        run_until(&mut s, t, t + Duration::from_millis(600));
        assert_eq!(s.viewport.offset(), 800.0);
        assert_eq!(s.controller.active_index(), 1);
        assert_eq!(s.controller.state().mode, SnapMode::Idle);
    }

    #[test]
    fn short_scroll_stays_put() {
        let t0 = Instant::now();
        let mut s = state(t0);
        scroll_by(&mut s, 380.0);
        run_until(&mut s, t0, t0 + Duration::from_secs(2));
        assert!((s.viewport.offset() - 380.0).abs() < 1e-9);
        assert_eq!(s.controller.active_index(), 0);
    }

    #[test]
    fn step_section_moves_one_anchor() {
        let t0 = Instant::now();
        let mut s = state(t0);
        step_section(&mut s, 1, t0);
        run_until(&mut s, t0, t0 + Duration::from_millis(500));
        assert_eq!(s.viewport.offset(), 800.0);
        assert_eq!(s.controller.active_index(), 1);
    }

    #[test]
    fn resize_keeps_active_section_in_view() {
        let t0 = Instant::now();
        let mut s = state(t0);
        go_to_section(&mut s, 3, t0);
        run_until(&mut s, t0, t0 + Duration::from_millis(500));
        assert_eq!(s.viewport.offset(), 2400.0);

        resize(&mut s, 40);
        assert_eq!(s.viewport.offset(), 3.0 * 640.0);
        assert_eq!(s.controller.active_index(), 3);
        assert_eq!(s.controller.next_deadline(), None);
    }

    #[test]
    fn resize_mid_correction_lands_on_the_target_section() {
        let t0 = Instant::now();
        let mut s = state(t0);
        go_to_section(&mut s, 3, t0);
        let t = run_until(&mut s, t0, t0 + Duration::from_millis(500));

        go_to_section(&mut s, 4, t);
        let t = run_until(&mut s, t, t + FRAME * 6);
        assert!(s.controller.is_programmatic_scroll());

        resize(&mut s, 40);
        let t = run_until(&mut s, t, t + FRAME * 60);
        assert_eq!(s.viewport.offset(), 4.0 * 640.0);
        assert_eq!(s.controller.active_index(), 4);
        assert_eq!(s.controller.state().mode, SnapMode::Idle);

        // A short scroll from there stays on the same section.
        scroll_by(&mut s, 192.0);
        run_until(&mut s, t, t + Duration::from_secs(2));
        assert_eq!(s.controller.active_index(), 4);
        assert!((s.viewport.offset() - (4.0 * 640.0 + 192.0)).abs() < 1e-9);
    }

    #[test]
    fn idle_state_sleeps_until_timer_or_idle_tick() {
        let t0 = Instant::now();
        let s = state(t0);
        assert_eq!(next_wakeup(&s, t0, FRAME), t0 + IDLE_WAKEUP);
    }
}
