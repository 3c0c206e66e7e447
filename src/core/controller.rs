//! Scroll-snap stack controller.
//!
//! Ties the tracker, the registry and the resolver together and owns the two
//! timers.  The controller is driven entirely by its host:
//!
//! * every offset change is reported through [`SnapController::on_scroll`];
//! * the host sleeps until [`SnapController::next_deadline`] and then calls
//!   [`SnapController::poll`], which may hand back a [`ScrollCommand`] to
//!   execute on the viewport.
//!
//! There are two modes.  In [`SnapMode::Idle`] user scrolls (re)arm the
//! debounce.  In [`SnapMode::Correcting`] the page is moving because of a
//! command this controller issued; samples are still recorded but never
//! trigger another resolution.

use std::time::Instant;

use super::anchor::AnchorRegistry;
use super::page::PageLayout;
use super::resolver::{plan_settle, SettleInput, SettlePlan, SnapTuning};
use super::timer::{earliest, ScheduledTask};
use super::tracker::{Direction, ScrollTracker};

/// Capability to pause and resume page scrolling.  Handed explicitly to
/// anything (such as an overlay) that must freeze the page underneath it.
pub trait ScrollControl {
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    #[default]
    Idle,
    /// A corrective scroll toward anchor `target` is in flight.
    Correcting { target: usize },
}

/// Something the host must do to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    SmoothScrollTo { offset: f64, anchor: usize },
}

/// Snapshot of the controller's bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub current_offset: f64,
    pub last_offset: f64,
    pub direction: Direction,
    pub current_anchor_index: usize,
    pub mode: SnapMode,
}

impl ScrollState {
    pub fn is_programmatic_scroll(&self) -> bool {
        self.mode != SnapMode::Idle
    }
}

pub struct SnapController {
    tracker: ScrollTracker,
    current_anchor_index: usize,
    mode: SnapMode,
    registry: AnchorRegistry,
    viewport_height: f64,
    tuning: SnapTuning,
    debounce: ScheduledTask,
    settle: ScheduledTask,
    enabled: bool,
    torn_down: bool,
}

impl SnapController {
    pub fn new(tuning: SnapTuning) -> Self {
        Self {
            tracker: ScrollTracker::new(0.0, tuning.jitter_px),
            current_anchor_index: 0,
            mode: SnapMode::Idle,
            registry: AnchorRegistry::new(),
            viewport_height: 0.0,
            tuning,
            debounce: ScheduledTask::new(),
            settle: ScheduledTask::new(),
            enabled: true,
            torn_down: false,
        }
    }

    /// Turn settle-snapping on or off.  Offsets are still tracked while off,
    /// and explicit anchor requests still work.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.debounce.cancel();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            current_offset: self.tracker.current_offset,
            last_offset: self.tracker.last_offset,
            direction: self.tracker.direction,
            current_anchor_index: self.current_anchor_index,
            mode: self.mode,
        }
    }

    pub fn is_programmatic_scroll(&self) -> bool {
        self.mode != SnapMode::Idle
    }

    /// The settled anchor, for active-state UI.
    pub fn active_index(&self) -> usize {
        self.current_anchor_index
    }

    pub fn registry(&self) -> &AnchorRegistry {
        &self.registry
    }

    pub fn tuning(&self) -> &SnapTuning {
        &self.tuning
    }

    /// Feed a new layout.  When the anchors are rebuilt the current index is
    /// re-clamped and the offset of that anchor is returned so the host can
    /// keep the same section in view.  A correction in flight is completed
    /// on the spot: its target becomes the current anchor.
    pub fn on_layout(&mut self, layout: &PageLayout) -> Option<f64> {
        if self.torn_down {
            return None;
        }
        self.viewport_height = layout.viewport_height;
        if !self.registry.refresh(layout) {
            return None;
        }
        if let SnapMode::Correcting { target } = self.mode {
            self.current_anchor_index = target;
            self.settle.cancel();
            self.mode = SnapMode::Idle;
        }
        let last = self.registry.last_index()?;
        self.current_anchor_index = self.current_anchor_index.min(last);
        self.registry
            .get(self.current_anchor_index)
            .map(|a| a.offset_top)
    }

    /// Record a scroll sample.
    pub fn on_scroll(&mut self, offset: f64, now: Instant) {
        if self.torn_down {
            return;
        }
        if self.is_programmatic_scroll() {
            self.tracker.record_passive(offset);
            return;
        }

        self.tracker.record(offset);
        if self
            .tuning
            .is_top_locked(offset, self.viewport_height)
        {
            self.current_anchor_index = 0;
        }
        if self.enabled && !self.registry.is_empty() {
            self.debounce.schedule(now, self.tuning.debounce);
        }
    }

    /// Record an offset the host set without any scrolling (e.g. keeping the
    /// anchor in place after a resize).  Never arms the debounce.
    pub fn sync_offset(&mut self, offset: f64) {
        if !self.torn_down {
            self.tracker.record_passive(offset);
        }
    }

    /// Ask for a programmatic scroll to `index` (clamped).  Used by
    /// navigation UI; the move goes through the correcting mode like any
    /// settle correction.
    pub fn request_anchor(&mut self, index: usize, now: Instant) -> Option<ScrollCommand> {
        if self.torn_down {
            return None;
        }
        let last = self.registry.last_index()?;
        let index = index.min(last);
        let offset = self.registry.get(index)?.offset_top;
        self.debounce.cancel();
        if (self.tracker.current_offset - offset).abs() < self.tuning.settle_tolerance_px {
            self.current_anchor_index = index;
            self.mode = SnapMode::Idle;
            self.settle.cancel();
            return None;
        }
        Some(self.begin_correction(index, offset, now))
    }

    /// Step relative to the active anchor.
    pub fn request_step(&mut self, step: isize, now: Instant) -> Option<ScrollCommand> {
        let base = match self.mode {
            SnapMode::Correcting { target } => target,
            SnapMode::Idle => self.current_anchor_index,
        };
        let index = (base as isize + step).max(0) as usize;
        self.request_anchor(index, now)
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.debounce.deadline(), self.settle.deadline())
    }

    /// Fire due timers.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollCommand> {
        if self.torn_down {
            return None;
        }
        if self.settle.take_if_due(now) {
            self.finish_correction();
        }
        if self.debounce.take_if_due(now) {
            return self.settle_snap(now);
        }
        None
    }

    /// Cancel every pending timer.  Nothing is mutated afterwards.
    pub fn teardown(&mut self) {
        self.debounce.cancel();
        self.settle.cancel();
        self.mode = SnapMode::Idle;
        self.torn_down = true;
    }

    fn settle_snap(&mut self, now: Instant) -> Option<ScrollCommand> {
        if self.is_programmatic_scroll() || !self.enabled {
            return None;
        }
        let input = SettleInput {
            current_offset: self.tracker.current_offset,
            current_index: self.current_anchor_index,
            direction: self.tracker.direction,
            viewport_height: self.viewport_height,
        };
        let plan = plan_settle(&input, self.registry.anchors(), &self.tuning);
        tracing::debug!(
            offset = input.current_offset,
            from = input.current_index,
            direction = input.direction.label(),
            ?plan,
            "settle"
        );
        match plan {
            SettlePlan::Inactive => None,
            SettlePlan::TopLocked => {
                self.current_anchor_index = 0;
                None
            }
            SettlePlan::Stay { index } | SettlePlan::Settled { index } => {
                self.current_anchor_index = index;
                None
            }
            SettlePlan::Correct { index, offset } => Some(self.begin_correction(index, offset, now)),
        }
    }

    fn begin_correction(&mut self, index: usize, offset: f64, now: Instant) -> ScrollCommand {
        self.mode = SnapMode::Correcting { target: index };
        self.settle.schedule(now, self.tuning.settle_window);
        ScrollCommand::SmoothScrollTo { offset, anchor: index }
    }

    fn finish_correction(&mut self) {
        if let SnapMode::Correcting { target } = self.mode {
            let clamped = self.registry.last_index().map_or(0, |last| target.min(last));
            self.current_anchor_index = clamped;
            tracing::debug!(anchor = clamped, "correction finished");
        }
        self.mode = SnapMode::Idle;
    }
}

impl Drop for SnapController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::{Page, Section, SectionHeight, SectionKind};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Five full-height sections: anchors at 0, 800, 1600, 2400, 3200.
    fn five_sections() -> PageLayout {
        let sections = (0..5)
            .map(|i| Section {
                kind: SectionKind::Project(i),
                height: SectionHeight::Viewport,
                snap_point: true,
            })
            .collect();
        Page { sections }.layout(800.0)
    }

    fn controller() -> SnapController {
        let mut c = SnapController::new(SnapTuning::default());
        c.on_layout(&five_sections());
        c
    }

    /// Feed a short user scroll from `from` to `to` ending at `t`.
    fn scroll(c: &mut SnapController, from: f64, to: f64, t: Instant) {
        let steps = 5;
        for i in 1..=steps {
            let y = from + (to - from) * i as f64 / steps as f64;
            c.on_scroll(y, t - ms(10 * (steps - i) as u64));
        }
    }

    #[test]
    fn scenario_past_threshold_snaps_to_next_section() {
        let t0 = Instant::now();
        let mut c = controller();
        scroll(&mut c, 0.0, 430.0, t0);

        assert_eq!(c.poll(t0 + ms(259)), None);
        let cmd = c.poll(t0 + ms(260));
        assert_eq!(cmd, Some(ScrollCommand::SmoothScrollTo { offset: 800.0, anchor: 1 }));
        assert!(c.is_programmatic_scroll());
        assert_eq!(c.active_index(), 0);

        // The corrective scroll moves the page.
        c.on_scroll(600.0, t0 + ms(400));
        c.on_scroll(800.0, t0 + ms(600));

        assert_eq!(c.poll(t0 + ms(680)), None);
        assert_eq!(c.active_index(), 1);
        assert_eq!(c.state().mode, SnapMode::Idle);
    }

    #[test]
    fn scenario_under_threshold_takes_no_action() {
        let t0 = Instant::now();
        let mut c = controller();
        scroll(&mut c, 0.0, 380.0, t0);

        assert_eq!(c.poll(t0 + ms(300)), None);
        assert_eq!(c.active_index(), 0);
        assert!(!c.is_programmatic_scroll());
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn scenario_scroll_during_correction_is_not_resolved() {
        let t0 = Instant::now();
        let mut c = controller();
        scroll(&mut c, 0.0, 430.0, t0);
        assert!(c.poll(t0 + ms(260)).is_some());

        c.on_scroll(810.0, t0 + ms(300));
        let state = c.state();
        assert!(state.is_programmatic_scroll());
        assert_eq!(state.current_offset, 810.0);
        // Only the settle-window task is pending; no new debounce.
        assert_eq!(c.next_deadline(), Some(t0 + ms(260) + ms(420)));
        assert_eq!(c.poll(t0 + ms(600)), None);
        assert_eq!(c.poll(t0 + ms(700)), None);
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn scenario_top_zone_forces_first_anchor() {
        let t0 = Instant::now();
        let mut c = controller();
        // Get onto anchor 2 first.
        assert!(c.request_anchor(2, t0).is_some());
        c.on_scroll(1600.0, t0 + ms(100));
        c.poll(t0 + ms(420));
        assert_eq!(c.active_index(), 2);

        c.on_scroll(90.0, t0 + ms(500));
        assert_eq!(c.active_index(), 0);
        assert_eq!(c.poll(t0 + ms(760)), None);
        assert_eq!(c.active_index(), 0);
        assert!(!c.is_programmatic_scroll());
    }

    #[test]
    fn debounce_is_reset_by_each_scroll() {
        let t0 = Instant::now();
        let mut c = controller();
        c.on_scroll(300.0, t0);
        c.on_scroll(450.0, t0 + ms(200));
        assert_eq!(c.poll(t0 + ms(300)), None);
        assert!(c.poll(t0 + ms(460)).is_some());
    }

    #[test]
    fn reversal_mid_debounce_uses_latest_direction() {
        let t0 = Instant::now();
        let mut c = controller();
        assert!(c.request_anchor(2, t0).is_some());
        c.on_scroll(1600.0, t0);
        c.poll(t0 + ms(420));

        // Down past the threshold, then reverse.
        c.on_scroll(2100.0, t0 + ms(500));
        c.on_scroll(2050.0, t0 + ms(520));
        let cmd = c.poll(t0 + ms(780));
        assert_eq!(cmd, Some(ScrollCommand::SmoothScrollTo { offset: 800.0, anchor: 1 }));
    }

    #[test]
    fn empty_registry_never_corrects() {
        let t0 = Instant::now();
        let mut c = SnapController::new(SnapTuning::default());
        c.on_layout(&Page { sections: vec![] }.layout(800.0));
        c.on_scroll(500.0, t0);
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.poll(t0 + ms(1000)), None);
        assert_eq!(c.request_anchor(3, t0), None);
    }

    #[test]
    fn teardown_cancels_pending_timers() {
        let t0 = Instant::now();
        let mut c = controller();
        scroll(&mut c, 0.0, 430.0, t0);
        c.teardown();
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.poll(t0 + ms(5000)), None);
        c.on_scroll(900.0, t0 + ms(5000));
        assert_eq!(c.state().current_offset, 430.0);
    }

    #[test]
    fn teardown_during_correction_leaves_index_untouched() {
        let t0 = Instant::now();
        let mut c = controller();
        scroll(&mut c, 0.0, 430.0, t0);
        assert!(c.poll(t0 + ms(260)).is_some());
        c.teardown();
        assert_eq!(c.poll(t0 + ms(2000)), None);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn shrinking_layout_reclamps_current_anchor() {
        let t0 = Instant::now();
        let mut c = controller();
        c.request_anchor(4, t0);
        c.poll(t0 + ms(420));
        assert_eq!(c.active_index(), 4);

        let mut layout = five_sections();
        layout.sections.truncate(2);
        assert_eq!(c.on_layout(&layout), Some(800.0));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn resize_reports_new_anchor_offset() {
        let t0 = Instant::now();
        let mut c = controller();
        c.request_anchor(3, t0);
        c.poll(t0 + ms(420));
        let smaller = Page {
            sections: (0..5)
                .map(|i| Section {
                    kind: SectionKind::Project(i),
                    height: SectionHeight::Viewport,
                    snap_point: true,
                })
                .collect(),
        }
        .layout(600.0);
        assert_eq!(c.on_layout(&smaller), Some(1800.0));
        assert_eq!(c.on_layout(&smaller), None);
    }

    #[test]
    fn relayout_mid_correction_adopts_the_target() {
        let t0 = Instant::now();
        let mut c = controller();
        assert!(c.request_anchor(3, t0).is_some());
        c.on_scroll(1200.0, t0 + ms(100));

        let smaller = Page {
            sections: (0..5)
                .map(|i| Section {
                    kind: SectionKind::Project(i),
                    height: SectionHeight::Viewport,
                    snap_point: true,
                })
                .collect(),
        }
        .layout(640.0);
        assert_eq!(c.on_layout(&smaller), Some(1920.0));
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.state().mode, SnapMode::Idle);
        assert_eq!(c.next_deadline(), None);
    }

    #[test]
    fn request_step_clamps_to_registry() {
        let t0 = Instant::now();
        let mut c = controller();
        assert_eq!(c.request_step(-1, t0), None);
        assert_eq!(
            c.request_step(9, t0),
            Some(ScrollCommand::SmoothScrollTo { offset: 3200.0, anchor: 4 })
        );
    }

    #[test]
    fn disabled_controller_tracks_but_never_settles() {
        let t0 = Instant::now();
        let mut c = controller();
        c.set_enabled(false);
        scroll(&mut c, 0.0, 430.0, t0);
        assert_eq!(c.next_deadline(), None);
        assert_eq!(c.state().current_offset, 430.0);
    }
}
