//! Settle resolver: decides where the page should rest once scrolling pauses.
//!
//! Everything here is a pure function over the scroll sample, the anchor
//! list and the tuning constants.  Timers and the correcting state live in
//! [`super::controller`].

use std::time::Duration;

use thiserror::Error;

use super::anchor::Anchor;
use super::tracker::Direction;

/// Snap sensitivity tuning.  Values were chosen empirically for feel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapTuning {
    /// Quiet time after the last user scroll before resolving.
    pub debounce: Duration,
    /// How long a corrective smooth scroll is assumed to take.
    pub settle_window: Duration,
    /// Fraction of the viewport the page must leave the current anchor by
    /// before the resolver advances.
    pub snap_threshold: f64,
    /// Distance (px) under which the page counts as already resting on the
    /// target anchor.
    pub settle_tolerance_px: f64,
    /// Fraction of the viewport from the document top inside which the first
    /// anchor is locked in.
    pub top_lock: f64,
    /// Deltas at or below this size never change the direction.
    pub jitter_px: f64,
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(260),
            settle_window: Duration::from_millis(420),
            snap_threshold: 0.52,
            settle_tolerance_px: 12.0,
            top_lock: 0.12,
            jitter_px: 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("snap threshold must be within (0, 1], got {0}")]
    Threshold(f64),
    #[error("top lock must be within [0, 1), got {0}")]
    TopLock(f64),
    #[error("{name} must be a non-negative finite number, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("settle window must be non-zero")]
    ZeroSettleWindow,
}

impl SnapTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.snap_threshold > 0.0 && self.snap_threshold <= 1.0) {
            return Err(TuningError::Threshold(self.snap_threshold));
        }
        if !(0.0..1.0).contains(&self.top_lock) {
            return Err(TuningError::TopLock(self.top_lock));
        }
        for (name, value) in [
            ("settle tolerance", self.settle_tolerance_px),
            ("jitter", self.jitter_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }
        if self.settle_window.is_zero() {
            return Err(TuningError::ZeroSettleWindow);
        }
        Ok(())
    }

    /// Whether `offset` is inside the top-lock zone.
    pub fn is_top_locked(&self, offset: f64, viewport_height: f64) -> bool {
        offset < viewport_height * self.top_lock
    }
}

/// Inputs of one resolution: the latest sample and the anchor being tracked.
#[derive(Debug, Clone, Copy)]
pub struct SettleInput {
    pub current_offset: f64,
    pub current_index: usize,
    pub direction: Direction,
    pub viewport_height: f64,
}

/// What the resolver decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettlePlan {
    /// No anchors registered.
    Inactive,
    /// Near the document top; the first anchor is forced and nothing moves.
    TopLocked,
    /// Most of the viewport still shows the current section.
    Stay { index: usize },
    /// Already within tolerance of the target; adopt it without scrolling.
    Settled { index: usize },
    /// Smooth-scroll to `offset`, then adopt `index`.
    Correct { index: usize, offset: f64 },
}

fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}

/// Target anchor for a pause at `input`.  Always a valid index into a
/// non-empty `anchors`; returns `0` for an empty list.
pub fn resolve(input: &SettleInput, anchors: &[Anchor], tuning: &SnapTuning) -> usize {
    if anchors.is_empty() {
        return 0;
    }
    let current = clamp_index(input.current_index as isize, anchors.len());
    let delta_from_anchor = input.current_offset - anchors[current].offset_top;
    if delta_from_anchor.abs() < input.viewport_height * tuning.snap_threshold {
        return current;
    }
    clamp_index(current as isize + input.direction.sign(), anchors.len())
}

/// Full settle decision, including top lock and the settled-tolerance check.
pub fn plan_settle(input: &SettleInput, anchors: &[Anchor], tuning: &SnapTuning) -> SettlePlan {
    if anchors.is_empty() {
        return SettlePlan::Inactive;
    }
    if tuning.is_top_locked(input.current_offset, input.viewport_height) {
        return SettlePlan::TopLocked;
    }

    let current = clamp_index(input.current_index as isize, anchors.len());
    let target = resolve(input, anchors, tuning);
    if target == current {
        let distance = (input.current_offset - anchors[target].offset_top).abs();
        return if distance < tuning.settle_tolerance_px {
            SettlePlan::Settled { index: target }
        } else {
            SettlePlan::Stay { index: target }
        };
    }

    let offset = anchors[target].offset_top;
    if (input.current_offset - offset).abs() < tuning.settle_tolerance_px {
        SettlePlan::Settled { index: target }
    } else {
        SettlePlan::Correct { index: target, offset }
    }
}
