//! The scrollable viewport: owns the page offset.
//!
//! User input does not move the page directly.  It adds to a pending
//! distance that decays toward zero each frame (exponential ease-out), which
//! gives wheel and key scrolling a short glide.  Programmatic scrolls run an
//! eased animation instead.  Either way every offset change shows up as a
//! `true` return from [`Viewport::tick`], which the runtime turns into a
//! scroll event.

use std::time::{Duration, Instant};

use crate::core::controller::ScrollControl;
use crate::core::motion::{ease_in_out_cubic, lerp};

/// Pending distance below which the glide stops.
const GLIDE_EPSILON_PX: f64 = 0.5;

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    offset: f64,
    max_offset: f64,
    /// Distance still to travel from user input.
    pending: f64,
    /// Fraction of `pending` consumed per 60 Hz frame.  Higher = snappier.
    glide: f64,
    animation: Option<ScrollAnimation>,
    paused: bool,
}

impl Viewport {
    pub fn new(glide: f64) -> Self {
        Self {
            offset: 0.0,
            max_offset: 0.0,
            pending: 0.0,
            glide: glide.clamp(0.05, 0.95),
            animation: None,
            paused: false,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Update the scroll extent, clamping the offset.
    pub fn set_max_offset(&mut self, max_offset: f64) {
        self.max_offset = max_offset.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset);
    }

    /// User scroll by `delta` pixels (positive = down).  Interrupts a
    /// programmatic scroll, like a wheel does in a browser.
    pub fn scroll_by(&mut self, delta: f64) {
        if self.paused {
            return;
        }
        if let Some(anim) = self.animation.take() {
            // Continue from the target rather than snapping back.
            self.pending = anim.to - self.offset;
        }
        self.pending += delta;
    }

    /// Move instantly without producing motion.
    pub fn jump_to(&mut self, offset: f64) {
        self.animation = None;
        self.pending = 0.0;
        self.offset = offset.clamp(0.0, self.max_offset);
    }

    /// Start an eased scroll to `offset` lasting `duration`.
    pub fn smooth_scroll_to(&mut self, offset: f64, now: Instant, duration: Duration) {
        self.pending = 0.0;
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to: offset.clamp(0.0, self.max_offset),
            started: now,
            duration,
        });
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some() || self.pending != 0.0
    }

    /// Advance by one frame.  Returns `true` if the offset changed.
    pub fn tick(&mut self, now: Instant, dt: Duration) -> bool {
        let before = self.offset;

        if let Some(anim) = self.animation {
            let elapsed = now.saturating_duration_since(anim.started);
            let t = if anim.duration.is_zero() {
                1.0
            } else {
                elapsed.as_secs_f64() / anim.duration.as_secs_f64()
            };
            if t >= 1.0 {
                self.offset = anim.to;
                self.animation = None;
            } else {
                self.offset = lerp(anim.from, anim.to, ease_in_out_cubic(t));
            }
        } else if self.pending != 0.0 {
            let frames = dt.as_secs_f64() * 60.0;
            let consumed = 1.0 - (1.0 - self.glide).powf(frames);
            let mut step = self.pending * consumed;
            if (self.pending - step).abs() < GLIDE_EPSILON_PX {
                step = self.pending;
            }
            self.pending -= step;
            let target = self.offset + step;
            self.offset = target.clamp(0.0, self.max_offset);
            if self.offset != target {
                // Hit an edge; drop the remaining glide.
                self.pending = 0.0;
            }
        }

        self.offset != before
    }
}

impl ScrollControl for Viewport {
    fn pause(&mut self) {
        self.paused = true;
        self.pending = 0.0;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
