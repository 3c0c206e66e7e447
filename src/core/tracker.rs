//! Scroll tracker: offset bookkeeping and direction detection.

/// Last known scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl Direction {
    /// `-1` for up, `+1` for down.
    pub fn sign(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Tracks consecutive scroll samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTracker {
    pub current_offset: f64,
    pub last_offset: f64,
    pub direction: Direction,
    /// Deltas at or below this magnitude do not change direction.
    jitter_px: f64,
}

impl ScrollTracker {
    pub fn new(initial_offset: f64, jitter_px: f64) -> Self {
        Self {
            current_offset: initial_offset,
            last_offset: initial_offset,
            direction: Direction::default(),
            jitter_px: jitter_px.max(0.0),
        }
    }

    /// Record a user-driven sample and update the direction.
    pub fn record(&mut self, offset: f64) -> Direction {
        let delta = offset - self.last_offset;
        if delta.abs() > self.jitter_px {
            self.direction = if delta > 0.0 { Direction::Down } else { Direction::Up };
        }
        self.current_offset = offset;
        self.last_offset = offset;
        self.direction
    }

    /// Record a sample without reading intent from it.  Used while the
    /// controller's own corrective scroll is moving the page.
    pub fn record_passive(&mut self, offset: f64) {
        self.current_offset = offset;
        self.last_offset = offset;
    }
}
