//! Motion primitives: springs that smooth scroll-bound values, and easing
//! curves for programmatic scrolls.

/// Damped harmonic spring parameterised like the web animation libraries
/// (stiffness, damping, mass).  Integrated with fixed sub-steps so the
/// result does not depend on the frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpring {
    pub position: f64,
    pub velocity: f64,
    pub target: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

/// Largest integration step (seconds).
const MAX_STEP: f64 = 1.0 / 240.0;

impl MotionSpring {
    pub fn new(stiffness: f64, damping: f64, mass: f64, position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
            mass: mass.max(1e-3),
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let force = -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled(1e-4) {
            self.snap_to_target();
        }
        self.position
    }

    fn snap_to_target(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self, threshold: f64) -> bool {
        (self.position - self.target).abs() < threshold && self.velocity.abs() < threshold
    }
}

/// Cubic ease-in-out on `t ∈ [0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear blend between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_converges_to_target() {
        let mut s = MotionSpring::new(160.0, 26.0, 0.2, 0.0);
        s.set_target(1.0);
        for _ in 0..120 {
            s.tick(1.0 / 60.0);
        }
        assert_eq!(s.position, 1.0);
        assert_eq!(s.velocity, 0.0);
    }

    #[test]
    fn spring_result_is_frame_rate_independent() {
        let mut a = MotionSpring::new(170.0, 28.0, 0.35, 0.82);
        let mut b = a;
        a.set_target(1.08);
        b.set_target(1.08);
        for _ in 0..6 {
            a.tick(1.0 / 60.0);
        }
        b.tick(0.1);
        assert!((a.position - b.position).abs() < 1e-6);
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
    }
}
