//! Scroll progress: how far a section has travelled through the viewport.
//!
//! A [`ScrollRange`] names two intersections, each a pair of (edge of the
//! tracked section, edge of the viewport).  Progress is `0` at the scroll
//! offset where the first pair meets and `1` where the second pair meets,
//! linear in between.  These functions run every frame: no allocation.

use super::page::SectionRect;

/// Edge of an element, as a fraction of its height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    fn fraction(self) -> f64 {
        match self {
            Edge::Start => 0.0,
            Edge::End => 1.0,
        }
    }
}

/// "Section edge meets viewport edge."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: Edge,
    pub container: Edge,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: Intersection,
    pub end: Intersection,
}

impl ScrollRange {
    /// From the section's top entering at the bottom to its bottom leaving
    /// at the top.
    pub const ENTER_TO_EXIT: ScrollRange = ScrollRange {
        start: Intersection { target: Edge::Start, container: Edge::End },
        end: Intersection { target: Edge::End, container: Edge::Start },
    };

    /// From the section's top pinned at the viewport top to its bottom
    /// leaving at the top.
    pub const PINNED_TO_EXIT: ScrollRange = ScrollRange {
        start: Intersection { target: Edge::Start, container: Edge::Start },
        end: Intersection { target: Edge::End, container: Edge::Start },
    };
}

/// Scroll offset at which `at` holds for a section at `top` of `height`.
fn offset_where(at: Intersection, top: f64, height: f64, viewport_height: f64) -> f64 {
    top + at.target.fraction() * height - at.container.fraction() * viewport_height
}

/// Progress of `rect` through the viewport at `current_offset`, in `[0, 1]`.
///
/// Monotonic non-decreasing in `current_offset`; exactly `0` before the start
/// intersection and exactly `1` past the end one.
pub fn progress_for(
    rect: &SectionRect,
    viewport_height: f64,
    current_offset: f64,
    range: ScrollRange,
) -> f64 {
    let start = offset_where(range.start, rect.top, rect.height, viewport_height);
    let end = offset_where(range.end, rect.top, rect.height, viewport_height);
    let span = end - start;
    if span <= f64::EPSILON {
        return if current_offset >= end { 1.0 } else { 0.0 };
    }
    let p = (current_offset - start) / span;
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Piecewise-linear mapping from progress to an output value.
///
/// Stops must be sorted by input.  Inputs outside the first/last stop clamp
/// to the first/last output.
#[derive(Debug, Clone, Copy)]
pub struct Keyframes<const N: usize> {
    pub inputs: [f64; N],
    pub outputs: [f64; N],
}

impl<const N: usize> Keyframes<N> {
    pub const fn new(inputs: [f64; N], outputs: [f64; N]) -> Self {
        Self { inputs, outputs }
    }

    pub fn sample(&self, progress: f64) -> f64 {
        let (inputs, outputs) = (&self.inputs[..], &self.outputs[..]);
        let (Some(&first_in), Some(&first_out), Some(&last_out)) =
            (inputs.first(), outputs.first(), outputs.last())
        else {
            return 0.0;
        };
        if progress <= first_in {
            return first_out;
        }
        for i in 1..inputs.len() {
            if progress <= inputs[i] {
                let (x0, x1) = (inputs[i - 1], inputs[i]);
                let (y0, y1) = (outputs[i - 1], outputs[i]);
                if x1 - x0 <= f64::EPSILON {
                    return y1;
                }
                let t = (progress - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::SectionKind;

    fn rect(top: f64, height: f64) -> SectionRect {
        SectionRect {
            index: 0,
            kind: SectionKind::Hero,
            top,
            height,
            snap_point: true,
        }
    }

    #[test]
    fn enter_to_exit_spans_two_viewports_for_full_height_section() {
        let r = rect(1600.0, 800.0);
        let range = ScrollRange::ENTER_TO_EXIT;
        assert_eq!(progress_for(&r, 800.0, 800.0, range), 0.0);
        assert_eq!(progress_for(&r, 800.0, 1600.0, range), 0.5);
        assert_eq!(progress_for(&r, 800.0, 2400.0, range), 1.0);
    }

    #[test]
    fn clamped_outside_transit() {
        let r = rect(1600.0, 800.0);
        let range = ScrollRange::ENTER_TO_EXIT;
        assert_eq!(progress_for(&r, 800.0, 0.0, range), 0.0);
        assert_eq!(progress_for(&r, 800.0, 799.0, range), 0.0);
        assert_eq!(progress_for(&r, 800.0, 2401.0, range), 1.0);
        assert_eq!(progress_for(&r, 800.0, 1e9, range), 1.0);
    }

    #[test]
    fn monotonic_while_transiting() {
        let r = rect(800.0, 800.0);
        for range in [ScrollRange::ENTER_TO_EXIT, ScrollRange::PINNED_TO_EXIT] {
            let mut prev = 0.0;
            let mut offset = -100.0;
            while offset < 2000.0 {
                let p = progress_for(&r, 800.0, offset, range);
                assert!(p >= prev, "{p} < {prev} at {offset}");
                assert!((0.0..=1.0).contains(&p));
                prev = p;
                offset += 7.3;
            }
        }
    }

    #[test]
    fn pinned_range_starts_at_section_top() {
        let r = rect(800.0, 800.0);
        let range = ScrollRange::PINNED_TO_EXIT;
        assert_eq!(progress_for(&r, 800.0, 800.0, range), 0.0);
        assert_eq!(progress_for(&r, 800.0, 1200.0, range), 0.5);
    }

    #[test]
    fn zero_height_section_steps() {
        let r = rect(500.0, 0.0);
        let range = ScrollRange::PINNED_TO_EXIT;
        assert_eq!(progress_for(&r, 800.0, 499.0, range), 0.0);
        assert_eq!(progress_for(&r, 800.0, 500.0, range), 1.0);
    }

    #[test]
    fn keyframes_interpolate_and_clamp() {
        let k = Keyframes::new([0.0, 0.16, 0.92, 1.0], [1.0, 1.0, 0.96, 0.92]);
        assert_eq!(k.sample(-1.0), 1.0);
        assert_eq!(k.sample(0.1), 1.0);
        assert!((k.sample(0.96) - 0.94).abs() < 1e-9);
        assert_eq!(k.sample(2.0), 0.92);

        let y = Keyframes::new([0.1, 0.4], [100.0, 0.0]);
        assert!((y.sample(0.25) - 50.0).abs() < 1e-9);
    }
}
