//! Scroll-bound animation values for each section.
//!
//! Every frame the host calls [`MotionBindings::update`] with the current
//! offset.  Progress is recomputed for every section (not only at snap
//! events), mapped through keyframes and, where the page wants softness,
//! smoothed by a spring.  The UI reads the resulting [`SectionVisual`]s.

use super::motion::MotionSpring;
use super::page::{PageLayout, SectionKind, SectionRect};
use super::progress::{progress_for, Keyframes, ScrollRange};

// ── card wrapper: pinned at the top, fades and shrinks a touch on exit ──
const WRAPPER_OPACITY: Keyframes<4> = Keyframes::new([0.0, 0.16, 0.92, 1.0], [1.0, 1.0, 0.96, 0.92]);
const WRAPPER_SCALE: Keyframes<4> = Keyframes::new([0.0, 0.16, 0.92, 1.0], [1.0, 1.0, 0.992, 0.985]);

// ── "Selected Works" heading: grows in, overshoots, settles ──
const HEADING_SCALE: Keyframes<3> = Keyframes::new([0.0, 0.45, 0.72], [0.82, 1.08, 1.0]);
const HEADING_OPACITY: Keyframes<2> = Keyframes::new([0.06, 0.35], [0.0, 1.0]);
const HEADING_Y: Keyframes<2> = Keyframes::new([0.0, 0.45], [70.0, 0.0]);
const HEADING_BLUR: Keyframes<2> = Keyframes::new([0.0, 0.4], [14.0, 0.0]);

// ── project card contents ──
const IMAGE_SCALE: Keyframes<2> = Keyframes::new([0.0, 1.0], [0.8, 1.0]);
const IMAGE_BLUR: Keyframes<2> = Keyframes::new([0.0, 0.5], [12.0, 0.0]);
const TITLE_OPACITY: Keyframes<2> = Keyframes::new([0.0, 0.4], [0.6, 1.0]);
const INFO_OPACITY: Keyframes<2> = Keyframes::new([0.1, 0.4], [0.0, 1.0]);
const INFO_Y: Keyframes<2> = Keyframes::new([0.1, 0.4], [100.0, 0.0]);
const SMALL_OPACITY: Keyframes<2> = Keyframes::new([0.2, 0.5], [0.0, 1.0]);
const SMALL_Y: Keyframes<2> = Keyframes::new([0.2, 0.5], [100.0, 0.0]);

/// Values for the inner parts of a project card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub image_scale: f64,
    pub image_blur: f64,
    pub title_opacity: f64,
    pub info_opacity: f64,
    pub info_y: f64,
    pub small_opacity: f64,
    pub small_y: f64,
}

impl CardFrame {
    fn at(progress: f64) -> Self {
        Self {
            image_scale: IMAGE_SCALE.sample(progress),
            image_blur: IMAGE_BLUR.sample(progress),
            title_opacity: TITLE_OPACITY.sample(progress),
            info_opacity: INFO_OPACITY.sample(progress),
            info_y: INFO_Y.sample(progress),
            small_opacity: SMALL_OPACITY.sample(progress),
            small_y: SMALL_Y.sample(progress),
        }
    }
}

/// What the renderer applies to a whole section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionVisual {
    pub opacity: f64,
    pub scale: f64,
    /// Downward shift in document pixels.
    pub y_offset: f64,
    /// Blur radius in pixels; `0` is sharp.
    pub blur: f64,
    pub card: Option<CardFrame>,
}

impl Default for SectionVisual {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            y_offset: 0.0,
            blur: 0.0,
            card: None,
        }
    }
}

#[derive(Debug, Clone)]
enum SectionMotion {
    Static,
    Heading {
        scale: MotionSpring,
        opacity: MotionSpring,
        y: MotionSpring,
        blur: f64,
    },
    Card {
        opacity: MotionSpring,
        scale: MotionSpring,
        frame: CardFrame,
    },
}

impl SectionMotion {
    fn for_section(rect: &SectionRect, viewport_height: f64, offset: f64) -> Self {
        match rect.kind {
            SectionKind::SelectedWorks => {
                let p = progress_for(rect, viewport_height, offset, ScrollRange::ENTER_TO_EXIT);
                SectionMotion::Heading {
                    scale: MotionSpring::new(170.0, 28.0, 0.35, HEADING_SCALE.sample(p)),
                    opacity: MotionSpring::new(150.0, 24.0, 0.32, HEADING_OPACITY.sample(p)),
                    y: MotionSpring::new(150.0, 24.0, 0.32, HEADING_Y.sample(p)),
                    blur: HEADING_BLUR.sample(p),
                }
            }
            SectionKind::Project(_) => {
                let p = progress_for(rect, viewport_height, offset, ScrollRange::PINNED_TO_EXIT);
                let enter = progress_for(rect, viewport_height, offset, ScrollRange::ENTER_TO_EXIT);
                SectionMotion::Card {
                    opacity: MotionSpring::new(160.0, 26.0, 0.2, WRAPPER_OPACITY.sample(p)),
                    scale: MotionSpring::new(160.0, 26.0, 0.22, WRAPPER_SCALE.sample(p)),
                    frame: CardFrame::at(enter),
                }
            }
            SectionKind::Hero | SectionKind::Footer => SectionMotion::Static,
        }
    }

    fn update(&mut self, rect: &SectionRect, viewport_height: f64, offset: f64, dt: f64) {
        match self {
            SectionMotion::Static => {}
            SectionMotion::Heading { scale, opacity, y, blur } => {
                let p = progress_for(rect, viewport_height, offset, ScrollRange::ENTER_TO_EXIT);
                scale.set_target(HEADING_SCALE.sample(p));
                opacity.set_target(HEADING_OPACITY.sample(p));
                y.set_target(HEADING_Y.sample(p));
                scale.tick(dt);
                opacity.tick(dt);
                y.tick(dt);
                *blur = HEADING_BLUR.sample(p);
            }
            SectionMotion::Card { opacity, scale, frame } => {
                let p = progress_for(rect, viewport_height, offset, ScrollRange::PINNED_TO_EXIT);
                opacity.set_target(WRAPPER_OPACITY.sample(p));
                scale.set_target(WRAPPER_SCALE.sample(p));
                opacity.tick(dt);
                scale.tick(dt);
                let enter = progress_for(rect, viewport_height, offset, ScrollRange::ENTER_TO_EXIT);
                *frame = CardFrame::at(enter);
            }
        }
    }

    fn visual(&self) -> SectionVisual {
        match self {
            SectionMotion::Static => SectionVisual::default(),
            SectionMotion::Heading { scale, opacity, y, blur } => SectionVisual {
                opacity: opacity.position.clamp(0.0, 1.0),
                scale: scale.position,
                y_offset: y.position,
                blur: *blur,
                card: None,
            },
            SectionMotion::Card { opacity, scale, frame } => SectionVisual {
                opacity: opacity.position.clamp(0.0, 1.0),
                scale: scale.position,
                y_offset: 0.0,
                blur: 0.0,
                card: Some(*frame),
            },
        }
    }

    fn is_animating(&self) -> bool {
        const EPS: f64 = 1e-3;
        match self {
            SectionMotion::Static => false,
            SectionMotion::Heading { scale, opacity, y, .. } => {
                !(scale.is_settled(EPS) && opacity.is_settled(EPS) && y.is_settled(EPS))
            }
            SectionMotion::Card { opacity, scale, .. } => {
                !(opacity.is_settled(EPS) && scale.is_settled(EPS))
            }
        }
    }
}

/// Per-section animation state, index-aligned with the page layout.
#[derive(Debug, Clone, Default)]
pub struct MotionBindings {
    sections: Vec<SectionMotion>,
}

impl MotionBindings {
    /// Start every binding at rest for the given offset.
    pub fn new(layout: &PageLayout, offset: f64) -> Self {
        Self {
            sections: layout
                .sections
                .iter()
                .map(|r| SectionMotion::for_section(r, layout.viewport_height, offset))
                .collect(),
        }
    }

    /// Recompute targets for `offset` and advance springs by `dt` seconds.
    pub fn update(&mut self, layout: &PageLayout, offset: f64, dt: f64) {
        if self.sections.len() != layout.sections.len() {
            *self = Self::new(layout, offset);
            return;
        }
        for (motion, rect) in self.sections.iter_mut().zip(&layout.sections) {
            motion.update(rect, layout.viewport_height, offset, dt);
        }
    }

    pub fn visual(&self, section: usize) -> SectionVisual {
        self.sections
            .get(section)
            .map_or_else(SectionVisual::default, SectionMotion::visual)
    }

    /// `true` while any spring is still moving.
    pub fn is_animating(&self) -> bool {
        self.sections.iter().any(SectionMotion::is_animating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::Page;
    use crate::core::portfolio::Portfolio;

    fn layout() -> PageLayout {
        Page::from_portfolio(&Portfolio::default()).layout(800.0)
    }

    fn settle(b: &mut MotionBindings, layout: &PageLayout, offset: f64) {
        for _ in 0..240 {
            b.update(layout, offset, 1.0 / 60.0);
        }
    }

    #[test]
    fn heading_is_hidden_and_blurred_before_it_enters() {
        let layout = layout();
        let b = MotionBindings::new(&layout, 0.0);
        let v = b.visual(1);
        assert_eq!(v.opacity, 0.0);
        assert_eq!(v.scale, 0.82);
        assert_eq!(v.y_offset, 70.0);
        assert_eq!(v.blur, 14.0);
    }

    #[test]
    fn heading_settles_sharp_when_snapped() {
        let layout = layout();
        let mut b = MotionBindings::new(&layout, 0.0);
        settle(&mut b, &layout, 800.0);
        let v = b.visual(1);
        // Progress 0.5: past every opacity/blur/y stop, between scale stops.
        assert_eq!(v.opacity, 1.0);
        assert_eq!(v.blur, 0.0);
        assert_eq!(v.y_offset, 0.0);
        assert!(v.scale > 1.0 && v.scale < 1.08);
        assert!(!b.is_animating());
    }

    #[test]
    fn card_contents_revealed_when_card_is_snapped() {
        let layout = layout();
        let mut b = MotionBindings::new(&layout, 0.0);
        settle(&mut b, &layout, 1600.0);
        let v = b.visual(2);
        let card = v.card.expect("project section has a card frame");
        assert_eq!(card.info_opacity, 1.0);
        assert_eq!(card.small_opacity, 1.0);
        assert_eq!(card.image_blur, 0.0);
        assert!((card.image_scale - 0.9).abs() < 1e-9);
        assert_eq!(v.opacity, 1.0);
    }

    #[test]
    fn card_wrapper_dims_as_it_leaves() {
        let layout = layout();
        let mut b = MotionBindings::new(&layout, 1600.0);
        settle(&mut b, &layout, 2400.0);
        let v = b.visual(2);
        assert!((v.opacity - 0.92).abs() < 1e-3);
        assert!((v.scale - 0.985).abs() < 1e-3);
    }

    #[test]
    fn static_sections_and_unknown_indices_use_defaults() {
        let b = MotionBindings::new(&layout(), 300.0);
        assert_eq!(b.visual(0), SectionVisual::default());
        assert_eq!(b.visual(99), SectionVisual::default());
    }

    #[test]
    fn section_count_change_rebuilds() {
        let mut page = Page::from_portfolio(&Portfolio::default());
        let mut b = MotionBindings::new(&page.layout(800.0), 0.0);
        page.sections.truncate(3);
        b.update(&page.layout(800.0), 0.0, 0.016);
        assert_eq!(b.visual(3), SectionVisual::default());
    }
}
