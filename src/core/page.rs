//! The page: an ordered stack of sections laid out top to bottom.
//!
//! Layout is recomputed from the viewport height whenever it changes.  Each
//! section is either one full viewport tall or a fraction of it.

use super::portfolio::Portfolio;

/// What a section displays.  Rendering lives in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    SelectedWorks,
    /// Index into [`Portfolio::projects`].
    Project(usize),
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionHeight {
    Viewport,
    /// Fraction of the viewport height, e.g. `0.6` for the footer.
    Fraction(f64),
}

impl SectionHeight {
    pub fn resolve(self, viewport_height: f64) -> f64 {
        match self {
            SectionHeight::Viewport => viewport_height,
            SectionHeight::Fraction(f) => viewport_height * f.max(0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub height: SectionHeight,
    /// Whether this section registers a snap anchor.
    pub snap_point: bool,
}

/// Geometry of one laid-out section, in document pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub index: usize,
    pub kind: SectionKind,
    pub top: f64,
    pub height: f64,
    pub snap_point: bool,
}

impl SectionRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub sections: Vec<SectionRect>,
    pub viewport_height: f64,
}

impl PageLayout {
    pub fn total_height(&self) -> f64 {
        self.sections.last().map_or(0.0, SectionRect::bottom)
    }

    /// Largest reachable scroll offset.
    pub fn max_offset(&self) -> f64 {
        (self.total_height() - self.viewport_height).max(0.0)
    }

    /// The section registered as the `anchor`-th snap point.
    pub fn snap_section(&self, anchor: usize) -> Option<&SectionRect> {
        self.sections.iter().filter(|s| s.snap_point).nth(anchor)
    }

    /// Sections intersecting `[offset, offset + viewport_height)`.
    pub fn visible(&self, offset: f64) -> impl Iterator<Item = &SectionRect> {
        let bottom = offset + self.viewport_height;
        self.sections
            .iter()
            .filter(move |s| s.bottom() > offset && s.top < bottom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub sections: Vec<Section>,
}

impl Page {
    /// Hero, the "Selected Works" heading, one card per project, footer.
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let full = |kind| Section {
            kind,
            height: SectionHeight::Viewport,
            snap_point: true,
        };
        let mut sections = vec![full(SectionKind::Hero), full(SectionKind::SelectedWorks)];
        sections.extend((0..portfolio.projects.len()).map(|i| full(SectionKind::Project(i))));
        sections.push(Section {
            kind: SectionKind::Footer,
            height: SectionHeight::Fraction(0.6),
            snap_point: true,
        });
        Self { sections }
    }

    pub fn layout(&self, viewport_height: f64) -> PageLayout {
        let mut top = 0.0;
        let sections = self
            .sections
            .iter()
            .enumerate()
            .map(|(index, s)| {
                let height = s.height.resolve(viewport_height);
                let rect = SectionRect {
                    index,
                    kind: s.kind,
                    top,
                    height,
                    snap_point: s.snap_point,
                };
                top += height;
                rect
            })
            .collect();
        PageLayout {
            sections,
            viewport_height,
        }
    }
}
