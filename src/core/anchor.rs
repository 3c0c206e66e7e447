//! Snap registry: the ordered list of snap targets.
//!
//! Anchors are derived from the laid-out page, one per section marked as a
//! snap point, sorted by document offset.  An empty registry is valid and
//! simply means "inactive": the controller attempts no correction.

use super::page::PageLayout;

/// A registered snap target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Position in the registry (0-based, document order).
    pub index: usize,
    /// Offset of the section's top edge from the top of the document.
    pub offset_top: f64,
}

/// Enumerate snap anchors in ascending offset order.
pub fn build_anchors(layout: &PageLayout) -> Vec<Anchor> {
    let mut offsets: Vec<f64> = layout
        .sections
        .iter()
        .filter(|s| s.snap_point)
        .map(|s| s.top)
        .collect();
    // Layout is already in document order; the sort only guards against
    // callers feeding hand-built layouts.
    offsets.sort_by(|a, b| a.total_cmp(b));
    offsets
        .into_iter()
        .enumerate()
        .map(|(index, offset_top)| Anchor { index, offset_top })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct AnchorRegistry {
    anchors: Vec<Anchor>,
    built: bool,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from `layout` if its snap targets differ from the current
    /// ones (a resize, a section added or removed, or a snap flag toggled).
    /// Returns `true` when the anchors were rebuilt.
    pub fn refresh(&mut self, layout: &PageLayout) -> bool {
        let anchors = build_anchors(layout);
        if self.built && anchors == self.anchors {
            return false;
        }
        self.anchors = anchors;
        self.built = true;
        tracing::debug!(
            anchors = self.anchors.len(),
            viewport = layout.viewport_height,
            "snap registry rebuilt"
        );
        true
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Anchor> {
        self.anchors.get(index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.anchors.len().checked_sub(1)
    }
}
