//! Sections: z-ordered layers of top-level views.

use crate::{clip::ClipStack, view::ViewId};

/// Identifier for a section within a [`Context`](crate::Context).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub(crate) usize);

/// One z-ordered layer of top-level views.
///
/// A section owns the focus slot, the hover chain and the capture slot for
/// its subtrees, plus the clip stack used during its draw pass. All view
/// references held here are weak: the destruction path sweeps them, so a
/// live section never points at a dead view.
pub struct Section {
    /// Top-level views in z-order; the last entry is topmost and is
    /// hit-tested first.
    pub(crate) roots: Vec<ViewId>,
    /// The view holding keyboard focus, if any. Always a live descendant of
    /// this section.
    pub(crate) focus: Option<ViewId>,
    /// Views under the cursor, ordered root to deepest.
    pub(crate) hover: Vec<ViewId>,
    /// The view that accepted the latest press and receives all pointer
    /// events until release.
    pub(crate) capture: Option<ViewId>,
    /// Clip bookkeeping for this section's draw pass.
    pub(crate) clip: ClipStack,
}

impl Section {
    pub(crate) fn new() -> Self {
        Self {
            roots: Vec::new(),
            focus: None,
            hover: Vec::new(),
            capture: None,
            clip: ClipStack::new(),
        }
    }

    /// Top-level views in z-order, bottom first.
    pub fn roots(&self) -> &[ViewId] {
        &self.roots
    }

    /// The view holding keyboard focus, if any.
    pub fn focus(&self) -> Option<ViewId> {
        self.focus
    }

    /// The current hover chain, ordered root to deepest.
    pub fn hover_chain(&self) -> &[ViewId] {
        &self.hover
    }

    /// The current capture target, if a gesture is in progress.
    pub fn capture(&self) -> Option<ViewId> {
        self.capture
    }

    /// Remove every reference to the given ids. Called by the destruction
    /// path so no weak slot outlives its view.
    pub(crate) fn sweep(&mut self, removed: &[ViewId]) {
        self.roots.retain(|r| !removed.contains(r));
        self.hover.retain(|h| !removed.contains(h));
        if self.focus.is_some_and(|f| removed.contains(&f)) {
            self.focus = None;
        }
        if self.capture.is_some_and(|c| removed.contains(&c)) {
            self.capture = None;
        }
    }
}
