//! Nested clip-region bookkeeping for the draw pass.

use tracing::warn;

use crate::geom::Rect;

/// One active clip entry: the visible region and the stencil nesting depth
/// at which it was pushed.
///
/// The depth is used by drawing backends as a stencil comparison value for
/// rounded or irregular silhouettes that an axis-aligned rect alone cannot
/// express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRegion {
    /// The effective visible rect, in screen coordinates.
    pub rect: Rect,
    /// Stencil nesting depth; the root push is depth 1.
    pub depth: u32,
}

/// A stack of clip regions with strictly paired push/pop.
///
/// Each push intersects with the currently active region, so nesting can
/// only shrink the visible region, never grow it. Depth always equals the
/// number of unmatched pushes and is never negative.
#[derive(Debug, Default)]
pub struct ClipStack {
    regions: Vec<ClipRegion>,
}

impl ClipStack {
    /// An empty stack with no active clip.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Intersect `rect` with the active region and make the result current.
    /// A rect that falls entirely outside the active region produces an
    /// empty region at the clamped position; drawing through it is fully
    /// clipped but the push is still counted.
    pub fn push(&mut self, rect: Rect) -> ClipRegion {
        let effective = match self.regions.last() {
            Some(active) => active
                .rect
                .intersect(&rect)
                .unwrap_or_else(|| Rect::new(rect.x, rect.y, 0, 0)),
            None => rect,
        };
        let region = ClipRegion {
            rect: effective,
            depth: self.regions.len() as u32 + 1,
        };
        self.regions.push(region);
        region
    }

    /// Restore the region active before the matching push. Popping an empty
    /// stack is a defensive no-op: this runs inside the per-frame draw pass
    /// where a panic is unrecoverable.
    pub fn pop(&mut self) {
        if self.regions.pop().is_none() {
            debug_assert!(false, "unmatched clip pop");
            warn!("unmatched clip pop");
        }
    }

    /// The active region, if any clip is in effect.
    pub fn current(&self) -> Option<&ClipRegion> {
        self.regions.last()
    }

    /// The stencil nesting depth, equal to the number of unmatched pushes.
    pub fn depth(&self) -> u32 {
        self.regions.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_narrows() {
        let mut cs = ClipStack::new();
        let r1 = cs.push(Rect::new(0, 0, 100, 100));
        assert_eq!(r1.rect, Rect::new(0, 0, 100, 100));
        assert_eq!(r1.depth, 1);

        let r2 = cs.push(Rect::new(50, 50, 100, 100));
        assert_eq!(r2.rect, Rect::new(50, 50, 50, 50));
        assert_eq!(r2.depth, 2);

        // A wider push cannot widen the effective region.
        let r3 = cs.push(Rect::new(0, 0, 1000, 1000));
        assert_eq!(r3.rect, Rect::new(50, 50, 50, 50));
        assert_eq!(r3.depth, 3);

        cs.pop();
        assert_eq!(cs.current().unwrap().rect, Rect::new(50, 50, 50, 50));
        cs.pop();
        assert_eq!(cs.current().unwrap().rect, Rect::new(0, 0, 100, 100));
        cs.pop();
        assert_eq!(cs.current(), None);
    }

    #[test]
    fn disjoint_push_clips_everything() {
        let mut cs = ClipStack::new();
        cs.push(Rect::new(0, 0, 10, 10));
        let r = cs.push(Rect::new(100, 100, 10, 10));
        assert!(r.rect.is_zero());
        assert_eq!(cs.depth(), 2);
    }

    #[test]
    fn depth_tracks_push_pop_pairing() {
        let mut cs = ClipStack::new();
        assert_eq!(cs.depth(), 0);
        for i in 1..=5 {
            cs.push(Rect::new(0, 0, 100, 100));
            assert_eq!(cs.depth(), i);
        }
        for i in (0..5).rev() {
            cs.pop();
            assert_eq!(cs.depth(), i);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn unmatched_pop_is_a_noop() {
        let mut cs = ClipStack::new();
        cs.pop();
        assert_eq!(cs.depth(), 0);
    }
}
