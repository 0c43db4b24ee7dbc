//! The draw boundary between the tree and the host rendering collaborator.

use crate::{clip::ClipRegion, geom::Rect, view::ViewId};

/// Implemented by the host's rendering collaborator.
///
/// The core never interprets pixels; it sequences draw handlers
/// parent-before-children and keeps the backend's clip state in step with
/// the [`ClipStack`](crate::ClipStack). Shader binding, texture upload and
/// glyph drawing all happen behind this trait.
pub trait DrawBackend {
    /// Update the active clip region. Called with `Some` before each node's
    /// draw handler and `None` once a draw pass completes. The region's
    /// depth is the stencil comparison value for rounded silhouettes.
    fn set_clip(&mut self, region: Option<&ClipRegion>);

    /// Fill a rectangle, in screen coordinates, with an RGBA color.
    fn fill_rect(&mut self, rect: Rect, rgba: [u8; 4]);
}

/// Per-node state handed to a widget's draw handler.
///
/// This is the explicit resource context for drawing: no global state is
/// consulted. The widget issues backend calls through `backend`, constrained
/// by `clip`.
pub struct DrawContext<'a> {
    /// The host rendering collaborator.
    pub backend: &'a mut dyn DrawBackend,
    /// The view being drawn.
    pub view: ViewId,
    /// The view's rect in screen coordinates.
    pub area: Rect,
    /// The active clip region for this view.
    pub clip: ClipRegion,
}

impl DrawContext<'_> {
    /// Fill a rect given in the view's local coordinates.
    pub fn fill_local(&mut self, rect: Rect, rgba: [u8; 4]) {
        self.backend.fill_rect(rect.translate(self.area.tl()), rgba);
    }
}
