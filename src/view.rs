//! View nodes stored in the arena.

use slotmap::new_key_type;

use crate::{
    geom::{Expanse, Rect},
    layout::LayoutSpec,
    widget::Widget,
};

new_key_type! {
    /// Generation-checked identifier for a view stored in the arena.
    ///
    /// An id held across a handler invocation is re-validated against the
    /// arena before use; once the view is destroyed, lookups with the old id
    /// fail forever. This replaces manual reference counting for code that
    /// must look past a node it is about to operate on.
    pub struct ViewId;
}

/// A node in the retained tree: a rectangular region with a widget slot and
/// adjacency links.
pub struct ViewNode {
    /// Widget behavior. Taken out of the slot while a handler runs so the
    /// handler can mutate the arena; restored afterwards if the node still
    /// exists.
    pub(crate) widget: Option<Box<dyn Widget>>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<ViewId>,
    /// Children in z-order: first drawn first, last hit-tested first.
    pub(crate) children: Vec<ViewId>,

    /// Bounding rect relative to the parent's origin.
    pub(crate) rect: Rect,
    /// Hidden views and their subtrees neither draw nor hit-test.
    pub(crate) visible: bool,
    /// Disabled views and their subtrees are skipped by input routing but
    /// still draw.
    pub(crate) enabled: bool,
    /// Absorb surplus layout space horizontally.
    pub(crate) expand_x: bool,
    /// Absorb surplus layout space vertically.
    pub(crate) expand_y: bool,
    /// Overrides the widget's preferred size when set.
    pub(crate) preferred: Option<Expanse>,
    /// Container behavior: when set, children are arranged by the space
    /// distribution solver.
    pub(crate) layout: Option<LayoutSpec>,
    /// Name for debugging and traces.
    pub(crate) name: String,
}

impl ViewNode {
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let name = widget.name();
        Self {
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            rect: Rect::zero(),
            visible: true,
            enabled: true,
            expand_x: false,
            expand_y: false,
            preferred: None,
            layout: None,
            name,
        }
    }

    /// The node's parent, if any.
    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    /// The node's children in z-order.
    pub fn children(&self) -> &[ViewId] {
        &self.children
    }

    /// Bounding rect relative to the parent's origin.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Is the node visible?
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Is the node enabled for input?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Per-axis expand flags, x then y.
    pub fn expand(&self) -> (bool, bool) {
        (self.expand_x, self.expand_y)
    }

    /// The size this node would choose: the explicit override if set, else
    /// the widget's answer.
    pub fn preferred_size(&self) -> Expanse {
        self.preferred.unwrap_or_else(|| {
            self.widget
                .as_ref()
                .map(|w| w.preferred_size())
                .unwrap_or_default()
        })
    }

    /// Container layout configuration, if this node arranges its children.
    pub fn layout_spec(&self) -> Option<&LayoutSpec> {
        self.layout.as_ref()
    }

    /// Name for debugging and traces.
    pub fn name(&self) -> &str {
        &self.name
    }
}
