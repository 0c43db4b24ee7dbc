//! The view arena: node storage and structural mutation.
//!
//! Nodes are stored in a slotmap and addressed by generation-checked
//! [`ViewId`]s. Sibling order lives in each parent's child vector; the
//! first/last-child and prev/next-sibling accessors are derived from it, so a
//! node's child-list membership and its parent pointer cannot disagree.
//!
//! Any walk that invokes handlers snapshots the id list it iterates and
//! re-validates each id against the arena before visiting it. A handler is
//! free to delete arbitrary nodes, including the upcoming sibling; the stale
//! id simply fails lookup and is skipped.

use slotmap::SlotMap;

use crate::{
    error::{Error, Result},
    geom::{Point, Rect},
    view::{ViewId, ViewNode},
    widget::Widget,
};

/// Storage and structural operations for a tree of views.
pub struct Arena {
    nodes: SlotMap<ViewId, ViewNode>,
}

impl Arena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Add a widget to the arena as a detached root and return its id.
    pub fn insert(&mut self, widget: impl Into<Box<dyn Widget>>) -> ViewId {
        self.nodes.insert(ViewNode::new(widget.into()))
    }

    /// Is the id live?
    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A reference to a node.
    pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ViewId) -> Option<&mut ViewNode> {
        self.nodes.get_mut(id)
    }

    /// Append `child` to the end of `parent`'s child list.
    pub fn push_back(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.check_link(parent, child)?;
        self.unlink(child);
        let node = self.nodes.get_mut(parent).ok_or(Error::NoSuchView)?;
        node.children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Insert `child` immediately before `sibling` in its parent's child
    /// list.
    pub fn insert_before(&mut self, sibling: ViewId, child: ViewId) -> Result<()> {
        self.insert_at(sibling, child, 0)
    }

    /// Insert `child` immediately after `sibling` in its parent's child
    /// list.
    pub fn insert_after(&mut self, sibling: ViewId, child: ViewId) -> Result<()> {
        self.insert_at(sibling, child, 1)
    }

    fn insert_at(&mut self, sibling: ViewId, child: ViewId, offset: usize) -> Result<()> {
        if sibling == child {
            return Err(Error::Cycle(format!(
                "cannot insert {} beside itself",
                self.nodes.get(child).ok_or(Error::NoSuchView)?.name
            )));
        }
        let parent = self
            .nodes
            .get(sibling)
            .ok_or(Error::NoSuchView)?
            .parent
            .ok_or(Error::NoSuchView)?;
        self.check_link(parent, child)?;
        // Unlink first: if the child already sits in the same list, indices
        // computed before the unlink would be stale.
        self.unlink(child);
        let node = self.nodes.get_mut(parent).ok_or(Error::NoSuchView)?;
        let idx = node
            .children
            .iter()
            .position(|c| *c == sibling)
            .ok_or_else(|| Error::Internal("sibling missing from parent list".into()))?;
        node.children.insert(idx + offset, child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Validate an attachment of `child` under `parent`.
    fn check_link(&self, parent: ViewId, child: ViewId) -> Result<()> {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return Err(Error::NoSuchView);
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::Cycle(format!(
                "cannot re-parent {} under its own descendant",
                self.nodes[child].name
            )));
        }
        Ok(())
    }

    /// Remove `child` from its parent's child list without freeing it. The
    /// node becomes a detached root until re-attached or destroyed.
    pub fn detach(&mut self, child: ViewId) -> Result<()> {
        if !self.nodes.contains_key(child) {
            return Err(Error::NoSuchView);
        }
        self.unlink(child);
        Ok(())
    }

    fn unlink(&mut self, child: ViewId) {
        let Some(parent) = self.nodes.get(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(pn) = self.nodes.get_mut(parent) {
            pn.children.retain(|c| *c != child);
        }
        self.nodes[child].parent = None;
    }

    /// Detach `id` and remove it and all its descendants from the arena.
    /// Destroying an id that is already gone is a no-op. Returns the removed
    /// ids so that weak references (focus slots, hover chains, capture) can
    /// be swept.
    pub fn destroy(&mut self, id: ViewId) -> Vec<ViewId> {
        if !self.nodes.contains_key(id) {
            return Vec::new();
        }
        self.unlink(id);
        let removed = self.subtree_ids(id);
        for rid in &removed {
            self.nodes.remove(*rid);
        }
        removed
    }

    /// The first child of a node.
    pub fn first_child(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id)?.children.first().copied()
    }

    /// The last child of a node.
    pub fn last_child(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(id)?.children.last().copied()
    }

    /// The sibling after `id` in its parent's child list.
    pub fn next_sibling(&self, id: ViewId) -> Option<ViewId> {
        let parent = self.nodes.get(id)?.parent?;
        let siblings = &self.nodes.get(parent)?.children;
        let idx = siblings.iter().position(|c| *c == id)?;
        siblings.get(idx + 1).copied()
    }

    /// The sibling before `id` in its parent's child list.
    pub fn prev_sibling(&self, id: ViewId) -> Option<ViewId> {
        let parent = self.nodes.get(id)?.parent?;
        let siblings = &self.nodes.get(parent)?.children;
        let idx = siblings.iter().position(|c| *c == id)?;
        idx.checked_sub(1).and_then(|i| siblings.get(i)).copied()
    }

    /// Is `ancestor` a strict ancestor of `node`?
    pub fn is_ancestor(&self, ancestor: ViewId, node: ViewId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// The ids of `id` and all its descendants, preorder.
    pub fn subtree_ids(&self, id: ViewId) -> Vec<ViewId> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            ids.push(current);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        ids
    }

    /// The node's rect in screen coordinates, accumulated by translation
    /// through its ancestors. Roots are positioned directly in screen space.
    pub fn screen_rect(&self, id: ViewId) -> Option<Rect> {
        let mut rect = self.nodes.get(id)?.rect;
        let mut current = self.nodes.get(id)?.parent;
        while let Some(pid) = current {
            let parent = self.nodes.get(pid)?;
            rect = rect.translate(parent.rect.tl());
            current = parent.parent;
        }
        Some(rect)
    }

    /// Does the view's screen rect contain the point?
    pub fn view_contains(&self, id: ViewId, p: Point) -> bool {
        self.screen_rect(id)
            .is_some_and(|r| r.contains_point(p))
    }

    pub(crate) fn take_widget(&mut self, id: ViewId) -> Option<Box<dyn Widget>> {
        self.nodes.get_mut(id)?.widget.take()
    }

    pub(crate) fn restore_widget(&mut self, id: ViewId, widget: Box<dyn Widget>) {
        // The node may have been destroyed, or even replaced, while its
        // handler ran; in that case the widget is dropped here.
        if let Some(node) = self.nodes.get_mut(id)
            && node.widget.is_none()
        {
            node.widget = Some(widget);
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, geom::Rect};

    struct Nil;
    impl Widget for Nil {}

    fn arena_with(n: usize) -> (Arena, Vec<ViewId>) {
        let mut a = Arena::new();
        let ids = (0..n).map(|_| a.insert(Nil)).collect();
        (a, ids)
    }

    #[test]
    fn linking() -> Result<()> {
        let (mut a, v) = arena_with(4);
        a.push_back(v[0], v[1])?;
        a.push_back(v[0], v[3])?;
        a.insert_before(v[3], v[2])?;

        assert_eq!(a.get(v[0]).unwrap().children(), &[v[1], v[2], v[3]]);
        assert_eq!(a.first_child(v[0]), Some(v[1]));
        assert_eq!(a.last_child(v[0]), Some(v[3]));
        assert_eq!(a.next_sibling(v[1]), Some(v[2]));
        assert_eq!(a.prev_sibling(v[3]), Some(v[2]));
        assert_eq!(a.prev_sibling(v[1]), None);
        assert_eq!(a.next_sibling(v[3]), None);
        assert_eq!(a.get(v[2]).unwrap().parent(), Some(v[0]));
        Ok(())
    }

    #[test]
    fn insert_after_reorders_existing_sibling() -> Result<()> {
        let (mut a, v) = arena_with(3);
        a.push_back(v[0], v[1])?;
        a.push_back(v[0], v[2])?;
        // Move v[1] after v[2] within the same list.
        a.insert_after(v[2], v[1])?;
        assert_eq!(a.get(v[0]).unwrap().children(), &[v[2], v[1]]);
        Ok(())
    }

    #[test]
    fn cycle_rejected_without_corruption() -> Result<()> {
        let (mut a, v) = arena_with(3);
        a.push_back(v[0], v[1])?;
        a.push_back(v[1], v[2])?;

        assert!(matches!(a.push_back(v[2], v[0]), Err(Error::Cycle(_))));
        assert!(matches!(a.push_back(v[0], v[0]), Err(Error::Cycle(_))));

        // Both subtrees are intact.
        assert_eq!(a.get(v[0]).unwrap().children(), &[v[1]]);
        assert_eq!(a.get(v[1]).unwrap().children(), &[v[2]]);
        assert_eq!(a.get(v[0]).unwrap().parent(), None);
        Ok(())
    }

    #[test]
    fn self_insert_rejected_without_corruption() -> Result<()> {
        let (mut a, v) = arena_with(2);
        a.push_back(v[0], v[1])?;

        assert!(matches!(a.insert_before(v[1], v[1]), Err(Error::Cycle(_))));
        assert!(matches!(a.insert_after(v[1], v[1]), Err(Error::Cycle(_))));

        // The failed calls left the child linked where it was.
        assert_eq!(a.get(v[0]).unwrap().children(), &[v[1]]);
        assert_eq!(a.get(v[1]).unwrap().parent(), Some(v[0]));
        Ok(())
    }

    #[test]
    fn detach_makes_node_a_root() -> Result<()> {
        let (mut a, v) = arena_with(3);
        a.push_back(v[0], v[1])?;
        a.push_back(v[1], v[2])?;

        a.detach(v[1])?;
        assert_eq!(a.get(v[0]).unwrap().children(), &[] as &[ViewId]);
        assert_eq!(a.get(v[1]).unwrap().parent(), None);
        // The detached subtree is still alive and re-attachable.
        assert!(a.contains(v[2]));
        a.push_back(v[0], v[1])?;
        assert_eq!(a.get(v[2]).unwrap().parent(), Some(v[1]));
        Ok(())
    }

    #[test]
    fn destroy_removes_subtree_and_is_idempotent() -> Result<()> {
        let (mut a, v) = arena_with(4);
        a.push_back(v[0], v[1])?;
        a.push_back(v[1], v[2])?;
        a.push_back(v[0], v[3])?;

        let removed = a.destroy(v[1]);
        assert_eq!(removed, vec![v[1], v[2]]);
        assert!(!a.contains(v[1]));
        assert!(!a.contains(v[2]));
        assert_eq!(a.get(v[0]).unwrap().children(), &[v[3]]);

        // Stale ids fail lookup forever, and destroy is a no-op.
        assert!(a.destroy(v[1]).is_empty());
        assert_eq!(a.len(), 2);
        Ok(())
    }

    #[test]
    fn screen_rect_accumulates_translation() -> Result<()> {
        let (mut a, v) = arena_with(3);
        a.push_back(v[0], v[1])?;
        a.push_back(v[1], v[2])?;
        a.get_mut(v[0]).unwrap().rect = Rect::new(10, 10, 100, 100);
        a.get_mut(v[1]).unwrap().rect = Rect::new(5, 5, 50, 50);
        a.get_mut(v[2]).unwrap().rect = Rect::new(1, 2, 10, 10);

        assert_eq!(a.screen_rect(v[2]), Some(Rect::new(16, 17, 10, 10)));
        assert!(a.view_contains(v[2], (16, 17).into()));
        assert!(!a.view_contains(v[2], (15, 17).into()));
        Ok(())
    }
}
