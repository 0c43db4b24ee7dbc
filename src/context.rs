//! The context: root of the tree, input router, and draw driver.

use std::time::Duration;

use tracing::trace;

use crate::{
    arena::Arena,
    error::{Error, Result},
    event::{Event, key, pointer},
    geom::{Expanse, Point, Rect},
    layout::{self, ChildConstraint, LayoutSpec},
    render::{DrawBackend, DrawContext},
    section::{Section, SectionId},
    view::{ViewId, ViewNode},
    widget::{EventOutcome, Widget},
};

/// Payload for the recursive pointer dispatch walk.
#[derive(Clone, Copy)]
enum PointerPayload {
    Move,
    Button(pointer::Button, bool),
}

/// The root of a view tree bound to one rendering surface.
///
/// The context owns the arena and one or more z-ordered [`Section`]s,
/// receives raw input from the host, and dispatches it. Everything runs on
/// the owning thread; events produced elsewhere must arrive through the
/// [`EventSource`](crate::EventSource) channel.
pub struct Context {
    arena: Arena,
    sections: Vec<Section>,
    /// Current cursor position in screen coordinates.
    cursor: Point,
    /// The section that receives key events and holds active gestures.
    input_section: Option<SectionId>,
    /// Set by structural mutation and resize; layout is re-run before the
    /// next draw.
    layout_dirty: bool,
    /// Reschedule requests produced by `on_tick` handlers, drained by the
    /// host into its timer.
    tick_requests: Vec<(ViewId, Duration)>,
}

impl Context {
    /// Create an empty context with no sections.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            sections: Vec::new(),
            cursor: Point::zero(),
            input_section: None,
            layout_dirty: false,
            tick_requests: Vec::new(),
        }
    }

    /// Read access to the arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The current cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The section currently receiving input, if any.
    pub fn input_section(&self) -> Option<SectionId> {
        self.input_section
    }

    /// A reference to a section.
    pub fn section(&self, sid: SectionId) -> Option<&Section> {
        self.sections.get(sid.0)
    }

    /// Append a new empty section above all existing ones. The first section
    /// added becomes the input section.
    pub fn add_section(&mut self) -> SectionId {
        self.sections.push(Section::new());
        let sid = SectionId(self.sections.len() - 1);
        if self.input_section.is_none() {
            self.input_section = Some(sid);
        }
        sid
    }

    /// Route input to a different section. The section losing input has its
    /// in-progress gesture state cleared as if a release had occurred.
    pub fn set_input_section(&mut self, sid: SectionId) -> Result<()> {
        if sid.0 >= self.sections.len() {
            return Err(Error::NoSuchSection);
        }
        if self.input_section == Some(sid) {
            return Ok(());
        }
        if let Some(old) = self.input_section {
            self.cancel_gestures(old.0);
        }
        self.input_section = Some(sid);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Structure

    /// Add a widget to the arena as a detached view and return its id.
    pub fn add_view(&mut self, widget: impl Into<Box<dyn Widget>>) -> ViewId {
        self.arena.insert(widget)
    }

    /// Make `view` a top-level view of `section`, on top of its z-order.
    /// The view is detached from any current parent first.
    pub fn attach_root(&mut self, section: SectionId, view: ViewId) -> Result<()> {
        if section.0 >= self.sections.len() {
            return Err(Error::NoSuchSection);
        }
        self.arena.detach(view)?;
        for s in &mut self.sections {
            s.roots.retain(|r| *r != view);
        }
        self.sections[section.0].roots.push(view);
        self.layout_dirty = true;
        Ok(())
    }

    /// Raise a top-level view to the top of its section's z-order.
    pub fn raise(&mut self, section: SectionId, view: ViewId) -> Result<()> {
        let sec = self
            .sections
            .get_mut(section.0)
            .ok_or(Error::NoSuchSection)?;
        let idx = sec
            .roots
            .iter()
            .position(|r| *r == view)
            .ok_or(Error::NoSuchView)?;
        let v = sec.roots.remove(idx);
        sec.roots.push(v);
        Ok(())
    }

    /// Append `child` to the end of `parent`'s child list.
    pub fn push_back(&mut self, parent: ViewId, child: ViewId) -> Result<()> {
        self.arena.push_back(parent, child)?;
        self.on_attached(child);
        Ok(())
    }

    /// Insert `child` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: ViewId, child: ViewId) -> Result<()> {
        self.arena.insert_before(sibling, child)?;
        self.on_attached(child);
        Ok(())
    }

    /// Insert `child` immediately after `sibling`.
    pub fn insert_after(&mut self, sibling: ViewId, child: ViewId) -> Result<()> {
        self.arena.insert_after(sibling, child)?;
        self.on_attached(child);
        Ok(())
    }

    /// A view that gained a parent is no longer a top-level view anywhere,
    /// and its subtree may have moved out of a section. Every slot in a
    /// section the subtree no longer belongs to is swept with the same
    /// notifications a detach sends, so focus, hover and capture stay
    /// descendants of their own section.
    fn on_attached(&mut self, child: ViewId) {
        for s in &mut self.sections {
            s.roots.retain(|r| *r != child);
        }
        self.layout_dirty = true;
        let ids = self.arena.subtree_ids(child);
        for si in 0..self.sections.len() {
            let sid = SectionId(si);
            if let Some(cap) = self.sections[si].capture
                && ids.contains(&cap)
                && !self.in_section(sid, cap)
            {
                self.sections[si].capture = None;
            }
            let leaving: Vec<ViewId> = self.sections[si]
                .hover
                .iter()
                .filter(|h| ids.contains(h) && !self.in_section(sid, **h))
                .copied()
                .collect();
            self.sections[si].hover.retain(|h| !leaving.contains(h));
            for h in leaving.iter().rev() {
                self.deliver(*h, &Event::HoverOut);
            }
            if let Some(f) = self.sections[si].focus
                && ids.contains(&f)
                && !self.in_section(sid, f)
            {
                self.sections[si].focus = None;
                self.deliver(f, &Event::FocusOff);
            }
        }
    }

    /// Detach a view from its parent without destroying it. The subtree can
    /// no longer hold focus, hover membership or capture in any section;
    /// affected views are notified (`FocusOff`, `HoverOut`) and the weak
    /// slots cleared.
    pub fn detach(&mut self, view: ViewId) -> Result<()> {
        if !self.arena.contains(view) {
            return Err(Error::NoSuchView);
        }
        let ids = self.arena.subtree_ids(view);
        self.arena.detach(view)?;
        self.layout_dirty = true;
        for si in 0..self.sections.len() {
            if self.sections[si].capture.is_some_and(|c| ids.contains(&c)) {
                self.sections[si].capture = None;
            }
            let leaving: Vec<ViewId> = self.sections[si]
                .hover
                .iter()
                .filter(|h| ids.contains(h))
                .copied()
                .collect();
            self.sections[si].hover.retain(|h| !ids.contains(h));
            for h in leaving.iter().rev() {
                if self.arena.contains(*h) {
                    self.deliver(*h, &Event::HoverOut);
                }
            }
            if let Some(f) = self.sections[si].focus
                && ids.contains(&f)
            {
                self.sections[si].focus = None;
                if self.arena.contains(f) {
                    self.deliver(f, &Event::FocusOff);
                }
            }
        }
        Ok(())
    }

    /// Destroy a view and its whole subtree. Every section slot that weakly
    /// referenced a removed view (focus, hover entries, capture, z-order
    /// membership) is cleared as part of this call; no dangling reference is
    /// observable afterwards. Destroying an id that is already gone is a
    /// no-op.
    pub fn destroy(&mut self, view: ViewId) {
        let removed = self.arena.destroy(view);
        if removed.is_empty() {
            return;
        }
        for s in &mut self.sections {
            s.sweep(&removed);
        }
        self.layout_dirty = true;
    }

    // ------------------------------------------------------------------
    // Geometry and node attributes

    /// Set a view's size, keeping its position.
    pub fn resize(&mut self, view: ViewId, size: Expanse) -> Result<()> {
        let node = self.arena.get_mut(view).ok_or(Error::NoSuchView)?;
        node.rect = Rect::new(node.rect.x, node.rect.y, size.w, size.h);
        self.layout_dirty = true;
        Ok(())
    }

    /// Move a view to a new position relative to its parent.
    pub fn move_to(&mut self, view: ViewId, pos: Point) -> Result<()> {
        let node = self.arena.get_mut(view).ok_or(Error::NoSuchView)?;
        node.rect = node.rect.at(pos);
        self.layout_dirty = true;
        Ok(())
    }

    /// Show or hide a view and its subtree.
    pub fn set_visible(&mut self, view: ViewId, visible: bool) -> Result<()> {
        self.arena.get_mut(view).ok_or(Error::NoSuchView)?.visible = visible;
        self.layout_dirty = true;
        Ok(())
    }

    /// Enable or disable input for a view and its subtree.
    pub fn set_enabled(&mut self, view: ViewId, enabled: bool) -> Result<()> {
        self.arena.get_mut(view).ok_or(Error::NoSuchView)?.enabled = enabled;
        Ok(())
    }

    /// Set the per-axis expand flags.
    pub fn set_expand(&mut self, view: ViewId, x: bool, y: bool) -> Result<()> {
        let node = self.arena.get_mut(view).ok_or(Error::NoSuchView)?;
        node.expand_x = x;
        node.expand_y = y;
        self.layout_dirty = true;
        Ok(())
    }

    /// Override the widget's preferred size, or clear the override.
    pub fn set_preferred(&mut self, view: ViewId, size: Option<Expanse>) -> Result<()> {
        self.arena.get_mut(view).ok_or(Error::NoSuchView)?.preferred = size;
        self.layout_dirty = true;
        Ok(())
    }

    /// Make a view arrange its children with the space distribution solver,
    /// or stop doing so.
    pub fn set_layout_spec(&mut self, view: ViewId, spec: Option<LayoutSpec>) -> Result<()> {
        self.arena.get_mut(view).ok_or(Error::NoSuchView)?.layout = spec;
        self.layout_dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Focus

    /// Move keyboard focus within a section. The previous holder receives
    /// `FocusOff`, the new one `FocusOn`. Passing `None` clears focus.
    pub fn set_focus(&mut self, section: SectionId, view: Option<ViewId>) -> Result<()> {
        if section.0 >= self.sections.len() {
            return Err(Error::NoSuchSection);
        }
        if let Some(v) = view {
            if !self.arena.contains(v) {
                return Err(Error::NoSuchView);
            }
            if !self.in_section(section, v) {
                return Err(Error::Focus("view is not a descendant of section".into()));
            }
        }
        let old = self.sections[section.0].focus;
        if old == view {
            return Ok(());
        }
        trace!(?old, new = ?view, "focus change");
        self.sections[section.0].focus = view;
        if let Some(o) = old
            && self.arena.contains(o)
        {
            self.deliver(o, &Event::FocusOff);
        }
        if let Some(n) = view
            && self.arena.contains(n)
        {
            self.deliver(n, &Event::FocusOn);
        }
        Ok(())
    }

    /// Is `view` a descendant of one of the section's top-level views?
    fn in_section(&self, section: SectionId, view: ViewId) -> bool {
        let Some(sec) = self.sections.get(section.0) else {
            return false;
        };
        let mut current = Some(view);
        while let Some(id) = current {
            if sec.roots.contains(&id) {
                return true;
            }
            current = self.arena.get(id).and_then(|n| n.parent());
        }
        false
    }

    // ------------------------------------------------------------------
    // Event routing

    /// Route a raw input event.
    ///
    /// Dispatch never fails: stale ids, degenerate geometry and unmatched
    /// state are absorbed. The only caller-visible outcomes are the geometry
    /// and focus changes handlers perform.
    pub fn event(&mut self, e: Event) {
        match e {
            Event::PointerMove(p) => self.pointer_move(p),
            Event::PointerButton(b) => self.pointer_button(b),
            Event::Key(k) => self.key(k),
            Event::Tick(ids) => self.tick(&ids),
            // Synthesized point-to-point events only originate here.
            Event::HoverIn | Event::HoverOut | Event::FocusOn | Event::FocusOff => {}
        }
    }

    /// Drain reschedule requests produced by `on_tick` handlers. The host
    /// feeds these back into its [`Poller`](crate::Poller).
    pub fn take_tick_requests(&mut self) -> Vec<(ViewId, Duration)> {
        std::mem::take(&mut self.tick_requests)
    }

    fn pointer_move(&mut self, pos: Point) {
        self.cursor = pos;

        // Hover tracking is orthogonal to the propagation contract: the
        // chains are recomputed on every move, whatever the handlers below
        // answer and whether or not a capture is active.
        let hit = self.topmost_hit(pos);
        for si in 0..self.sections.len() {
            let chain = match &hit {
                Some((w, path)) if *w == si => path.clone(),
                _ => Vec::new(),
            };
            self.update_hover(si, chain);
        }

        // Capture bypasses hit-testing for delivery.
        if let Some(sid) = self.input_section
            && let Some(cid) = self.sections[sid.0].capture
        {
            if let Some(sr) = self.arena.screen_rect(cid) {
                self.deliver(cid, &Event::PointerMove(pos - sr.tl()));
            }
            return;
        }

        if let Some((si, _)) = hit {
            self.propagate_pointer(si, pos, PointerPayload::Move);
        }
    }

    fn pointer_button(&mut self, ev: pointer::ButtonEvent) {
        self.cursor = ev.pos;

        // Capture bypasses hit-testing until release.
        if let Some(sid) = self.input_section
            && let Some(cid) = self.sections[sid.0].capture
        {
            if let Some(sr) = self.arena.screen_rect(cid) {
                self.deliver(
                    cid,
                    &Event::PointerButton(pointer::ButtonEvent {
                        pos: ev.pos - sr.tl(),
                        ..ev
                    }),
                );
            }
            if !ev.down {
                trace!(view = ?cid, "capture released");
                if let Some(sec) = self.sections.get_mut(sid.0) {
                    sec.capture = None;
                }
            }
            return;
        }

        let Some((si, _)) = self.topmost_hit(ev.pos) else {
            return;
        };

        // A press in another section moves overall input focus there first.
        if ev.down && self.input_section != Some(SectionId(si)) {
            let _ = self.set_input_section(SectionId(si));
        }

        let accepted = self.propagate_pointer(si, ev.pos, PointerPayload::Button(ev.button, ev.down));

        if ev.down
            && let Some(id) = accepted
            && self.arena.contains(id)
        {
            trace!(view = ?id, "capture set");
            self.sections[si].capture = Some(id);
            let wants_focus = self
                .arena
                .get(id)
                .and_then(|n| n.widget.as_ref())
                .is_some_and(|w| w.accept_focus());
            if wants_focus {
                let _ = self.set_focus(SectionId(si), Some(id));
            }
        }
    }

    fn key(&mut self, k: key::Key) {
        // Key events go to the focused view of the input section only; an
        // ignored key is dropped, never bubbled.
        let Some(sid) = self.input_section else {
            return;
        };
        let Some(focus) = self.sections[sid.0].focus else {
            return;
        };
        let _ = self.deliver(focus, &Event::Key(k));
    }

    fn tick(&mut self, ids: &[ViewId]) {
        for id in ids {
            let Some(mut widget) = self.arena.take_widget(*id) else {
                continue;
            };
            let mut ctx = EventCtx { context: self, id: *id };
            let next = widget.on_tick(&mut ctx);
            self.arena.restore_widget(*id, widget);
            if let Some(d) = next
                && self.arena.contains(*id)
            {
                self.tick_requests.push((*id, d));
            }
        }
    }

    /// Find the topmost section with a view under the point, together with
    /// the root-to-deepest hit path inside it.
    fn topmost_hit(&self, pos: Point) -> Option<(usize, Vec<ViewId>)> {
        for si in (0..self.sections.len()).rev() {
            let path = self.hit_path(si, pos);
            if !path.is_empty() {
                return Some((si, path));
            }
        }
        None
    }

    /// The ordered ancestor path from a section's top-level view down to the
    /// deepest view whose rect contains the point. Top-level views are
    /// tried most-recently-raised first.
    fn hit_path(&self, si: usize, pos: Point) -> Vec<ViewId> {
        for root in self.sections[si].roots.iter().rev() {
            let mut path = Vec::new();
            if self.descend_path(*root, Point::zero(), pos, &mut path) {
                return path;
            }
        }
        Vec::new()
    }

    fn descend_path(&self, id: ViewId, origin: Point, pos: Point, path: &mut Vec<ViewId>) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if !node.visible() || !node.enabled() {
            return false;
        }
        let sr = node.rect().translate(origin);
        if !sr.contains_point(pos) {
            return false;
        }
        path.push(id);
        for child in node.children().iter().rev() {
            if self.descend_path(*child, sr.tl(), pos, path) {
                break;
            }
        }
        true
    }

    /// Diff a section's hover chain against a new one. Views leaving the
    /// chain receive exactly one `HoverOut`, innermost first; views entering
    /// receive exactly one `HoverIn`, outermost first.
    fn update_hover(&mut self, si: usize, mut new: Vec<ViewId>) {
        let old = self.sections[si].hover.clone();
        if old == new {
            return;
        }
        for id in old.iter().rev() {
            if !new.contains(id) && self.arena.contains(*id) {
                self.deliver(*id, &Event::HoverOut);
            }
        }
        for id in &new {
            if !old.contains(id) && self.arena.contains(*id) {
                self.deliver(*id, &Event::HoverIn);
            }
        }
        // Handlers above may have destroyed entries of the new chain, or
        // detached them out from under the section's roots.
        new.retain(|id| self.arena.contains(*id) && self.in_section(SectionId(si), *id));
        self.sections[si].hover = new;
    }

    /// Depth-first pointer propagation over a section's roots, topmost
    /// first. Returns the view that answered `Accept`, if any.
    fn propagate_pointer(
        &mut self,
        si: usize,
        pos: Point,
        payload: PointerPayload,
    ) -> Option<ViewId> {
        let mut accepted = None;
        let roots = self.sections[si].roots.clone();
        for root in roots.iter().rev() {
            match self.dispatch_pointer(*root, Point::zero(), pos, payload, &mut accepted) {
                EventOutcome::Ignore => continue,
                _ => break,
            }
        }
        accepted
    }

    /// Recursive depth-first walk in reverse z-order. The walk stops at the
    /// first `Accept` or `Finish`; `Ignore` continues to the next sibling,
    /// then the parent. Sibling lists are snapshotted and every id is
    /// re-validated before the visit, so a handler may delete any node,
    /// including the upcoming sibling, mid-walk.
    fn dispatch_pointer(
        &mut self,
        id: ViewId,
        origin: Point,
        pos: Point,
        payload: PointerPayload,
        accepted: &mut Option<ViewId>,
    ) -> EventOutcome {
        let Some(node) = self.arena.get(id) else {
            return EventOutcome::Ignore;
        };
        if !node.visible() || !node.enabled() {
            return EventOutcome::Ignore;
        }
        let sr = node.rect().translate(origin);
        if !sr.contains_point(pos) {
            return EventOutcome::Ignore;
        }

        let kids: Vec<ViewId> = node.children().to_vec();
        for child in kids.iter().rev() {
            match self.dispatch_pointer(*child, sr.tl(), pos, payload, accepted) {
                EventOutcome::Ignore => continue,
                outcome => return outcome,
            }
        }

        let local = pos - sr.tl();
        let event = match payload {
            PointerPayload::Move => Event::PointerMove(local),
            PointerPayload::Button(button, down) => Event::PointerButton(pointer::ButtonEvent {
                button,
                down,
                pos: local,
            }),
        };
        let outcome = self.deliver(id, &event);
        if outcome == EventOutcome::Accept && accepted.is_none() {
            *accepted = Some(id);
        }
        outcome
    }

    /// Invoke a single view's handler. The widget is taken out of its slot
    /// for the call so the handler has full mutable access to the tree, and
    /// restored afterwards if the view still exists.
    fn deliver(&mut self, id: ViewId, event: &Event) -> EventOutcome {
        let Some(mut widget) = self.arena.take_widget(id) else {
            return EventOutcome::Ignore;
        };
        let mut ctx = EventCtx { context: self, id };
        let outcome = widget.on_event(event, &mut ctx);
        self.arena.restore_widget(id, widget);
        outcome
    }

    /// Clear a section's gesture state as if a release had occurred:
    /// capture dropped, hover chain emptied with `HoverOut`s, focus cleared
    /// with `FocusOff`. Triggered whenever capture or focus ownership
    /// changes externally; gestures have no explicit cancel event.
    fn cancel_gestures(&mut self, si: usize) {
        self.sections[si].capture = None;
        let chain = std::mem::take(&mut self.sections[si].hover);
        for id in chain.iter().rev() {
            if self.arena.contains(*id) {
                self.deliver(*id, &Event::HoverOut);
            }
        }
        if let Some(f) = self.sections[si].focus.take()
            && self.arena.contains(f)
        {
            self.deliver(f, &Event::FocusOff);
        }
    }

    // ------------------------------------------------------------------
    // Layout and drawing

    /// Recompute container layouts across all sections. Runs automatically
    /// before a draw pass when structure or geometry changed.
    pub fn layout(&mut self) {
        let roots: Vec<ViewId> = self
            .sections
            .iter()
            .flat_map(|s| s.roots.iter().copied())
            .collect();
        for root in roots {
            self.layout_subtree(root);
        }
        self.layout_dirty = false;
    }

    fn layout_subtree(&mut self, id: ViewId) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        let spec = node.layout;
        let container = node.rect().size();
        let kids: Vec<ViewId> = node.children().to_vec();

        if let Some(spec) = spec {
            let constraints: Vec<ChildConstraint> = kids
                .iter()
                .filter_map(|c| self.arena.get(*c))
                .map(|n| ChildConstraint {
                    preferred: n.preferred_size(),
                    expand_x: n.expand_x,
                    expand_y: n.expand_y,
                })
                .collect();
            let rects = layout::solve(container, &constraints, &spec);
            for (c, r) in kids.iter().zip(rects) {
                if let Some(n) = self.arena.get_mut(*c) {
                    n.rect = r;
                }
            }
        }

        for c in kids {
            self.layout_subtree(c);
        }
    }

    /// Is a layout pass pending?
    pub fn needs_layout(&self) -> bool {
        self.layout_dirty
    }

    /// Draw all visible views, parent before children, sections bottom to
    /// top. Each view's screen rect is pushed on its section's clip stack
    /// around its draw handler, so nested views can only narrow the visible
    /// region.
    pub fn draw(&mut self, backend: &mut dyn DrawBackend) {
        if self.layout_dirty {
            self.layout();
        }
        for si in 0..self.sections.len() {
            let roots = self.sections[si].roots.clone();
            for root in roots {
                self.draw_node(si, root, Point::zero(), backend);
            }
            debug_assert_eq!(self.sections[si].clip.depth(), 0);
        }
        backend.set_clip(None);
    }

    fn draw_node(&mut self, si: usize, id: ViewId, origin: Point, backend: &mut dyn DrawBackend) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.visible() {
            return;
        }
        let sr = node.rect().translate(origin);

        let region = self.sections[si].clip.push(sr);
        backend.set_clip(Some(&region));
        if let Some(mut widget) = self.arena.take_widget(id) {
            let mut dctx = DrawContext {
                backend,
                view: id,
                area: sr,
                clip: region,
            };
            widget.draw(&mut dctx);
            self.arena.restore_widget(id, widget);
        }
        let kids = self
            .arena
            .get(id)
            .map(|n| n.children().to_vec())
            .unwrap_or_default();
        for child in kids {
            self.draw_node(si, child, sr.tl(), backend);
        }
        self.sections[si].clip.pop();
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler-side access to the tree, passed to widget event and tick
/// handlers. Reentrancy is expected: a handler may mutate any part of the
/// tree, including deleting its own view.
pub struct EventCtx<'a> {
    context: &'a mut Context,
    id: ViewId,
}

impl EventCtx<'_> {
    /// The view whose handler is running.
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// Full access to the context for structural mutation and queries.
    pub fn context(&mut self) -> &mut Context {
        self.context
    }

    /// Read access to the arena.
    pub fn arena(&self) -> &Arena {
        &self.context.arena
    }

    /// This view's node, if it still exists.
    pub fn node(&self) -> Option<&ViewNode> {
        self.context.arena.get(self.id)
    }

    /// This view's rect in screen coordinates.
    pub fn screen_rect(&self) -> Option<Rect> {
        self.context.arena.screen_rect(self.id)
    }

    /// Destroy a view and its subtree. Destroying one's own view is
    /// permitted.
    pub fn destroy(&mut self, view: ViewId) {
        self.context.destroy(view);
    }

    /// Detach a view from its parent.
    pub fn detach(&mut self, view: ViewId) -> Result<()> {
        self.context.detach(view)
    }
}
