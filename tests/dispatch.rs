//! Router behavior: propagation, capture, hover chains, focus and
//! structural mutation from inside handlers.

use std::time::Duration;

use trellis::{
    Context, EventOutcome, Expanse, Result,
    event::{Event, key, pointer::ButtonEvent},
    tutils::{TWidget, get_state, reset_state},
};

/// Position and size a view in one call.
fn place(c: &mut Context, id: trellis::ViewId, x: i32, y: i32, w: i32, h: i32) -> Result<()> {
    c.move_to(id, (x, y).into())?;
    c.resize(id, Expanse::new(w, h))?;
    Ok(())
}

#[test]
fn press_focuses_and_keys_follow() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(
        TWidget::new("b")
            .with_outcome(EventOutcome::Accept)
            .focusable(),
    );
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    // The press lands on the deepest hit view; its accept stops
    // propagation before the parent and moves focus.
    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    assert_eq!(c.section(s).unwrap().focus(), Some(b));
    assert_eq!(get_state().path, vec!["b@press", "b@focus_on"]);

    reset_state();
    c.event(Event::Key(key::Empty + key::KeyCode::Char('x')));
    assert_eq!(get_state().path, vec!["b@key"]);
    Ok(())
}

#[test]
fn ignored_press_bubbles_to_parent() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a").with_outcome(EventOutcome::Accept));
    let b = c.add_view(TWidget::new("b"));
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    assert_eq!(get_state().path, vec!["b@press", "a@press"]);
    // The accepting ancestor takes the capture; it never asked for focus.
    assert_eq!(c.section(s).unwrap().capture(), Some(a));
    assert_eq!(c.section(s).unwrap().focus(), None);
    Ok(())
}

#[test]
fn finish_consumes_without_capture() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(
        TWidget::new("b")
            .with_outcome(EventOutcome::Finish)
            .focusable(),
    );
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    // Finish stops propagation like accept but starts no gesture.
    assert_eq!(get_state().path, vec!["b@press"]);
    assert_eq!(c.section(s).unwrap().capture(), None);
    assert_eq!(c.section(s).unwrap().focus(), None);
    Ok(())
}

#[test]
fn ignored_key_is_dropped_not_bubbled() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b").focusable());
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;
    c.set_focus(s, Some(b))?;

    reset_state();
    c.event(Event::Key(key::Empty + key::KeyCode::Enter));
    // The focused view ignored the key; the parent never sees it.
    assert_eq!(get_state().path, vec!["b@key"]);
    Ok(())
}

#[test]
fn key_without_focus_is_dropped() {
    reset_state();
    let mut c = Context::new();
    c.add_section();
    c.event(Event::Key(key::Empty + key::KeyCode::Esc));
    assert!(get_state().path.is_empty());
}

#[test]
fn capture_routes_all_pointer_events_until_release() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b").with_outcome(EventOutcome::Accept));
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    assert_eq!(c.section(s).unwrap().capture(), Some(b));

    // A drag far outside every view still reaches the capture holder, and
    // the release there ends the gesture.
    reset_state();
    c.event(Event::PointerMove((200, 200).into()));
    c.event(Event::PointerButton(ButtonEvent::release((200, 200))));
    assert_eq!(get_state().path, vec!["b@move", "b@release"]);
    assert_eq!(c.section(s).unwrap().capture(), None);

    // With the gesture over, hit-testing is back in charge.
    reset_state();
    c.event(Event::PointerButton(ButtonEvent::press((5, 5))));
    assert_eq!(get_state().path, vec!["a@press"]);
    Ok(())
}

#[test]
fn hover_enters_outermost_first_and_leaves_innermost_first() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let root = c.add_view(TWidget::new("root"));
    let mid = c.add_view(TWidget::new("mid"));
    let leaf = c.add_view(TWidget::new("leaf"));
    c.attach_root(s, root)?;
    c.push_back(root, mid)?;
    c.push_back(mid, leaf)?;
    place(&mut c, root, 0, 0, 100, 100)?;
    place(&mut c, mid, 10, 10, 50, 50)?;
    place(&mut c, leaf, 5, 5, 10, 10)?;

    // Into the deepest view: the whole chain enters, then the move
    // propagates deepest-first.
    reset_state();
    c.event(Event::PointerMove((20, 20).into()));
    assert_eq!(
        get_state().path,
        vec![
            "root@hover_in",
            "mid@hover_in",
            "leaf@hover_in",
            "leaf@move",
            "mid@move",
            "root@move"
        ]
    );
    assert_eq!(c.section(s).unwrap().hover_chain(), [root, mid, leaf]);

    // Back out one level: only the leaf leaves, exactly once.
    reset_state();
    c.event(Event::PointerMove((40, 40).into()));
    assert_eq!(get_state().path, vec!["leaf@hover_out", "mid@move", "root@move"]);
    assert_eq!(c.section(s).unwrap().hover_chain(), [root, mid]);

    // Off the tree entirely: the rest leaves innermost first.
    reset_state();
    c.event(Event::PointerMove((200, 200).into()));
    assert_eq!(get_state().path, vec!["mid@hover_out", "root@hover_out"]);
    assert!(c.section(s).unwrap().hover_chain().is_empty());
    Ok(())
}

#[test]
fn handler_may_delete_the_next_sibling() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let p = c.add_view(TWidget::new("p"));
    let y = c.add_view(TWidget::new("y"));
    let x = c.add_view(TWidget::new("x").with_hook(Box::new(move |_e, ctx| ctx.destroy(y))));
    c.attach_root(s, p)?;
    c.push_back(p, y)?;
    c.push_back(p, x)?;
    place(&mut c, p, 0, 0, 100, 100)?;
    place(&mut c, y, 0, 0, 100, 100)?;
    place(&mut c, x, 0, 0, 100, 100)?;

    // x is topmost and visited first; it deletes y mid-walk. The stale id
    // is skipped without a panic and the walk continues to the parent.
    c.event(Event::PointerButton(ButtonEvent::press((50, 50))));
    assert_eq!(get_state().path, vec!["x@press", "p@press"]);
    assert!(!c.arena().contains(y));
    Ok(())
}

#[test]
fn handler_may_delete_its_own_view() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(
        TWidget::new("b")
            .with_outcome(EventOutcome::Accept)
            .focusable()
            .with_hook(Box::new(|_e, ctx| {
                let id = ctx.id();
                ctx.destroy(id);
            })),
    );
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    // The accept came from a view that no longer exists: no capture, no
    // focus, no dangling slot.
    assert_eq!(get_state().path, vec!["b@press"]);
    assert!(!c.arena().contains(b));
    assert_eq!(c.section(s).unwrap().capture(), None);
    assert_eq!(c.section(s).unwrap().focus(), None);
    Ok(())
}

#[test]
fn destroying_the_focused_view_clears_focus() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b").focusable());
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    c.set_focus(s, Some(b))?;

    reset_state();
    c.destroy(b);
    assert_eq!(c.section(s).unwrap().focus(), None);
    // The view is gone; no farewell event is synthesized for it.
    assert!(get_state().path.is_empty());
    Ok(())
}

#[test]
fn detaching_a_hovered_subtree_notifies_it() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b"));
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;
    c.event(Event::PointerMove((20, 20).into()));
    assert_eq!(c.section(s).unwrap().hover_chain(), [a, b]);

    // Unlike destroy, the detached view still exists and hears about its
    // hover membership ending.
    reset_state();
    c.detach(b)?;
    assert_eq!(get_state().path, vec!["b@hover_out"]);
    assert_eq!(c.section(s).unwrap().hover_chain(), [a]);
    Ok(())
}

#[test]
fn reparenting_across_sections_surrenders_focus() -> Result<()> {
    let mut c = Context::new();
    let s0 = c.add_section();
    let s1 = c.add_section();
    let r0 = c.add_view(TWidget::new("r0"));
    let r1 = c.add_view(TWidget::new("r1"));
    let b = c.add_view(TWidget::new("b").focusable());
    c.attach_root(s0, r0)?;
    c.attach_root(s1, r1)?;
    c.push_back(r0, b)?;
    c.set_focus(s0, Some(b))?;

    // The move takes b out of s0's trees, so s0 cannot keep pointing at it.
    reset_state();
    c.push_back(r1, b)?;
    assert_eq!(get_state().path, vec!["b@focus_off"]);
    assert_eq!(c.section(s0).unwrap().focus(), None);

    // Keys routed through the old input section no longer reach it.
    c.event(Event::Key(key::Empty + key::KeyCode::Enter));
    assert_eq!(get_state().path, vec!["b@focus_off"]);
    Ok(())
}

#[test]
fn reparenting_within_a_section_keeps_focus() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let r = c.add_view(TWidget::new("r"));
    let left = c.add_view(TWidget::new("left"));
    let right = c.add_view(TWidget::new("right"));
    let b = c.add_view(TWidget::new("b").focusable());
    c.attach_root(s, r)?;
    c.push_back(r, left)?;
    c.push_back(r, right)?;
    c.push_back(left, b)?;
    c.set_focus(s, Some(b))?;

    reset_state();
    c.push_back(right, b)?;
    assert!(get_state().path.is_empty());
    assert_eq!(c.section(s).unwrap().focus(), Some(b));
    Ok(())
}

#[test]
fn reparenting_a_hovered_view_out_of_its_section_ends_hover() -> Result<()> {
    let mut c = Context::new();
    let s0 = c.add_section();
    let s1 = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b"));
    let r1 = c.add_view(TWidget::new("r1"));
    c.attach_root(s0, a)?;
    c.attach_root(s1, r1)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;
    place(&mut c, r1, 200, 0, 50, 50)?;
    c.event(Event::PointerMove((20, 20).into()));
    assert_eq!(c.section(s0).unwrap().hover_chain(), [a, b]);

    reset_state();
    c.push_back(r1, b)?;
    assert_eq!(get_state().path, vec!["b@hover_out"]);
    assert_eq!(c.section(s0).unwrap().hover_chain(), [a]);
    Ok(())
}

#[test]
fn hover_in_handler_detaching_itself_leaves_the_chain_consistent() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let root = c.add_view(TWidget::new("root"));
    let mid = c.add_view(TWidget::new("mid").with_hook(Box::new(|e, ctx| {
        if matches!(e, Event::HoverIn) {
            let id = ctx.id();
            ctx.detach(id).ok();
        }
    })));
    let leaf = c.add_view(TWidget::new("leaf"));
    c.attach_root(s, root)?;
    c.push_back(root, mid)?;
    c.push_back(mid, leaf)?;
    place(&mut c, root, 0, 0, 100, 100)?;
    place(&mut c, mid, 10, 10, 50, 50)?;
    place(&mut c, leaf, 5, 5, 10, 10)?;

    // mid pulls itself (and leaf with it) out of the tree while entering;
    // the stored chain keeps only what is still under the section.
    reset_state();
    c.event(Event::PointerMove((20, 20).into()));
    assert_eq!(
        get_state().path,
        vec!["root@hover_in", "mid@hover_in", "leaf@hover_in", "root@move"]
    );
    assert_eq!(c.section(s).unwrap().hover_chain(), [root]);
    Ok(())
}

#[test]
fn moving_input_to_another_section_cancels_gestures() -> Result<()> {
    let mut c = Context::new();
    let s0 = c.add_section();
    let s1 = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(
        TWidget::new("b")
            .with_outcome(EventOutcome::Accept)
            .focusable(),
    );
    c.attach_root(s0, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;

    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    c.event(Event::PointerMove((25, 25).into()));
    assert_eq!(c.section(s0).unwrap().capture(), Some(b));
    assert_eq!(c.section(s0).unwrap().focus(), Some(b));
    assert_eq!(c.section(s0).unwrap().hover_chain(), [a, b]);

    // Losing input ends the section's gestures as if a release happened:
    // hover leaves innermost first, then focus is surrendered.
    reset_state();
    c.set_input_section(s1)?;
    assert_eq!(
        get_state().path,
        vec!["b@hover_out", "a@hover_out", "b@focus_off"]
    );
    assert_eq!(c.section(s0).unwrap().capture(), None);
    assert_eq!(c.section(s0).unwrap().focus(), None);
    assert!(c.section(s0).unwrap().hover_chain().is_empty());
    Ok(())
}

#[test]
fn press_in_a_higher_section_switches_input() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s0 = c.add_section();
    let s1 = c.add_section();
    let a = c.add_view(TWidget::new("a").with_outcome(EventOutcome::Accept));
    let b = c.add_view(TWidget::new("b").with_outcome(EventOutcome::Accept));
    c.attach_root(s0, a)?;
    c.attach_root(s1, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 50, 0, 100, 100)?;
    assert_eq!(c.input_section(), Some(s0));

    // Where the sections overlap, the higher one wins the hit.
    c.event(Event::PointerButton(ButtonEvent::press((60, 10))));
    assert_eq!(c.input_section(), Some(s1));
    assert_eq!(get_state().path, vec!["b@press"]);
    c.event(Event::PointerButton(ButtonEvent::release((60, 10))));

    // A press where only the lower section has views routes input back.
    reset_state();
    c.event(Event::PointerButton(ButtonEvent::press((10, 10))));
    assert_eq!(c.input_section(), Some(s0));
    assert_eq!(get_state().path, vec!["a@press"]);
    Ok(())
}

#[test]
fn raise_reorders_hit_testing() -> Result<()> {
    reset_state();
    let mut c = Context::new();
    let s = c.add_section();
    let r1 = c.add_view(TWidget::new("r1").with_outcome(EventOutcome::Accept));
    let r2 = c.add_view(TWidget::new("r2").with_outcome(EventOutcome::Accept));
    c.attach_root(s, r1)?;
    c.attach_root(s, r2)?;
    place(&mut c, r1, 0, 0, 100, 100)?;
    place(&mut c, r2, 0, 0, 100, 100)?;

    c.event(Event::PointerButton(ButtonEvent::press((50, 50))));
    c.event(Event::PointerButton(ButtonEvent::release((50, 50))));
    assert_eq!(get_state().path, vec!["r2@press", "r2@release"]);

    c.raise(s, r1)?;
    reset_state();
    c.event(Event::PointerButton(ButtonEvent::press((50, 50))));
    assert_eq!(get_state().path, vec!["r1@press"]);
    Ok(())
}

#[test]
fn disabled_views_are_skipped_by_routing() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b").with_outcome(EventOutcome::Accept));
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;
    c.set_enabled(b, false)?;

    reset_state();
    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    assert_eq!(get_state().path, vec!["a@press"]);

    reset_state();
    c.event(Event::PointerMove((20, 20).into()));
    assert_eq!(get_state().path, vec!["a@hover_in", "a@move"]);
    assert_eq!(c.section(s).unwrap().hover_chain(), [a]);
    Ok(())
}

#[test]
fn hidden_views_are_skipped_by_routing() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a"));
    let b = c.add_view(TWidget::new("b").with_outcome(EventOutcome::Accept));
    c.attach_root(s, a)?;
    c.push_back(a, b)?;
    place(&mut c, a, 0, 0, 100, 100)?;
    place(&mut c, b, 10, 10, 50, 50)?;
    c.set_visible(b, false)?;

    reset_state();
    c.event(Event::PointerButton(ButtonEvent::press((20, 20))));
    assert_eq!(get_state().path, vec!["a@press"]);
    Ok(())
}

#[test]
fn ticks_reach_live_views_and_collect_reschedules() -> Result<()> {
    let mut c = Context::new();
    let s = c.add_section();
    let a = c.add_view(TWidget::new("a").with_tick(Duration::from_millis(16)));
    let b = c.add_view(TWidget::new("b"));
    c.attach_root(s, a)?;
    c.attach_root(s, b)?;
    let dead = c.add_view(TWidget::new("dead"));
    c.destroy(dead);

    reset_state();
    c.event(Event::Tick(vec![a, dead, b]));
    assert_eq!(get_state().path, vec!["a@tick", "b@tick"]);
    // Only a asked to run again; the request is drained exactly once.
    assert_eq!(
        c.take_tick_requests(),
        vec![(a, Duration::from_millis(16))]
    );
    assert!(c.take_tick_requests().is_empty());
    Ok(())
}
