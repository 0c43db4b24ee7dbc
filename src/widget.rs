//! The widget trait: behavior attached to nodes in the view arena.

use std::{
    any::{Any, type_name},
    time::Duration,
};

use crate::{context::EventCtx, event::Event, geom::Expanse, render::DrawContext};

/// The result of an event handler. These are the only caller-visible
/// outcomes of dispatch.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was not handled; propagation continues to the next sibling,
    /// then the parent.
    Ignore,
    /// The event was handled. A press answered with `Accept` captures the
    /// pointer and may move focus.
    Accept,
    /// The event was handled and the gesture is complete; no capture is
    /// established.
    Finish,
}

/// Behavior attached to a view node.
///
/// All methods are defaulted; a concrete widget overrides the capabilities
/// it has. Handlers run mid-dispatch with full mutable access to the tree
/// through the context, and may delete any node, including their own.
pub trait Widget: Any {
    /// Handle an input event. Pointer positions are in local coordinates.
    fn on_event(&mut self, _event: &Event, _ctx: &mut EventCtx) -> EventOutcome {
        EventOutcome::Ignore
    }

    /// Draw this view's own content. Children are drawn separately,
    /// parent-first, by the draw pass.
    fn draw(&mut self, _ctx: &mut DrawContext) {}

    /// Whether an accepted press on this view should move keyboard focus
    /// to it.
    fn accept_focus(&self) -> bool {
        false
    }

    /// The size this view would choose for itself, consulted by container
    /// layout.
    fn preferred_size(&self) -> Expanse {
        Expanse::zero()
    }

    /// Scheduled timer callback. Return the delay until the next callback
    /// to stay scheduled.
    fn on_tick(&mut self, _ctx: &mut EventCtx) -> Option<Duration> {
        None
    }

    /// Name used for debugging and traces.
    fn name(&self) -> String {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name).to_string()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
