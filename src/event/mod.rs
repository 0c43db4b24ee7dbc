//! Input events consumed from the host windowing collaborator.

pub mod key;
pub mod pointer;

use std::sync::mpsc;

use crate::{geom::Point, view::ViewId};

/// All event types that drive a view tree.
///
/// Pointer and key events arrive from the host in screen coordinates and are
/// routed by [`Context::event`](crate::Context::event). The hover and focus
/// variants are synthesized by the router and delivered point-to-point; they
/// never propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Cursor motion in screen coordinates.
    PointerMove(Point),
    /// A button press or release.
    PointerButton(pointer::ButtonEvent),
    /// A keystroke.
    Key(key::Key),
    /// The cursor entered this view.
    HoverIn,
    /// The cursor left this view.
    HoverOut,
    /// The view gained keyboard focus.
    FocusOn,
    /// The view lost keyboard focus.
    FocusOff,
    /// Scheduled timer callbacks are due for the listed views.
    Tick(Vec<ViewId>),
}

/// An emitter polled by the owning thread to retrieve events.
///
/// Hosts that receive input or timer callbacks on other threads send
/// [`Event`]s into the paired channel; the owning thread drains them here
/// before touching the tree. This is the single cross-thread hand-off point.
pub struct EventSource {
    rx: mpsc::Receiver<Event>,
}

impl EventSource {
    /// Wrap the receiving end of an event channel.
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self { rx }
    }

    /// Retrieve the next event, blocking until one is received or the
    /// channel closes.
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    /// Retrieve the next event without blocking.
    pub fn try_next(&self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}
