//! Instrumented widgets and backends for testing view trees.

use std::{cell::RefCell, time::Duration};

use crate::{
    clip::ClipRegion,
    context::EventCtx,
    event::Event,
    geom::{Expanse, Rect},
    render::{DrawBackend, DrawContext},
    widget::{EventOutcome, Widget},
};

/// Thread-local state tracked by test widgets.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct State {
    /// Recorded event entries, in delivery order.
    pub path: Vec<String>,
}

thread_local! {
    static TSTATE: RefCell<State> = RefCell::new(State::default());
}

/// Clear the recorded test state.
pub fn reset_state() {
    TSTATE.with(|s| s.borrow_mut().path.clear());
}

/// Get a copy of the current test state.
pub fn get_state() -> State {
    TSTATE.with(|s| s.borrow().clone())
}

/// Record an entry in the test state.
pub fn log(entry: impl Into<String>) {
    TSTATE.with(|s| s.borrow_mut().path.push(entry.into()));
}

fn event_kind(e: &Event) -> &'static str {
    match e {
        Event::PointerMove(_) => "move",
        Event::PointerButton(b) if b.down => "press",
        Event::PointerButton(_) => "release",
        Event::Key(_) => "key",
        Event::HoverIn => "hover_in",
        Event::HoverOut => "hover_out",
        Event::FocusOn => "focus_on",
        Event::FocusOff => "focus_off",
        Event::Tick(_) => "tick",
    }
}

/// Hook type run from a test widget's event handler.
pub type EventHook = Box<dyn FnMut(&Event, &mut EventCtx)>;

/// An instrumented widget that records every event it receives as
/// `label@kind` and answers pointer and key events with a configurable
/// outcome. An optional hook runs mid-dispatch with full tree access, which
/// is how structural-mutation-during-dispatch is exercised.
pub struct TWidget {
    label: String,
    outcome: EventOutcome,
    focusable: bool,
    preferred: Expanse,
    tick_reply: Option<Duration>,
    hook: Option<EventHook>,
}

impl TWidget {
    /// A widget that ignores everything.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: EventOutcome::Ignore,
            focusable: false,
            preferred: Expanse::zero(),
            tick_reply: None,
            hook: None,
        }
    }

    /// Answer pointer and key events with the given outcome.
    pub fn with_outcome(mut self, outcome: EventOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Accept focus on accepted presses.
    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }

    /// Report a preferred size.
    pub fn with_preferred(mut self, size: impl Into<Expanse>) -> Self {
        self.preferred = size.into();
        self
    }

    /// Ask to be rescheduled with the given delay from every tick.
    pub fn with_tick(mut self, delay: Duration) -> Self {
        self.tick_reply = Some(delay);
        self
    }

    /// Run a hook from the event handler, after logging.
    pub fn with_hook(mut self, hook: EventHook) -> Self {
        self.hook = Some(hook);
        self
    }
}

impl Widget for TWidget {
    fn on_event(&mut self, event: &Event, ctx: &mut EventCtx) -> EventOutcome {
        log(format!("{}@{}", self.label, event_kind(event)));
        if let Some(hook) = &mut self.hook {
            hook(event, ctx);
        }
        match event {
            Event::PointerMove(_) | Event::PointerButton(_) | Event::Key(_) => self.outcome,
            _ => EventOutcome::Ignore,
        }
    }

    fn draw(&mut self, ctx: &mut DrawContext) {
        log(format!("{}@draw", self.label));
        ctx.backend.fill_rect(ctx.area, [255, 255, 255, 255]);
    }

    fn on_tick(&mut self, _ctx: &mut EventCtx) -> Option<Duration> {
        log(format!("{}@tick", self.label));
        self.tick_reply
    }

    fn accept_focus(&self) -> bool {
        self.focusable
    }

    fn preferred_size(&self) -> Expanse {
        self.preferred
    }

    fn name(&self) -> String {
        self.label.clone()
    }
}

/// A recorded draw operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    /// The active clip changed.
    Clip(Option<ClipRegion>),
    /// A rect was filled.
    Fill(Rect),
}

/// A backend that records the operations issued to it.
#[derive(Default)]
pub struct TestBackend {
    /// Recorded operations, in order.
    pub ops: Vec<DrawOp>,
}

impl TestBackend {
    /// An empty recording backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The filled rects, in draw order.
    pub fn fills(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(r) => Some(*r),
                DrawOp::Clip(_) => None,
            })
            .collect()
    }
}

impl DrawBackend for TestBackend {
    fn set_clip(&mut self, region: Option<&ClipRegion>) {
        self.ops.push(DrawOp::Clip(region.copied()));
    }

    fn fill_rect(&mut self, rect: Rect, _rgba: [u8; 4]) {
        self.ops.push(DrawOp::Fill(rect));
    }
}
