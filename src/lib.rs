//! A retained-mode UI scene graph.
//!
//! The tree is an arena of rectangular views addressed by
//! generation-checked ids, which makes structural mutation during event
//! dispatch safe: a handler may delete itself, a sibling, or an ancestor's
//! other children, and in-flight walks simply skip the stale ids.
//!
//! A [`Context`] owns the arena and one or more z-ordered [`Section`]s.
//! Each section holds a keyboard focus slot, a hover chain and a pointer
//! capture slot, all weak and swept by the destruction path. Input routing,
//! the space-distribution layout solver and nested clip bookkeeping live
//! here; rasterization, window creation and concrete widget behaviors are
//! the host's, behind the [`Widget`] and [`DrawBackend`] traits.

mod arena;
mod clip;
mod context;
pub mod error;
pub mod event;
pub mod geom;
pub mod layout;
mod poll;
mod render;
mod section;
pub mod tutils;
mod view;
mod widget;

pub use arena::Arena;
pub use clip::{ClipRegion, ClipStack};
pub use context::{Context, EventCtx};
pub use error::{Error, Result};
pub use event::{Event, EventSource};
pub use layout::{Align, Axis, ChildConstraint, LayoutSpec, Margins};
pub use poll::Poller;
pub use render::{DrawBackend, DrawContext};
pub use section::{Section, SectionId};
pub use view::{ViewId, ViewNode};
pub use widget::{EventOutcome, Widget};

// Commonly used geometry types at the root.
pub use geom::{Expanse, Point, Rect};
