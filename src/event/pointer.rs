//! Core primitives for representing pointer input.

use crate::geom::Point;

/// Pointer button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button.
    Middle,
}

/// A button press or release.
///
/// The position is in screen coordinates when the event enters the router;
/// handlers receive it translated into their own local space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Which button changed state.
    pub button: Button,
    /// True on press, false on release.
    pub down: bool,
    /// Cursor position.
    pub pos: Point,
}

impl ButtonEvent {
    /// A left-button press at a position.
    pub fn press(pos: impl Into<Point>) -> Self {
        Self {
            button: Button::Left,
            down: true,
            pos: pos.into(),
        }
    }

    /// A left-button release at a position.
    pub fn release(pos: impl Into<Point>) -> Self {
        Self {
            button: Button::Left,
            down: false,
            pos: pos.into(),
        }
    }
}
