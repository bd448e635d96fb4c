#![forbid(unsafe_code)]

//! Raw pointer input.
//!
//! Hosts translate their platform's touch or mouse events into
//! [`PointerEvent`]s and feed them, in order, to the grid. Positions are in
//! the same coordinate space as the measured item and container bounds.

use crate::geometry::Point;

/// A single raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed (finger down, primary button down).
    Down(Point),
    /// Pointer moved while pressed.
    Move(Point),
    /// Pointer lifted.
    Up(Point),
    /// The platform took the pointer away (focus loss, system gesture).
    Cancel,
}

impl PointerEvent {
    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Down(pos) | Self::Move(pos) | Self::Up(pos) => Some(*pos),
            Self::Cancel => None,
        }
    }
}
