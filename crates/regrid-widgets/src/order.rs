#![forbid(unsafe_code)]

//! Visual order during a drag preview.
//!
//! While an item is dragged from `source` toward `destination`, the items in
//! between step one slot toward `source` to open a gap at `destination`.
//! Nothing is mutated: the committed order stays in the model and only the
//! rendered slot changes.

/// Where the dragged item came from and where it would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderShift {
    pub source: usize,
    pub destination: usize,
}

impl ReorderShift {
    /// Create a shift.
    #[inline]
    #[must_use]
    pub const fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Whether the preview differs from the committed order.
    #[inline]
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// Slot an item at committed index `actual` is rendered in.
///
/// The dragged item itself (`actual == source`) keeps its own index; it is
/// drawn at its slot offset by the live translation instead.
#[must_use]
pub fn visual_index(actual: usize, shift: Option<ReorderShift>) -> usize {
    let Some(shift) = shift else {
        return actual;
    };
    let ReorderShift {
        source,
        destination,
    } = shift;
    if actual == source || shift.is_noop() {
        return actual;
    }
    if destination < source && (destination..source).contains(&actual) {
        actual + 1
    } else if destination > source && actual > source && actual <= destination {
        actual - 1
    } else {
        actual
    }
}

/// Visual index of every item in a grid of `len` items.
#[must_use]
pub fn visual_order(len: usize, shift: Option<ReorderShift>) -> Vec<usize> {
    (0..len).map(|actual| visual_index(actual, shift)).collect()
}
