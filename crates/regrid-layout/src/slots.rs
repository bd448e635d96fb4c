#![forbid(unsafe_code)]

//! The live candidate slot table.
//!
//! A [`SlotTable`] caches the candidate rectangles for the current container
//! bounds and item count. It only recomputes when the container moves or
//! resizes by more than [`BOUNDS_EPSILON`], and never while the caller
//! reports the table as frozen (an interaction is in progress). A change
//! that arrives while frozen is remembered and applied by
//! [`apply_deferred`](SlotTable::apply_deferred).

use regrid_core::geometry::{Rect, Size};

use crate::grid::GridGeometry;

/// Bounds changes at or below this many units are layout jitter.
pub const BOUNDS_EPSILON: f32 = 1.0;

/// What a measurement did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Slots were rebuilt.
    Recomputed,
    /// Change was within epsilon (or nothing changed).
    Unchanged,
    /// Table is frozen; the change was stored for later.
    Deferred,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    container: Rect,
    item_count: usize,
}

/// Candidate slots for the current layout.
#[derive(Debug, Clone)]
pub struct SlotTable {
    geometry: GridGeometry,
    container: Option<Rect>,
    item_count: usize,
    slots: Vec<Rect>,
    pending: Option<Pending>,
}

impl SlotTable {
    /// An empty table; slots appear with the first container measurement.
    #[must_use]
    pub fn new(geometry: GridGeometry, item_count: usize) -> Self {
        Self {
            geometry,
            container: None,
            item_count,
            slots: Vec::new(),
            pending: None,
        }
    }

    /// Current candidate slots.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Rect] {
        &self.slots
    }

    /// Slot `index`, if the table has one.
    #[inline]
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).copied()
    }

    /// Last container bounds the slots were built from.
    #[inline]
    #[must_use]
    pub fn container(&self) -> Option<Rect> {
        self.container
    }

    /// Geometry the table was built with.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Cell size for the current container, zero before the first measurement.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        self.container
            .map(|bounds| self.geometry.cell_size(bounds.width))
            .unwrap_or_default()
    }

    /// Whether a change is waiting for the freeze to lift.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Feed a container measurement.
    pub fn on_container_measured(&mut self, bounds: Rect, frozen: bool) -> SlotUpdate {
        let significant = self
            .container
            .is_none_or(|current| bounds_changed(current, bounds));
        if !significant {
            // Bounds drifted back: a pending resize no longer applies.
            if let (Some(pending), Some(current)) = (self.pending.as_mut(), self.container) {
                pending.container = current;
            }
            return SlotUpdate::Unchanged;
        }
        if frozen {
            self.defer(bounds, self.item_count);
            return SlotUpdate::Deferred;
        }
        self.rebuild(bounds, self.item_count);
        SlotUpdate::Recomputed
    }

    /// Feed a new item count (items were added or removed by the host).
    pub fn set_item_count(&mut self, item_count: usize, frozen: bool) -> SlotUpdate {
        if item_count == self.item_count {
            return SlotUpdate::Unchanged;
        }
        let Some(bounds) = self.container else {
            self.item_count = item_count;
            return SlotUpdate::Unchanged;
        };
        if frozen {
            let container = self.pending.map_or(bounds, |pending| pending.container);
            self.defer(container, item_count);
            return SlotUpdate::Deferred;
        }
        self.rebuild(bounds, item_count);
        SlotUpdate::Recomputed
    }

    /// Apply whatever arrived while the table was frozen.
    pub fn apply_deferred(&mut self) -> SlotUpdate {
        match self.pending.take() {
            Some(pending) => {
                self.rebuild(pending.container, pending.item_count);
                SlotUpdate::Recomputed
            }
            None => SlotUpdate::Unchanged,
        }
    }

    fn defer(&mut self, container: Rect, item_count: usize) {
        let item_count = self.pending.map_or(item_count, |pending| {
            if item_count == self.item_count {
                pending.item_count
            } else {
                item_count
            }
        });
        self.pending = Some(Pending {
            container,
            item_count,
        });
    }

    fn rebuild(&mut self, bounds: Rect, item_count: usize) {
        self.container = Some(bounds);
        self.item_count = item_count;
        self.slots = self
            .geometry
            .candidate_slots(item_count, bounds.width, Some(bounds.origin()));
    }
}

fn bounds_changed(current: Rect, next: Rect) -> bool {
    (current.height - next.height).abs() > BOUNDS_EPSILON
        || (current.width - next.width).abs() > BOUNDS_EPSILON
        || (current.x - next.x).abs() > BOUNDS_EPSILON
        || (current.y - next.y).abs() > BOUNDS_EPSILON
}
