#![forbid(unsafe_code)]

//! The drag state machine.
//!
//! [`DragStateMachine`] owns the single [`DragState`] of a grid and applies
//! the gesture stream to it:
//!
//! ```text
//!   Inactive ──press──▶ Active ──sample──▶ Active
//!      ▲                  │
//!      ├──────cancel──────┤
//!      └─────release──────┘  (moves the item, reports the reorder)
//! ```
//!
//! # Invariants
//!
//! 1. The model is only mutated by [`release`](DragStateMachine::release).
//! 2. [`cancel`](DragStateMachine::cancel) never touches the model.
//! 3. A reorder is reported at most once per drag, and only when the drag
//!    produced a real (non-empty) dragged rectangle.
//! 4. The cached destination always indexes an item (`< item_count`).

use std::mem;

use regrid_core::geometry::{Rect, Vector};
use regrid_layout::ItemBoundsSnapshot;

use crate::model::{GridItem, GridModel};
use crate::order::{ReorderShift, visual_index};
use crate::overlap::best_slot;

/// Payload of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag<Id> {
    /// The dragged item.
    pub id: Id,
    /// Translation since the drag started.
    pub translation: Vector,
    /// Translation since the previous sample.
    pub delta: Vector,
    /// Last known frame of the dragged item, moved by `translation`.
    /// Empty until the first sample.
    pub rect: Rect,
    source: usize,
    destination: usize,
}

impl<Id> ActiveDrag<Id> {
    /// Committed index of the dragged item.
    #[inline]
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Where the item would land if released now.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Preview shift for the current sample.
    #[inline]
    #[must_use]
    pub fn shift(&self) -> ReorderShift {
        ReorderShift::new(self.source, self.destination)
    }
}

/// Whether anything is being dragged, and if so, what.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState<Id> {
    /// No drag in progress.
    Inactive,
    /// An item is being dragged.
    Active(ActiveDrag<Id>),
}

impl<Id> Default for DragState<Id> {
    fn default() -> Self {
        Self::Inactive
    }
}

impl<Id> DragState<Id> {
    /// The active drag, if any.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<&ActiveDrag<Id>> {
        match self {
            Self::Active(drag) => Some(drag),
            Self::Inactive => None,
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Read-only inputs a sample or release is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a, Id> {
    /// Candidate slot rectangles.
    pub slots: &'a [Rect],
    /// Last measured item frames.
    pub bounds: &'a ItemBoundsSnapshot<Id>,
    /// Number of items in the grid.
    pub item_count: usize,
}

/// A committed move, as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    pub from: usize,
    pub to: usize,
}

/// Result of releasing an active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct Release<Id> {
    /// The item that was dropped.
    pub id: Id,
    /// The reorder to report, `None` when the drag never had a real frame.
    pub commit: Option<Reorder>,
    /// Offset from the item's new slot to where it was dropped; animate to zero.
    pub residual: Vector,
}

/// Owner of the grid's [`DragState`].
#[derive(Debug, Clone)]
pub struct DragStateMachine<Id> {
    state: DragState<Id>,
}

impl<Id> Default for DragStateMachine<Id> {
    fn default() -> Self {
        Self {
            state: DragState::Inactive,
        }
    }
}

impl<Id: Clone + Eq + std::hash::Hash + std::fmt::Debug> DragStateMachine<Id> {
    /// A machine with no drag in progress.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DragState::Inactive,
        }
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &DragState<Id> {
        &self.state
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Preview shift for rendering, `None` when idle.
    #[must_use]
    pub fn shift(&self) -> Option<ReorderShift> {
        self.state.active().map(ActiveDrag::shift)
    }

    /// Visual slot for the item at committed index `actual`.
    #[must_use]
    pub fn visual_index(&self, actual: usize) -> usize {
        visual_index(actual, self.shift())
    }

    /// The press was held long enough on the item at committed index `source`.
    ///
    /// Returns `true` if a drag started; the caller fires tactile feedback
    /// exactly then. Refused while dragging is disabled or another drag is
    /// active.
    pub fn press(&mut self, id: Id, source: usize, drag_enabled: bool) -> bool {
        if !drag_enabled || self.state.is_active() {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(id = ?id, source, "grid.drag.start");
        self.state = DragState::Active(ActiveDrag {
            id,
            translation: Vector::ZERO,
            delta: Vector::ZERO,
            rect: Rect::ZERO,
            source,
            destination: source,
        });
        true
    }

    /// The pointer moved; `translation` is measured from the drag start.
    ///
    /// Returns `false` when no drag is active.
    pub fn sample(&mut self, translation: Vector, ctx: DragContext<'_, Id>) -> bool {
        let DragState::Active(drag) = &mut self.state else {
            return false;
        };
        apply_sample(drag, translation, &ctx);
        true
    }

    /// Abandon the drag. The model is left untouched.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn cancel(&mut self) -> bool {
        match mem::take(&mut self.state) {
            DragState::Active(drag) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(id = ?drag.id, source = drag.source, "grid.drag.cancel");
                true
            }
            DragState::Inactive => false,
        }
    }

    /// The pointer was lifted: resolve the drop, move the item, go idle.
    ///
    /// `translation` is the final translation reported with the release; it
    /// is applied as a last sample if it differs from the current one.
    pub fn release<T>(
        &mut self,
        translation: Vector,
        ctx: DragContext<'_, Id>,
        model: &mut GridModel<T>,
    ) -> Option<Release<Id>>
    where
        T: GridItem<Id = Id>,
    {
        let DragState::Active(mut drag) = mem::take(&mut self.state) else {
            return None;
        };
        if translation != drag.translation {
            apply_sample(&mut drag, translation, &ctx);
        }

        let current = model.index_of(&drag.id);
        debug_assert!(
            current.is_some(),
            "dragged item {:?} is not in the grid",
            drag.id
        );
        let Some(current) = current else {
            #[cfg(feature = "tracing")]
            tracing::warn!(id = ?drag.id, "grid.drag.missing_item");
            return None;
        };

        let real = !drag.rect.is_empty();
        let to = if real {
            resolve_destination(&drag.rect, &ctx).unwrap_or(current)
        } else {
            current
        };

        // Measured against the slot table as it was before the move.
        let residual = match ctx.slots.get(to) {
            Some(slot) if real => drag.rect.origin() - slot.origin(),
            _ => drag.translation,
        };

        model.move_item(current, to);

        let commit = real.then_some(Reorder { from: current, to });
        #[cfg(feature = "tracing")]
        if let Some(reorder) = commit {
            tracing::debug!(
                id = ?drag.id,
                from = reorder.from,
                to = reorder.to,
                "grid.drag.commit"
            );
        }
        Some(Release {
            id: drag.id,
            commit,
            residual,
        })
    }
}

fn apply_sample<Id: Eq + std::hash::Hash>(
    drag: &mut ActiveDrag<Id>,
    translation: Vector,
    ctx: &DragContext<'_, Id>,
) {
    drag.delta = translation - drag.translation;
    drag.translation = translation;
    if let Some(frame) = ctx
        .bounds
        .get(&drag.id)
        .or_else(|| ctx.slots.get(drag.source).copied())
    {
        drag.rect = frame.offset(translation);
    }
    drag.destination = resolve_destination(&drag.rect, ctx).unwrap_or(drag.source);
}

/// Overlap match clamped to the last item: the spare slots past the end all
/// mean "last".
fn resolve_destination<Id>(rect: &Rect, ctx: &DragContext<'_, Id>) -> Option<usize> {
    let last = ctx.item_count.checked_sub(1)?;
    best_slot(rect, ctx.slots).map(|slot| slot.min(last))
}
