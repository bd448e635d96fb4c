#![forbid(unsafe_code)]

//! Widgets: the committed model, drag state machine, and the reorderable grid.
//!
//! # Role in regrid
//! `regrid-widgets` owns every piece of interaction state. The
//! [`drag::DragStateMachine`] is the single source of truth for "is anything
//! being dragged"; [`order`] and [`overlap`] are the pure functions it uses
//! to preview and resolve a drop; [`model::GridModel`] is the committed
//! order, touched only when a drop completes.
//!
//! # How it fits in the system
//! [`grid::ReorderableGrid`] is what hosts embed. It takes pointer events
//! and layout measurements in, and hands back placed cells and committed
//! reorders.

pub mod drag;
pub mod feedback;
pub mod grid;
pub mod model;
pub mod order;
pub mod overlap;

pub use drag::{ActiveDrag, DragContext, DragState, DragStateMachine, Release, Reorder};
pub use feedback::{NoFeedback, TactileFeedback};
pub use grid::{RenderedCell, ReorderableGrid};
pub use model::{GridItem, GridModel, GridModelError};
pub use order::{ReorderShift, visual_index, visual_order};
pub use overlap::{OVERLAP_THRESHOLD, best_slot, overlap_ratio};
