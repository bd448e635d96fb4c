#![forbid(unsafe_code)]

//! regrid public facade crate.
//!
//! Re-exports the types a host needs to embed a reorderable grid and offers a
//! small prelude.
//!
//! ```ignore
//! use regrid::prelude::*;
//!
//! let config = GridConfig::builder().columns(4).build()?;
//! let mut grid = ReorderableGrid::new(vec![1u32, 2, 3, 4, 5], config)?
//!     .on_reorder(|from, to| println!("moved {from} -> {to}"));
//! grid.on_container_measured(Rect::new(0.0, 0.0, 400.0, 300.0));
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use regrid_core::animation::Animation;
pub use regrid_core::animation::spring::Spring;
pub use regrid_core::event::PointerEvent;
pub use regrid_core::geometry::{Point, Rect, Size, Vector};
pub use regrid_core::gesture::{GestureEvent, PressConfig, PressDragRecognizer};

// --- Layout re-exports -----------------------------------------------------

pub use regrid_layout::{
    BOUNDS_EPSILON, GridConfig, GridConfigBuilder, GridConfigError, GridGeometry,
    ItemBoundsSnapshot, SlotTable, SlotUpdate,
};

// --- Widget re-exports -----------------------------------------------------

pub use regrid_widgets::{
    ActiveDrag, DragContext, DragState, DragStateMachine, GridItem, GridModel, GridModelError,
    NoFeedback, OVERLAP_THRESHOLD, Release, RenderedCell, Reorder, ReorderShift,
    ReorderableGrid, TactileFeedback, best_slot, overlap_ratio, visual_index, visual_order,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragState, Error, GridConfig, GridItem, GridModel, Point, PointerEvent, Rect,
        RenderedCell, Reorder, ReorderableGrid, Result, Size, TactileFeedback, Vector,
    };

    pub use crate::{core, layout, widgets};
}

pub use regrid_core as core;
pub use regrid_layout as layout;
pub use regrid_widgets as widgets;
