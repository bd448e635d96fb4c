#![forbid(unsafe_code)]

//! Grid layout: configuration, cell geometry, and candidate slot tables.
//!
//! # Role in regrid
//! `regrid-layout` answers "where is slot `k`?" for a fixed-column grid. It
//! owns no interaction state; the drag state machine in `regrid-widgets`
//! reads the [`SlotTable`] and [`ItemBoundsSnapshot`] and tells the table
//! when it must hold still.

pub mod bounds;
pub mod config;
pub mod grid;
pub mod slots;

pub use bounds::ItemBoundsSnapshot;
pub use config::{GridConfig, GridConfigBuilder, GridConfigError};
pub use grid::GridGeometry;
pub use regrid_core::geometry::{Point, Rect, Size, Vector};
pub use slots::{BOUNDS_EPSILON, SlotTable, SlotUpdate};
