#![forbid(unsafe_code)]

//! Fixed-column grid geometry.
//!
//! Cells are laid out row-major: slot `k` sits in column `k % columns` and
//! row `k / columns`. The candidate slot set always carries one row more than
//! the items strictly need (`rows = item_count / columns + 1`), so a
//! destination slot exists even while the set is a rectangle short during a
//! recompute.

use regrid_core::geometry::{Point, Rect, Size};

use crate::config::GridConfig;

/// Pure cell and slot arithmetic for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    columns: u16,
    horizontal_gap: f32,
    vertical_gap: f32,
    aspect_ratio: f32,
}

impl GridGeometry {
    /// Geometry for a validated configuration.
    #[must_use]
    pub fn new(config: &GridConfig) -> Self {
        Self {
            columns: config.columns(),
            horizontal_gap: config.horizontal_gap(),
            vertical_gap: config.vertical_gap(),
            aspect_ratio: config.aspect_ratio(),
        }
    }

    /// Column count.
    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns as usize
    }

    /// Size of one cell in a container `container_width` wide.
    ///
    /// Widths too narrow to fit the gaps produce zero-sized cells.
    #[must_use]
    pub fn cell_size(&self, container_width: f32) -> Size {
        let columns = f32::from(self.columns);
        let gaps = self.horizontal_gap * (columns - 1.0);
        let width = ((container_width - gaps) / columns).max(0.0);
        Size::new(width, width * self.aspect_ratio)
    }

    /// Number of candidate slots for `item_count` items.
    #[must_use]
    pub const fn slot_count(&self, item_count: usize) -> usize {
        let columns = self.columns();
        columns * (item_count / columns + 1)
    }

    /// Rectangle of slot `index`.
    #[must_use]
    pub fn slot_rect(&self, index: usize, container_width: f32, origin: Option<Point>) -> Rect {
        let cell = self.cell_size(container_width);
        self.place(index, cell, origin.unwrap_or(Point::ZERO))
    }

    /// Every candidate slot for `item_count` items, row-major.
    #[must_use]
    pub fn candidate_slots(
        &self,
        item_count: usize,
        container_width: f32,
        origin: Option<Point>,
    ) -> Vec<Rect> {
        let cell = self.cell_size(container_width);
        let origin = origin.unwrap_or(Point::ZERO);
        (0..self.slot_count(item_count))
            .map(|index| self.place(index, cell, origin))
            .collect()
    }

    /// Height needed to show `item_count` items (no spare row).
    #[must_use]
    pub fn content_height(&self, item_count: usize, container_width: f32) -> f32 {
        if item_count == 0 {
            return 0.0;
        }
        let rows = item_count.div_ceil(self.columns()) as f32;
        let cell = self.cell_size(container_width);
        rows * cell.height + (rows - 1.0) * self.vertical_gap
    }

    fn place(&self, index: usize, cell: Size, origin: Point) -> Rect {
        let column = (index % self.columns()) as f32;
        let row = (index / self.columns()) as f32;
        Rect::new(
            origin.x + column * (cell.width + self.horizontal_gap),
            origin.y + row * (cell.height + self.vertical_gap),
            cell.width,
            cell.height,
        )
    }
}
