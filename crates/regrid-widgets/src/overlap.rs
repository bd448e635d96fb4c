#![forbid(unsafe_code)]

//! Drop target resolution by overlap ratio.
//!
//! The ratio divides the shared area by the *dragged* rectangle's area, so it
//! does not depend on the candidate's size and stays meaningful when part of
//! the dragged item hangs off the grid.

use regrid_core::geometry::Rect;

/// A candidate matches when strictly more than this share of the dragged
/// rectangle lies inside it.
pub const OVERLAP_THRESHOLD: f32 = 0.7;

/// Share of `dragged` covered by `candidate`, in `[0.0, 1.0]`.
///
/// A dragged rectangle with no area overlaps nothing.
#[must_use]
pub fn overlap_ratio(dragged: &Rect, candidate: &Rect) -> f32 {
    let area = dragged.area();
    if area <= 0.0 {
        return 0.0;
    }
    dragged.intersection(candidate).area() / area
}

/// First candidate (lowest index) whose ratio exceeds [`OVERLAP_THRESHOLD`].
#[must_use]
pub fn best_slot(dragged: &Rect, candidates: &[Rect]) -> Option<usize> {
    candidates
        .iter()
        .position(|candidate| overlap_ratio(dragged, candidate) > OVERLAP_THRESHOLD)
}
