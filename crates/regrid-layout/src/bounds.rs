#![forbid(unsafe_code)]

//! Last measured on-screen bounds per item.

use std::borrow::Borrow;
use std::hash::Hash;

use regrid_core::geometry::Rect;
use rustc_hash::FxHashMap;

/// Map from item id to its last measured rectangle.
///
/// Measurements report an item's resting frame (its slot), not the frame it
/// is drawn at while being dragged.
#[derive(Debug, Clone)]
pub struct ItemBoundsSnapshot<Id> {
    bounds: FxHashMap<Id, Rect>,
}

impl<Id> Default for ItemBoundsSnapshot<Id> {
    fn default() -> Self {
        Self {
            bounds: FxHashMap::default(),
        }
    }
}

impl<Id: Eq + Hash> ItemBoundsSnapshot<Id> {
    /// An empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measurement. Returns `true` if the stored rectangle changed.
    pub fn record(&mut self, id: Id, rect: Rect) -> bool {
        self.bounds.insert(id, rect) != Some(rect)
    }

    /// Last measured rectangle for `id`.
    #[must_use]
    pub fn get<Q>(&self, id: &Q) -> Option<Rect>
    where
        Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.bounds.get(id).copied()
    }

    /// Forget one item.
    pub fn remove<Q>(&mut self, id: &Q) -> Option<Rect>
    where
        Id: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.bounds.remove(id)
    }

    /// Keep only the ids for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&Id) -> bool) {
        self.bounds.retain(|id, _| keep(id));
    }

    /// Number of measured items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Whether nothing has been measured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.bounds.clear();
    }
}
