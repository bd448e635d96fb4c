#![forbid(unsafe_code)]

//! The committed item order.
//!
//! [`GridModel`] holds the host's items in their authoritative order. Drag
//! previews never touch it; only a completed drop moves an item, and it does
//! so with a single rotation that keeps everyone else's relative order.

use std::fmt;
use std::hash::Hash;

use ahash::AHashMap;

/// An item that can live in a reorderable grid.
///
/// The id must be stable for the item's lifetime and unique within a grid;
/// it is how the grid keeps track of an item while its position changes.
pub trait GridItem {
    /// Stable identity.
    type Id: Clone + Eq + Hash + fmt::Debug;

    /// This item's id.
    fn grid_id(&self) -> Self::Id;
}

macro_rules! impl_grid_item_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GridItem for $ty {
                type Id = $ty;

                #[inline]
                fn grid_id(&self) -> $ty {
                    *self
                }
            }
        )*
    };
}

impl_grid_item_for_primitive!(u8, u16, u32, u64, usize, i32, i64, char, &'static str);

/// Why a model could not be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridModelError {
    /// Two items share an id.
    DuplicateId { first: usize, duplicate: usize },
}

impl fmt::Display for GridModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { first, duplicate } => write!(
                f,
                "items at index {first} and {duplicate} share the same id"
            ),
        }
    }
}

impl std::error::Error for GridModelError {}

/// Ordered items with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel<T> {
    items: Vec<T>,
}

impl<T: GridItem> GridModel<T> {
    /// Wrap the host's items. Fails if two items share an id.
    pub fn new(items: Vec<T>) -> Result<Self, GridModelError> {
        let mut seen = AHashMap::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(first) = seen.insert(item.grid_id(), index) {
                return Err(GridModelError::DuplicateId {
                    first,
                    duplicate: index,
                });
            }
        }
        Ok(Self { items })
    }

    /// Position of `id`, or `None` if it is not in the grid.
    ///
    /// Linear scan; grids hold tens to low hundreds of items.
    #[must_use]
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.grid_id() == *id)
    }

    /// Move the item at `from` so it ends up at `to`.
    ///
    /// Items between the two positions shift by one toward `from`. Returns
    /// `true` if the order changed. Out-of-range indices are a caller bug:
    /// they panic in debug builds and are ignored in release builds.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        debug_assert!(
            from < len && to < len,
            "move {from} -> {to} out of range for {len} items"
        );
        if from >= len || to >= len {
            #[cfg(feature = "tracing")]
            tracing::warn!(from, to, len, "grid.model.move_out_of_range");
            return false;
        }
        match from.cmp(&to) {
            std::cmp::Ordering::Less => self.items[from..=to].rotate_left(1),
            std::cmp::Ordering::Greater => self.items[to..=from].rotate_right(1),
            std::cmp::Ordering::Equal => return false,
        }
        true
    }

    /// Ids in committed order.
    pub fn ids(&self) -> impl Iterator<Item = T::Id> + '_ {
        self.items.iter().map(GridItem::grid_id)
    }
}

impl<T> GridModel<T> {
    /// Items in committed order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Item at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the grid is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Hand the items back in committed order.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
