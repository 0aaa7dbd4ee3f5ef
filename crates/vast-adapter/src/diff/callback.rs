//! Equality strategies for the diff engine.
//!
//! The engine asks two questions about a pair of rows:
//!
//! - **same item**: is this the same logical row, possibly moved? Must be
//!   cheap (an id or key comparison); it is called O((N+M)·D) times.
//! - **same content**: does a matched row need rebinding? May be a deep
//!   comparison; it is only asked for pairs that already matched as the same
//!   item.
//!
//! Callers implement [`ItemDiff`] over their item type, or use one of the
//! provided strategies. [`WrapperComparator`] lifts an `ItemDiff<T>` to
//! [`ItemWrapper<T>`] rows by also requiring equal type keys.
//!
//! Without a meaningful identity (e.g. [`EqDiff`] over items whose content
//! changes), every edit degenerates to remove + insert. The result is still
//! correct, just not minimal.

use std::sync::Arc;

use crate::item::ItemWrapper;

/// Identity and content equality over caller items.
///
/// Both methods must be pure and total. A panicking comparator aborts the
/// submission that invoked it; the adapter keeps its previous snapshot.
pub trait ItemDiff<T>: Send + Sync {
    /// Whether `old` and `new` represent the same logical row.
    fn same_item(&self, old: &T, new: &T) -> bool;

    /// Whether a matched row's displayed content is unchanged.
    fn same_content(&self, old: &T, new: &T) -> bool;
}

impl<T, D: ItemDiff<T> + ?Sized> ItemDiff<T> for Arc<D> {
    fn same_item(&self, old: &T, new: &T) -> bool {
        (**self).same_item(old, new)
    }

    fn same_content(&self, old: &T, new: &T) -> bool {
        (**self).same_content(old, new)
    }
}

impl<T, D: ItemDiff<T> + ?Sized> ItemDiff<T> for Box<D> {
    fn same_item(&self, old: &T, new: &T) -> bool {
        (**self).same_item(old, new)
    }

    fn same_content(&self, old: &T, new: &T) -> bool {
        (**self).same_content(old, new)
    }
}

/// Identity by an extracted key, content by `PartialEq`.
///
/// ```
/// use vast_adapter::{ItemDiff, KeyDiff};
///
/// #[derive(PartialEq)]
/// struct Song { id: u64, title: &'static str }
///
/// let diff = KeyDiff::new(|s: &Song| s.id);
/// let a = Song { id: 1, title: "A" };
/// let b = Song { id: 1, title: "B" };
/// assert!(diff.same_item(&a, &b));
/// assert!(!diff.same_content(&a, &b));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyDiff<F> {
    key: F,
}

impl<F> KeyDiff<F> {
    #[must_use]
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> ItemDiff<T> for KeyDiff<F>
where
    T: PartialEq,
    K: PartialEq,
    F: Fn(&T) -> K + Send + Sync,
{
    fn same_item(&self, old: &T, new: &T) -> bool {
        (self.key)(old) == (self.key)(new)
    }

    fn same_content(&self, old: &T, new: &T) -> bool {
        old == new
    }
}

/// Both questions answered by caller closures.
#[derive(Debug, Clone, Copy)]
pub struct FnDiff<I, C> {
    same_item: I,
    same_content: C,
}

impl<I, C> FnDiff<I, C> {
    #[must_use]
    pub const fn new(same_item: I, same_content: C) -> Self {
        Self {
            same_item,
            same_content,
        }
    }
}

impl<T, I, C> ItemDiff<T> for FnDiff<I, C>
where
    I: Fn(&T, &T) -> bool + Send + Sync,
    C: Fn(&T, &T) -> bool + Send + Sync,
{
    fn same_item(&self, old: &T, new: &T) -> bool {
        (self.same_item)(old, new)
    }

    fn same_content(&self, old: &T, new: &T) -> bool {
        (self.same_content)(old, new)
    }
}

/// Identity by allocation: two rows are the same item only if they share the
/// same `Arc`. Shared items are immutable, so their content is always equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PtrDiff;

impl<T> ItemDiff<T> for PtrDiff {
    fn same_item(&self, old: &T, new: &T) -> bool {
        std::ptr::eq(old, new)
    }

    fn same_content(&self, _old: &T, _new: &T) -> bool {
        true
    }
}

/// `PartialEq` for both identity and content.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqDiff;

impl<T: PartialEq> ItemDiff<T> for EqDiff {
    fn same_item(&self, old: &T, new: &T) -> bool {
        old == new
    }

    fn same_content(&self, old: &T, new: &T) -> bool {
        old == new
    }
}

/// Row-level comparator used by the diff engine.
///
/// Rows are the same item when their type keys are equal and the caller's
/// [`ItemDiff::same_item`] agrees. Two placeholders are always the same
/// item with the same content; a placeholder never matches a data row.
///
/// Listener handles are not compared: dispatch resolves them from the live
/// snapshot, so a row whose only change is its listeners needs no
/// notification.
pub struct WrapperComparator<T> {
    inner: Arc<dyn ItemDiff<T>>,
}

impl<T> Clone for WrapperComparator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for WrapperComparator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperComparator").finish_non_exhaustive()
    }
}

impl<T> WrapperComparator<T> {
    pub fn new(diff: impl ItemDiff<T> + 'static) -> Self {
        Self {
            inner: Arc::new(diff),
        }
    }

    /// Whether the rows represent the same logical item.
    pub fn are_items_the_same(&self, old: &ItemWrapper<T>, new: &ItemWrapper<T>) -> bool {
        if old.type_key() != new.type_key() {
            return false;
        }
        match (old.data(), new.data()) {
            (Some(a), Some(b)) => self.inner.same_item(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Whether a matched row can keep its current binding.
    pub fn are_contents_the_same(&self, old: &ItemWrapper<T>, new: &ItemWrapper<T>) -> bool {
        match (old.data(), new.data()) {
            (Some(a), Some(b)) => self.inner.same_content(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
