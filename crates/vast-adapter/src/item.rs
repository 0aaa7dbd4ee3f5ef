//! Uniform row envelope.
//!
//! An [`ItemWrapper`] pairs one caller item with the [`TypeKey`] that picks
//! its view binding, plus optional handles to listeners in the adapter's
//! [`ListenerTable`](crate::ListenerTable). Wrappers are created when the
//! caller submits a list and dropped when a later submission supersedes
//! them. The item itself is shared (`Arc<T>`) and never mutated.

use std::sync::Arc;

use crate::events::{ChildId, ClickId, LongClickId};
use crate::type_key::TypeKey;

/// One row of the adapter's snapshot.
#[derive(Debug)]
pub struct ItemWrapper<T> {
    data: Option<Arc<T>>,
    type_key: TypeKey,
    click: Option<ClickId>,
    long_click: Option<LongClickId>,
    // Sorted by child id.
    child_clicks: Vec<(ChildId, ClickId)>,
    child_long_clicks: Vec<(ChildId, LongClickId)>,
}

impl<T> Clone for ItemWrapper<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            type_key: self.type_key.clone(),
            click: self.click,
            long_click: self.long_click,
            child_clicks: self.child_clicks.clone(),
            child_long_clicks: self.child_long_clicks.clone(),
        }
    }
}

impl<T> ItemWrapper<T> {
    /// Wrap an item with its type key and optional row listeners.
    #[must_use]
    pub fn wrap(
        item: T,
        type_key: impl Into<TypeKey>,
        click: Option<ClickId>,
        long_click: Option<LongClickId>,
    ) -> Self {
        Self::wrap_shared(Arc::new(item), type_key, click, long_click)
    }

    /// Like [`wrap`](Self::wrap) for an item that is already shared.
    #[must_use]
    pub fn wrap_shared(
        item: Arc<T>,
        type_key: impl Into<TypeKey>,
        click: Option<ClickId>,
        long_click: Option<LongClickId>,
    ) -> Self {
        Self {
            data: Some(item),
            type_key: type_key.into(),
            click,
            long_click,
            child_clicks: Vec::new(),
            child_long_clicks: Vec::new(),
        }
    }

    /// Wrap an item without listeners.
    #[must_use]
    pub fn new(item: T, type_key: impl Into<TypeKey>) -> Self {
        Self::wrap(item, type_key, None, None)
    }

    /// Wrap a shared item without listeners.
    #[must_use]
    pub fn shared(item: Arc<T>, type_key: impl Into<TypeKey>) -> Self {
        Self::wrap_shared(item, type_key, None, None)
    }

    /// A row without data, used for the empty-view placeholder.
    #[must_use]
    pub fn placeholder(type_key: impl Into<TypeKey>) -> Self {
        Self {
            data: None,
            type_key: type_key.into(),
            click: None,
            long_click: None,
            child_clicks: Vec::new(),
            child_long_clicks: Vec::new(),
        }
    }

    /// Set the row click listener.
    #[must_use]
    pub fn with_click(mut self, id: ClickId) -> Self {
        self.click = Some(id);
        self
    }

    /// Set the row long-click listener.
    #[must_use]
    pub fn with_long_click(mut self, id: LongClickId) -> Self {
        self.long_click = Some(id);
        self
    }

    /// Attach a click listener to a child view. Replaces any earlier
    /// listener for the same child.
    #[must_use]
    pub fn with_child_click(mut self, child: ChildId, id: ClickId) -> Self {
        upsert(&mut self.child_clicks, child, id);
        self
    }

    /// Attach a long-click listener to a child view.
    #[must_use]
    pub fn with_child_long_click(mut self, child: ChildId, id: LongClickId) -> Self {
        upsert(&mut self.child_long_clicks, child, id);
        self
    }

    /// Detach the click listener from a child view.
    #[must_use]
    pub fn without_child_click(mut self, child: ChildId) -> Self {
        self.child_clicks.retain(|(c, _)| *c != child);
        self
    }

    /// Detach the long-click listener from a child view.
    #[must_use]
    pub fn without_child_long_click(mut self, child: ChildId) -> Self {
        self.child_long_clicks.retain(|(c, _)| *c != child);
        self
    }

    /// The wrapped item, `None` for a placeholder.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_deref()
    }

    /// The shared handle to the wrapped item.
    #[must_use]
    pub fn data_arc(&self) -> Option<&Arc<T>> {
        self.data.as_ref()
    }

    /// Whether this row is the empty-view placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.data.is_none()
    }

    #[must_use]
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    #[must_use]
    pub fn click(&self) -> Option<ClickId> {
        self.click
    }

    #[must_use]
    pub fn long_click(&self) -> Option<LongClickId> {
        self.long_click
    }

    /// Click listener attached to `child`, if any.
    #[must_use]
    pub fn child_click(&self, child: ChildId) -> Option<ClickId> {
        lookup(&self.child_clicks, child)
    }

    /// Long-click listener attached to `child`, if any.
    #[must_use]
    pub fn child_long_click(&self, child: ChildId) -> Option<LongClickId> {
        lookup(&self.child_long_clicks, child)
    }

    /// Swap in new data and view type, keeping every listener handle.
    pub(crate) fn replace_data(&mut self, data: Arc<T>, type_key: TypeKey) {
        self.data = Some(data);
        self.type_key = type_key;
    }
}

fn upsert<V>(entries: &mut Vec<(ChildId, V)>, child: ChildId, value: V) {
    match entries.binary_search_by_key(&child, |(c, _)| *c) {
        Ok(i) => entries[i].1 = value,
        Err(i) => entries.insert(i, (child, value)),
    }
}

fn lookup<V: Copy>(entries: &[(ChildId, V)], child: ChildId) -> Option<V> {
    entries
        .binary_search_by_key(&child, |(c, _)| *c)
        .ok()
        .map(|i| entries[i].1)
}
