//! Row interaction dispatch.
//!
//! Listeners live in a [`ListenerTable`] owned by the adapter. Rows refer to
//! them through copyable handles ([`ClickId`], [`LongClickId`]) instead of
//! holding the closures, so wrappers stay `Send` (the diff can run on a
//! worker thread) and no reference cycle can form between rows and the
//! listeners that capture them.
//!
//! # Resolution order
//!
//! For every interaction the first listener found wins:
//!
//! 1. the handle stored on the row's [`ItemWrapper`],
//! 2. a fallback registered for the row's [`TypeKey`],
//! 3. an adapter-wide fallback.
//!
//! Child interactions resolve the same way, keyed additionally by
//! [`ChildId`].
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | No listener at any level | No-op, dispatch returns `false` |
//! | Handle removed from the table | Treated as absent, next level tried |
//! | Listener panics | Propagates to the host (not caught) |

use std::rc::Rc;

use ahash::AHashMap;

use crate::item::ItemWrapper;
use crate::type_key::TypeKey;

/// Generation-tagged slot in a listener list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SlotId {
    index: u32,
    generation: u32,
}

/// Handle to a click listener in a [`ListenerTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickId(SlotId);

/// Handle to a long-click listener in a [`ListenerTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LongClickId(SlotId);

/// Identifier of a child view inside a row (e.g. a button's view id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub u32);

impl From<u32> for ChildId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// What a listener sees when it is invoked.
#[derive(Debug)]
pub struct ItemEvent<'a, T> {
    /// Adapter position of the row.
    pub position: usize,
    /// The row's item; `None` for the empty-view placeholder.
    pub data: Option<&'a T>,
    /// The row's view type.
    pub type_key: &'a TypeKey,
    /// The child that was interacted with, for child events.
    pub child: Option<ChildId>,
}

type ClickFn<T> = Rc<dyn Fn(&ItemEvent<'_, T>)>;
type LongClickFn<T> = Rc<dyn Fn(&ItemEvent<'_, T>) -> bool>;

struct Slot<F> {
    generation: u32,
    listener: Option<F>,
}

/// Listener storage with slot reuse. Removing a listener bumps its slot's
/// generation, so handles to the old occupant stop resolving.
struct Slots<F> {
    entries: Vec<Slot<F>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<F: Clone> Slots<F> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    fn insert(&mut self, listener: F) -> SlotId {
        self.live += 1;
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.entries[index as usize];
            slot.listener = Some(listener);
            return SlotId {
                index,
                generation: slot.generation,
            };
        }
        let index = slot_index(self.entries.len());
        self.entries.push(Slot {
            generation: 0,
            listener: Some(listener),
        });
        SlotId {
            index,
            generation: 0,
        }
    }

    fn remove(&mut self, id: SlotId) -> bool {
        let Some(slot) = self.entries.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation || slot.listener.take().is_none() {
            return false;
        }
        self.live -= 1;
        // A slot whose generation is exhausted is retired, never reused.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free_list.push(id.index);
        }
        true
    }

    fn get(&self, id: SlotId) -> Option<F> {
        self.entries
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.listener.clone())
    }

    fn len(&self) -> usize {
        self.live
    }

    fn capacity(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FallbackKey {
    type_key: Option<TypeKey>,
    child: Option<ChildId>,
}

/// Storage for click and long-click listeners plus their fallbacks.
///
/// Slots freed by a removal are reused, but every handle carries the
/// generation of the slot it was issued for: a stale handle on an old row
/// can never reach a newer listener.
pub struct ListenerTable<T> {
    clicks: Slots<ClickFn<T>>,
    long_clicks: Slots<LongClickFn<T>>,
    click_fallbacks: AHashMap<FallbackKey, ClickId>,
    long_click_fallbacks: AHashMap<FallbackKey, LongClickId>,
}

impl<T> Default for ListenerTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ListenerTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerTable")
            .field("clicks", &self.click_count())
            .field("long_clicks", &self.long_click_count())
            .field("click_fallbacks", &self.click_fallbacks.len())
            .field("long_click_fallbacks", &self.long_click_fallbacks.len())
            .finish()
    }
}

impl<T> ListenerTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clicks: Slots::new(),
            long_clicks: Slots::new(),
            click_fallbacks: AHashMap::new(),
            long_click_fallbacks: AHashMap::new(),
        }
    }

    /// Register a click listener.
    pub fn add_click(&mut self, f: impl Fn(&ItemEvent<'_, T>) + 'static) -> ClickId {
        ClickId(self.clicks.insert(Rc::new(f)))
    }

    /// Register a long-click listener. It returns whether it consumed the
    /// event.
    pub fn add_long_click(&mut self, f: impl Fn(&ItemEvent<'_, T>) -> bool + 'static) -> LongClickId {
        LongClickId(self.long_clicks.insert(Rc::new(f)))
    }

    /// Remove a click listener. Returns `true` if it was present.
    pub fn remove_click(&mut self, id: ClickId) -> bool {
        self.clicks.remove(id.0)
    }

    /// Remove a long-click listener. Returns `true` if it was present.
    pub fn remove_long_click(&mut self, id: LongClickId) -> bool {
        self.long_clicks.remove(id.0)
    }

    /// Number of live click listeners.
    #[must_use]
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }

    /// Number of live long-click listeners.
    #[must_use]
    pub fn long_click_count(&self) -> usize {
        self.long_clicks.len()
    }

    /// Set or clear the fallback click listener.
    ///
    /// `type_key = None` sets the adapter-wide fallback; `child = Some(..)`
    /// scopes it to child clicks on that child.
    pub fn set_fallback_click(
        &mut self,
        type_key: Option<TypeKey>,
        child: Option<ChildId>,
        id: Option<ClickId>,
    ) {
        let key = FallbackKey { type_key, child };
        match id {
            Some(id) => {
                self.click_fallbacks.insert(key, id);
            }
            None => {
                self.click_fallbacks.remove(&key);
            }
        }
    }

    /// Set or clear the fallback long-click listener. Scoping as for
    /// [`set_fallback_click`](Self::set_fallback_click).
    pub fn set_fallback_long_click(
        &mut self,
        type_key: Option<TypeKey>,
        child: Option<ChildId>,
        id: Option<LongClickId>,
    ) {
        let key = FallbackKey { type_key, child };
        match id {
            Some(id) => {
                self.long_click_fallbacks.insert(key, id);
            }
            None => {
                self.long_click_fallbacks.remove(&key);
            }
        }
    }

    fn click(&self, id: ClickId) -> Option<ClickFn<T>> {
        self.clicks.get(id.0)
    }

    fn long_click(&self, id: LongClickId) -> Option<LongClickFn<T>> {
        self.long_clicks.get(id.0)
    }

    fn fallback_click(&self, type_key: &TypeKey, child: Option<ChildId>) -> Option<ClickFn<T>> {
        let typed = FallbackKey {
            type_key: Some(type_key.clone()),
            child,
        };
        let global = FallbackKey {
            type_key: None,
            child,
        };
        [typed, global]
            .iter()
            .filter_map(|key| self.click_fallbacks.get(key))
            .find_map(|id| self.click(*id))
    }

    fn fallback_long_click(
        &self,
        type_key: &TypeKey,
        child: Option<ChildId>,
    ) -> Option<LongClickFn<T>> {
        let typed = FallbackKey {
            type_key: Some(type_key.clone()),
            child,
        };
        let global = FallbackKey {
            type_key: None,
            child,
        };
        [typed, global]
            .iter()
            .filter_map(|key| self.long_click_fallbacks.get(key))
            .find_map(|id| self.long_click(*id))
    }

    /// Dispatch a click (or child click) on `row`. Returns whether a
    /// listener ran.
    pub(crate) fn dispatch_click(
        &self,
        row: &ItemWrapper<T>,
        position: usize,
        child: Option<ChildId>,
    ) -> bool {
        let own = match child {
            None => row.click(),
            Some(child) => row.child_click(child),
        };
        let listener = own
            .and_then(|id| self.click(id))
            .or_else(|| self.fallback_click(row.type_key(), child));
        let Some(listener) = listener else {
            tracing::trace!(position, ?child, "click without listener");
            return false;
        };
        tracing::trace!(position, ?child, own = own.is_some(), "dispatch click");
        listener(&ItemEvent {
            position,
            data: row.data(),
            type_key: row.type_key(),
            child,
        });
        true
    }

    /// Dispatch a long click (or child long click) on `row`. Returns the
    /// listener's "consumed" flag, or `false` when nobody listens.
    pub(crate) fn dispatch_long_click(
        &self,
        row: &ItemWrapper<T>,
        position: usize,
        child: Option<ChildId>,
    ) -> bool {
        let own = match child {
            None => row.long_click(),
            Some(child) => row.child_long_click(child),
        };
        let listener = own
            .and_then(|id| self.long_click(id))
            .or_else(|| self.fallback_long_click(row.type_key(), child));
        let Some(listener) = listener else {
            tracing::trace!(position, ?child, "long click without listener");
            return false;
        };
        tracing::trace!(position, ?child, own = own.is_some(), "dispatch long click");
        listener(&ItemEvent {
            position,
            data: row.data(),
            type_key: row.type_key(),
            child,
        })
    }
}

fn slot_index(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("listener table overflow ({len} slots)"))
}
