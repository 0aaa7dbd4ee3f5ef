//! The list adapter.
//!
//! [`ListAdapter`] owns the displayed [`Snapshot`], turns each submitted
//! list into an [`EditScript`] against it, and answers the host's per-row
//! questions (count, view type, holder creation, binding, interactions).
//!
//! # Submission pipeline
//!
//! ```text
//! submit_list ─► wrap (type_key_of) ─► diff vs live snapshot ─► swap ─► sink
//!                                          │
//!          submit_list_background ─► worker thread ─► poll()/flush()
//! ```
//!
//! At most one diff is in flight. Submissions that arrive while one is
//! running (or while earlier ones are still queued) wait in FIFO order and
//! are diffed against the snapshot their predecessor leaves behind, so the
//! host always sees scripts that apply to the list it is showing.
//!
//! # Empty view
//!
//! With [`AdapterConfig::empty_view`] set, an empty list is displayed as a
//! single placeholder row of that type. The placeholder counts towards
//! [`item_count`](ListAdapter::item_count) and is inflated like any other
//! row, but has no data and is never bound. It can be swapped or turned off
//! later with [`set_empty_view`](ListAdapter::set_empty_view).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unregistered key | Row type missing from the registry | `bind_view_holder` panics, `try_bind_view_holder` errors |
//! | Comparator panic | Caller's `ItemDiff` panicked | Propagates; the previous snapshot stays live |
//! | Worker panic | Same, on the diff thread | Re-raised by `poll`/`flush`; previous snapshot stays live |
//! | Manual edit while busy | Background diff pending | `AdapterError::Busy` |
//! | Bad position | Query or edit past the end | Queries panic, edits return `OutOfBounds`, clicks return `false` |

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::AdapterConfig;
use crate::diff::{
    EditOp, EditScript, ItemDiff, ListUpdateSink, NoopSink, WrapperComparator, calculate_diff,
};
use crate::error::AdapterError;
use crate::events::{ChildId, ListenerTable};
use crate::item::ItemWrapper;
use crate::registry::HolderRegistry;
use crate::type_key::TypeKey;
use crate::worker::{self, DiffWorker};

/// An immutable generation of displayed rows.
#[derive(Debug)]
pub struct Snapshot<T> {
    rows: Vec<ItemWrapper<T>>,
    generation: u64,
}

impl<T> Snapshot<T> {
    pub(crate) fn from_rows(rows: Vec<ItemWrapper<T>>, generation: u64) -> Self {
        Self { rows, generation }
    }

    #[must_use]
    pub fn rows(&self) -> &[ItemWrapper<T>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&ItemWrapper<T>> {
        self.rows.get(position)
    }

    /// Incremented on every applied submission or edit.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemWrapper<T>> {
        self.rows.iter()
    }

    /// Whether the snapshot is the empty-view placeholder alone.
    #[must_use]
    pub fn shows_empty_view(&self) -> bool {
        matches!(self.rows.as_slice(), [only] if only.is_placeholder())
    }

    /// Rows as the caller sees them: the placeholder counts as no rows.
    fn logical_rows(&self) -> &[ItemWrapper<T>] {
        if self.shows_empty_view() {
            &[]
        } else {
            &self.rows
        }
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a ItemWrapper<T>;
    type IntoIter = std::slice::Iter<'a, ItemWrapper<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Identifies one submission, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReceipt {
    /// Diffed and applied immediately; `script` was sent to the sink.
    Applied { ticket: Ticket, script: EditScript },
    /// Waiting behind an in-flight diff, or running on the worker thread.
    /// Applied by a later [`poll`](ListAdapter::poll) or
    /// [`flush`](ListAdapter::flush).
    Queued { ticket: Ticket },
}

impl SubmitReceipt {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            Self::Applied { ticket, .. } | Self::Queued { ticket } => *ticket,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// The applied script, if the submission was applied immediately.
    #[must_use]
    pub fn script(&self) -> Option<&EditScript> {
        match self {
            Self::Applied { script, .. } => Some(script),
            Self::Queued { .. } => None,
        }
    }
}

type KeyFn<T> = Box<dyn Fn(&T) -> TypeKey>;
type CommitFn<T> = Box<dyn FnOnce(&Snapshot<T>)>;
type StartFn<T> = Box<dyn FnOnce(Arc<Snapshot<T>>) -> DiffWorker<T>>;

enum Job<T> {
    Inline(Vec<ItemWrapper<T>>),
    Background(StartFn<T>),
}

struct Pending<T> {
    ticket: Ticket,
    job: Job<T>,
    on_commit: Option<CommitFn<T>>,
}

struct InFlight<T> {
    ticket: Ticket,
    worker: DiffWorker<T>,
    on_commit: Option<CommitFn<T>>,
}

/// Polymorphic list adapter over items `T` and host view holders `H`.
///
/// The adapter lives on the UI thread: listeners are `Rc` closures, so it
/// is neither `Send` nor `Sync`. Only the diff itself may be moved to a
/// worker thread, via [`submit_list_background`](Self::submit_list_background).
pub struct ListAdapter<T, H> {
    registry: HolderRegistry<T, H>,
    comparator: WrapperComparator<T>,
    type_key_of: Option<KeyFn<T>>,
    config: AdapterConfig,
    sink: Box<dyn ListUpdateSink>,
    listeners: ListenerTable<T>,
    snapshot: ArcSwap<Snapshot<T>>,
    queue: VecDeque<Pending<T>>,
    in_flight: Option<InFlight<T>>,
    next_ticket: u64,
}

impl<T, H> fmt::Debug for ListAdapter<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot.load();
        f.debug_struct("ListAdapter")
            .field("rows", &snapshot.len())
            .field("generation", &snapshot.generation())
            .field("pending", &self.pending())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T, H> ListAdapter<T, H> {
    /// Start building an adapter from its holder registry and item
    /// comparator.
    pub fn builder(
        registry: HolderRegistry<T, H>,
        diff: impl ItemDiff<T> + 'static,
    ) -> ListAdapterBuilder<T, H> {
        ListAdapterBuilder {
            registry,
            comparator: WrapperComparator::new(diff),
            type_key_of: None,
            config: AdapterConfig::default(),
            sink: None,
            listeners: ListenerTable::new(),
        }
    }

    // --- submission ----------------------------------------------------

    /// Replace the displayed list.
    ///
    /// Each item is wrapped with the key from the builder's `type_key_of`.
    ///
    /// # Panics
    ///
    /// Panics if no type key function is available (see
    /// [`ListAdapterBuilder::type_key_of`]), and propagates panics from the
    /// comparator. A panicking comparator leaves the previous snapshot live.
    pub fn submit_list(&mut self, items: impl IntoIterator<Item = T>) -> SubmitReceipt {
        let rows = items.into_iter().map(|item| self.wrap(item)).collect();
        self.enqueue(Job::Inline(rows), None)
    }

    /// Replace the displayed list with already wrapped rows.
    pub fn submit_wrapped(&mut self, rows: Vec<ItemWrapper<T>>) -> SubmitReceipt {
        self.enqueue(Job::Inline(rows), None)
    }

    /// Like [`submit_list`](Self::submit_list), passing every wrapper
    /// through `scope` (with its position) first. Use it to attach
    /// listeners.
    pub fn submit_list_with(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut scope: impl FnMut(usize, ItemWrapper<T>) -> ItemWrapper<T>,
    ) -> SubmitReceipt {
        let rows = items
            .into_iter()
            .enumerate()
            .map(|(position, item)| scope(position, self.wrap(item)))
            .collect();
        self.enqueue(Job::Inline(rows), None)
    }

    /// Like [`submit_list`](Self::submit_list), running `on_commit` with the
    /// new snapshot once the submission has been applied and dispatched.
    pub fn submit_list_then(
        &mut self,
        items: impl IntoIterator<Item = T>,
        on_commit: impl FnOnce(&Snapshot<T>) + 'static,
    ) -> SubmitReceipt {
        let rows = items.into_iter().map(|item| self.wrap(item)).collect();
        self.enqueue(Job::Inline(rows), Some(Box::new(on_commit)))
    }

    /// Apply finished background diffs and start queued ones, without
    /// blocking. Returns the number of submissions applied.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the diff thread. The failed submission is
    /// dropped; later ones stay queued.
    pub fn poll(&mut self) -> usize {
        self.drive(false)
    }

    /// Block until every pending submission has been applied. Returns the
    /// number applied.
    ///
    /// # Panics
    ///
    /// As [`poll`](Self::poll).
    pub fn flush(&mut self) -> usize {
        self.drive(true)
    }

    /// Number of submissions not yet applied.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len() + usize::from(self.in_flight.is_some())
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.pending() > 0
    }

    // --- queries -------------------------------------------------------

    /// Number of displayed rows, including the empty-view placeholder.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.snapshot.load().len()
    }

    /// View type of the row at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[must_use]
    pub fn item_type_key(&self, position: usize) -> TypeKey {
        let snapshot = self.snapshot.load();
        row_at(&snapshot, position).type_key().clone()
    }

    /// Item at `position`; `None` for the empty-view placeholder.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    #[must_use]
    pub fn item(&self, position: usize) -> Option<Arc<T>> {
        let snapshot = self.snapshot.load();
        row_at(&snapshot, position).data_arc().cloned()
    }

    /// Every displayed item in order, without the placeholder.
    #[must_use]
    pub fn data(&self) -> Vec<Arc<T>> {
        self.snapshot
            .load()
            .iter()
            .filter_map(|row| row.data_arc().cloned())
            .collect()
    }

    /// The live snapshot. It stays valid after later submissions replace
    /// it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot<T>> {
        self.snapshot.load_full()
    }

    /// Position of the first row whose item satisfies `pred`.
    pub fn index_of_first(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.snapshot
            .load()
            .iter()
            .position(|row| row.data().is_some_and(&mut pred))
    }

    #[must_use]
    pub fn shows_empty_view(&self) -> bool {
        self.snapshot.load().shows_empty_view()
    }

    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &HolderRegistry<T, H> {
        &self.registry
    }

    // --- holders -------------------------------------------------------

    /// Inflate a new holder for rows of type `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not registered.
    #[must_use]
    pub fn create_view_holder(&self, key: &TypeKey) -> H {
        self.registry.resolve(key).inflate(key)
    }

    /// Bind the row at `position` into `holder`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds or the row's type key is not
    /// registered.
    pub fn bind_view_holder(&self, position: usize, holder: &mut H) {
        if let Err(err) = self.try_bind_view_holder(position, holder) {
            panic!("{err}");
        }
    }

    /// Fallible [`bind_view_holder`](Self::bind_view_holder).
    pub fn try_bind_view_holder(&self, position: usize, holder: &mut H) -> Result<(), AdapterError> {
        let snapshot = self.snapshot.load();
        let row = snapshot.get(position).ok_or(AdapterError::OutOfBounds {
            position,
            len: snapshot.len(),
        })?;
        let binding = self.registry.try_resolve(row.type_key())?;
        if let Some(item) = row.data() {
            tracing::trace!(position, key = %row.type_key(), "bind");
            binding.bind(holder, item, position);
        }
        Ok(())
    }

    // --- interactions --------------------------------------------------

    /// Route a click on the row at `position`. Returns whether a listener
    /// ran.
    pub fn on_click(&self, position: usize) -> bool {
        let snapshot = self.snapshot.load();
        snapshot
            .get(position)
            .is_some_and(|row| self.listeners.dispatch_click(row, position, None))
    }

    /// Route a long click. Returns whether the listener consumed it.
    pub fn on_long_click(&self, position: usize) -> bool {
        let snapshot = self.snapshot.load();
        snapshot
            .get(position)
            .is_some_and(|row| self.listeners.dispatch_long_click(row, position, None))
    }

    /// Route a click on a child view of the row at `position`.
    pub fn on_child_click(&self, position: usize, child: impl Into<ChildId>) -> bool {
        let child = child.into();
        let snapshot = self.snapshot.load();
        snapshot
            .get(position)
            .is_some_and(|row| self.listeners.dispatch_click(row, position, Some(child)))
    }

    /// Route a long click on a child view of the row at `position`.
    pub fn on_child_long_click(&self, position: usize, child: impl Into<ChildId>) -> bool {
        let child = child.into();
        let snapshot = self.snapshot.load();
        snapshot
            .get(position)
            .is_some_and(|row| self.listeners.dispatch_long_click(row, position, Some(child)))
    }

    #[must_use]
    pub fn listeners(&self) -> &ListenerTable<T> {
        &self.listeners
    }

    /// Register or remove listeners and fallbacks.
    pub fn listeners_mut(&mut self) -> &mut ListenerTable<T> {
        &mut self.listeners
    }

    // --- manual edits --------------------------------------------------

    /// Show a placeholder row of type `key` while the list is empty, or
    /// stop showing one with `None`. When the list is empty right now the
    /// placeholder is inserted, removed or replaced immediately.
    ///
    /// The default type key picked at build time is not revisited.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnregisteredType`] if `key` has no holder binding,
    /// [`AdapterError::Busy`] while a submission is pending.
    pub fn set_empty_view(&mut self, key: Option<TypeKey>) -> Result<(), AdapterError> {
        if self.is_busy() {
            return Err(AdapterError::Busy {
                pending: self.pending(),
            });
        }
        if let Some(key) = &key {
            self.registry.try_resolve(key)?;
        }
        if self.config.empty_view == key {
            return Ok(());
        }
        tracing::debug!(from = ?self.config.empty_view, to = ?key, "empty view changed");
        self.config.empty_view = key;

        let base = self.snapshot.load_full();
        if !base.logical_rows().is_empty() {
            return Ok(());
        }
        let mut script = EditScript::new();
        if base.shows_empty_view() {
            script.push(EditOp::Remove { index: 0, count: 1 });
        }
        let rows = self.with_empty_view(Vec::new());
        if !rows.is_empty() {
            script.push(EditOp::Insert { index: 0, count: 1 });
        }
        if !script.is_empty() {
            self.commit(None, rows, script, None);
        }
        Ok(())
    }

    /// Insert `item` at `position` (`0..=len`).
    pub fn insert(&mut self, position: usize, item: T) -> Result<(), AdapterError> {
        let row = self.wrap(item);
        self.insert_wrapped(position, row)
    }

    /// Insert an already wrapped row at `position`.
    pub fn insert_wrapped(&mut self, position: usize, row: ItemWrapper<T>) -> Result<(), AdapterError> {
        self.mutate(|rows, script| {
            check_insert(position, rows.len())?;
            rows.insert(position, row);
            script.push(EditOp::Insert { index: position, count: 1 });
            Ok(())
        })
    }

    /// Append `item`.
    pub fn push(&mut self, item: T) -> Result<(), AdapterError> {
        let row = self.wrap(item);
        self.mutate(|rows, script| {
            rows.push(row);
            script.push(EditOp::Insert { index: rows.len() - 1, count: 1 });
            Ok(())
        })
    }

    /// Insert `items` starting at `position`, as one range.
    pub fn insert_all(
        &mut self,
        position: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), AdapterError> {
        let new_rows: Vec<_> = items.into_iter().map(|item| self.wrap(item)).collect();
        self.mutate(|rows, script| {
            check_insert(position, rows.len())?;
            let count = new_rows.len();
            if count > 0 {
                rows.splice(position..position, new_rows);
                script.push(EditOp::Insert { index: position, count });
            }
            Ok(())
        })
    }

    /// Replace the item at `position`, keeping the row's listeners. The
    /// view type is recomputed from the new item.
    pub fn update(&mut self, position: usize, item: T) -> Result<(), AdapterError> {
        let key = self.key_of(&item);
        let item = Arc::new(item);
        self.mutate(|rows, script| {
            check_index(position, rows.len())?;
            rows[position].replace_data(item, key);
            script.push(EditOp::Change { index: position, count: 1 });
            Ok(())
        })
    }

    /// Remove and return the row at `position`.
    pub fn remove_at(&mut self, position: usize) -> Result<ItemWrapper<T>, AdapterError> {
        self.mutate(|rows, script| {
            check_index(position, rows.len())?;
            script.push(EditOp::Remove { index: position, count: 1 });
            Ok(rows.remove(position))
        })
    }

    /// Remove every row. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize, AdapterError> {
        self.mutate(|rows, script| {
            let count = rows.len();
            if count > 0 {
                rows.clear();
                script.push(EditOp::Remove { index: 0, count });
            }
            Ok(count)
        })
    }

    // --- internals -----------------------------------------------------

    fn key_of(&self, item: &T) -> TypeKey {
        match &self.type_key_of {
            Some(key_of) => key_of(item),
            None => panic!(
                "no type key function: call ListAdapterBuilder::type_key_of or submit wrapped rows"
            ),
        }
    }

    fn wrap(&self, item: T) -> ItemWrapper<T> {
        let key = self.key_of(&item);
        ItemWrapper::new(item, key)
    }

    fn next_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn enqueue(&mut self, job: Job<T>, on_commit: Option<CommitFn<T>>) -> SubmitReceipt {
        let ticket = self.next_ticket();
        if self.is_busy() {
            tracing::debug!(ticket = ticket.0, pending = self.pending(), "submission queued");
            self.queue.push_back(Pending {
                ticket,
                job,
                on_commit,
            });
            return SubmitReceipt::Queued { ticket };
        }
        match job {
            Job::Inline(rows) => {
                let script = self.apply_inline(ticket, rows, on_commit);
                SubmitReceipt::Applied { ticket, script }
            }
            Job::Background(start) => {
                self.in_flight = Some(InFlight {
                    ticket,
                    worker: start(self.snapshot.load_full()),
                    on_commit,
                });
                SubmitReceipt::Queued { ticket }
            }
        }
    }

    fn apply_inline(
        &mut self,
        ticket: Ticket,
        rows: Vec<ItemWrapper<T>>,
        on_commit: Option<CommitFn<T>>,
    ) -> EditScript {
        let rows = self.with_empty_view(rows);
        let base = self.snapshot.load_full();
        let _span =
            tracing::debug_span!("submit_list", ticket = ticket.0, old = base.len(), new = rows.len())
                .entered();
        let result = calculate_diff(base.rows(), &rows, &self.comparator, self.config.detect_moves);
        self.commit(Some(ticket), rows, result.into_script(), on_commit)
    }

    fn drive(&mut self, block: bool) -> usize {
        let mut applied = 0;
        loop {
            if let Some(flight) = self.in_flight.take() {
                if !block && !flight.worker.is_finished() {
                    self.in_flight = Some(flight);
                    break;
                }
                let (rows, result) = flight.worker.join();
                self.commit(Some(flight.ticket), rows, result.into_script(), flight.on_commit);
                applied += 1;
            }
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            match next.job {
                Job::Inline(rows) => {
                    self.apply_inline(next.ticket, rows, next.on_commit);
                    applied += 1;
                }
                Job::Background(start) => {
                    self.in_flight = Some(InFlight {
                        ticket: next.ticket,
                        worker: start(self.snapshot.load_full()),
                        on_commit: next.on_commit,
                    });
                }
            }
        }
        applied
    }

    /// Swap in `rows` and dispatch `script`, which must take the live
    /// snapshot to `rows`.
    fn commit(
        &mut self,
        ticket: Option<Ticket>,
        rows: Vec<ItemWrapper<T>>,
        script: EditScript,
        on_commit: Option<CommitFn<T>>,
    ) -> EditScript {
        let generation = self.snapshot.load().generation() + 1;
        let next = Arc::new(Snapshot::from_rows(rows, generation));
        self.snapshot.store(Arc::clone(&next));
        if self.config.log_scripts {
            let (inserted, removed, moved, changed) = script.summary();
            tracing::debug!(
                ticket = ticket.map(Ticket::get),
                generation,
                rows = next.len(),
                inserted,
                removed,
                moved,
                changed,
                "list committed"
            );
        }
        script.dispatch_to(&mut self.sink);
        if let Some(on_commit) = on_commit {
            on_commit(&next);
        }
        script
    }

    fn with_empty_view(&self, mut rows: Vec<ItemWrapper<T>>) -> Vec<ItemWrapper<T>> {
        if rows.is_empty() {
            if let Some(key) = &self.config.empty_view {
                rows.push(ItemWrapper::placeholder(key.clone()));
            }
        }
        rows
    }

    /// Run a manual edit on the caller-visible rows and commit it. `edit`
    /// records its ops in caller-visible positions; placeholder removal and
    /// restoration are added around them.
    fn mutate<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<ItemWrapper<T>>, &mut EditScript) -> Result<R, AdapterError>,
    ) -> Result<R, AdapterError> {
        if self.is_busy() {
            return Err(AdapterError::Busy {
                pending: self.pending(),
            });
        }
        let base = self.snapshot.load_full();
        let had_placeholder = base.shows_empty_view();
        let mut rows = base.logical_rows().to_vec();
        let mut ops = EditScript::new();
        let out = edit(&mut rows, &mut ops)?;
        if ops.is_empty() {
            return Ok(out);
        }

        let mut script = EditScript::new();
        if had_placeholder && !rows.is_empty() {
            script.push(EditOp::Remove { index: 0, count: 1 });
        }
        for op in &ops {
            script.push(*op);
        }
        let rows = self.with_empty_view(rows);
        if !had_placeholder && rows.first().is_some_and(ItemWrapper::is_placeholder) {
            script.push(EditOp::Insert { index: 0, count: 1 });
        }
        self.commit(None, rows, script, None);
        Ok(out)
    }
}

impl<T: Send + Sync + 'static, H> ListAdapter<T, H> {
    /// Like [`submit_list`](Self::submit_list), but diff on a worker thread.
    /// The result is applied by a later [`poll`](Self::poll) or
    /// [`flush`](Self::flush).
    pub fn submit_list_background(&mut self, items: impl IntoIterator<Item = T>) -> SubmitReceipt {
        let rows = items.into_iter().map(|item| self.wrap(item)).collect();
        self.submit_wrapped_background(rows)
    }

    /// Background variant of [`submit_wrapped`](Self::submit_wrapped).
    pub fn submit_wrapped_background(&mut self, rows: Vec<ItemWrapper<T>>) -> SubmitReceipt {
        let rows = self.with_empty_view(rows);
        let comparator = self.comparator.clone();
        let detect_moves = self.config.detect_moves;
        let start: StartFn<T> =
            Box::new(move |base| worker::spawn(base, rows, comparator, detect_moves));
        self.enqueue(Job::Background(start), None)
    }
}

fn row_at<T>(snapshot: &Snapshot<T>, position: usize) -> &ItemWrapper<T> {
    match snapshot.get(position) {
        Some(row) => row,
        None => panic!(
            "{}",
            AdapterError::OutOfBounds {
                position,
                len: snapshot.len()
            }
        ),
    }
}

/// `position` must name an existing row.
fn check_index(position: usize, len: usize) -> Result<(), AdapterError> {
    if position < len {
        Ok(())
    } else {
        Err(AdapterError::OutOfBounds { position, len })
    }
}

/// `position` must be a valid insertion point (`0..=len`).
fn check_insert(position: usize, len: usize) -> Result<(), AdapterError> {
    if position <= len {
        Ok(())
    } else {
        Err(AdapterError::OutOfBounds { position, len })
    }
}

/// Builder for [`ListAdapter`].
pub struct ListAdapterBuilder<T, H> {
    registry: HolderRegistry<T, H>,
    comparator: WrapperComparator<T>,
    type_key_of: Option<KeyFn<T>>,
    config: AdapterConfig,
    sink: Option<Box<dyn ListUpdateSink>>,
    listeners: ListenerTable<T>,
}

impl<T, H> fmt::Debug for ListAdapterBuilder<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListAdapterBuilder")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T, H> ListAdapterBuilder<T, H> {
    /// How to pick the view type of a submitted item. Optional when the
    /// registry holds a single non-empty-view key.
    #[must_use]
    pub fn type_key_of(mut self, key_of: impl Fn(&T) -> TypeKey + 'static) -> Self {
        self.type_key_of = Some(Box::new(key_of));
        self
    }

    #[must_use]
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Where structural notifications go. Defaults to [`NoopSink`].
    #[must_use]
    pub fn sink(mut self, sink: impl ListUpdateSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Show a placeholder row of type `key` while the list is empty.
    #[must_use]
    pub fn empty_view(mut self, key: impl Into<TypeKey>) -> Self {
        self.config.empty_view = Some(key.into());
        self
    }

    /// Start from a prepared listener table.
    #[must_use]
    pub fn listeners(mut self, listeners: ListenerTable<T>) -> Self {
        self.listeners = listeners;
        self
    }

    /// # Panics
    ///
    /// Panics if the empty-view key is not registered.
    #[must_use]
    pub fn build(self) -> ListAdapter<T, H> {
        let mut rows = Vec::new();
        if let Some(key) = &self.config.empty_view {
            if let Err(err) = self.registry.try_resolve(key) {
                panic!("empty view: {err}");
            }
            rows.push(ItemWrapper::placeholder(key.clone()));
        }

        let type_key_of = self.type_key_of.or_else(|| {
            let mut keys = self
                .registry
                .keys()
                .filter(|key| self.config.empty_view.as_ref() != Some(*key));
            match (keys.next(), keys.next()) {
                (Some(only), None) => {
                    let only = only.clone();
                    Some(Box::new(move |_: &T| only.clone()) as KeyFn<T>)
                }
                _ => None,
            }
        });

        tracing::debug!(
            types = self.registry.len(),
            empty_view = ?self.config.empty_view,
            detect_moves = self.config.detect_moves,
            "list adapter built"
        );

        ListAdapter {
            registry: self.registry,
            comparator: self.comparator,
            type_key_of,
            config: self.config,
            sink: self.sink.unwrap_or_else(|| Box::new(NoopSink)),
            listeners: self.listeners,
            snapshot: ArcSwap::from_pointee(Snapshot::from_rows(rows, 0)),
            queue: VecDeque::new(),
            in_flight: None,
            next_ticket: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{FnDiff, KeyDiff};
    use std::cell::RefCell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use tracing_test::traced_test;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    fn row(id: u32, label: &'static str) -> Row {
        Row { id, label }
    }

    type Ops = Rc<RefCell<Vec<EditOp>>>;

    fn registry() -> HolderRegistry<Row, String> {
        HolderRegistry::builder()
            .register("row", |_| String::new(), |h: &mut String, r: &Row, pos| {
                *h = format!("{}@{pos}", r.label);
            })
            .register_static("empty", |_| String::from("nothing here"))
            .build()
    }

    fn adapter() -> (ListAdapter<Row, String>, Ops) {
        let ops: Ops = Rc::default();
        let adapter = ListAdapter::builder(registry(), KeyDiff::new(|r: &Row| r.id))
            .type_key_of(|_| "row".into())
            .sink(Rc::clone(&ops))
            .build();
        (adapter, ops)
    }

    fn with_empty_view() -> (ListAdapter<Row, String>, Ops) {
        let ops: Ops = Rc::default();
        let adapter = ListAdapter::builder(registry(), KeyDiff::new(|r: &Row| r.id))
            .empty_view("empty")
            .sink(Rc::clone(&ops))
            .build();
        (adapter, ops)
    }

    fn labels<H>(adapter: &ListAdapter<Row, H>) -> Vec<&'static str> {
        adapter.data().iter().map(|r| r.label).collect()
    }

    #[test]
    fn first_submission_inserts_everything() {
        let (mut adapter, ops) = adapter();
        let receipt = adapter.submit_list(vec![row(1, "a"), row(2, "b"), row(3, "c")]);
        assert!(receipt.is_applied());
        assert_eq!(adapter.item_count(), 3);
        assert_eq!(*ops.borrow(), vec![EditOp::Insert { index: 0, count: 3 }]);
        assert_eq!(adapter.snapshot().generation(), 1);
    }

    #[test]
    fn resubmitting_the_same_list_is_silent() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        ops.borrow_mut().clear();
        let receipt = adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        assert_eq!(receipt.script().map(EditScript::is_empty), Some(true));
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn swapping_two_rows_is_one_move() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        ops.borrow_mut().clear();
        adapter.submit_list(vec![row(2, "b"), row(1, "a")]);
        assert_eq!(*ops.borrow(), vec![EditOp::Move { from: 0, to: 1 }]);
        assert_eq!(labels(&adapter), ["b", "a"]);
    }

    #[test]
    fn content_edit_is_a_change() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        ops.borrow_mut().clear();
        adapter.submit_list(vec![row(1, "a"), row(2, "B")]);
        assert_eq!(*ops.borrow(), vec![EditOp::Change { index: 1, count: 1 }]);
    }

    #[test]
    fn detect_moves_off_reports_remove_and_insert() {
        let ops: Ops = Rc::default();
        let mut adapter = ListAdapter::builder(registry(), KeyDiff::new(|r: &Row| r.id))
            .type_key_of(|_| "row".into())
            .config(AdapterConfig::new().detect_moves(false))
            .sink(Rc::clone(&ops))
            .build();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        ops.borrow_mut().clear();
        adapter.submit_list(vec![row(2, "b"), row(1, "a")]);
        assert!(ops.borrow().iter().all(|op| !matches!(op, EditOp::Move { .. })));
        assert_eq!(labels(&adapter), ["b", "a"]);
    }

    #[test]
    fn bind_uses_the_registered_binding() {
        let (mut adapter, _) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        let key = adapter.item_type_key(1);
        let mut holder = adapter.create_view_holder(&key);
        adapter.bind_view_holder(1, &mut holder);
        assert_eq!(holder, "b@1");
    }

    #[test]
    #[should_panic(expected = "no holder binding registered for type key 'ghost'")]
    fn binding_an_unregistered_type_panics() {
        let (mut adapter, _) = adapter();
        adapter.submit_wrapped(vec![ItemWrapper::new(row(1, "a"), "ghost")]);
        let mut holder = String::new();
        adapter.bind_view_holder(0, &mut holder);
    }

    #[test]
    fn try_bind_reports_errors() {
        let (mut adapter, _) = adapter();
        adapter.submit_wrapped(vec![ItemWrapper::new(row(1, "a"), "ghost")]);
        let mut holder = String::new();
        assert_eq!(
            adapter.try_bind_view_holder(0, &mut holder),
            Err(AdapterError::UnregisteredType(TypeKey::name("ghost")))
        );
        assert_eq!(
            adapter.try_bind_view_holder(4, &mut holder),
            Err(AdapterError::OutOfBounds { position: 4, len: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "position 2 out of bounds for 1 rows")]
    fn type_key_query_out_of_bounds_panics() {
        let (mut adapter, _) = adapter();
        adapter.submit_list(vec![row(1, "a")]);
        let _ = adapter.item_type_key(2);
    }

    #[test]
    fn queries() {
        let (mut adapter, _) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(2, "b"), row(3, "c")]);
        assert_eq!(adapter.item(2).map(|r| r.label), Some("c"));
        assert_eq!(adapter.index_of_first(|r| r.id == 2), Some(1));
        assert_eq!(adapter.index_of_first(|r| r.id == 9), None);
        assert_eq!(labels(&adapter), ["a", "b", "c"]);
        assert!(adapter.registry().contains(&TypeKey::name("row")));
        assert_eq!(adapter.registry().len(), 2);
    }

    #[test]
    fn old_snapshots_survive_replacement() {
        let (mut adapter, _) = adapter();
        adapter.submit_list(vec![row(1, "a")]);
        let before = adapter.snapshot();
        adapter.submit_list(vec![row(2, "b"), row(3, "c")]);
        assert_eq!(before.len(), 1);
        assert_eq!(before.generation(), 1);
        assert_eq!(adapter.snapshot().generation(), 2);
    }

    #[test]
    fn comparator_panic_keeps_previous_snapshot() {
        let ops: Ops = Rc::default();
        let mut adapter = ListAdapter::builder(
            registry(),
            FnDiff::new(
                |a: &Row, b: &Row| {
                    assert!(b.label != "boom", "comparator exploded");
                    a.id == b.id
                },
                |a: &Row, b: &Row| a == b,
            ),
        )
        .type_key_of(|_| "row".into())
        .sink(Rc::clone(&ops))
        .build();
        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        ops.borrow_mut().clear();

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            adapter.submit_list(vec![row(3, "boom")]);
        }));
        assert!(outcome.is_err());
        assert_eq!(labels(&adapter), ["a", "b"]);
        assert_eq!(adapter.snapshot().generation(), 1);
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn commit_callback_sees_the_new_snapshot() {
        let (mut adapter, _) = adapter();
        let seen = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&seen);
        adapter.submit_list_then(vec![row(1, "a"), row(2, "b")], move |snapshot| {
            *slot.borrow_mut() = Some((snapshot.len(), snapshot.generation()));
        });
        assert_eq!(*seen.borrow(), Some((2, 1)));
    }

    #[test]
    fn single_registered_type_needs_no_key_function() {
        let (mut adapter, _) = with_empty_view();
        adapter.submit_list(vec![row(1, "a")]);
        assert_eq!(adapter.item_type_key(0), TypeKey::name("row"));
    }

    #[test]
    #[should_panic(expected = "no type key function")]
    fn ambiguous_registry_needs_a_key_function() {
        let mut adapter: ListAdapter<Row, String> =
            ListAdapter::builder(registry(), KeyDiff::new(|r: &Row| r.id)).build();
        adapter.submit_list(vec![row(1, "a")]);
    }

    #[test]
    #[should_panic(expected = "empty view: no holder binding registered for type key 'missing'")]
    fn unregistered_empty_view_panics_at_build() {
        let _ = ListAdapter::builder(registry(), KeyDiff::new(|r: &Row| r.id))
            .empty_view("missing")
            .build();
    }

    #[test]
    fn empty_view_transitions() {
        let (mut adapter, ops) = with_empty_view();
        assert_eq!(adapter.item_count(), 1);
        assert!(adapter.shows_empty_view());
        assert!(adapter.data().is_empty());
        assert_eq!(adapter.item(0), None);

        let mut holder = adapter.create_view_holder(&adapter.item_type_key(0));
        adapter.bind_view_holder(0, &mut holder);
        assert_eq!(holder, "nothing here");

        adapter.submit_list(vec![row(1, "a"), row(2, "b")]);
        assert!(!adapter.shows_empty_view());
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 1 },
                EditOp::Insert { index: 0, count: 2 },
            ]
        );

        ops.borrow_mut().clear();
        adapter.submit_list(Vec::new());
        assert!(adapter.shows_empty_view());
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 2 },
                EditOp::Insert { index: 0, count: 1 },
            ]
        );

        ops.borrow_mut().clear();
        adapter.submit_list(Vec::new());
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn manual_edits_notify_single_ops() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a"), row(3, "c")]);
        ops.borrow_mut().clear();

        adapter.insert(1, row(2, "b")).unwrap();
        adapter.push(row(4, "d")).unwrap();
        adapter.update(0, row(1, "A")).unwrap();
        let removed = adapter.remove_at(2).unwrap();
        adapter.insert_all(0, vec![row(8, "x"), row(9, "y")]).unwrap();

        assert_eq!(removed.data().map(|r| r.label), Some("c"));
        assert_eq!(labels(&adapter), ["x", "y", "A", "b", "d"]);
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Insert { index: 1, count: 1 },
                EditOp::Insert { index: 3, count: 1 },
                EditOp::Change { index: 0, count: 1 },
                EditOp::Remove { index: 2, count: 1 },
                EditOp::Insert { index: 0, count: 2 },
            ]
        );

        ops.borrow_mut().clear();
        assert_eq!(adapter.clear(), Ok(5));
        assert_eq!(*ops.borrow(), vec![EditOp::Remove { index: 0, count: 5 }]);
        assert_eq!(adapter.clear(), Ok(0));
        assert_eq!(ops.borrow().len(), 1);
    }

    #[test]
    fn manual_edits_check_bounds() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a")]);
        ops.borrow_mut().clear();
        assert_eq!(
            adapter.insert(3, row(2, "b")),
            Err(AdapterError::OutOfBounds { position: 3, len: 1 })
        );
        assert_eq!(
            adapter.update(1, row(2, "b")),
            Err(AdapterError::OutOfBounds { position: 1, len: 1 })
        );
        assert!(adapter.remove_at(1).is_err());
        assert!(ops.borrow().is_empty());
        assert_eq!(adapter.snapshot().generation(), 1);
    }

    #[test]
    fn update_keeps_listeners() {
        let (mut adapter, _) = adapter();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&hits);
        let id = adapter
            .listeners_mut()
            .add_click(move |event| log.borrow_mut().push(event.data.map(|r| r.label)));
        adapter.submit_list_with(vec![row(1, "a")], |_, w| w.with_click(id));
        adapter.update(0, row(1, "A")).unwrap();
        assert!(adapter.on_click(0));
        assert_eq!(*hits.borrow(), vec![Some("A")]);
        assert_eq!(adapter.listeners().click_count(), 1);
    }

    #[test]
    fn manual_edits_around_the_empty_view() {
        let (mut adapter, ops) = with_empty_view();
        adapter.push(row(1, "a")).unwrap();
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 1 },
                EditOp::Insert { index: 0, count: 1 },
            ]
        );
        ops.borrow_mut().clear();

        adapter.remove_at(0).unwrap();
        assert!(adapter.shows_empty_view());
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 1 },
                EditOp::Insert { index: 0, count: 1 },
            ]
        );

        ops.borrow_mut().clear();
        assert_eq!(
            adapter.remove_at(0).map(|_| ()),
            Err(AdapterError::OutOfBounds { position: 0, len: 0 })
        );
        assert_eq!(adapter.clear(), Ok(0));
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn set_empty_view_on_an_empty_list() {
        let (mut adapter, ops) = adapter();
        assert_eq!(adapter.item_count(), 0);

        adapter.set_empty_view(Some("empty".into())).unwrap();
        assert!(adapter.shows_empty_view());
        assert_eq!(*ops.borrow(), vec![EditOp::Insert { index: 0, count: 1 }]);
        ops.borrow_mut().clear();

        adapter.set_empty_view(Some("empty".into())).unwrap();
        assert!(ops.borrow().is_empty());

        adapter.set_empty_view(Some("row".into())).unwrap();
        assert_eq!(adapter.item_type_key(0), TypeKey::name("row"));
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 1 },
                EditOp::Insert { index: 0, count: 1 },
            ]
        );
        ops.borrow_mut().clear();

        adapter.set_empty_view(None).unwrap();
        assert_eq!(adapter.item_count(), 0);
        assert_eq!(*ops.borrow(), vec![EditOp::Remove { index: 0, count: 1 }]);
        assert_eq!(adapter.snapshot().generation(), 3);
    }

    #[test]
    fn set_empty_view_on_a_full_list_waits_for_it_to_empty() {
        let (mut adapter, ops) = adapter();
        adapter.submit_list(vec![row(1, "a")]);
        ops.borrow_mut().clear();

        adapter.set_empty_view(Some("empty".into())).unwrap();
        assert!(ops.borrow().is_empty());
        assert_eq!(adapter.config().empty_view, Some(TypeKey::name("empty")));

        adapter.submit_list(Vec::new());
        assert!(adapter.shows_empty_view());
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Remove { index: 0, count: 1 },
                EditOp::Insert { index: 0, count: 1 },
            ]
        );
    }

    #[test]
    fn set_empty_view_rejects_unknown_keys_and_busy_adapters() {
        let (mut adapter, ops) = adapter();
        assert_eq!(
            adapter.set_empty_view(Some("missing".into())),
            Err(AdapterError::UnregisteredType(TypeKey::name("missing")))
        );
        assert_eq!(adapter.config().empty_view, None);

        adapter.submit_list_background(vec![row(1, "a")]);
        assert_eq!(
            adapter.set_empty_view(Some("empty".into())),
            Err(AdapterError::Busy { pending: 1 })
        );
        adapter.flush();
        assert_eq!(adapter.config().empty_view, None);
        assert_eq!(*ops.borrow(), vec![EditOp::Insert { index: 0, count: 1 }]);
    }

    #[test]
    fn row_listener_wins_over_fallback() {
        let (mut adapter, _) = adapter();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let own_log = Rc::clone(&hits);
        let fallback_log = Rc::clone(&hits);
        let own = adapter
            .listeners_mut()
            .add_click(move |e| own_log.borrow_mut().push(("own", e.position)));
        let fallback = adapter
            .listeners_mut()
            .add_click(move |e| fallback_log.borrow_mut().push(("fallback", e.position)));
        adapter
            .listeners_mut()
            .set_fallback_click(None, None, Some(fallback));

        adapter.submit_list_with(vec![row(1, "a"), row(2, "b")], |pos, w| {
            if pos == 0 { w.with_click(own) } else { w }
        });

        assert!(adapter.on_click(0));
        assert_eq!(*hits.borrow(), vec![("own", 0)]);
        assert!(adapter.on_click(1));
        assert_eq!(*hits.borrow(), vec![("own", 0), ("fallback", 1)]);
        assert!(!adapter.on_click(7));
    }

    #[test]
    fn child_and_long_clicks_dispatch() {
        let (mut adapter, _) = adapter();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let child_log = Rc::clone(&hits);
        let child = adapter
            .listeners_mut()
            .add_click(move |e| child_log.borrow_mut().push(e.child));
        let consume = adapter.listeners_mut().add_long_click(|_| true);
        adapter.submit_list_with(vec![row(1, "a")], |_, w| {
            w.with_child_click(ChildId(5), child)
                .with_long_click(consume)
                .with_child_long_click(ChildId(5), consume)
        });

        assert!(adapter.on_child_click(0, 5u32));
        assert!(!adapter.on_child_click(0, 6u32));
        assert_eq!(*hits.borrow(), vec![Some(ChildId(5))]);
        assert!(adapter.on_long_click(0));
        assert!(adapter.on_child_long_click(0, ChildId(5)));
        assert!(!adapter.on_child_long_click(0, ChildId(6)));
        assert!(!adapter.on_long_click(3));
    }

    #[test]
    fn background_submissions_apply_in_order() {
        let (mut adapter, ops) = adapter();
        let first = adapter.submit_list_background(vec![row(1, "a"), row(2, "b")]);
        let second = adapter.submit_list(vec![row(2, "b"), row(1, "a")]);
        let third = adapter.submit_list_background(vec![row(2, "b")]);
        assert!(!first.is_applied());
        assert!(!second.is_applied());
        assert!(first.ticket() < second.ticket() && second.ticket() < third.ticket());
        assert_eq!(adapter.pending(), 3);
        assert_eq!(
            adapter.insert(0, row(5, "e")),
            Err(AdapterError::Busy { pending: 3 })
        );

        assert_eq!(adapter.flush(), 3);
        assert!(!adapter.is_busy());
        assert_eq!(labels(&adapter), ["b"]);
        assert_eq!(
            *ops.borrow(),
            vec![
                EditOp::Insert { index: 0, count: 2 },
                EditOp::Move { from: 0, to: 1 },
                EditOp::Remove { index: 1, count: 1 },
            ]
        );
        assert_eq!(adapter.snapshot().generation(), 3);
    }

    #[test]
    fn poll_eventually_applies_background_diffs() {
        let (mut adapter, _) = adapter();
        adapter.submit_list_background(vec![row(1, "a")]);
        let mut applied = 0;
        while adapter.is_busy() {
            applied += adapter.poll();
            std::thread::yield_now();
        }
        assert_eq!(applied, 1);
        assert_eq!(labels(&adapter), ["a"]);
    }

    #[test]
    fn worker_panic_is_reraised_and_queue_survives() {
        let mut adapter = ListAdapter::builder(
            registry(),
            FnDiff::new(
                |a: &Row, b: &Row| {
                    assert!(b.label != "boom", "comparator exploded");
                    a.id == b.id
                },
                |a: &Row, b: &Row| a == b,
            ),
        )
        .type_key_of(|_| "row".into())
        .build();
        adapter.submit_list(vec![row(1, "a")]);
        adapter.submit_list_background(vec![row(2, "boom")]);
        adapter.submit_list(vec![row(3, "c")]);

        let outcome = catch_unwind(AssertUnwindSafe(|| adapter.flush()));
        assert!(outcome.is_err());
        assert_eq!(labels(&adapter), ["a"]);
        assert_eq!(adapter.pending(), 1);

        assert_eq!(adapter.flush(), 1);
        assert_eq!(labels(&adapter), ["c"]);
    }

    #[test]
    #[traced_test]
    fn commits_are_logged() {
        let (mut adapter, _) = adapter();
        adapter.submit_list(vec![row(1, "a")]);
        assert!(logs_contain("list committed"));
    }
}
