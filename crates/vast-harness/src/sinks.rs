//! Notification sinks for tests.
//!
//! Both sinks are cheap handles over shared state: clone one, give the
//! clone to the adapter, and inspect the one you kept.

use std::cell::RefCell;
use std::rc::Rc;

use vast_adapter::{EditOp, ListUpdateSink};

/// Records every notification as an [`EditOp`].
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    ops: Rc<RefCell<Vec<EditOp>>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn ops(&self) -> Vec<EditOp> {
        self.ops.borrow().clone()
    }

    /// Everything recorded so far, clearing the log.
    pub fn take(&self) -> Vec<EditOp> {
        std::mem::take(&mut *self.ops.borrow_mut())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.borrow().is_empty()
    }
}

impl ListUpdateSink for RecordingSink {
    fn on_inserted(&mut self, index: usize, count: usize) {
        self.ops.borrow_mut().push(EditOp::Insert { index, count });
    }

    fn on_removed(&mut self, index: usize, count: usize) {
        self.ops.borrow_mut().push(EditOp::Remove { index, count });
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.ops.borrow_mut().push(EditOp::Move { from, to });
    }

    fn on_changed(&mut self, index: usize, count: usize) {
        self.ops.borrow_mut().push(EditOp::Change { index, count });
    }
}

/// One row of the host-side model kept by [`MirrorSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MirrorRow {
    /// Position of this row at the last [`settle`](MirrorSink::settle);
    /// `None` for rows inserted since.
    pub origin: Option<usize>,
    /// Whether a change notification touched the row since the last
    /// settle.
    pub changed: bool,
}

#[derive(Debug, Default)]
struct Mirror {
    rows: Vec<MirrorRow>,
    violations: Vec<String>,
}

impl Mirror {
    fn violation(&mut self, message: String) {
        tracing::warn!(%message, len = self.rows.len(), "edit op out of range");
        self.violations.push(message);
    }
}

/// Models the host list the way a `RecyclerView` would: every op is
/// applied to the current model, so positions are checked with the
/// sequential semantics the adapter promises. Out-of-range ops are
/// recorded as violations and skipped.
#[derive(Debug, Clone, Default)]
pub struct MirrorSink {
    state: Rc<RefCell<Mirror>>,
}

impl MirrorSink {
    /// A mirror of a host list that currently shows `len` rows.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let sink = Self::default();
        sink.reset(len);
        sink
    }

    /// Forget all history and model `len` settled rows.
    pub fn reset(&self, len: usize) {
        let mut state = self.state.borrow_mut();
        state.rows = (0..len)
            .map(|i| MirrorRow {
                origin: Some(i),
                changed: false,
            })
            .collect();
        state.violations.clear();
    }

    /// Mark the current rows as the new baseline.
    pub fn settle(&self) {
        let len = self.len();
        let violations = std::mem::take(&mut self.state.borrow_mut().violations);
        self.reset(len);
        self.state.borrow_mut().violations = violations;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn rows(&self) -> Vec<MirrorRow> {
        self.state.borrow().rows.clone()
    }

    #[must_use]
    pub fn violations(&self) -> Vec<String> {
        self.state.borrow().violations.clone()
    }

    /// # Panics
    ///
    /// Panics if any op was out of range or the model does not hold
    /// `expected_len` rows.
    pub fn assert_consistent(&self, expected_len: usize) {
        let state = self.state.borrow();
        assert!(
            state.violations.is_empty(),
            "edit ops out of range: {:?}",
            state.violations
        );
        assert_eq!(
            state.rows.len(),
            expected_len,
            "host model length diverged from the adapter"
        );
    }
}

impl ListUpdateSink for MirrorSink {
    fn on_inserted(&mut self, index: usize, count: usize) {
        let mut state = self.state.borrow_mut();
        if index > state.rows.len() {
            state.violation(format!("insert at {index} (+{count})"));
            return;
        }
        let fresh = std::iter::repeat_n(
            MirrorRow {
                origin: None,
                changed: false,
            },
            count,
        );
        state.rows.splice(index..index, fresh);
    }

    fn on_removed(&mut self, index: usize, count: usize) {
        let mut state = self.state.borrow_mut();
        if index + count > state.rows.len() {
            state.violation(format!("remove {index}..{}", index + count));
            return;
        }
        state.rows.drain(index..index + count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        let mut state = self.state.borrow_mut();
        let len = state.rows.len();
        if from >= len || to >= len {
            state.violation(format!("move {from} -> {to}"));
            return;
        }
        let row = state.rows.remove(from);
        state.rows.insert(to, row);
    }

    fn on_changed(&mut self, index: usize, count: usize) {
        let mut state = self.state.borrow_mut();
        if index + count > state.rows.len() {
            state.violation(format!("change {index}..{}", index + count));
            return;
        }
        for row in &mut state.rows[index..index + count] {
            row.changed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_its_log() {
        let sink = RecordingSink::new();
        let mut handle = sink.clone();
        handle.on_inserted(0, 2);
        handle.on_moved(1, 0);
        assert_eq!(
            sink.take(),
            vec![
                EditOp::Insert { index: 0, count: 2 },
                EditOp::Move { from: 1, to: 0 },
            ]
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn mirror_tracks_origins() {
        let sink = MirrorSink::new(3);
        let mut handle = sink.clone();
        handle.on_removed(0, 1);
        handle.on_moved(1, 0);
        handle.on_inserted(1, 1);
        handle.on_changed(0, 1);
        let origins: Vec<_> = sink.rows().iter().map(|r| r.origin).collect();
        assert_eq!(origins, vec![Some(2), None, Some(1)]);
        assert!(sink.rows()[0].changed);
        sink.assert_consistent(3);

        sink.settle();
        let origins: Vec<_> = sink.rows().iter().map(|r| r.origin).collect();
        assert_eq!(origins, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn mirror_flags_out_of_range_ops() {
        let sink = MirrorSink::new(2);
        let mut handle = sink.clone();
        handle.on_removed(1, 2);
        handle.on_moved(0, 2);
        handle.on_inserted(3, 1);
        handle.on_changed(2, 1);
        assert_eq!(sink.violations().len(), 4);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    #[should_panic(expected = "edit ops out of range")]
    fn assert_consistent_reports_violations() {
        let sink = MirrorSink::new(0);
        sink.clone().on_removed(0, 1);
        sink.assert_consistent(0);
    }
}
