//! List diffing.
//!
//! - [`callback`]: [`ItemDiff`] strategies and the row-level
//!   [`WrapperComparator`].
//! - `myers`: longest-common-subsequence search.
//! - [`script`]: [`EditScript`] construction, replay and application.
//!
//! The host receives scripts through a [`ListUpdateSink`].

use std::cell::RefCell;
use std::rc::Rc;

pub mod callback;
mod myers;
pub mod script;

pub use callback::{EqDiff, FnDiff, ItemDiff, KeyDiff, PtrDiff, WrapperComparator};
pub use script::{DiffResult, EditOp, EditScript, calculate_diff};

/// Receiver for row-level structural notifications.
///
/// Positions follow [`EditScript`] semantics: each call refers to the list
/// after all previous calls were applied.
pub trait ListUpdateSink {
    fn on_inserted(&mut self, index: usize, count: usize);
    fn on_removed(&mut self, index: usize, count: usize);
    fn on_moved(&mut self, from: usize, to: usize);
    fn on_changed(&mut self, index: usize, count: usize);
}

/// Sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ListUpdateSink for NoopSink {
    fn on_inserted(&mut self, _index: usize, _count: usize) {}
    fn on_removed(&mut self, _index: usize, _count: usize) {}
    fn on_moved(&mut self, _from: usize, _to: usize) {}
    fn on_changed(&mut self, _index: usize, _count: usize) {}
}

/// Records notifications as ops.
impl ListUpdateSink for Vec<EditOp> {
    fn on_inserted(&mut self, index: usize, count: usize) {
        self.push(EditOp::Insert { index, count });
    }

    fn on_removed(&mut self, index: usize, count: usize) {
        self.push(EditOp::Remove { index, count });
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.push(EditOp::Move { from, to });
    }

    fn on_changed(&mut self, index: usize, count: usize) {
        self.push(EditOp::Change { index, count });
    }
}

impl<S: ListUpdateSink + ?Sized> ListUpdateSink for Box<S> {
    fn on_inserted(&mut self, index: usize, count: usize) {
        (**self).on_inserted(index, count);
    }

    fn on_removed(&mut self, index: usize, count: usize) {
        (**self).on_removed(index, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        (**self).on_moved(from, to);
    }

    fn on_changed(&mut self, index: usize, count: usize) {
        (**self).on_changed(index, count);
    }
}

/// Lets the host keep a handle on a sink it gave to the adapter.
impl<S: ListUpdateSink + ?Sized> ListUpdateSink for Rc<RefCell<S>> {
    fn on_inserted(&mut self, index: usize, count: usize) {
        self.borrow_mut().on_inserted(index, count);
    }

    fn on_removed(&mut self, index: usize, count: usize) {
        self.borrow_mut().on_removed(index, count);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        self.borrow_mut().on_moved(from, to);
    }

    fn on_changed(&mut self, index: usize, count: usize) {
        self.borrow_mut().on_changed(index, count);
    }
}
