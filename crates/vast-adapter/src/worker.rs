//! Background diff computation.
//!
//! A [`DiffWorker`] runs one diff on a dedicated thread. The adapter keeps
//! at most one worker alive and polls it from the UI thread; results are
//! applied there, in submission order. If the thread cannot be spawned the
//! diff runs inline and the worker is born finished.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::adapter::Snapshot;
use crate::diff::{DiffResult, WrapperComparator, calculate_diff};
use crate::item::ItemWrapper;

pub(crate) type DiffOutput<T> = (Vec<ItemWrapper<T>>, DiffResult);

struct DiffJob<T> {
    base: Arc<Snapshot<T>>,
    rows: Vec<ItemWrapper<T>>,
    comparator: WrapperComparator<T>,
    detect_moves: bool,
}

impl<T> DiffJob<T> {
    fn run(self) -> DiffOutput<T> {
        let result = calculate_diff(
            self.base.rows(),
            &self.rows,
            &self.comparator,
            self.detect_moves,
        );
        (self.rows, result)
    }
}

pub(crate) enum DiffWorker<T> {
    Running(JoinHandle<DiffOutput<T>>),
    Done(DiffOutput<T>),
}

impl<T> DiffWorker<T> {
    pub(crate) fn is_finished(&self) -> bool {
        match self {
            Self::Running(handle) => handle.is_finished(),
            Self::Done(_) => true,
        }
    }

    /// Wait for the result. A panic inside the comparator is re-raised on
    /// the calling thread.
    pub(crate) fn join(self) -> DiffOutput<T> {
        match self {
            Self::Running(handle) => match handle.join() {
                Ok(output) => output,
                Err(payload) => std::panic::resume_unwind(payload),
            },
            Self::Done(output) => output,
        }
    }
}

/// Start diffing `rows` against `base`.
pub(crate) fn spawn<T: Send + Sync + 'static>(
    base: Arc<Snapshot<T>>,
    rows: Vec<ItemWrapper<T>>,
    comparator: WrapperComparator<T>,
    detect_moves: bool,
) -> DiffWorker<T> {
    let (old_len, new_len) = (base.len(), rows.len());
    // Parked here so a failed spawn can take the job back.
    let slot = Arc::new(Mutex::new(Some(DiffJob {
        base,
        rows,
        comparator,
        detect_moves,
    })));
    let thread_slot = Arc::clone(&slot);

    let spawned = std::thread::Builder::new()
        .name("vast-diff".into())
        .spawn(move || {
            let job = thread_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            let Some(job) = job else {
                unreachable!("diff job taken before the worker started");
            };
            let _span = tracing::debug_span!("background_diff", old = old_len, new = new_len)
                .entered();
            job.run()
        });

    match spawned {
        Ok(handle) => {
            tracing::debug!(old = old_len, new = new_len, "diff started on worker thread");
            DiffWorker::Running(handle)
        }
        Err(err) => {
            tracing::warn!(%err, "could not spawn diff thread; diffing inline");
            let job = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            match job {
                Some(job) => DiffWorker::Done(job.run()),
                None => unreachable!("diff job lost after failed spawn"),
            }
        }
    }
}
