//! Edit scripts and their construction from a pair of snapshots.
//!
//! # Script semantics
//!
//! An [`EditScript`] is applied front to back. Every position refers to the
//! list as it stands after all preceding ops; `Move { from, to }` removes the
//! row at `from` and reinserts it so that it ends up at `to`. This is the
//! contract `RecyclerView`-style hosts expect from their notify calls.
//!
//! # Construction
//!
//! [`calculate_diff`] emits ops in four phases:
//!
//! 1. **Remove** unmatched old rows, highest run first.
//! 2. **Move** matched rows that are not on the LCS, in ascending new
//!    position, each directly behind its settled predecessor.
//! 3. **Insert** unmatched new rows, lowest run first.
//! 4. **Change** matched rows whose content differs, at their final
//!    positions.
//!
//! Adjacent removes, inserts and changes are coalesced into ranges. Rows on
//! the LCS never move, so the number of moves is minimal for the matching.

use super::callback::WrapperComparator;
use super::myers::lcs_pairs;
use super::ListUpdateSink;
use crate::item::ItemWrapper;

/// One structural operation in an [`EditScript`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// `count` rows inserted starting at `index`.
    Insert { index: usize, count: usize },
    /// `count` rows removed starting at `index`.
    Remove { index: usize, count: usize },
    /// Row at `from` moved so that it now sits at `to`.
    Move { from: usize, to: usize },
    /// `count` rows starting at `index` need rebinding.
    Change { index: usize, count: usize },
}

/// Ordered, sequentially applied list of [`EditOp`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
}

impl EditScript {
    /// An empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A script with a single op.
    #[must_use]
    pub fn single(op: EditOp) -> Self {
        Self { ops: vec![op] }
    }

    #[must_use]
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Append an op.
    pub fn push(&mut self, op: EditOp) {
        self.ops.push(op);
    }

    /// Replay the script into a notification sink.
    pub fn dispatch_to<S: ListUpdateSink + ?Sized>(&self, sink: &mut S) {
        for op in &self.ops {
            match *op {
                EditOp::Insert { index, count } => sink.on_inserted(index, count),
                EditOp::Remove { index, count } => sink.on_removed(index, count),
                EditOp::Move { from, to } => sink.on_moved(from, to),
                EditOp::Change { index, count } => sink.on_changed(index, count),
            }
        }
    }

    /// Apply the script to `list`, taking inserted and changed values from
    /// `target`, the list the script was computed towards.
    ///
    /// Inserts and changes are emitted at their final positions, so
    /// `target[index..index + count]` holds exactly the values they stand
    /// for.
    ///
    /// # Panics
    ///
    /// Panics if an op is out of bounds for `list` or `target`, i.e. when
    /// the script does not belong to this pair of lists.
    pub fn apply<X: Clone>(&self, list: &mut Vec<X>, target: &[X]) {
        for op in &self.ops {
            match *op {
                EditOp::Insert { index, count } => {
                    let values = target[index..index + count].iter().cloned();
                    list.splice(index..index, values);
                }
                EditOp::Remove { index, count } => {
                    list.drain(index..index + count);
                }
                EditOp::Move { from, to } => {
                    let row = list.remove(from);
                    list.insert(to, row);
                }
                EditOp::Change { index, count } => {
                    list[index..index + count].clone_from_slice(&target[index..index + count]);
                }
            }
        }
    }

    /// Op counts as `(inserted, removed, moved, changed)` rows.
    #[must_use]
    pub fn summary(&self) -> (usize, usize, usize, usize) {
        self.ops
            .iter()
            .fold((0, 0, 0, 0), |(i, r, m, c), op| match *op {
                EditOp::Insert { count, .. } => (i + count, r, m, c),
                EditOp::Remove { count, .. } => (i, r + count, m, c),
                EditOp::Move { .. } => (i, r, m + 1, c),
                EditOp::Change { count, .. } => (i, r, m, c + count),
            })
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Outcome of diffing two snapshots: the script plus position mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    script: EditScript,
    old_to_new: Vec<Option<usize>>,
    new_to_old: Vec<Option<usize>>,
}

impl DiffResult {
    #[must_use]
    pub fn script(&self) -> &EditScript {
        &self.script
    }

    #[must_use]
    pub fn into_script(self) -> EditScript {
        self.script
    }

    /// Where the row at old position `old` ended up, or `None` if it was
    /// removed or `old` is out of range.
    #[must_use]
    pub fn old_position_to_new(&self, old: usize) -> Option<usize> {
        self.old_to_new.get(old).copied().flatten()
    }

    /// Which old row now sits at `new`, or `None` if it was inserted.
    #[must_use]
    pub fn new_position_to_old(&self, new: usize) -> Option<usize> {
        self.new_to_old.get(new).copied().flatten()
    }
}

/// Diff two snapshots.
///
/// `detect_moves = false` skips the move pass: rows that left the LCS are
/// reported as remove + insert.
pub fn calculate_diff<T>(
    old: &[ItemWrapper<T>],
    new: &[ItemWrapper<T>],
    comparator: &WrapperComparator<T>,
    detect_moves: bool,
) -> DiffResult {
    let n = old.len();
    let m = new.len();

    let pairs = lcs_pairs(n, m, |i, j| comparator.are_items_the_same(&old[i], &new[j]));
    let mut old_to_new = vec![None; n];
    let mut new_to_old = vec![None; m];
    let mut settled = vec![false; n];
    for &(i, j) in &pairs {
        old_to_new[i] = Some(j);
        new_to_old[j] = Some(i);
        settled[i] = true;
    }

    // An empty LCS means no old row is the same item as any new row, so
    // there is nothing to move.
    let mut moved = Vec::new();
    if detect_moves && !pairs.is_empty() && pairs.len() < n.min(m) {
        let mut free_old: Vec<usize> = (0..n).filter(|&i| old_to_new[i].is_none()).collect();
        for j in 0..m {
            if free_old.is_empty() {
                break;
            }
            if new_to_old[j].is_some() {
                continue;
            }
            let hit = free_old
                .iter()
                .position(|&i| comparator.are_items_the_same(&old[i], &new[j]));
            if let Some(slot) = hit {
                let i = free_old.remove(slot);
                old_to_new[i] = Some(j);
                new_to_old[j] = Some(i);
                moved.push((i, j));
            }
        }
    }

    let mut script = EditScript::new();

    // Phase 1: removals, highest run first so lower positions stay valid.
    let removed: Vec<usize> = (0..n).filter(|&i| old_to_new[i].is_none()).collect();
    for (start, count) in runs(&removed).into_iter().rev() {
        script.ops.push(EditOp::Remove {
            index: start,
            count,
        });
    }

    // Phase 2: moves. `cur` holds the surviving old rows in display order.
    let mut cur: Vec<usize> = (0..n).filter(|&i| old_to_new[i].is_some()).collect();
    for &(i, j) in &moved {
        let from = position_of(&cur, i);
        cur.remove(from);
        let to = (0..j)
            .rev()
            .find_map(|jp| new_to_old[jp].filter(|&ip| settled[ip]))
            .map_or(0, |ip| position_of(&cur, ip) + 1);
        cur.insert(to, i);
        settled[i] = true;
        if from != to {
            script.ops.push(EditOp::Move { from, to });
        }
    }

    // Phase 3: insertions, lowest run first.
    let inserted: Vec<usize> = (0..m).filter(|&j| new_to_old[j].is_none()).collect();
    for (start, count) in runs(&inserted) {
        script.ops.push(EditOp::Insert {
            index: start,
            count,
        });
    }

    // Phase 4: content changes at final positions.
    let changed: Vec<usize> = (0..m)
        .filter(|&j| {
            new_to_old[j].is_some_and(|i| !comparator.are_contents_the_same(&old[i], &new[j]))
        })
        .collect();
    for (start, count) in runs(&changed) {
        script.ops.push(EditOp::Change {
            index: start,
            count,
        });
    }

    DiffResult {
        script,
        old_to_new,
        new_to_old,
    }
}

fn position_of(cur: &[usize], old: usize) -> usize {
    cur.iter()
        .position(|&i| i == old)
        .unwrap_or_else(|| unreachable!("matched row {old} missing from working list"))
}

/// Group ascending indices into `(start, len)` runs of consecutive values.
fn runs(indices: &[usize]) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = Vec::new();
    for &i in indices {
        match out.last_mut() {
            Some((start, len)) if *start + *len == i => *len += 1,
            _ => out.push((i, 1)),
        }
    }
    out
}
