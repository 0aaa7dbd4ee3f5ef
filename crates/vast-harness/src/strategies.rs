//! `proptest` strategies for keyed lists and mixed feeds.

use proptest::prelude::*;
use vast_adapter::{AdapterConfig, HolderRegistry, ItemWrapper, KeyDiff, ListAdapter, ListUpdateSink};

use crate::fixtures::Feed;

/// A row identified by `id` whose content is `rev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyed {
    pub id: u32,
    pub rev: u8,
}

/// Lists of up to `max_len` rows with unique ids drawn from `0..32`, in
/// random order, with random revisions. Two independent draws share
/// enough ids to produce moves, changes, inserts and removes together.
pub fn keyed_rows(max_len: usize) -> impl Strategy<Value = Vec<Keyed>> {
    proptest::collection::btree_set(0u32..32, 0..=max_len)
        .prop_flat_map(|ids| {
            let ids: Vec<u32> = ids.into_iter().collect();
            let len = ids.len();
            (
                Just(ids).prop_shuffle(),
                proptest::collection::vec(0u8..3, len),
            )
        })
        .prop_map(|(ids, revs)| {
            ids.into_iter()
                .zip(revs)
                .map(|(id, rev)| Keyed { id, rev })
                .collect()
        })
}

#[must_use]
pub fn wrap_keyed(rows: &[Keyed]) -> Vec<ItemWrapper<Keyed>> {
    rows.iter().map(|&row| ItemWrapper::new(row, "keyed")).collect()
}

/// Adapter over [`Keyed`] rows with `u8` holders (the bound revision).
pub fn keyed_adapter(
    config: AdapterConfig,
    sink: impl ListUpdateSink + 'static,
) -> ListAdapter<Keyed, u8> {
    let registry = HolderRegistry::builder()
        .register("keyed", |_| 0u8, |holder: &mut u8, row: &Keyed, _| {
            *holder = row.rev;
        })
        .register_static("empty", |_| u8::MAX)
        .build();
    ListAdapter::builder(registry, KeyDiff::new(|row: &Keyed| row.id))
        .type_key_of(|_| "keyed".into())
        .config(config)
        .sink(sink)
        .build()
}

/// Feeds of up to `max_len` entries mixing people and pictures. Entries are
/// unique per kind and id; a person and a picture may share an id.
pub fn feed_rows(max_len: usize) -> impl Strategy<Value = Vec<Feed>> {
    proptest::collection::btree_set((any::<bool>(), 0u32..16), 0..=max_len)
        .prop_flat_map(|entries| {
            let entries: Vec<(bool, u32)> = entries.into_iter().collect();
            let len = entries.len();
            (
                Just(entries).prop_shuffle(),
                proptest::collection::vec(0u8..3, len),
            )
        })
        .prop_map(|(entries, revs)| {
            entries
                .into_iter()
                .zip(revs)
                .map(|((is_person, id), rev)| {
                    if is_person {
                        Feed::person(id, &format!("name{rev}"))
                    } else {
                        Feed::picture(id, &format!("url{rev}"))
                    }
                })
                .collect()
        })
}
