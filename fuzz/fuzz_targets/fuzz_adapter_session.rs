#![no_main]

//! Drive an adapter with arbitrary submissions and manual edits, checking
//! every notification against a mirror of the host list.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vast_adapter::AdapterConfig;
use vast_harness::{Keyed, MirrorSink, keyed_adapter};

#[derive(Debug, Arbitrary)]
enum Step {
    Submit(Vec<(u8, u8)>),
    SubmitBackground(Vec<(u8, u8)>),
    Insert(u8, u8, u8),
    Update(u8, u8),
    Remove(u8),
    Clear,
    EmptyView(bool),
    Flush,
}

#[derive(Debug, Arbitrary)]
struct Input {
    empty_view: bool,
    steps: Vec<Step>,
}

fn rows(raw: &[(u8, u8)]) -> Vec<Keyed> {
    let mut seen = [false; 256];
    raw.iter()
        .filter(|(id, _)| !std::mem::replace(&mut seen[usize::from(*id)], true))
        .map(|&(id, rev)| Keyed {
            id: u32::from(id),
            rev,
        })
        .collect()
}

fuzz_target!(|input: Input| {
    let config = if input.empty_view {
        AdapterConfig::new().empty_view("empty")
    } else {
        AdapterConfig::new()
    };
    let mirror = MirrorSink::new(usize::from(input.empty_view));
    let mut adapter = keyed_adapter(config, mirror.clone());

    for step in input.steps.into_iter().take(64) {
        // Manual edits fail with `Busy` while submissions are pending.
        match step {
            Step::Submit(raw) => {
                adapter.submit_list(rows(&raw));
            }
            Step::SubmitBackground(raw) => {
                adapter.submit_list_background(rows(&raw));
            }
            Step::Insert(pos, id, rev) => {
                let _ = adapter.insert(
                    usize::from(pos),
                    Keyed {
                        id: 256 + u32::from(id),
                        rev,
                    },
                );
            }
            Step::Update(pos, rev) => {
                if let Some(Some(row)) = (usize::from(pos) < adapter.item_count())
                    .then(|| adapter.item(usize::from(pos)))
                {
                    let _ = adapter.update(usize::from(pos), Keyed { rev, ..*row });
                }
            }
            Step::Remove(pos) => {
                let _ = adapter.remove_at(usize::from(pos));
            }
            Step::Clear => {
                let _ = adapter.clear();
            }
            Step::EmptyView(on) => {
                let _ = adapter.set_empty_view(on.then(|| "empty".into()));
            }
            Step::Flush => {
                adapter.flush();
            }
        }
        mirror.assert_consistent(adapter.item_count());
    }
    adapter.flush();
    mirror.assert_consistent(adapter.item_count());
});
