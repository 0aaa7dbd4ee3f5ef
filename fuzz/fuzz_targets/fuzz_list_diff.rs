#![no_main]

//! Diff two arbitrary keyed lists and check the script rebuilds the target.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vast_adapter::{ItemWrapper, KeyDiff, WrapperComparator, calculate_diff};

#[derive(Debug, Arbitrary)]
struct Input {
    old: Vec<(u8, u8)>,
    new: Vec<(u8, u8)>,
    detect_moves: bool,
}

fn wrap(rows: &[(u8, u8)]) -> Vec<ItemWrapper<(u8, u8)>> {
    rows.iter()
        .map(|&row| ItemWrapper::new(row, u32::from(row.0 % 3)))
        .collect()
}

fuzz_target!(|input: Input| {
    // Duplicate keys are allowed: the diff must still produce a valid script.
    let comparator = WrapperComparator::new(KeyDiff::new(|row: &(u8, u8)| row.0));
    let (old, new) = (wrap(&input.old), wrap(&input.new));
    let result = calculate_diff(&old, &new, &comparator, input.detect_moves);

    let mut list = input.old.clone();
    result.script().apply(&mut list, &input.new);
    assert_eq!(list, input.new);
});
