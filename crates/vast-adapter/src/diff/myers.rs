//! Longest common subsequence via Myers' O((N+M)·D) greedy algorithm, in
//! its linear-space form.
//!
//! Returns the matched `(old, new)` index pairs of one LCS in ascending
//! order. Common prefixes and suffixes are stripped before each search, so
//! the usual "one row changed" or "rows appended" cases cost O(N+M) calls to
//! the equality function.
//!
//! # Invariants
//!
//! 1. Pairs are strictly increasing in both coordinates.
//! 2. Every returned pair satisfies `eq(old, new)`.
//! 3. The number of pairs is maximal among all such increasing matchings.
//!
//! Instead of keeping every frontier for a backtrack, each region is split
//! at the middle snake of an optimal path (found by running the search from
//! both ends until the frontiers overlap) and the two halves are solved
//! independently. Extra memory is O(N+M) regardless of the edit distance.

use std::ops::Range;

/// Compute the LCS pairs of two sequences of lengths `n` and `m`.
pub(crate) fn lcs_pairs(
    n: usize,
    m: usize,
    mut eq: impl FnMut(usize, usize) -> bool,
) -> Vec<(usize, usize)> {
    let mut frontiers = Frontiers::new(n, m);
    let mut pairs = Vec::new();
    let mut regions = vec![Region {
        old: 0..n,
        new: 0..m,
    }];

    while let Some(mut region) = regions.pop() {
        while !region.is_flat() && eq(region.old.start, region.new.start) {
            pairs.push((region.old.start, region.new.start));
            region.old.start += 1;
            region.new.start += 1;
        }
        while !region.is_flat() && eq(region.old.end - 1, region.new.end - 1) {
            region.old.end -= 1;
            region.new.end -= 1;
            pairs.push((region.old.end, region.new.end));
        }
        if region.is_flat() {
            continue;
        }
        if let Some((x, y)) = frontiers.middle_snake(&region, &mut eq) {
            regions.push(Region {
                old: x..region.old.end,
                new: y..region.new.end,
            });
            regions.push(Region {
                old: region.old.start..x,
                new: region.new.start..y,
            });
        }
    }

    pairs.sort_unstable();
    pairs
}

/// A rectangle of the edit graph still to be solved.
#[derive(Debug)]
struct Region {
    old: Range<usize>,
    new: Range<usize>,
}

impl Region {
    /// Whether one side is exhausted, leaving only inserts or removes.
    fn is_flat(&self) -> bool {
        self.old.is_empty() || self.new.is_empty()
    }
}

/// Furthest-reaching x per diagonal for the forward and backward searches,
/// sized once for the whole diff and reused by every region.
struct Frontiers {
    forward: Vec<isize>,
    backward: Vec<isize>,
    offset: isize,
}

impl Frontiers {
    fn new(n: usize, m: usize) -> Self {
        let max_d = (n + m + 1) / 2 + 1;
        Self {
            forward: vec![0; 2 * max_d + 1],
            backward: vec![0; 2 * max_d + 1],
            offset: max_d as isize,
        }
    }

    /// A point on an optimal path through `region` that splits it into two
    /// strictly smaller regions. `region` must have both sides non-empty
    /// and no common prefix or suffix.
    fn middle_snake(
        &mut self,
        region: &Region,
        eq: &mut impl FnMut(usize, usize) -> bool,
    ) -> Option<(usize, usize)> {
        let (x0, y0) = (region.old.start, region.new.start);
        let n = region.old.len() as isize;
        let m = region.new.len() as isize;
        let delta = n - m;
        let odd = delta & 1 == 1;
        let offset = self.offset;
        let at = |k: isize| (k + offset) as usize;

        self.forward[at(1)] = 0;
        self.backward[at(1)] = 0;
        for d in 0..(n + m + 1) / 2 + 1 {
            let mut k = -d;
            while k <= d {
                let v = &mut self.forward;
                let mut x = if k == -d || (k != d && v[at(k - 1)] < v[at(k + 1)]) {
                    v[at(k + 1)]
                } else {
                    v[at(k - 1)] + 1
                };
                let mut y = x - k;
                let (start_x, start_y) = (x, y);
                while x < n && y < m && eq(x0 + x as usize, y0 + y as usize) {
                    x += 1;
                    y += 1;
                }
                v[at(k)] = x;
                if odd && (k - delta).abs() < d && x + self.backward[at(delta - k)] >= n {
                    return Some((x0 + start_x as usize, y0 + start_y as usize));
                }
                k += 2;
            }

            // Backward: x and y count rows from the end of the region.
            let mut k = -d;
            while k <= d {
                let v = &mut self.backward;
                let mut x = if k == -d || (k != d && v[at(k - 1)] < v[at(k + 1)]) {
                    v[at(k + 1)]
                } else {
                    v[at(k - 1)] + 1
                };
                let mut y = x - k;
                while x < n && y < m && eq(x0 + (n - x - 1) as usize, y0 + (m - y - 1) as usize) {
                    x += 1;
                    y += 1;
                }
                v[at(k)] = x;
                if !odd && (k - delta).abs() <= d && x + self.forward[at(delta - k)] >= n {
                    return Some((x0 + (n - x) as usize, y0 + (m - y) as usize));
                }
                k += 2;
            }
        }
        None
    }
}
