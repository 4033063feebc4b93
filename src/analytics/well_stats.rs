//! Running production aggregates per well and the top-k oil ranking.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Running oil/water sums for one well.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WellStats {
    pub sum_oil: f64,
    pub sum_water: f64,
    pub count: u64,
}

impl WellStats {
    /// Fold one finalized observation into the aggregate.
    pub fn add(&mut self, oil: f64, water: f64) {
        self.sum_oil += oil;
        self.sum_water += water;
        self.count += 1;
    }

    /// Mean oil rate, `None` before the first finalized observation.
    pub fn average_oil(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum_oil / self.count as f64)
    }

    /// Water fraction of total fluid.
    ///
    /// Zero total fluid reports `0.0` rather than dividing by zero.
    pub fn water_cut(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let fluid = self.sum_oil + self.sum_water;
        if fluid == 0.0 {
            return Some(0.0);
        }
        Some(self.sum_water / fluid)
    }
}

/// Ranking key: more oil is better, then the lexicographically smaller id.
#[derive(Debug)]
struct Ranked<'a> {
    sum_oil: f64,
    well_id: &'a str,
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sum_oil
            .total_cmp(&other.sum_oil)
            .then_with(|| other.well_id.cmp(self.well_id))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Up to `k` wells with at least one observation, by descending `sum_oil`
/// with ties broken by ascending well id.
///
/// Keeps a min-heap of the current best `k`, so selection is O(n log k).
pub fn top_wells_by_oil<'a, I>(wells: I, k: usize) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a WellStats)>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Ranked<'a>>> = BinaryHeap::new();

    for (well_id, st) in wells {
        if st.count == 0 {
            continue;
        }
        heap.push(Reverse(Ranked {
            sum_oil: st.sum_oil,
            well_id,
        }));
        if heap.len() > k {
            heap.pop();
        }
    }

    // Ascending by Reverse is descending by rank
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(r)| r.well_id)
        .collect()
}
