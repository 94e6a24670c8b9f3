use ahash::RandomState;
use std::collections::HashMap;

use crate::index::PositionIndex;
use crate::similarity::{overlap_threshold, size_bounds, SimMeasure};

/// Table-scope position filter: the heart of the pipeline.
///
/// Reuses a dense `overlap` vector of length `|L|` across probes instead of
/// reallocating or clearing a hashmap per probe record: only the entries
/// "touched" during a probe are reset afterwards, in O(touched) rather than
/// O(|L|).
pub struct PositionFilter {
    measure: SimMeasure,
    threshold: f64,
    overlap: Vec<i32>,
    touched: Vec<u32>,
    threshold_cache: HashMap<u32, usize, RandomState>,
}

impl PositionFilter {
    pub fn new(measure: SimMeasure, threshold: f64, num_l_records: usize) -> Self {
        Self {
            measure,
            threshold,
            overlap: vec![-1; num_l_records],
            touched: Vec::new(),
            threshold_cache: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Returns `(record_id, overlap_count)` for every surviving candidate.
    /// `overlap_count` is a lower bound on the true intersection size, not
    /// necessarily the exact value, verification still determines the
    /// final similarity.
    pub fn find_candidates(
        &mut self,
        index: &PositionIndex,
        probe_ordered_tokens: &[u32],
        probe_prefix_len: usize,
    ) -> Vec<(u32, u32)> {
        debug_assert!(self.touched.is_empty());

        let n_r = probe_ordered_tokens.len();
        let bounds = size_bounds(self.measure, n_r, self.threshold);
        self.threshold_cache.clear();

        for (i, &token_rank) in probe_ordered_tokens.iter().take(probe_prefix_len).enumerate() {
            for &(cand, j) in index.probe(token_rank) {
                let n_c = index.size(cand);

                if let Some((lower, upper)) = bounds {
                    if (n_c as usize) < lower || (n_c as usize) > upper {
                        continue;
                    }
                }

                let overlap_upper_bound =
                    1 + (n_r - i - 1).min(n_c as usize - j as usize - 1);

                let measure = self.measure;
                let threshold = self.threshold;
                let thresh = *self
                    .threshold_cache
                    .entry(n_c)
                    .or_insert_with(|| overlap_threshold(measure, n_c as usize, n_r, threshold));

                let slot = &mut self.overlap[cand as usize];
                let cur = if *slot == -1 { 0 } else { *slot };

                if *slot == -1 {
                    self.touched.push(cand);
                }

                if cur + overlap_upper_bound as i32 >= thresh as i32 {
                    *slot = cur + 1;
                } else {
                    *slot = 0;
                }
            }
        }

        let mut results = Vec::new();

        for &cand in &self.touched {
            let count = self.overlap[cand as usize];
            if count > 0 {
                results.push((cand, count as u32));
            }
            self.overlap[cand as usize] = -1;
        }

        self.touched.clear();

        results
    }
}

/// Single-pair heuristic gate: builds a local `{token -> position}` map over
/// just the left record's prefix, then sweeps the right record's prefix
/// tokens with the same positional overlap-upper-bound pruning. Unlike the
/// table-scope filter this uses an ad-hoc local ordering rather than the
/// global one, so it is kept independent of (and not required to agree
/// exactly with) the table join's output, it only ever serves as a cheap
/// heuristic gate for single-pair comparisons.
pub fn filter_pair(
    measure: SimMeasure,
    threshold: f64,
    l_tokens: &[u32],
    l_prefix_len: usize,
    r_tokens: &[u32],
    r_prefix_len: usize,
) -> bool {
    let l_num = l_tokens.len();
    let r_num = r_tokens.len();

    let thresh = overlap_threshold(measure, l_num, r_num, threshold);

    let mut l_prefix_dict: HashMap<u32, usize, RandomState> =
        HashMap::with_hasher(RandomState::new());
    for (pos, &token) in l_tokens.iter().take(l_prefix_len).enumerate() {
        l_prefix_dict.insert(token, pos);
    }

    let mut overlap: i32 = 0;

    for (i, &token) in r_tokens.iter().take(r_prefix_len).enumerate() {
        if let Some(&l_pos) = l_prefix_dict.get(&token) {
            let overlap_upper_bound = 1 + (l_num - l_pos - 1).min(r_num - i - 1);

            if overlap + overlap_upper_bound as i32 >= thresh as i32 {
                overlap += 1;
            } else {
                overlap = 0;
            }
        }
    }

    overlap > 0
}
