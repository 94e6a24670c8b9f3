use std::collections::BTreeSet;

use crate::index::PrefixIndex;

/// Union of the prefix-index postings over a probe record's prefix tokens.
/// No per-candidate counting; used standalone for edit distance, where the
/// next step is a raw string-length bound plus exact verification rather
/// than an overlap count.
pub fn prefix_filter_candidates(
    index: &PrefixIndex,
    probe_prefix: &[u32],
) -> BTreeSet<u32> {
    let mut candidates = BTreeSet::new();

    for &token_rank in probe_prefix {
        for &record_id in index.probe(token_rank) {
            candidates.insert(record_id);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_filter_union() {
        let records: Vec<(u32, Vec<u32>, usize)> = vec![
            (0, vec![1, 5], 2),
            (1, vec![2, 5], 2),
            (2, vec![9], 1),
        ];

        let index = PrefixIndex::build(
            records.iter().map(|(id, toks, len)| (*id, toks.as_slice(), *len)),
        );

        let candidates = prefix_filter_candidates(&index, &[5]);
        assert_eq!(candidates, [0, 1].into_iter().collect());
    }
}
