use ahash::RandomState;
use std::collections::HashMap;

/// Inverts token rank -> list of internal L record ids, populated only for
/// tokens appearing in the prefix of some L record. Used standalone for the
/// edit-distance measure, where candidate generation doesn't need per-token
/// positions.
pub struct PrefixIndex {
    postings: HashMap<u32, Vec<u32>, RandomState>,
}

impl PrefixIndex {
    /// `records` yields, per L record in internal-id order, its ordered
    /// token ranks together with the prefix length to index.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = (u32, &'a [u32], usize)>,
    {
        let mut postings: HashMap<u32, Vec<u32>, RandomState> =
            HashMap::with_hasher(RandomState::new());

        for (record_id, ordered_tokens, prefix_len) in records {
            for &token_rank in ordered_tokens.iter().take(prefix_len) {
                postings.entry(token_rank).or_default().push(record_id);
            }
        }

        Self { postings }
    }

    pub fn probe(&self, token_rank: u32) -> &[u32] {
        self.postings
            .get(&token_rank)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
