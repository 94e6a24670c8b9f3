use ahash::RandomState;
use std::collections::HashMap;

/// Inverts token rank -> list of (record id, position within the ordered
/// full token list), built only over each record's prefix tokens, plus a
/// side array of total token counts per record. L record ids are dense
/// internal indices (`0..|L|`), so sizes are stored in a flat `Vec` rather
/// than a hash map.
pub struct PositionIndex {
    postings: HashMap<u32, Vec<(u32, u32)>, RandomState>,
    sizes: Vec<u32>,
}

impl PositionIndex {
    /// `records` yields, per L record in internal-id order, its ordered
    /// token ranks together with the prefix length to index.
    pub fn build<'a, I>(records: I, num_records: usize) -> Self
    where
        I: IntoIterator<Item = (u32, &'a [u32], usize)>,
    {
        let mut postings: HashMap<u32, Vec<(u32, u32)>, RandomState> =
            HashMap::with_hasher(RandomState::new());
        let mut sizes = vec![0u32; num_records];

        for (record_id, ordered_tokens, prefix_len) in records {
            sizes[record_id as usize] = ordered_tokens.len() as u32;

            for (pos, &token_rank) in ordered_tokens.iter().take(prefix_len).enumerate() {
                postings
                    .entry(token_rank)
                    .or_default()
                    .push((record_id, pos as u32));
            }
        }

        Self { postings, sizes }
    }

    pub fn probe(&self, token_rank: u32) -> &[(u32, u32)] {
        self.postings
            .get(&token_rank)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn size(&self, record_id: u32) -> u32 {
        self.sizes[record_id as usize]
    }
}
