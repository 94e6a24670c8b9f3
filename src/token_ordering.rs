use ahash::RandomState;
use std::collections::HashMap;

/// A dense rank mapping over the token vocabulary, rarest token first.
///
/// Built once per join from the document frequency of every token across
/// both tables combined (the number of distinct records containing the
/// token at least once), then sorted `(frequency ascending, token ascending)`.
pub struct TokenOrdering {
    ranks: HashMap<String, u32, RandomState>,
}

impl TokenOrdering {
    /// `documents` is an iterator over token *sets* (duplicates already
    /// removed per document) spanning both tables; a token's frequency is
    /// the number of documents it appears in, not its raw occurrence count.
    pub fn build<I, D>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: IntoIterator<Item = String>,
    {
        let mut document_frequency: HashMap<String, u64, RandomState> =
            HashMap::with_hasher(RandomState::new());

        for document in documents {
            let mut seen: HashMap<&str, (), RandomState> =
                HashMap::with_hasher(RandomState::new());
            let document: Vec<String> = document.into_iter().collect();

            for token in &document {
                if seen.insert(token.as_str(), ()).is_none() {
                    *document_frequency.entry(token.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut tokens: Vec<(String, u64)> = document_frequency.into_iter().collect();
        tokens.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let ranks: HashMap<String, u32, RandomState> = tokens
            .into_iter()
            .enumerate()
            .map(|(rank, (token, _))| (token, rank as u32))
            .collect();

        Self { ranks }
    }

    pub fn rank(&self, token: &str) -> Option<u32> {
        self.ranks.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Maps each token to its rank, dropping unknown tokens, then sorts the
    /// result ascending by rank. Used both to order whole records against
    /// the global ordering and, at single-pair scope, against a local ad-hoc
    /// ordering built over just two records.
    pub fn order_using(&self, tokens: &[String]) -> Vec<u32> {
        let mut ranks: Vec<u32> = tokens.iter().filter_map(|t| self.rank(t)).collect();
        ranks.sort_unstable();
        ranks
    }
}
