/// An immutable input row: a key plus the join-attribute text, plus an
/// opaque passthrough payload the core never inspects. `A` is cloned exactly
/// once, at emit time, for records that survive verification, never while
/// sitting in an index or a candidate accumulator.
#[derive(Debug, Clone)]
pub struct InputRecord<K, A> {
    pub key: K,
    pub join_attr: String,
    pub payload: A,
}

impl<K, A> InputRecord<K, A> {
    pub fn new(key: K, join_attr: impl Into<String>, payload: A) -> Self {
        Self {
            key,
            join_attr: join_attr.into(),
            payload,
        }
    }
}

/// One emitted match: both sides' keys and payloads, plus the similarity
/// score (or edit distance, for `EditDistance`) that caused the emission.
#[derive(Debug, Clone)]
pub struct MatchedPair<KL, KR, AL, AR> {
    pub l_key: KL,
    pub r_key: KR,
    pub l_payload: AL,
    pub r_payload: AR,
    pub score: f64,
}
