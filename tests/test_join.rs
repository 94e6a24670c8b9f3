use simjoin::{
    similarity_join, CompOp, InputRecord, JoinConfig, QGramTokenizer, SimMeasure,
    WhitespaceWordTokenizer,
};

#[test]
fn test_overlap_word_tokens_scenario() {
    // spec scenario 2
    let tokenizer = WhitespaceWordTokenizer;
    let config = JoinConfig::new(SimMeasure::Overlap, 2.0, CompOp::Ge, false).unwrap();

    let left = vec![InputRecord::new(1u32, "red green blue", ())];
    let right = vec![InputRecord::new(9u32, "blue red yellow", ())];

    let result = similarity_join(&config, &tokenizer, None, &left, right).unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].score, 2.0);
}

#[test]
fn test_dice_set_mode_boundary() {
    // spec scenario 4: dice = 0.5 exactly; >= keeps it, > excludes it
    let tokenizer = WhitespaceWordTokenizer;

    let left = vec![InputRecord::new(1u32, "a b c d", ())];
    let right = vec![InputRecord::new(1u32, "a b e f", ())];

    let ge_config = JoinConfig::new(SimMeasure::Dice, 0.5, CompOp::Ge, false).unwrap();
    let ge_result = similarity_join(&ge_config, &tokenizer, None, &left, right.clone()).unwrap();
    assert_eq!(ge_result.len(), 1);

    let gt_config = JoinConfig::new(SimMeasure::Dice, 0.5, CompOp::Gt, false).unwrap();
    let gt_result = similarity_join(&gt_config, &tokenizer, None, &left, right).unwrap();
    assert!(gt_result.is_empty());
}

#[test]
fn test_size_bound_prunes_mismatched_lengths() {
    // spec scenario 6: a 100-token record can never reach 0.5 Jaccard
    // against a 10-token record, so it must be pruned without verification.
    let tokenizer = WhitespaceWordTokenizer;
    let config = JoinConfig::new(SimMeasure::Jaccard, 0.5, CompOp::Ge, false).unwrap();

    let long_text = (0..100)
        .map(|i| format!("tok{}", i))
        .collect::<Vec<_>>()
        .join(" ");
    let short_text = (0..10)
        .map(|i| format!("tok{}", i))
        .collect::<Vec<_>>()
        .join(" ");

    let left = vec![InputRecord::new(1u32, long_text, ())];
    let right = vec![InputRecord::new(1u32, short_text, ())];

    let result = similarity_join(&config, &tokenizer, None, &left, right).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_cosine_measure() {
    let tokenizer = WhitespaceWordTokenizer;
    let config = JoinConfig::new(SimMeasure::Cosine, 0.5, CompOp::Ge, false).unwrap();

    let left = vec![InputRecord::new(1u32, "a b c d", ())];
    let right = vec![InputRecord::new(1u32, "a b x y", ())];

    // intersection=2, cosine = 2/sqrt(4*4) = 0.5
    let result = similarity_join(&config, &tokenizer, None, &left, right).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].score, 0.5);
}

#[test]
fn test_completeness_against_brute_force() {
    // every pair satisfying the threshold must appear exactly once,
    // independent of how the filter pipeline pruned candidates.
    let tokenizer = WhitespaceWordTokenizer;
    let threshold = 0.5;
    let config = JoinConfig::new(SimMeasure::Jaccard, threshold, CompOp::Ge, false).unwrap();

    let left_texts = vec!["a b c", "a b d", "x y z", "a b c d e"];
    let right_texts = vec!["a b c", "b c d", "x y", "q r s"];

    let left: Vec<InputRecord<u32, ()>> = left_texts
        .iter()
        .enumerate()
        .map(|(i, t)| InputRecord::new(i as u32, *t, ()))
        .collect();
    let right: Vec<InputRecord<u32, ()>> = right_texts
        .iter()
        .enumerate()
        .map(|(i, t)| InputRecord::new(i as u32, *t, ()))
        .collect();

    let result = similarity_join(&config, &tokenizer, None, &left, right.clone()).unwrap();

    let mut expected = Vec::new();
    for (li, lt) in left_texts.iter().enumerate() {
        for (ri, rt) in right_texts.iter().enumerate() {
            let l_set: std::collections::HashSet<&str> = lt.split(' ').collect();
            let r_set: std::collections::HashSet<&str> = rt.split(' ').collect();
            let inter = l_set.intersection(&r_set).count();
            let union = l_set.union(&r_set).count();
            let score = inter as f64 / union as f64;
            if score >= threshold {
                expected.push((li as u32, ri as u32));
            }
        }
    }

    let mut actual: Vec<(u32, u32)> = result.iter().map(|p| (p.l_key, p.r_key)).collect();
    actual.sort_unstable();
    expected.sort_unstable();

    assert_eq!(actual, expected);
    let _ = right;
}

#[test]
fn test_threshold_monotonicity() {
    let tokenizer = WhitespaceWordTokenizer;

    let left = vec![InputRecord::new(1u32, "a b c d e", ())];
    let right = vec![InputRecord::new(1u32, "a b c x y", ())];

    let low = JoinConfig::new(SimMeasure::Jaccard, 0.3, CompOp::Ge, false).unwrap();
    let high = JoinConfig::new(SimMeasure::Jaccard, 0.9, CompOp::Ge, false).unwrap();

    let low_result = similarity_join(&low, &tokenizer, None, &left, right.clone()).unwrap();
    let high_result = similarity_join(&high, &tokenizer, None, &left, right).unwrap();

    assert!(high_result.len() <= low_result.len());
}

#[test]
fn test_qgram_edit_distance_end_to_end() {
    let tokenizer = QGramTokenizer::new(2);
    let config = JoinConfig::new(SimMeasure::EditDistance, 2.0, CompOp::Le, false).unwrap();

    let left = vec![InputRecord::new(1u32, "hello world", ())];
    let right = vec![
        InputRecord::new(1u32, "hello world", ()),
        InputRecord::new(2u32, "hallo world", ()),
        InputRecord::new(3u32, "completely different", ()),
    ];

    let result = similarity_join(&config, &tokenizer, Some(2), &left, right).unwrap();
    let mut keys: Vec<u32> = result.iter().map(|p| p.r_key).collect();
    keys.sort_unstable();

    assert_eq!(keys, vec![1, 2]);
}
