use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder};

use super::SimMeasure;

/// Exact similarity over two ordered (ascending rank) token lists. Both
/// lists are assumed already sorted, so intersection/union sizes are found
/// by a linear merge rather than rebuilding hash sets per pair.
pub fn set_similarity(measure: SimMeasure, x: &[u32], y: &[u32]) -> f64 {
    let intersection = merge_intersection_count(x, y) as f64;

    match measure {
        SimMeasure::Jaccard => {
            let union = (x.len() + y.len()) as f64 - intersection;
            if union == 0.0 {
                1.0
            } else {
                intersection / union
            }
        }
        SimMeasure::Cosine => {
            if x.is_empty() || y.is_empty() {
                if x.is_empty() && y.is_empty() {
                    1.0
                } else {
                    0.0
                }
            } else {
                intersection / ((x.len() as f64) * (y.len() as f64)).sqrt()
            }
        }
        SimMeasure::Dice => {
            let denom = (x.len() + y.len()) as f64;
            if denom == 0.0 {
                1.0
            } else {
                2.0 * intersection / denom
            }
        }
        SimMeasure::Overlap => intersection,
        SimMeasure::EditDistance => {
            unreachable!("edit distance is verified via EditDistanceVerifier, not set_similarity")
        }
    }
}

fn merge_intersection_count(x: &[u32], y: &[u32]) -> usize {
    let mut i = 0;
    let mut j = 0;
    let mut count = 0;

    while i < x.len() && j < y.len() {
        match x[i].cmp(&y[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }

    count
}

/// Exact-and-pruned edit distance verification: builds one DFA per
/// left-candidate string and evaluates the right string against it in one
/// pass.
pub struct EditDistanceVerifier {
    builder: LevenshteinAutomatonBuilder,
    max_distance: u8,
}

impl EditDistanceVerifier {
    pub fn new(max_distance: u8) -> Self {
        Self {
            builder: LevenshteinAutomatonBuilder::new(max_distance, false),
            max_distance,
        }
    }

    /// Returns `Some(exact_distance)` when the true edit distance is
    /// `<= max_distance`, `None` when it provably exceeds it.
    pub fn distance(&self, left: &str, right: &str) -> Option<u8> {
        let dfa = self.builder.build_dfa(left);

        match dfa.eval(right) {
            Distance::Exact(d) => {
                if d <= self.max_distance {
                    Some(d)
                } else {
                    None
                }
            }
            Distance::AtLeast(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jaccard_basic() {
        let x = vec![1, 2, 3];
        let y = vec![2, 3, 4];
        assert_eq!(set_similarity(SimMeasure::Jaccard, &x, &y), 0.5);
    }

    #[test]
    fn test_overlap_count() {
        let x = vec![1, 2, 3];
        let y = vec![2, 3, 4];
        assert_eq!(set_similarity(SimMeasure::Overlap, &x, &y), 2.0);
    }

    #[test]
    fn test_dice() {
        let x = vec![1, 2, 3, 4];
        let y = vec![1, 2, 5, 6];
        // intersection=2, |x|+|y|=8, dice=4/8=0.5
        assert_eq!(set_similarity(SimMeasure::Dice, &x, &y), 0.5);
    }

    #[test]
    fn test_edit_distance_within_bound() {
        let verifier = EditDistanceVerifier::new(1);
        assert_eq!(verifier.distance("kitten", "kitten"), Some(0));
        assert_eq!(verifier.distance("kitten", "sitten"), Some(1));
        assert_eq!(verifier.distance("kitten", "sitting"), None);
    }
}
