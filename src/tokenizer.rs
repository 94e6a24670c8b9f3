use paltoquet::Tokenize;
use unicode_segmentation::UnicodeSegmentation;

/// Contract every tokenizer implementation must satisfy.
///
/// `return_set` tells the driver whether this tokenizer naturally produces a
/// bag (duplicates kept) or a set (duplicates already removed). The driver
/// never mutates this flag on the caller's own tokenizer; instead it wraps it
/// in [`ForceSet`] or [`ForceBag`] for the duration of a single join call.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
    fn return_set(&self) -> bool;
}

/// Splits on Unicode word boundaries via paltoquet's word tokenizer.
pub struct WhitespaceWordTokenizer;

impl Tokenizer for WhitespaceWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.words().map(|token| token.text.to_string()).collect()
    }

    fn return_set(&self) -> bool {
        false
    }
}

/// Slides a window of `q` grapheme clusters across the join string. No
/// padding is applied: a string shorter than `q` graphemes yields zero
/// tokens, which falls under the empty-record policy at the driver level.
pub struct QGramTokenizer {
    pub q: usize,
}

impl QGramTokenizer {
    pub fn new(q: usize) -> Self {
        Self { q }
    }
}

impl Tokenizer for QGramTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if self.q == 0 {
            return Vec::new();
        }

        let graphemes: Vec<&str> = text.graphemes(true).collect();

        if graphemes.len() < self.q {
            return Vec::new();
        }

        graphemes
            .windows(self.q)
            .map(|window| window.concat())
            .collect()
    }

    fn return_set(&self) -> bool {
        false
    }
}

/// Splits on a caller-provided delimiter, for callers who already tokenized
/// upstream and stored tokens as a delimited string.
pub struct DelimiterTokenizer {
    pub delimiter: char,
}

impl DelimiterTokenizer {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Tokenizer for DelimiterTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        text.split(self.delimiter).map(|s| s.to_string()).collect()
    }

    fn return_set(&self) -> bool {
        false
    }
}

/// Wraps a tokenizer so its output is always deduplicated, regardless of the
/// wrapped tokenizer's natural mode.
pub struct ForceSet<'t, T: Tokenizer + ?Sized>(pub &'t T);

impl<'t, T: Tokenizer + ?Sized> Tokenizer for ForceSet<'t, T> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = self.0.tokenize(text);
        tokens.sort_unstable();
        tokens.dedup();
        tokens
    }

    fn return_set(&self) -> bool {
        true
    }
}

/// Wraps a tokenizer so its output is always a bag (no deduplication),
/// regardless of the wrapped tokenizer's natural mode.
pub struct ForceBag<'t, T: Tokenizer + ?Sized>(pub &'t T);

impl<'t, T: Tokenizer + ?Sized> Tokenizer for ForceBag<'t, T> {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.0.tokenize(text)
    }

    fn return_set(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qgram_no_padding() {
        let tok = QGramTokenizer::new(3);
        assert_eq!(tok.tokenize("apple"), vec!["app", "ppl", "ple"]);
    }

    #[test]
    fn test_qgram_short_text_yields_nothing() {
        let tok = QGramTokenizer::new(5);
        assert!(tok.tokenize("ab").is_empty());
    }

    #[test]
    fn test_delimiter_tokenizer() {
        let tok = DelimiterTokenizer::new('|');
        assert_eq!(tok.tokenize("a|b|b"), vec!["a", "b", "b"]);
    }

    #[test]
    fn test_force_set_dedups() {
        let tok = DelimiterTokenizer::new(' ');
        let forced = ForceSet(&tok);
        let mut tokens = forced.tokenize("a b b a");
        tokens.sort();
        assert_eq!(tokens, vec!["a", "b"]);
        assert!(forced.return_set());
    }
}
