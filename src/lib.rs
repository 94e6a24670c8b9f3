//! A similarity-join engine over two tabular relations: given a left table
//! and a right table, each with a designated join attribute, returns every
//! pair whose similarity (Jaccard, Cosine, Dice, Overlap, or edit distance)
//! satisfies a threshold comparison, using a token-ordered prefix/position
//! filter-and-verify pipeline to avoid comparing every pair exhaustively.
//!
//! The left table is materialized and indexed up front; the right table is
//! streamed record by record. This crate performs no I/O, spawns no
//! threads, and has no CLI surface: sharding R across workers and reading
//! records from storage are left entirely to the caller.

pub mod error;
pub mod filter;
pub mod index;
pub mod join;
pub mod record;
pub mod similarity;
pub mod token_ordering;
pub mod tokenizer;

pub use error::{SimJoinError, SimJoinResult};
pub use join::{heuristic_pair_gate, similarity_join};
pub use record::{InputRecord, MatchedPair};
pub use similarity::{CompOp, JoinConfig, SimMeasure};
pub use token_ordering::TokenOrdering;
pub use tokenizer::{DelimiterTokenizer, ForceBag, ForceSet, QGramTokenizer, Tokenizer, WhitespaceWordTokenizer};
