use thiserror::Error;

use super::tokens::TokenCounts;
use crate::types::identifiers::TupleOrder;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Tokenizer failed at order {order}: {message}")]
    Tokenizer { order: TupleOrder, message: String },
}

/// Turns document text into token-sequence counts.
///
/// Implementations must be pure: the same text and order always produce the
/// same counts, and concurrent calls through `&self` are allowed.
pub trait DocumentParser: Send + Sync {
    fn parse(&self, text: &str, order: TupleOrder) -> Result<TokenCounts, ParseError>;
}

impl<P: DocumentParser + ?Sized> DocumentParser for &P {
    fn parse(&self, text: &str, order: TupleOrder) -> Result<TokenCounts, ParseError> {
        (**self).parse(text, order)
    }
}

/// Default tokenizer: lowercase words, counted as every contiguous run of
/// 1..=order words.
///
/// A word is a maximal run of alphanumeric characters; everything else
/// separates words.
#[derive(Debug, Clone, Copy, Default)]
pub struct NgramParser;

impl NgramParser {
    fn words(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect()
    }
}

impl DocumentParser for NgramParser {
    fn parse(&self, text: &str, order: TupleOrder) -> Result<TokenCounts, ParseError> {
        let words = Self::words(text);
        let mut counts = TokenCounts::new();

        for start in 0..words.len() {
            let longest = order.get().min(words.len() - start);
            for len in 1..=longest {
                counts.record(words[start..start + len].join(" "));
            }
        }

        Ok(counts)
    }
}
