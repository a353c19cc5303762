//! Tokenizer seam.
//!
//! Segmenting natural-language text is not this crate's job. Anything that
//! turns a document into distinct tokens with occurrence counts can drive
//! the token path by implementing [`Tokenizer`]; the two stock tokenizers
//! below cover whitespace-delimited and plain word-character text.

use std::collections::HashMap;
use std::convert::Infallible;

use ahash::RandomState;

/// Distinct tokens of one document with their occurrence counts.
pub type TokenCounts = HashMap<String, usize, RandomState>;

pub trait Tokenizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn tokenize(&self, text: &str) -> Result<TokenCounts, Self::Error>;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    type Error = T::Error;

    fn tokenize(&self, text: &str) -> Result<TokenCounts, Self::Error> {
        (**self).tokenize(text)
    }
}

pub fn whitespace_split(s: &str) -> impl Iterator<Item = &str> {
    s.split_whitespace()
}

/// Counts occurrences of each item.
pub fn count_tokens<'a, I>(tokens: I) -> TokenCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = TokenCounts::default();
    for token in tokens {
        *counts.entry(token.to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Splits on Unicode whitespace; tokens keep their case and punctuation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    type Error = Infallible;

    fn tokenize(&self, text: &str) -> Result<TokenCounts, Self::Error> {
        Ok(count_tokens(whitespace_split(text)))
    }
}

/// Splits on anything that is not alphanumeric and lowercases each word.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    type Error = Infallible;

    fn tokenize(&self, text: &str) -> Result<TokenCounts, Self::Error> {
        let mut counts = TokenCounts::default();
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
