//! Configured text → SimHash pipeline.
//!
//! [`TextSimHasher`] binds a validated [`SimHashConfig`] to a fingerprint
//! primitive. Each document is fingerprinted independently; the batch
//! methods fan documents out over rayon's pool and return results in input
//! order.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::SimHashConfig;
use crate::error::{Error, Result};
use crate::shingle::shingles_with_len;
use crate::simhash::{Fingerprinter, SimHash, TokenEncoder, Xxh3Fingerprinter};
use crate::text::Tokenizer;

#[derive(Debug, Clone)]
pub struct TextSimHasher<F = Xxh3Fingerprinter> {
    sim_hash: SimHash<F>,
    shingle_len: usize,
    encoder: TokenEncoder,
}

impl TextSimHasher<Xxh3Fingerprinter> {
    /// Uses xxh3 seeded with `config.seed`.
    pub fn from_config(config: &SimHashConfig) -> Result<Self> {
        Self::with_fingerprinter(config, Xxh3Fingerprinter::with_seed(config.seed))
    }
}

impl<F: Fingerprinter> TextSimHasher<F> {
    /// `config.seed` is ignored; `fingerprinter` carries its own.
    pub fn with_fingerprinter(config: &SimHashConfig, fingerprinter: F) -> Result<Self> {
        config.validate()?;
        Ok(TextSimHasher {
            sim_hash: SimHash::new(fingerprinter),
            shingle_len: config.shingle_len,
            encoder: config.token_encoder(),
        })
    }

    pub fn sim_hash(&self) -> &SimHash<F> {
        &self.sim_hash
    }

    pub fn encoder(&self) -> &TokenEncoder {
        &self.encoder
    }

    pub fn shingle_sim_hash(&self, text: &str) -> u64 {
        let shingles = shingles_with_len(text, self.shingle_len);
        let signature = self.sim_hash.from_shingles(&shingles);
        debug!(features = shingles.len(), signature, "shingle simhash");
        signature
    }

    pub fn token_sim_hash<T: Tokenizer>(&self, text: &str, tokenizer: &T) -> Result<u64> {
        let tokens = match tokenizer.tokenize(text) {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(error = %err, "tokenizer_failure");
                return Err(Error::Tokenizer(Box::new(err)));
            }
        };
        let signature = self.sim_hash.from_tokens(&tokens, &self.encoder);
        debug!(tokens = tokens.len(), signature, "token simhash");
        Ok(signature)
    }
}

impl<F: Fingerprinter + Sync> TextSimHasher<F> {
    pub fn shingle_sim_hash_batch<S>(&self, texts: &[S]) -> Vec<u64>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.shingle_sim_hash(text.as_ref()))
            .collect()
    }

    /// One result per document; a failed document does not affect the rest.
    pub fn token_sim_hash_batch<S, T>(&self, texts: &[S], tokenizer: &T) -> Vec<Result<u64>>
    where
        S: AsRef<str> + Sync,
        T: Tokenizer + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.token_sim_hash(text.as_ref(), tokenizer))
            .collect()
    }
}
