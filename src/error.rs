//! Errors for the fingerprinting pipeline.
//!
//! Every error belongs to a single document's computation; nothing here
//! leaves shared state behind.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The external tokenizer failed. The document gets no fingerprint.
    #[error("tokenizer failed: {0}")]
    Tokenizer(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid config: shingle_len must be >= 1 (got {len})")]
    InvalidShingleLength { len: usize },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
}
