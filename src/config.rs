//! Configuration for [`TextSimHasher`](crate::TextSimHasher).
//!
//! Two configs that compare equal produce bit-identical fingerprints for the
//! same input. Any change to how features are derived or voted on must bump
//! `version`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simhash::{FullFingerprint, PackedPrefix, ShortTokenPolicy, TokenEncoder};
use crate::SHINGLE_LENGTH;

/// Which strategy turns tokens into feature codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    /// Fingerprint every distinct token. Slower, no prefix collisions.
    Full,
    /// Pack the first four UTF-16 units of each token.
    #[default]
    Packed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimHashConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Characters per shingle on the shingle path.
    pub shingle_len: usize,
    /// Seed of the default fingerprint primitive.
    pub seed: u64,
    pub encoding: TokenEncoding,
    /// Only read by [`TokenEncoding::Packed`].
    pub short_tokens: ShortTokenPolicy,
}

impl SimHashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shingle_len(mut self, shingle_len: usize) -> Self {
        self.shingle_len = shingle_len;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_encoding(mut self, encoding: TokenEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_short_tokens(mut self, short_tokens: ShortTokenPolicy) -> Self {
        self.short_tokens = short_tokens;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.version < 1 {
            return Err(Error::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.shingle_len < 1 {
            return Err(Error::InvalidShingleLength {
                len: self.shingle_len,
            });
        }
        Ok(())
    }

    pub fn token_encoder(&self) -> TokenEncoder {
        match self.encoding {
            TokenEncoding::Full => TokenEncoder::Full(FullFingerprint),
            TokenEncoding::Packed => TokenEncoder::Packed(PackedPrefix::new(self.short_tokens)),
        }
    }
}

impl Default for SimHashConfig {
    fn default() -> Self {
        Self {
            version: 1,
            shingle_len: SHINGLE_LENGTH,
            seed: 0,
            encoding: TokenEncoding::Packed,
            short_tokens: ShortTokenPolicy::Drop,
        }
    }
}
