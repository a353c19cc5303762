use std::collections::HashSet;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::simhash::sim_hasher::Fingerprinter;
use crate::text::TokenCounts;
use crate::{PACKED_LANE_BITS, PACKED_PREFIX_CHARS};

/// Distinct 64-bit feature codes of one document.
pub type FeatureCodes = HashSet<u64, RandomState>;

/// Turns a document's tokens into 64-bit feature codes.
///
/// Occurrence counts are ignored: a token votes once per document no matter
/// how often it occurs.
pub trait FeatureEncoder {
    fn encode<F: Fingerprinter>(&self, tokens: &TokenCounts, fingerprinter: &F) -> FeatureCodes;

    /// The 64-bit value a code votes with.
    ///
    /// Combined with [`FeatureEncoder::encode`], every token is run through
    /// the fingerprinter exactly once.
    fn vote_fingerprint<F: Fingerprinter>(&self, code: u64, fingerprinter: &F) -> u64;
}

/// Each token's UTF-8 bytes go through the fingerprinter; the result is the
/// feature code and votes as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullFingerprint;

impl FeatureEncoder for FullFingerprint {
    fn encode<F: Fingerprinter>(&self, tokens: &TokenCounts, fingerprinter: &F) -> FeatureCodes {
        tokens
            .keys()
            .map(|token| fingerprinter.fingerprint(token.as_bytes()))
            .collect()
    }

    #[inline]
    fn vote_fingerprint<F: Fingerprinter>(&self, code: u64, _fingerprinter: &F) -> u64 {
        code
    }
}

/// What [`PackedPrefix`] does with tokens shorter than four UTF-16 units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortTokenPolicy {
    /// Skip them entirely.
    #[default]
    Drop,
    /// Pack what is there and leave the unfilled low lanes zero.
    ZeroPad,
}

/// Packs the first four UTF-16 units of a token into 16-bit lanes, first
/// unit highest. The packed code is fingerprinted (big-endian bytes) before
/// it votes.
///
/// Tokens sharing a four-unit prefix collapse into one feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedPrefix {
    short_tokens: ShortTokenPolicy,
}

impl PackedPrefix {
    pub fn new(short_tokens: ShortTokenPolicy) -> Self {
        PackedPrefix { short_tokens }
    }

    pub fn short_tokens(&self) -> ShortTokenPolicy {
        self.short_tokens
    }

    /// Packed code of `token`, or `None` if the policy drops it.
    ///
    /// The code shifts left one lane after each of the first three units.
    /// Zero-padded short tokens keep that schedule, so their last unit
    /// lands in bits 16..32 and the bottom lane stays empty.
    pub fn pack(&self, token: &str) -> Option<u64> {
        let mut units = token.encode_utf16();
        let mut code = 0u64;
        let mut packed = 0;
        for _ in 0..PACKED_PREFIX_CHARS {
            let Some(unit) = units.next() else { break };
            code |= u64::from(unit);
            packed += 1;
            if packed < PACKED_PREFIX_CHARS {
                code <<= PACKED_LANE_BITS;
            }
        }
        match (packed, self.short_tokens) {
            (0, _) => None,
            (n, ShortTokenPolicy::Drop) if n < PACKED_PREFIX_CHARS => None,
            _ => Some(code),
        }
    }
}

impl FeatureEncoder for PackedPrefix {
    fn encode<F: Fingerprinter>(&self, tokens: &TokenCounts, _fingerprinter: &F) -> FeatureCodes {
        tokens.keys().filter_map(|token| self.pack(token)).collect()
    }

    #[inline]
    fn vote_fingerprint<F: Fingerprinter>(&self, code: u64, fingerprinter: &F) -> u64 {
        fingerprinter.fingerprint(&code.to_be_bytes())
    }
}

/// Runtime choice between the two strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEncoder {
    Full(FullFingerprint),
    Packed(PackedPrefix),
}

impl Default for TokenEncoder {
    fn default() -> Self {
        TokenEncoder::Packed(PackedPrefix::default())
    }
}

impl FeatureEncoder for TokenEncoder {
    fn encode<F: Fingerprinter>(&self, tokens: &TokenCounts, fingerprinter: &F) -> FeatureCodes {
        match self {
            TokenEncoder::Full(e) => e.encode(tokens, fingerprinter),
            TokenEncoder::Packed(e) => e.encode(tokens, fingerprinter),
        }
    }

    fn vote_fingerprint<F: Fingerprinter>(&self, code: u64, fingerprinter: &F) -> u64 {
        match self {
            TokenEncoder::Full(e) => e.vote_fingerprint(code, fingerprinter),
            TokenEncoder::Packed(e) => e.vote_fingerprint(code, fingerprinter),
        }
    }
}
