use std::collections::HashSet;
use std::hash::BuildHasher;

use tracing::trace;

use crate::error::{Error, Result};
use crate::simhash::encoder::FeatureEncoder;
use crate::simhash::sim_hasher::{Fingerprinter, Xxh3Fingerprinter};
use crate::text::{TokenCounts, Tokenizer};
use crate::HASH_SIZE;

/// Charikar SimHash over 64-bit feature fingerprints.
///
/// Every feature votes on every bit: +1 where its fingerprint has a one,
/// -1 where it has a zero. A result bit is set only when its vote total is
/// strictly positive, so a tie leaves the bit clear. An empty feature set
/// produces `0`.
#[derive(Debug, Clone, Default)]
pub struct SimHash<F = Xxh3Fingerprinter> {
    fingerprinter: F,
}

impl<F: Fingerprinter> SimHash<F> {
    pub fn new(fingerprinter: F) -> Self {
        SimHash { fingerprinter }
    }

    pub fn fingerprinter(&self) -> &F {
        &self.fingerprinter
    }

    /// Folds already-final feature fingerprints into one signature. Nothing
    /// is re-fingerprinted here.
    pub fn combine<I>(&self, fingerprints: I) -> u64
    where
        I: IntoIterator<Item = u64>,
    {
        let mut counts = [0i64; HASH_SIZE];
        let mut features = 0usize;

        for hash in fingerprints {
            for (i, count) in counts.iter_mut().enumerate() {
                if (hash >> i) & 1 == 1 {
                    *count += 1;
                } else {
                    *count -= 1;
                }
            }
            features += 1;
        }
        trace!(features, "combined feature fingerprints");

        let mut result = 0u64;
        for (i, &count) in counts.iter().enumerate() {
            if count > 0 {
                result |= 1u64 << i;
            }
        }
        result
    }

    /// Fingerprints each raw feature once and combines the results.
    pub fn create_signature<I>(&self, features: I) -> u64
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.combine(
            features
                .into_iter()
                .map(|feature| self.fingerprinter.fingerprint(feature.as_ref())),
        )
    }

    pub fn from_shingles<S: BuildHasher>(&self, shingles: &HashSet<String, S>) -> u64 {
        self.create_signature(shingles.iter())
    }

    pub fn from_tokens<E: FeatureEncoder>(&self, tokens: &TokenCounts, encoder: &E) -> u64 {
        let codes = encoder.encode(tokens, &self.fingerprinter);
        self.combine(
            codes
                .into_iter()
                .map(|code| encoder.vote_fingerprint(code, &self.fingerprinter)),
        )
    }

    /// Tokenizes `text` and fingerprints its tokens with `encoder`.
    ///
    /// A tokenizer failure fails the whole computation.
    pub fn from_text<T, E>(&self, text: &str, tokenizer: &T, encoder: &E) -> Result<u64>
    where
        T: Tokenizer,
        E: FeatureEncoder,
    {
        let tokens = tokenizer
            .tokenize(text)
            .map_err(|e| Error::Tokenizer(Box::new(e)))?;
        Ok(self.from_tokens(&tokens, encoder))
    }

    /// Majority signature of a group: bit `i` is set when more than half of
    /// `signatures` have it set.
    pub fn centroid<T>(&self, signatures: T) -> u64
    where
        T: IntoIterator<Item = u64>,
    {
        let mut counts = [0u64; HASH_SIZE];
        let mut len = 0u64;
        for signature in signatures {
            for (i, count) in counts.iter_mut().enumerate() {
                *count += (signature >> i) & 1;
            }
            len += 1;
        }
        let mut centroid = 0u64;
        for (i, &count) in counts.iter().enumerate() {
            if count * 2 > len {
                centroid |= 1u64 << i;
            }
        }
        centroid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shingle::{shingles, ShingleSet};
    use crate::simhash::distance::hamming_distance;
    use crate::simhash::encoder::{FullFingerprint, PackedPrefix, TokenEncoder};
    use crate::simhash::sim_hasher::{Sha1Fingerprinter, SipFingerprinter};
    use crate::text::{count_tokens, whitespace_split, WhitespaceTokenizer};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::Cell;

    static S1: &str = "SimHash is a technique used for detecting near-duplicates or for locality sensitive hashing. It was developed by Moses Charikar and is often used in large-scale applications to reduce the dimensionality of high-dimensional data, making it easier to process";

    static S2: &str = "SimHash is a technique used for detecting near-duplicates or for locality sensitive hashing. It was developed by Moses Charikar and is often utilized in large-scale applications to reduce the dimensionality of high-dimensional data, making it easier to analyze";

    /// Counts how many times it is asked for a fingerprint.
    struct Counting<'a> {
        inner: Xxh3Fingerprinter,
        calls: &'a Cell<usize>,
    }

    impl Fingerprinter for Counting<'_> {
        fn fingerprint(&self, bytes: &[u8]) -> u64 {
            self.calls.set(self.calls.get() + 1);
            self.inner.fingerprint(bytes)
        }
    }

    fn random_words(rng: &mut StdRng, n: usize) -> Vec<String> {
        (0..n)
            .map(|_| {
                let len = rng.gen_range(3..10);
                (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
            })
            .collect()
    }

    #[test]
    fn empty_set_is_zero() {
        let sim_hash: SimHash = SimHash::default();
        assert_eq!(sim_hash.from_shingles(&ShingleSet::default()), 0);
        assert_eq!(sim_hash.combine(std::iter::empty()), 0);
    }

    #[test]
    fn single_feature_reproduces_its_fingerprint() {
        let sim_hash: SimHash = SimHash::default();
        assert_eq!(sim_hash.combine([0xdead_beef_u64]), 0xdead_beef);
        let fp = sim_hash.fingerprinter().fingerprint(b"abc");
        assert_eq!(sim_hash.create_signature(["abc"]), fp);
    }

    #[test]
    fn majority_vote_per_bit() {
        let sim_hash: SimHash = SimHash::default();
        assert_eq!(sim_hash.combine([0b110, 0b011, 0b010]), 0b010);
        assert_eq!(sim_hash.combine([0b111, 0b111, 0b000]), 0b111);
    }

    #[test]
    fn ties_resolve_to_zero() {
        let sim_hash: SimHash = SimHash::default();
        assert_eq!(sim_hash.combine([u64::MAX, 0]), 0);
        assert_eq!(sim_hash.combine([0b01, 0b10]), 0);
        assert_eq!(sim_hash.combine([1u64 << 63, 1u64 << 63, 0]), 1u64 << 63);
    }

    #[test]
    fn top_bit_votes_like_any_other() {
        let sim_hash: SimHash = SimHash::default();
        let high = 0x8000_0000_0000_0001_u64;
        assert_eq!(sim_hash.combine([high, high, 1]), high);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let sim_hash = SimHash::new(SipFingerprinter::new(1, 2));
        let words = ["alpha", "beta", "gamma", "delta", "epsilon"];
        let forward: ShingleSet = words.iter().map(|s| s.to_string()).collect();
        let mut backward = ShingleSet::default();
        for w in words.iter().rev() {
            backward.insert(w.to_string());
        }
        assert_eq!(sim_hash.from_shingles(&forward), sim_hash.from_shingles(&backward));
        assert_eq!(sim_hash.from_shingles(&forward), sim_hash.from_shingles(&forward));
    }

    #[test]
    fn each_shingle_fingerprinted_once() {
        let calls = Cell::new(0);
        let sim_hash = SimHash::new(Counting { inner: Xxh3Fingerprinter::new(), calls: &calls });
        let set = shingles("abcabcabc");
        sim_hash.from_shingles(&set);
        assert_eq!(calls.get(), set.len());
    }

    #[test]
    fn each_token_fingerprinted_once() {
        let tokens = count_tokens(["abcd", "abcdef", "xyzw", "ab"]);

        let calls = Cell::new(0);
        let sim_hash = SimHash::new(Counting { inner: Xxh3Fingerprinter::new(), calls: &calls });
        sim_hash.from_tokens(&tokens, &PackedPrefix::default());
        // "abcd" and "abcdef" share a code, "ab" is dropped
        assert_eq!(calls.get(), 2);

        calls.set(0);
        sim_hash.from_tokens(&tokens, &FullFingerprint);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn full_tokens_match_raw_features() {
        let sim_hash = SimHash::new(Sha1Fingerprinter::new());
        let tokens = count_tokens(whitespace_split(S1));
        let expected = sim_hash.create_signature(tokens.keys());
        assert_eq!(sim_hash.from_tokens(&tokens, &FullFingerprint), expected);
    }

    #[test]
    fn near_duplicates_are_close() {
        let sim_hash: SimHash = SimHash::default();
        let a = sim_hash.from_shingles(&shingles(S1));
        let b = sim_hash.from_shingles(&shingles(S2));
        assert!(hamming_distance(a, b) < 20);

        let encoder = TokenEncoder::default();
        let a = sim_hash.from_text(S1, &WhitespaceTokenizer, &encoder).unwrap();
        let b = sim_hash.from_text(S2, &WhitespaceTokenizer, &encoder).unwrap();
        assert!(hamming_distance(a, b) < 20);
    }

    #[test]
    fn one_inserted_word_stays_close() {
        let mut rng = StdRng::seed_from_u64(42);
        let sim_hash: SimHash = SimHash::default();
        for _ in 0..20 {
            let mut words = random_words(&mut rng, 200);
            let before = words.join(" ");
            let at = rng.gen_range(0..words.len());
            words.insert(at, "inserted".to_string());
            let after = words.join(" ");
            let d = hamming_distance(
                sim_hash.from_shingles(&shingles(&before)),
                sim_hash.from_shingles(&shingles(&after)),
            );
            assert!(d < 20, "distance {d}");
        }
    }

    #[test]
    fn unrelated_texts_are_far_apart() {
        let mut rng = StdRng::seed_from_u64(7);
        let sim_hash: SimHash = SimHash::default();
        let rounds = 50;
        let mut total = 0;
        for _ in 0..rounds {
            let a = random_words(&mut rng, 100).join(" ");
            let b = random_words(&mut rng, 100).join(" ");
            total += hamming_distance(
                sim_hash.from_shingles(&shingles(&a)),
                sim_hash.from_shingles(&shingles(&b)),
            );
        }
        let mean = total as f64 / rounds as f64;
        assert!((24.0..=40.0).contains(&mean), "mean distance {mean}");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("segmenter gave up")]
    struct Broken;

    struct FailingTokenizer;

    impl Tokenizer for FailingTokenizer {
        type Error = Broken;

        fn tokenize(&self, _text: &str) -> std::result::Result<TokenCounts, Broken> {
            Err(Broken)
        }
    }

    #[test]
    fn tokenizer_failure_propagates() {
        let sim_hash: SimHash = SimHash::default();
        let err = sim_hash
            .from_text("anything", &FailingTokenizer, &TokenEncoder::default())
            .unwrap_err();
        assert!(matches!(err, Error::Tokenizer(_)));
        assert_eq!(err.to_string(), "tokenizer failed: segmenter gave up");
    }

    #[test]
    fn centroid_is_bitwise_majority() {
        let sim_hash: SimHash = SimHash::default();
        assert_eq!(sim_hash.centroid([0b1100, 0b1010, 0b1001]), 0b1000);
        // exactly half is not a majority
        assert_eq!(sim_hash.centroid([0b11, 0b01]), 0b01);
        assert_eq!(sim_hash.centroid(std::iter::empty()), 0);
        assert_eq!(sim_hash.centroid([u64::MAX]), u64::MAX);
    }
}
