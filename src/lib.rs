/*!
64-bit [SimHash](https://en.wikipedia.org/wiki/SimHash) fingerprints for
near-duplicate text detection.

Near-duplicate documents get fingerprints that differ in few bits, so
similarity becomes a [Hamming distance](hamming_distance) instead of an
exact comparison. Features come from either character shingles or the
tokens of an external [`Tokenizer`]; deciding what distance counts as a
duplicate, and indexing fingerprints for retrieval, is left to callers.

## Example

 ```
 use textsim::{hamming_distance, shingles, sim_hash_from_shingles, sim_hash_from_text};
 use textsim::text::WordTokenizer;

 let a = "the quick brown fox jumps over the lazy dog";
 let b = "the quick brown fox jumped over the lazy dog";

 let (ha, hb) = (sim_hash_from_shingles(&shingles(a)), sim_hash_from_shingles(&shingles(b)));
 assert!(hamming_distance(ha, hb) < 20);

 let ta = sim_hash_from_text(a, &WordTokenizer).unwrap();
 assert_eq!(ta, sim_hash_from_text(a, &WordTokenizer).unwrap());
 ```

Configured pipelines, batch fingerprinting and alternative fingerprint
primitives live on [`TextSimHasher`] and in [`simhash`].

## References
[[1] Similarity Estimation Techniques from Rounding Algorithms](https://www.cs.princeton.edu/courses/archive/spr04/cos598B/bib/CharikarEstim.pdf)

[[2] Detecting Near-Duplicates for Web Crawling](https://static.googleusercontent.com/media/research.google.com/en//pubs/archive/33026.pdf)
 */

pub mod config;
pub mod error;
pub mod pipeline;
pub mod shingle;
pub mod simhash;
pub mod text;

pub use self::config::{SimHashConfig, TokenEncoding};
pub use self::error::{Error, Result};
pub use self::pipeline::TextSimHasher;
pub use self::shingle::{jaccard_similarity, shingles, ShingleSet};
pub use self::simhash::{hamming_distance, rotate, SimHash};
pub use self::text::{TokenCounts, Tokenizer};

use self::simhash::{PackedPrefix, Xxh3Fingerprinter};

/// Bits in a fingerprint.
pub const HASH_SIZE: usize = 64;

/// Characters per shingle.
pub const SHINGLE_LENGTH: usize = 3;

/// UTF-16 units packed into a code by [`PackedPrefix`].
pub const PACKED_PREFIX_CHARS: usize = 4;

pub const PACKED_LANE_BITS: u32 = 16;

/// SimHash of a shingle set under the default fingerprint primitive.
pub fn sim_hash_from_shingles(shingles: &ShingleSet) -> u64 {
    SimHash::<Xxh3Fingerprinter>::default().from_shingles(shingles)
}

/// Tokenizes `text` and fingerprints it along the packed-prefix path,
/// dropping tokens shorter than four characters.
pub fn sim_hash_from_text<T: Tokenizer>(text: &str, tokenizer: &T) -> Result<u64> {
    SimHash::<Xxh3Fingerprinter>::default().from_text(text, tokenizer, &PackedPrefix::default())
}
