//! SimHash: per-bit majority voting over 64-bit feature fingerprints.
//!
//! The pieces, leaf first:
//!
//! * [`Fingerprinter`] — the 64-bit primitive applied to raw feature bytes,
//!   injected into [`SimHash`] rather than shared process-wide.
//! * [`FeatureEncoder`] — turns a document's tokens into feature codes,
//!   either [`FullFingerprint`] or the cheaper [`PackedPrefix`].
//! * [`SimHash`] — folds a feature set into one signature.
//! * [`hamming_distance`] / [`rotate`] — comparing and banding signatures.

mod distance;
mod encoder;
mod sim_hash;
mod sim_hasher;

pub use self::distance::{hamming_distance, rotate};
pub use self::encoder::{
    FeatureCodes, FeatureEncoder, FullFingerprint, PackedPrefix, ShortTokenPolicy, TokenEncoder,
};
pub use self::sim_hash::SimHash;
pub use self::sim_hasher::{
    Fingerprinter, FnvFingerprinter, SeaFingerprinter, Sha1Fingerprinter, SipFingerprinter,
    Xxh3Fingerprinter,
};
