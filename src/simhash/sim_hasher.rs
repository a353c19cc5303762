use fnv::FnvHasher;
use sha1::{Digest, Sha1};
use siphasher::sip::SipHasher;
use std::hash::Hasher;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// A deterministic 64-bit fingerprint over raw bytes.
///
/// Implementations must not depend on any process-global mutable state:
/// the same bytes fed to two instances built with the same parameters
/// always produce the same value.
pub trait Fingerprinter {
    fn fingerprint(&self, bytes: &[u8]) -> u64;
}

impl<T: Fingerprinter + ?Sized> Fingerprinter for &T {
    #[inline]
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        (**self).fingerprint(bytes)
    }
}

/// xxh3-64 with a fixed seed. The default primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xxh3Fingerprinter {
    seed: u64,
}

impl Xxh3Fingerprinter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Xxh3Fingerprinter { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Fingerprinter for Xxh3Fingerprinter {
    #[inline]
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        xxh3_64_with_seed(bytes, self.seed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SipFingerprinter {
    key1: u64,
    key2: u64,
}

impl SipFingerprinter {
    pub fn new(key1: u64, key2: u64) -> Self {
        SipFingerprinter { key1, key2 }
    }
}

impl Fingerprinter for SipFingerprinter {
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        let mut sip = SipHasher::new_with_keys(self.key1, self.key2);
        sip.write(bytes);
        sip.finish()
    }
}

/// FNV-1a. Cheap, but with weaker avalanche on short inputs than the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnvFingerprinter {
    key: Option<u64>,
}

impl FnvFingerprinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: u64) -> Self {
        FnvFingerprinter { key: Some(key) }
    }
}

impl Fingerprinter for FnvFingerprinter {
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        let mut fnv = match self.key {
            Some(key) => FnvHasher::with_key(key),
            None => FnvHasher::default(),
        };
        fnv.write(bytes);
        fnv.finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeaFingerprinter {
    seed: u64,
}

impl SeaFingerprinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        SeaFingerprinter { seed }
    }
}

impl Fingerprinter for SeaFingerprinter {
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        if self.seed == 0 {
            seahash::hash(bytes)
        } else {
            let s = self.seed;
            seahash::hash_seeded(bytes, s, s.rotate_left(16), s.rotate_left(32), s.rotate_left(48))
        }
    }
}

/// Leading 8 bytes of SHA-1, read big-endian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1Fingerprinter;

impl Sha1Fingerprinter {
    pub fn new() -> Self {
        Sha1Fingerprinter
    }
}

impl Fingerprinter for Sha1Fingerprinter {
    fn fingerprint(&self, bytes: &[u8]) -> u64 {
        let digest = Sha1::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}
