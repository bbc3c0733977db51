// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use digest::{consts::U32, Digest};

use crate::{DomainTag, DIGEST_LENGTH};

/// Hashes an ordered sequence of byte strings under a [`DomainTag`].
///
/// The pre-image is the zero-padded tag followed by every part, each prefixed with its length as a little-endian
/// `u64`. Length-prefixing makes the split between parts unambiguous, so `["ab", "c"]` and `["a", "bc"]` hash
/// differently.
///
/// ```
/// # use authtree_hashing::{DomainHasher, Blake2b256, LEAF_ACC};
/// let one_shot = DomainHasher::<Blake2b256>::hash(LEAF_ACC, [b"a".as_slice(), b"b".as_slice()]);
/// let chained = DomainHasher::<Blake2b256>::new(LEAF_ACC).chain(b"a").chain(b"b").finalize();
/// assert_eq!(one_shot, chained);
/// ```
pub struct DomainHasher<D> {
    digest: D,
}

impl<D: Digest<OutputSize = U32>> DomainHasher<D> {
    pub fn new(tag: DomainTag) -> Self {
        let mut digest = D::new();
        digest.update(tag.padded());
        Self { digest }
    }

    /// Adds the next part of the pre-image.
    pub fn update(&mut self, part: impl AsRef<[u8]>) {
        let part = part.as_ref();
        self.digest.update((part.len() as u64).to_le_bytes());
        self.digest.update(part);
    }

    pub fn chain(mut self, part: impl AsRef<[u8]>) -> Self {
        self.update(part);
        self
    }

    pub fn finalize(self) -> [u8; DIGEST_LENGTH] {
        let mut result = [0u8; DIGEST_LENGTH];
        result.copy_from_slice(self.digest.finalize().as_slice());
        result
    }

    /// Hashes `parts` in order under `tag`.
    pub fn hash<I, P>(tag: DomainTag, parts: I) -> [u8; DIGEST_LENGTH]
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        parts
            .into_iter()
            .fold(Self::new(tag), |hasher, part| hasher.chain(part))
            .finalize()
    }
}
