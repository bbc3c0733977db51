// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use borsh::{io, io::Write, BorshSerialize};
use digest::{consts::U32, Digest};

use crate::{DomainTag, DIGEST_LENGTH};

/// A domain-separated hasher that uses Borsh internally to ensure hashing is canonical.
///
/// This assumes that any input type supports `BorshSerialize` canonically; that is, two different values of the same
/// type must serialize distinctly. Unlike [`crate::DomainHasher`], the encoding is written as-is with no extra length
/// prefix, since Borsh already length-prefixes every variable-sized field.
pub struct DomainSeparatedBorshHasher<D> {
    writer: WriteHashWrapper<D>,
}

impl<D: Digest<OutputSize = U32>> DomainSeparatedBorshHasher<D> {
    pub fn new(tag: DomainTag) -> Self {
        let mut digest = D::new();
        digest.update(tag.padded());
        Self {
            writer: WriteHashWrapper(digest),
        }
    }

    pub fn finalize(self) -> [u8; DIGEST_LENGTH] {
        let mut result = [0u8; DIGEST_LENGTH];
        result.copy_from_slice(self.writer.0.finalize().as_slice());
        result
    }

    /// Update the hasher using the Borsh encoding of the input, which is assumed to be canonical.
    pub fn update_consensus_encode<T: BorshSerialize>(&mut self, data: &T) {
        BorshSerialize::serialize(data, &mut self.writer)
            .expect("Incorrect implementation of BorshSerialize encountered. Implementations MUST be infallible.");
    }

    pub fn chain<T: BorshSerialize>(mut self, data: &T) -> Self {
        self.update_consensus_encode(data);
        self
    }
}

/// This private struct wraps a Digest and implements the Write trait to satisfy the consensus encoding trait.
#[derive(Clone)]
struct WriteHashWrapper<D>(D);

impl<D: Digest> Write for WriteHashWrapper<D> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
