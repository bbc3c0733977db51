// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::fmt;

/// Number of bytes reserved for a domain tag at the start of every hash pre-image. Shorter tags are zero-padded.
pub const TAG_LENGTH: usize = 16;

/// A fixed ASCII label that is hashed ahead of any content, so that two structurally different node kinds can never
/// share a pre-image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainTag {
    label: &'static [u8],
}

impl DomainTag {
    pub const fn new(label: &'static [u8]) -> Self {
        assert!(!label.is_empty(), "Domain tags cannot be empty");
        assert!(label.len() <= TAG_LENGTH, "Domain tags cannot exceed TAG_LENGTH bytes");
        let mut i = 0;
        while i < label.len() {
            assert!(label[i] != 0, "Domain tags cannot contain NUL bytes");
            i += 1;
        }
        Self { label }
    }

    pub const fn label(&self) -> &'static [u8] {
        self.label
    }

    /// The tag as it is written into the hasher: the label followed by zero padding up to [`TAG_LENGTH`].
    pub fn padded(&self) -> [u8; TAG_LENGTH] {
        let mut result = [0u8; TAG_LENGTH];
        result[..self.label.len()].copy_from_slice(self.label);
        result
    }
}

impl fmt::Debug for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainTag({})", String::from_utf8_lossy(self.label))
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.label))
    }
}

// These tags are part of the proof wire format. Changing any of them invalidates every proof issued before the change.

/// Accumulator leaf payloads
pub const LEAF_ACC: DomainTag = DomainTag::new(b"ACC::LEAF");
/// Accumulator internal nodes
pub const INTERNAL_ACC: DomainTag = DomainTag::new(b"ACC::INTERNAL");
/// Sparse Merkle tree leaves, over `(key, value_hash)`
pub const LEAF_SMT: DomainTag = DomainTag::new(b"SMT::LEAF");
/// Sparse Merkle tree internal nodes
pub const INTERNAL_SMT: DomainTag = DomainTag::new(b"SMT::INTERNAL");
/// The empty leaf position of a sparse Merkle tree. Hashed with no content.
pub const EMPTY_SMT: DomainTag = DomainTag::new(b"SMT::EMPTY");
