// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use borsh::{BorshDeserialize, BorshSerialize};
use digest::{consts::U32, Digest};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    sparse_merkle_tree::{
        bit_utils::{shares_position, traverse_direction, TraverseDirection},
        node::{empty_leaf_hash, hash_internal, hash_leaf},
        validate_depth,
        SMTError,
    },
    NodeHash,
    NodeKey,
    ProofCodec,
    ValueHash,
};

const LOG_TARGET: &str = "authtree::merkle::smt::proofs";

/// A key-value pair as it is stored at a leaf position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SmtLeaf {
    key: NodeKey,
    value: ValueHash,
}

impl SmtLeaf {
    pub fn new(key: NodeKey, value: ValueHash) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn value(&self) -> &ValueHash {
        &self.value
    }

    pub fn hash<H>(&self) -> NodeHash
    where H: Digest<OutputSize = U32> {
        hash_leaf::<H>(&self.key, &self.value)
    }
}

/// A proof of the contents of one leaf position.
///
/// `siblings` holds one hash per level, ordered from the leaf level up to just below the root. `leaf` is the
/// occupant of the position, if any. A proof for a key is an inclusion proof when the occupant has that key, and an
/// exclusion proof when the position is empty or held by a different key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SmtProof {
    siblings: Vec<NodeHash>,
    leaf: Option<SmtLeaf>,
}

impl SmtProof {
    pub fn new(siblings: Vec<NodeHash>, leaf: Option<SmtLeaf>) -> Self {
        Self { siblings, leaf }
    }

    pub fn siblings(&self) -> &[NodeHash] {
        &self.siblings
    }

    pub fn leaf(&self) -> Option<&SmtLeaf> {
        self.leaf.as_ref()
    }

    /// Whether this proof shows that `key` is present.
    pub fn is_inclusion_of(&self, key: &NodeKey) -> bool {
        matches!(&self.leaf, Some(leaf) if leaf.key() == key)
    }

    /// Whether this proof shows that `key` is absent.
    pub fn is_exclusion_of(&self, key: &NodeKey) -> bool {
        !self.is_inclusion_of(key)
    }

    /// Checks that this proof, for `key` in a tree of the given depth, commits to `claimed_leaf` under `expected_root`.
    ///
    /// Use `Some(leaf)` with `leaf.key() == key` to check inclusion, `None` to check that the position is empty, or
    /// another key's leaf to check that it occupies the position instead.
    ///
    /// A proof with the wrong number of siblings is an error. Any other disagreement just fails verification.
    pub fn verify<H>(
        &self,
        depth: u32,
        key: &NodeKey,
        claimed_leaf: Option<&SmtLeaf>,
        expected_root: &NodeHash,
    ) -> Result<bool, SMTError>
    where
        H: Digest<OutputSize = U32>,
    {
        validate_depth(depth)?;
        if self.siblings.len() != depth as usize {
            return Err(SMTError::ProofLengthMismatch {
                expected: depth as usize,
                actual: self.siblings.len(),
            });
        }
        if self.leaf.as_ref() != claimed_leaf {
            debug!(target: LOG_TARGET, "Claimed leaf does not match the leaf embedded in the proof");
            return Ok(false);
        }
        let leaf_hash = match claimed_leaf {
            None => empty_leaf_hash::<H>(),
            Some(leaf) => {
                if !shares_position(leaf.key(), key, depth) {
                    debug!(
                        target: LOG_TARGET,
                        "Leaf with key {} does not sit at the position of key {}",
                        leaf.key(),
                        key
                    );
                    return Ok(false);
                }
                leaf.hash::<H>()
            },
        };
        Ok(self.compute_root::<H>(depth, key, leaf_hash) == *expected_root)
    }

    fn compute_root<H>(&self, depth: u32, key: &NodeKey, leaf_hash: NodeHash) -> NodeHash
    where H: Digest<OutputSize = U32> {
        self.siblings
            .iter()
            .zip(1..=depth)
            .fold(leaf_hash, |current, (sibling, height)| {
                match traverse_direction(key, depth, height) {
                    TraverseDirection::Left => hash_internal::<H>(&current, sibling),
                    TraverseDirection::Right => hash_internal::<H>(sibling, &current),
                }
            })
    }
}

impl ProofCodec for SmtProof {
    fn sibling_count(&self) -> usize {
        self.siblings.len()
    }
}
