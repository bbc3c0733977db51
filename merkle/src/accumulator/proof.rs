// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use borsh::{BorshDeserialize, BorshSerialize};
use digest::{consts::U32, Digest};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    accumulator::{
        node::{hash_internal, is_reserved},
        AccumulatorError,
    },
    common::tree_height,
    NodeHash,
    ProofCodec,
};

const LOG_TARGET: &str = "authtree::merkle::accumulator::proof";

/// The side on which a proof sibling sits relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The side of the sibling of the node at `position` within its level.
    pub fn of_sibling(position: u64) -> Self {
        if position & 1 == 1 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// An inclusion proof for a single accumulator leaf. The siblings are ordered from the leaf level upward, and there
/// are exactly `ceil(log2(leaf_count))` of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct AccumulatorProof {
    siblings: Vec<(NodeHash, Side)>,
}

impl AccumulatorProof {
    pub fn new(siblings: Vec<(NodeHash, Side)>) -> Self {
        Self { siblings }
    }

    pub fn siblings(&self) -> &[(NodeHash, Side)] {
        &self.siblings
    }

    /// Recomputes the root from `leaf_hash` and checks it against `expected_root`.
    ///
    /// A proof of the wrong length, or an index beyond `leaf_count`, is an error. Any other disagreement, including a
    /// sibling side that contradicts the index or a reserved constant given as the leaf hash, just fails
    /// verification.
    pub fn verify<D>(
        &self,
        leaf_hash: &NodeHash,
        index: u64,
        leaf_count: u64,
        expected_root: &NodeHash,
    ) -> Result<bool, AccumulatorError>
    where
        D: Digest<OutputSize = U32>,
    {
        if index >= leaf_count {
            return Err(AccumulatorError::IndexOutOfRange { index, leaf_count });
        }
        let expected = tree_height(leaf_count);
        if self.siblings.len() != expected {
            return Err(AccumulatorError::ProofLengthMismatch {
                expected,
                actual: self.siblings.len(),
            });
        }
        if is_reserved(leaf_hash) {
            debug!(target: LOG_TARGET, "Leaf hash {} is reserved and cannot be proven", leaf_hash);
            return Ok(false);
        }
        let mut current = *leaf_hash;
        for (level, (sibling, side)) in self.siblings.iter().enumerate() {
            let position = index >> level;
            if *side != Side::of_sibling(position) {
                debug!(
                    target: LOG_TARGET,
                    "Sibling at level {} is on the {:?}, which contradicts leaf index {}", level, side, index
                );
                return Ok(false);
            }
            current = match side {
                Side::Left => hash_internal::<D>(sibling, &current),
                Side::Right => hash_internal::<D>(&current, sibling),
            };
        }
        Ok(current == *expected_root)
    }
}

impl ProofCodec for AccumulatorProof {
    fn sibling_count(&self) -> usize {
        self.siblings.len()
    }
}
