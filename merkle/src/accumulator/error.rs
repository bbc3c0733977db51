// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

use crate::NodeHash;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccumulatorError {
    #[error("Leaf index {index} is out of range for an accumulator of {leaf_count} leaves")]
    IndexOutOfRange { index: u64, leaf_count: u64 },
    #[error("Requested a snapshot of {requested} leaves, but the accumulator only holds {leaf_count}")]
    LeafCountOutOfRange { requested: u64, leaf_count: u64 },
    #[error("The proof has {actual} siblings, but {expected} were expected")]
    ProofLengthMismatch { expected: usize, actual: usize },
    #[error("Leaf hash {0} is reserved for empty subtrees and cannot be appended")]
    ReservedLeafHash(NodeHash),
    #[error("The accumulator has reached its maximum size")]
    MaximumSizeReached,
    #[error("The stored node at level {level}, position {position} does not match its children")]
    InvalidNode { level: usize, position: u64 },
    #[error("The frozen subtree roots do not match the stored nodes")]
    InvalidFrozenSubtrees,
}
