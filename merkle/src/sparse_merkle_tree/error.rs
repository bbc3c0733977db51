// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use thiserror::Error;

use crate::NodeKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SMTError {
    #[error("The proof has {actual} siblings, but the tree depth is {expected}")]
    ProofLengthMismatch { expected: usize, actual: usize },
    #[error("Tree depth must be between 1 and 256, got {0}")]
    InvalidDepth(u32),
    #[error("Key {key} maps to a leaf position that is already occupied by {existing}")]
    PositionOccupied { key: NodeKey, existing: NodeKey },
    #[error("Version {0} does not exist")]
    VersionNotFound(usize),
    #[error("The requested proof cannot be produced for the current tree state")]
    NonViableProof,
}
