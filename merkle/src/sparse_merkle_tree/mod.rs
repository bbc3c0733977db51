// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! A sparse Merkle tree with configurable depth, versioned roots, and inclusion and exclusion proofs.
//!
//! Every one of the `2^depth` leaf positions exists conceptually, but only occupied positions and the paths above
//! them are ever stored. Empty subtrees are represented by a single shared node per height.
//!
//! ```
//! # use authtree_hashing::Blake2b256;
//! # use authtree_merkle::{sparse_merkle_tree::{SmtLeaf, SparseMerkleTree}, NodeKey, ValueHash};
//! let mut tree = SparseMerkleTree::<Blake2b256>::new(256).unwrap();
//! let key = NodeKey::from([1u8; 32]);
//! let value = ValueHash::from([2u8; 32]);
//! let root = tree.put(key, value).unwrap();
//!
//! let proof = tree.prove_inclusion(&key).unwrap();
//! assert!(proof.verify::<Blake2b256>(256, &key, Some(&SmtLeaf::new(key, value)), &root).unwrap());
//!
//! let absent = NodeKey::from([3u8; 32]);
//! let proof = tree.prove_exclusion(&absent).unwrap();
//! assert!(proof.verify::<Blake2b256>(256, &absent, None, &root).unwrap());
//! ```

mod bit_utils;
mod error;
mod node;
mod proofs;
mod tree;

pub use error::SMTError;
pub use node::{empty_hashes, empty_leaf_hash, hash_internal, hash_leaf};
pub use proofs::{SmtLeaf, SmtProof};
pub use tree::{SparseMerkleTree, DELETED_VALUE_HASH};

/// The largest supported depth, one level per key bit
pub const MAX_DEPTH: u32 = 256;

pub(crate) fn validate_depth(depth: u32) -> Result<(), SMTError> {
    if depth == 0 || depth > MAX_DEPTH {
        return Err(SMTError::InvalidDepth(depth));
    }
    Ok(())
}
