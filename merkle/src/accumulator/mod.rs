// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! An append-only Merkle accumulator with inclusion proofs against current and historical roots.
//!
//! ```
//! # use authtree_hashing::Blake2b256;
//! # use authtree_merkle::accumulator::AccumulatorTree;
//! let mut tree = AccumulatorTree::<Blake2b256>::new();
//! for payload in [b"a", b"b", b"c"] {
//!     tree.append_leaf_data(payload).unwrap();
//! }
//! let proof = tree.proof_for(2).unwrap();
//! let leaf = AccumulatorTree::<Blake2b256>::leaf_hash_for(b"c");
//! assert!(proof.verify::<Blake2b256>(&leaf, 2, 3, &tree.root()).unwrap());
//! ```

mod error;
mod node;
mod proof;
mod tree;

pub use error::AccumulatorError;
pub use node::{hash_internal, hash_leaf, hash_leaf_borsh, EMPTY_ACCUMULATOR, PLACEHOLDER_ACC};
pub use proof::{AccumulatorProof, Side};
pub use tree::AccumulatorTree;
