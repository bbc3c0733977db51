// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! # Authenticated hash trees
//!
//! Two Merkle structures that commit to a data set with a single 32-byte root and prove facts about it with short
//! proofs:
//!
//! * [`accumulator::AccumulatorTree`] is an append-only list of leaves. It proves that a leaf sits at a given index,
//!   against the current root or the root of any earlier prefix of the list.
//! * [`sparse_merkle_tree::SparseMerkleTree`] maps 256-bit keys to 32-byte value hashes. It proves that a key is
//!   present with a given value, or that it is absent. Every write produces a new version, and earlier versions stay
//!   readable and provable.
//!
//! Both are generic over a `digest::Digest` with a 32-byte output, and hash every node with a domain tag from
//! `authtree_hashing`, so a leaf of one kind can never be passed off as a node of another. Proofs verify without the
//! tree, given the same hash primitive, and encode to a canonical byte form through [`ProofCodec`].

pub mod accumulator;
mod codec;
mod common;
pub mod config;
mod serde_support;
pub mod sparse_merkle_tree;

pub use codec::{ProofCodec, ProofCodecError};
pub use common::{tree_height, InvalidHashLength, NodeHash, NodeKey, ValueHash};
pub use config::HashTreeConfig;
