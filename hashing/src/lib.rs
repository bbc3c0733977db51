// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

//! Domain-separated hashing for the authenticated hash trees.
//!
//! The hash primitive is always a type parameter: any `digest::Digest` with a 32-byte output can drive a
//! [`DomainHasher`]. [`Blake2b256`] is the primitive used by the checked-in fixtures.

mod borsh_hasher;
mod domain_hasher;
mod domains;

pub use borsh_hasher::DomainSeparatedBorshHasher;
pub use domain_hasher::DomainHasher;
pub use domains::{DomainTag, EMPTY_SMT, INTERNAL_ACC, INTERNAL_SMT, LEAF_ACC, LEAF_SMT, TAG_LENGTH};

/// Size in bytes of every digest produced by this crate
pub const DIGEST_LENGTH: usize = 32;

/// BLAKE2b with a 256-bit output
pub type Blake2b256 = blake2::Blake2b<digest::consts::U32>;
