// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use authtree_hashing::{DomainHasher, DomainSeparatedBorshHasher, INTERNAL_ACC, LEAF_ACC};
use borsh::BorshSerialize;
use digest::{consts::U32, Digest};

use crate::NodeHash;

/// Stands in for every subtree that lies entirely beyond the last leaf.
pub const PLACEHOLDER_ACC: NodeHash = NodeHash::new(*b"ACCUMULATOR_PLACEHOLDER_HASH____");
/// The root of an accumulator with no leaves.
pub const EMPTY_ACCUMULATOR: NodeHash = NodeHash::new(*b"ACCUMULATOR_EMPTY_ROOT_HASH_____");

/// Whether `hash` is one of the constants that stand in for missing nodes, and so can never be a leaf.
pub(crate) fn is_reserved(hash: &NodeHash) -> bool {
    *hash == PLACEHOLDER_ACC || *hash == EMPTY_ACCUMULATOR
}

/// The leaf hash of an opaque payload.
pub fn hash_leaf<D>(data: &[u8]) -> NodeHash
where D: Digest<OutputSize = U32> {
    DomainHasher::<D>::hash(LEAF_ACC, [data]).into()
}

/// The leaf hash of a borsh-encoded value.
pub fn hash_leaf_borsh<D, T>(value: &T) -> NodeHash
where
    D: Digest<OutputSize = U32>,
    T: BorshSerialize,
{
    DomainSeparatedBorshHasher::<D>::new(LEAF_ACC).chain(value).finalize().into()
}

pub fn hash_internal<D>(left: &NodeHash, right: &NodeHash) -> NodeHash
where D: Digest<OutputSize = U32> {
    DomainHasher::<D>::hash(INTERNAL_ACC, [left.as_slice(), right.as_slice()]).into()
}
