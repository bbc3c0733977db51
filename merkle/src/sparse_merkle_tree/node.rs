// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use authtree_hashing::{DomainHasher, EMPTY_SMT, INTERNAL_SMT, LEAF_SMT};
use digest::{consts::U32, Digest};

use crate::{NodeHash, NodeKey, ValueHash};

/// Index of a node in the tree's arena
pub(crate) type NodeIndex = usize;

pub fn hash_leaf<H>(key: &NodeKey, value: &ValueHash) -> NodeHash
where H: Digest<OutputSize = U32> {
    DomainHasher::<H>::hash(LEAF_SMT, [key.as_slice(), value.as_slice()]).into()
}

pub fn hash_internal<H>(left: &NodeHash, right: &NodeHash) -> NodeHash
where H: Digest<OutputSize = U32> {
    DomainHasher::<H>::hash(INTERNAL_SMT, [left.as_slice(), right.as_slice()]).into()
}

/// The hash of an unoccupied leaf position.
pub fn empty_leaf_hash<H>() -> NodeHash
where H: Digest<OutputSize = U32> {
    DomainHasher::<H>::hash::<_, &[u8]>(EMPTY_SMT, []).into()
}

/// The hash of an empty subtree at every height from 0 (a leaf position) up to `depth` (the root).
pub fn empty_hashes<H>(depth: u32) -> Vec<NodeHash>
where H: Digest<OutputSize = U32> {
    let mut result = Vec::with_capacity(depth as usize + 1);
    let mut current = empty_leaf_hash::<H>();
    result.push(current);
    for _ in 0..depth {
        current = hash_internal::<H>(&current, &current);
        result.push(current);
    }
    result
}

/// An empty subtree. The tree keeps exactly one of these per height and shares it between every empty position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmptyNode {
    height: u32,
    hash: NodeHash,
}

impl EmptyNode {
    pub fn new(height: u32, hash: NodeHash) -> Self {
        Self { height, hash }
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LeafNode {
    key: NodeKey,
    value: ValueHash,
    hash: NodeHash,
}

impl LeafNode {
    pub fn new<H>(key: NodeKey, value: ValueHash) -> Self
    where H: Digest<OutputSize = U32> {
        let hash = hash_leaf::<H>(&key, &value);
        Self { key, value, hash }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn value(&self) -> &ValueHash {
        &self.value
    }
}

/// A node with at least one non-empty subtree below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InternalNode {
    height: u32,
    left: NodeIndex,
    right: NodeIndex,
    hash: NodeHash,
}

impl InternalNode {
    pub fn new<H>(height: u32, left: (NodeIndex, &NodeHash), right: (NodeIndex, &NodeHash)) -> Self
    where H: Digest<OutputSize = U32> {
        Self {
            height,
            left: left.0,
            right: right.0,
            hash: hash_internal::<H>(left.1, right.1),
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn left(&self) -> NodeIndex {
        self.left
    }

    pub fn right(&self) -> NodeIndex {
        self.right
    }
}

/// A node in the tree's arena. Nodes are immutable once stored, so every historical root stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Empty(EmptyNode),
    Leaf(LeafNode),
    Internal(InternalNode),
}

impl Node {
    pub fn hash(&self) -> &NodeHash {
        match self {
            Node::Empty(n) => &n.hash,
            Node::Leaf(n) => &n.hash,
            Node::Internal(n) => &n.hash,
        }
    }

    /// The height of this node above the leaf level
    pub fn height(&self) -> u32 {
        match self {
            Node::Empty(n) => n.height(),
            Node::Leaf(_) => 0,
            Node::Internal(n) => n.height(),
        }
    }
}
