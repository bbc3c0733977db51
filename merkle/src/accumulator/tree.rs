// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt::{Debug, Formatter},
    marker::PhantomData,
};

use borsh::BorshSerialize;
use digest::{consts::U32, Digest};
use log::{debug, trace};

use crate::{
    accumulator::{
        node::{hash_internal, hash_leaf, hash_leaf_borsh, is_reserved, EMPTY_ACCUMULATOR, PLACEHOLDER_ACC},
        AccumulatorError,
        AccumulatorProof,
        Side,
    },
    common::tree_height,
    config::AccumulatorConfig,
    NodeHash,
};

const LOG_TARGET: &str = "authtree::merkle::accumulator";

/// An append-only Merkle accumulator.
///
/// Leaves occupy positions `0..n` of a complete binary tree of height `ceil(log2(n))`. A subtree that lies entirely
/// beyond the last leaf hashes to [`PLACEHOLDER_ACC`], and a single leaf is its own root. Only complete subtrees are
/// ever stored; `levels[k][j]` is the root of the complete subtree covering leaves `j * 2^k .. (j + 1) * 2^k`. Nodes
/// are never rewritten once stored, so every historical root and proof can be rebuilt from the same arena.
///
/// The frozen subtree roots are the roots of the maximal complete subtrees covering the leaves, largest first. There
/// is one per set bit of the leaf count.
pub struct AccumulatorTree<D> {
    levels: Vec<Vec<NodeHash>>,
    frozen_subtree_roots: Vec<NodeHash>,
    leaf_count: u64,
    max_leaf_count: u64,
    _hasher: PhantomData<D>,
}

impl<D> AccumulatorTree<D>
where D: Digest<OutputSize = U32>
{
    pub fn new() -> Self {
        Self::from_config(&AccumulatorConfig::default())
    }

    pub fn from_config(config: &AccumulatorConfig) -> Self {
        Self {
            levels: Vec::new(),
            frozen_subtree_roots: Vec::new(),
            leaf_count: 0,
            max_leaf_count: config.max_leaf_count,
            _hasher: PhantomData,
        }
    }

    /// Builds an accumulator from leaf hashes that have already been computed.
    pub fn from_leaf_hashes<I>(leaf_hashes: I) -> Result<Self, AccumulatorError>
    where I: IntoIterator<Item = NodeHash> {
        let mut tree = Self::new();
        tree.extend(leaf_hashes)?;
        Ok(tree)
    }

    /// The leaf hash that [`AccumulatorTree::append_leaf_data`] would store for `data`.
    pub fn leaf_hash_for(data: &[u8]) -> NodeHash {
        hash_leaf::<D>(data)
    }

    /// Appends a leaf hash and returns the new root. [`PLACEHOLDER_ACC`] and [`EMPTY_ACCUMULATOR`] are rejected, since a
    /// leaf equal to either would be indistinguishable from a missing subtree or an empty accumulator.
    pub fn append(&mut self, leaf_hash: NodeHash) -> Result<NodeHash, AccumulatorError> {
        if is_reserved(&leaf_hash) {
            return Err(AccumulatorError::ReservedLeafHash(leaf_hash));
        }
        if self.leaf_count >= self.max_leaf_count {
            return Err(AccumulatorError::MaximumSizeReached);
        }
        let mut level = 0usize;
        let mut position = self.leaf_count;
        let mut current = leaf_hash;
        self.push_node(level, current);
        // Each trailing one bit of the old leaf count completes a subtree one level up
        while position & 1 == 1 {
            let left = self.levels[level][(position - 1) as usize];
            current = hash_internal::<D>(&left, &current);
            level += 1;
            position >>= 1;
            self.push_node(level, current);
        }
        let retained = self.frozen_subtree_roots.len() - level;
        self.frozen_subtree_roots.truncate(retained);
        self.frozen_subtree_roots.push(current);
        self.leaf_count += 1;
        let root = self.root();
        trace!(target: LOG_TARGET, "Appended leaf {} ({}), root is now {}", self.leaf_count - 1, leaf_hash, root);
        Ok(root)
    }

    /// Hashes `data` as a leaf payload and appends it.
    pub fn append_leaf_data(&mut self, data: &[u8]) -> Result<NodeHash, AccumulatorError> {
        self.append(hash_leaf::<D>(data))
    }

    /// Hashes the borsh encoding of `value` as a leaf payload and appends it.
    pub fn append_borsh<T: BorshSerialize>(&mut self, value: &T) -> Result<NodeHash, AccumulatorError> {
        self.append(hash_leaf_borsh::<D, T>(value))
    }

    /// Appends leaf hashes in order and returns the final root.
    pub fn extend<I>(&mut self, leaf_hashes: I) -> Result<NodeHash, AccumulatorError>
    where I: IntoIterator<Item = NodeHash> {
        let start = self.leaf_count;
        for leaf_hash in leaf_hashes {
            self.append(leaf_hash)?;
        }
        debug!(
            target: LOG_TARGET,
            "Extended accumulator from {} to {} leaves", start, self.leaf_count
        );
        Ok(self.root())
    }

    pub fn len(&self) -> u64 {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.leaf_count == 0
    }

    pub fn max_leaf_count(&self) -> u64 {
        self.max_leaf_count
    }

    /// The roots of the maximal complete subtrees covering all leaves, largest first.
    pub fn frozen_subtree_roots(&self) -> &[NodeHash] {
        &self.frozen_subtree_roots
    }

    pub fn get_leaf_hash(&self, index: u64) -> Option<NodeHash> {
        self.levels.first()?.get(usize::try_from(index).ok()?).copied()
    }

    pub fn root(&self) -> NodeHash {
        fold_frozen_subtree_roots::<D>(&self.frozen_subtree_roots, self.leaf_count)
    }

    /// The root the accumulator had when it held the first `leaf_count` leaves.
    pub fn root_at(&self, leaf_count: u64) -> Result<NodeHash, AccumulatorError> {
        self.check_snapshot(leaf_count)?;
        Ok(fold_frozen_subtree_roots::<D>(
            &self.frozen_subtree_roots_at(leaf_count),
            leaf_count,
        ))
    }

    pub fn proof_for(&self, index: u64) -> Result<AccumulatorProof, AccumulatorError> {
        self.proof_for_at(index, self.leaf_count)
    }

    /// A proof for leaf `index` against the root of the first `leaf_count` leaves.
    pub fn proof_for_at(&self, index: u64, leaf_count: u64) -> Result<AccumulatorProof, AccumulatorError> {
        self.check_snapshot(leaf_count)?;
        if index >= leaf_count {
            return Err(AccumulatorError::IndexOutOfRange { index, leaf_count });
        }
        let siblings = (0..tree_height(leaf_count))
            .map(|level| {
                let position = index >> level;
                (
                    self.subtree_hash(level, position ^ 1, leaf_count),
                    Side::of_sibling(position),
                )
            })
            .collect();
        Ok(AccumulatorProof::new(siblings))
    }

    /// Checks an inclusion proof. See [`AccumulatorProof::verify`].
    pub fn verify(
        proof: &AccumulatorProof,
        leaf_hash: &NodeHash,
        index: u64,
        leaf_count: u64,
        expected_root: &NodeHash,
    ) -> Result<bool, AccumulatorError> {
        proof.verify::<D>(leaf_hash, index, leaf_count, expected_root)
    }

    /// Rehashes every stored internal node from its children and checks the frozen subtree roots against the arena.
    pub fn validate(&self) -> Result<(), AccumulatorError> {
        for level in 1..self.levels.len() {
            let children = &self.levels[level - 1];
            for (position, hash) in self.levels[level].iter().enumerate() {
                let (left, right) = match (children.get(2 * position), children.get(2 * position + 1)) {
                    (Some(left), Some(right)) => (left, right),
                    _ => {
                        return Err(AccumulatorError::InvalidNode {
                            level,
                            position: position as u64,
                        })
                    },
                };
                if hash_internal::<D>(left, right) != *hash {
                    return Err(AccumulatorError::InvalidNode {
                        level,
                        position: position as u64,
                    });
                }
            }
        }
        if self.frozen_subtree_roots != self.frozen_subtree_roots_at(self.leaf_count) {
            return Err(AccumulatorError::InvalidFrozenSubtrees);
        }
        Ok(())
    }

    fn check_snapshot(&self, leaf_count: u64) -> Result<(), AccumulatorError> {
        if leaf_count > self.leaf_count {
            return Err(AccumulatorError::LeafCountOutOfRange {
                requested: leaf_count,
                leaf_count: self.leaf_count,
            });
        }
        Ok(())
    }

    fn push_node(&mut self, level: usize, hash: NodeHash) {
        if self.levels.len() <= level {
            self.levels.push(Vec::new());
        }
        self.levels[level].push(hash);
    }

    /// Frozen subtree roots of the first `leaf_count` leaves. The caller guarantees `leaf_count <= self.leaf_count`.
    fn frozen_subtree_roots_at(&self, leaf_count: u64) -> Vec<NodeHash> {
        (0..u64::BITS as usize)
            .rev()
            .filter(|level| (leaf_count >> level) & 1 == 1)
            .map(|level| self.levels[level][((leaf_count >> level) - 1) as usize])
            .collect()
    }

    /// The hash of the node at `position` on `level` in the tree of the first `leaf_count` leaves.
    fn subtree_hash(&self, level: usize, position: u64, leaf_count: u64) -> NodeHash {
        let first_leaf = position << level;
        if first_leaf >= leaf_count {
            return PLACEHOLDER_ACC;
        }
        if first_leaf.saturating_add(1 << level) <= leaf_count {
            return self.levels[level][position as usize];
        }
        // The subtree straddles the last leaf, so it was never stored. Only its left child can straddle in turn.
        let left = self.subtree_hash(level - 1, 2 * position, leaf_count);
        let right = self.subtree_hash(level - 1, 2 * position + 1, leaf_count);
        hash_internal::<D>(&left, &right)
    }
}

impl<D> Default for AccumulatorTree<D>
where D: Digest<OutputSize = U32>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Debug for AccumulatorTree<D>
where D: Digest<OutputSize = U32>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccumulatorTree")
            .field("leaf_count", &self.leaf_count)
            .field("root", &self.root())
            .field("frozen_subtree_roots", &self.frozen_subtree_roots)
            .finish()
    }
}

/// Folds the frozen subtree roots (largest first) into the root of a tree of `leaf_count` leaves.
///
/// Walking up from the smallest subtree, a set bit of the leaf count contributes a frozen root on the left. A clear
/// bit means the right-hand half is beyond the last leaf, so the running hash is paired with the placeholder, unless
/// nothing has been accumulated yet, in which case the whole subtree is still a placeholder.
fn fold_frozen_subtree_roots<D>(frozen_subtree_roots: &[NodeHash], leaf_count: u64) -> NodeHash
where D: Digest<OutputSize = U32> {
    match frozen_subtree_roots {
        [] => EMPTY_ACCUMULATOR,
        [root] => *root,
        _ => {
            let mut frozen = frozen_subtree_roots.iter().rev();
            let mut current: Option<NodeHash> = None;
            for level in 0..(u64::BITS - leaf_count.leading_zeros()) {
                if (leaf_count >> level) & 1 == 1 {
                    let Some(left) = frozen.next() else { break };
                    current = Some(hash_internal::<D>(left, &current.unwrap_or(PLACEHOLDER_ACC)));
                } else if let Some(left) = current {
                    current = Some(hash_internal::<D>(&left, &PLACEHOLDER_ACC));
                }
            }
            current.unwrap_or(EMPTY_ACCUMULATOR)
        },
    }
}
