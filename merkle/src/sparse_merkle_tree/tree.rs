// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use std::{
    fmt::{Debug, Formatter},
    marker::PhantomData,
};

use digest::{consts::U32, Digest};
use log::{debug, trace};

use crate::{
    config::SmtConfig,
    sparse_merkle_tree::{
        bit_utils::{traverse_direction, TraverseDirection},
        node::{empty_hashes, EmptyNode, InternalNode, LeafNode, Node, NodeIndex},
        validate_depth,
        SMTError,
        SmtLeaf,
        SmtProof,
    },
    NodeHash,
    NodeKey,
    ValueHash,
};

const LOG_TARGET: &str = "authtree::merkle::smt";

/// Putting this value hash deletes the key instead of storing it.
pub const DELETED_VALUE_HASH: ValueHash = ValueHash::new([0u8; 32]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeafChange {
    Inserted,
    Updated,
    Removed,
    Unchanged,
}

/// A sparse Merkle tree over 256-bit keys, with `2^depth` leaf positions.
///
/// A key's position is given by its first `depth` bits, most significant first; bit 0 picks the child of the root. An
/// unoccupied position hashes to the empty leaf hash, and an empty subtree of any height hashes to its precomputed
/// empty hash, so an empty tree costs nothing beyond the `depth + 1` empty nodes.
///
/// Nodes live in an append-only arena and are never modified. Every `put`, `delete` or `batch_put` records a new root,
/// i.e. a new version, and older versions stay readable and provable.
pub struct SparseMerkleTree<H> {
    depth: u32,
    nodes: Vec<Node>,
    versions: Vec<Version>,
    _hasher: PhantomData<H>,
}

#[derive(Debug, Clone, Copy)]
struct Version {
    root: NodeIndex,
    size: usize,
}

impl<H> SparseMerkleTree<H>
where H: Digest<OutputSize = U32>
{
    /// Creates an empty tree with `depth` levels below the root. `depth` must lie in `1..=256`.
    pub fn new(depth: u32) -> Result<Self, SMTError> {
        validate_depth(depth)?;
        // Arena slot `h` is the shared empty subtree of height `h`
        let nodes = empty_hashes::<H>(depth)
            .into_iter()
            .zip(0..)
            .map(|(hash, height)| Node::Empty(EmptyNode::new(height, hash)))
            .collect();
        Ok(Self {
            depth,
            nodes,
            versions: vec![Version {
                root: depth as NodeIndex,
                size: 0,
            }],
            _hasher: PhantomData,
        })
    }

    pub fn from_config(config: &SmtConfig) -> Result<Self, SMTError> {
        Self::new(config.depth)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The number of keys currently stored
    pub fn len(&self) -> usize {
        self.current().size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The latest version. A new tree is at version 0 and every write adds one.
    pub fn version(&self) -> usize {
        self.versions.len() - 1
    }

    pub fn root(&self) -> NodeHash {
        *self.nodes[self.current().root].hash()
    }

    pub fn root_at_version(&self, version: usize) -> Result<NodeHash, SMTError> {
        Ok(*self.nodes[self.version_at(version)?.root].hash())
    }

    /// The root of a tree of this depth with no keys.
    pub fn empty_root(&self) -> NodeHash {
        *self.nodes[self.depth as NodeIndex].hash()
    }

    pub fn get(&self, key: &NodeKey) -> Option<ValueHash> {
        self.lookup(self.current().root, key)
    }

    pub fn get_at_version(&self, version: usize, key: &NodeKey) -> Result<Option<ValueHash>, SMTError> {
        Ok(self.lookup(self.version_at(version)?.root, key))
    }

    pub fn contains_key(&self, key: &NodeKey) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key` and returns the new root. Putting [`DELETED_VALUE_HASH`] deletes the key.
    ///
    /// Fails with [`SMTError::PositionOccupied`] if a different key already occupies the leaf position of `key`, which
    /// can only happen when the depth is less than 256.
    pub fn put(&mut self, key: NodeKey, value: ValueHash) -> Result<NodeHash, SMTError> {
        self.batch_put([(key, value)])
    }

    /// Removes `key` and returns the new root. Removing an absent key leaves the root unchanged, even when another key
    /// occupies its position.
    pub fn delete(&mut self, key: &NodeKey) -> Result<NodeHash, SMTError> {
        self.batch_put([(*key, DELETED_VALUE_HASH)])
    }

    /// Applies every update in order and records the result as a single new version.
    ///
    /// The batch is atomic: if any update fails, no version is recorded and the tree is left as it was.
    pub fn batch_put<I>(&mut self, updates: I) -> Result<NodeHash, SMTError>
    where I: IntoIterator<Item = (NodeKey, ValueHash)> {
        let Version { mut root, mut size } = *self.current();
        let arena_len = self.nodes.len();
        let mut count = 0usize;
        for (key, value) in updates {
            let (new_root, change) = match self.apply(root, &key, &value) {
                Ok(result) => result,
                Err(e) => {
                    // Nothing references the nodes written so far, so drop them
                    self.nodes.truncate(arena_len);
                    return Err(e);
                },
            };
            trace!(target: LOG_TARGET, "{:?} key {}", change, key);
            match change {
                LeafChange::Inserted => size += 1,
                LeafChange::Removed => size -= 1,
                LeafChange::Updated | LeafChange::Unchanged => {},
            }
            root = new_root;
            count += 1;
        }
        self.versions.push(Version { root, size });
        let root = self.root();
        debug!(
            target: LOG_TARGET,
            "Applied {} updates, version {} has {} keys and root {}",
            count,
            self.version(),
            size,
            root
        );
        Ok(root)
    }

    /// A proof of the contents of the leaf position of `key`.
    pub fn get_proof(&self, key: &NodeKey) -> SmtProof {
        self.build_proof(self.current().root, key)
    }

    pub fn get_proof_at_version(&self, version: usize, key: &NodeKey) -> Result<SmtProof, SMTError> {
        Ok(self.build_proof(self.version_at(version)?.root, key))
    }

    /// A proof that `key` is present. Fails with [`SMTError::NonViableProof`] if it is not.
    pub fn prove_inclusion(&self, key: &NodeKey) -> Result<SmtProof, SMTError> {
        let proof = self.get_proof(key);
        if proof.is_inclusion_of(key) {
            Ok(proof)
        } else {
            Err(SMTError::NonViableProof)
        }
    }

    /// A proof that `key` is absent. Fails with [`SMTError::NonViableProof`] if it is present.
    pub fn prove_exclusion(&self, key: &NodeKey) -> Result<SmtProof, SMTError> {
        let proof = self.get_proof(key);
        if proof.is_exclusion_of(key) {
            Ok(proof)
        } else {
            Err(SMTError::NonViableProof)
        }
    }

    /// Checks a proof for `key` in a tree of the given depth. See [`SmtProof::verify`].
    pub fn verify(
        depth: u32,
        proof: &SmtProof,
        key: &NodeKey,
        claimed_leaf: Option<&SmtLeaf>,
        expected_root: &NodeHash,
    ) -> Result<bool, SMTError> {
        proof.verify::<H>(depth, key, claimed_leaf, expected_root)
    }

    fn current(&self) -> &Version {
        &self.versions[self.versions.len() - 1]
    }

    fn version_at(&self, version: usize) -> Result<&Version, SMTError> {
        self.versions.get(version).ok_or(SMTError::VersionNotFound(version))
    }

    /// The children of the node at `index`, which sits at `height`. An empty subtree has two empty children.
    fn children(&self, index: NodeIndex, height: u32) -> (NodeIndex, NodeIndex) {
        match &self.nodes[index] {
            Node::Internal(node) => {
                debug_assert_eq!(node.height(), height);
                (node.left(), node.right())
            },
            node => {
                debug_assert_eq!(node.height(), height);
                let empty = (height - 1) as NodeIndex;
                (empty, empty)
            },
        }
    }

    /// Walks from `root` down to the leaf position of `key`, returning the leaf-level node and the sibling at each
    /// height from the root down.
    fn descend(&self, root: NodeIndex, key: &NodeKey) -> (NodeIndex, Vec<(NodeIndex, TraverseDirection)>) {
        let mut path = Vec::with_capacity(self.depth as usize);
        let mut current = root;
        for height in (1..=self.depth).rev() {
            let (left, right) = self.children(current, height);
            let direction = traverse_direction(key, self.depth, height);
            let (next, sibling) = match direction {
                TraverseDirection::Left => (left, right),
                TraverseDirection::Right => (right, left),
            };
            path.push((sibling, direction));
            current = next;
        }
        (current, path)
    }

    fn lookup(&self, root: NodeIndex, key: &NodeKey) -> Option<ValueHash> {
        let (leaf, _) = self.descend(root, key);
        match &self.nodes[leaf] {
            Node::Leaf(leaf) if leaf.key() == key => Some(*leaf.value()),
            _ => None,
        }
    }

    fn build_proof(&self, root: NodeIndex, key: &NodeKey) -> SmtProof {
        let (leaf, path) = self.descend(root, key);
        let siblings = path.iter().rev().map(|(sibling, _)| *self.nodes[*sibling].hash()).collect();
        let leaf = match &self.nodes[leaf] {
            Node::Leaf(leaf) => Some(SmtLeaf::new(*leaf.key(), *leaf.value())),
            _ => None,
        };
        SmtProof::new(siblings, leaf)
    }

    /// Writes the path for a single update below `root` and returns the new root. Existing nodes are left untouched.
    fn apply(
        &mut self,
        root: NodeIndex,
        key: &NodeKey,
        value: &ValueHash,
    ) -> Result<(NodeIndex, LeafChange), SMTError> {
        let (leaf, path) = self.descend(root, key);
        let deleting = *value == DELETED_VALUE_HASH;
        let change = match &self.nodes[leaf] {
            Node::Leaf(existing) if existing.key() != key => {
                if deleting {
                    LeafChange::Unchanged
                } else {
                    return Err(SMTError::PositionOccupied {
                        key: *key,
                        existing: *existing.key(),
                    });
                }
            },
            Node::Leaf(_) if deleting => LeafChange::Removed,
            Node::Leaf(existing) if existing.value() == value => LeafChange::Unchanged,
            Node::Leaf(_) => LeafChange::Updated,
            _ if deleting => LeafChange::Unchanged,
            _ => LeafChange::Inserted,
        };
        if change == LeafChange::Unchanged {
            return Ok((root, change));
        }
        let mut current = if deleting {
            0
        } else {
            self.push(Node::Leaf(LeafNode::new::<H>(*key, *value)))
        };
        for ((sibling, direction), height) in path.into_iter().rev().zip(1..) {
            current = match direction {
                TraverseDirection::Left => self.join(height, current, sibling),
                TraverseDirection::Right => self.join(height, sibling, current),
            };
        }
        Ok((current, change))
    }

    /// The node at `height` with the given children. Two empty children collapse into the shared empty node.
    fn join(&mut self, height: u32, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        let empty_child = (height - 1) as NodeIndex;
        if left == empty_child && right == empty_child {
            return height as NodeIndex;
        }
        let node = InternalNode::new::<H>(
            height,
            (left, self.nodes[left].hash()),
            (right, self.nodes[right].hash()),
        );
        self.push(Node::Internal(node))
    }

    fn push(&mut self, node: Node) -> NodeIndex {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

impl<H> Debug for SparseMerkleTree<H>
where H: Digest<OutputSize = U32>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SparseMerkleTree")
            .field("depth", &self.depth)
            .field("version", &self.version())
            .field("size", &self.len())
            .field("root", &self.root())
            .finish()
    }
}
