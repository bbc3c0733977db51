// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use authtree_hashing::Blake2b256;
use authtree_merkle::{accumulator::AccumulatorTree, sparse_merkle_tree::SparseMerkleTree, NodeHash, NodeKey, ValueHash};
use rand::{rngs::StdRng, RngCore, SeedableRng};
use tari_utilities::hex::from_hex;

pub type TestAccumulator = AccumulatorTree<Blake2b256>;
pub type TestSmt = SparseMerkleTree<Blake2b256>;

/// Routes `log` output through env_logger so that `RUST_LOG=authtree=trace` shows tree activity in test runs.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An accumulator holding the payloads "a", "b", "c", ... up to `size` leaves.
pub fn create_accumulator(size: usize) -> TestAccumulator {
    let mut tree = TestAccumulator::new();
    for payload in letters(size) {
        assert!(tree.append_leaf_data(&payload).is_ok());
    }
    tree
}

pub fn letters(size: usize) -> Vec<Vec<u8>> {
    (b'a'..=b'z').take(size).map(|c| vec![c]).collect()
}

pub fn int_to_hash(n: usize) -> NodeHash {
    TestAccumulator::leaf_hash_for(&n.to_le_bytes())
}

pub fn random_keys(n: usize, seed: u64) -> Vec<NodeKey> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let mut key = [0u8; 32];
            rng.fill_bytes(&mut key);
            NodeKey::from(key)
        })
        .collect()
}

pub fn value_for(key: &NodeKey) -> ValueHash {
    let mut value = *key.as_bytes();
    value.reverse();
    value[0] |= 1;
    ValueHash::from(value)
}

pub fn hash_from_hex(hex: &str) -> NodeHash {
    NodeHash::try_from(from_hex(hex).unwrap().as_slice()).unwrap()
}
