// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

#[allow(dead_code)]
mod support;

use authtree_hashing::Blake2b256;
use authtree_merkle::{
    sparse_merkle_tree::{SMTError, SmtLeaf, SmtProof, DELETED_VALUE_HASH},
    NodeKey,
    ValueHash,
};
use support::{init_logging, random_keys, value_for, TestSmt};

fn entries() -> Vec<(NodeKey, ValueHash)> {
    (1..=3u8)
        .map(|i| (NodeKey::from([i; 32]), ValueHash::from([0x10 + i; 32])))
        .collect()
}

#[test]
fn known_roots() {
    init_logging();
    let tree = TestSmt::new(256).unwrap();
    assert_eq!(
        tree.root().to_hex(),
        "eb34716aec2b3cb71469d94edacedfd2210ec2728e38ccafe1c1a7a99167a3b9"
    );
    assert_eq!(
        TestSmt::new(8).unwrap().root().to_hex(),
        "524820e66c9383ecb2fa8fcfa8c6f794f5aaaa3826e1930bcc4706ca965e87bc"
    );

    let mut tree = TestSmt::new(256).unwrap();
    tree.batch_put(entries()).unwrap();
    assert_eq!(
        tree.root().to_hex(),
        "25f88f8757d75649aee9fa8242350cc055c1ccf0a61e0ca5fa9cf5cc4764c49a"
    );

    let mut tree = TestSmt::new(8).unwrap();
    tree.batch_put(entries()).unwrap();
    assert_eq!(
        tree.root().to_hex(),
        "0aa6d31edaa9a7f30d370a35a22f1c06f42ecc764174b645ba2334129ed134e0"
    );
}

#[test]
fn root_is_independent_of_insertion_order() {
    let keys = random_keys(200, 42);
    let mut forward = TestSmt::new(256).unwrap();
    for key in &keys {
        forward.put(*key, value_for(key)).unwrap();
    }
    let mut backward = TestSmt::new(256).unwrap();
    for key in keys.iter().rev() {
        backward.put(*key, value_for(key)).unwrap();
    }
    assert_eq!(forward.root(), backward.root());
    assert_eq!(forward.len(), 200);
}

#[test]
fn inserting_then_deleting_everything_gives_the_empty_root() {
    init_logging();
    let keys = random_keys(100, 7);
    let mut tree = TestSmt::new(256).unwrap();
    tree.batch_put(keys.iter().map(|k| (*k, value_for(k)))).unwrap();
    assert!(!tree.is_empty());
    for key in &keys[..50] {
        tree.delete(key).unwrap();
    }
    let half = tree.root();
    let mut expected = TestSmt::new(256).unwrap();
    expected.batch_put(keys[50..].iter().map(|k| (*k, value_for(k)))).unwrap();
    assert_eq!(half, expected.root());

    tree.batch_put(keys[50..].iter().map(|k| (*k, DELETED_VALUE_HASH))).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.root(), tree.empty_root());
}

#[test]
fn every_key_proves_inclusion_and_its_neighbours_prove_exclusion() {
    let keys = random_keys(64, 1);
    let mut tree = TestSmt::new(256).unwrap();
    tree.batch_put(keys.iter().map(|k| (*k, value_for(k)))).unwrap();
    let root = tree.root();
    for key in &keys {
        let proof = tree.prove_inclusion(key).unwrap();
        let leaf = SmtLeaf::new(*key, value_for(key));
        assert!(TestSmt::verify(256, &proof, key, Some(&leaf), &root).unwrap());
        assert!(!TestSmt::verify(256, &proof, key, None, &root).unwrap());
    }
    for key in random_keys(64, 2) {
        let proof = tree.prove_exclusion(&key).unwrap();
        assert!(proof.leaf().is_none());
        assert!(TestSmt::verify(256, &proof, &key, None, &root).unwrap());
    }
}

#[test]
fn proofs_fail_after_the_tree_changes() {
    let keys = random_keys(10, 3);
    let mut tree = TestSmt::new(256).unwrap();
    tree.batch_put(keys.iter().map(|k| (*k, value_for(k)))).unwrap();
    let old_root = tree.root();
    let proof = tree.get_proof(&keys[0]);
    let leaf = SmtLeaf::new(keys[0], value_for(&keys[0]));

    tree.put(keys[0], ValueHash::from([0xeeu8; 32])).unwrap();
    assert!(proof.verify::<Blake2b256>(256, &keys[0], Some(&leaf), &old_root).unwrap());
    assert!(!proof.verify::<Blake2b256>(256, &keys[0], Some(&leaf), &tree.root()).unwrap());

    // The old version is still provable
    let historical = tree.get_proof_at_version(1, &keys[0]).unwrap();
    assert_eq!(historical, proof);
}

#[test]
fn proofs_with_the_wrong_depth() {
    let mut tree = TestSmt::new(16).unwrap();
    let key = NodeKey::from([9u8; 32]);
    tree.put(key, value_for(&key)).unwrap();
    let proof = tree.get_proof(&key);
    assert_eq!(proof.siblings().len(), 16);
    let leaf = SmtLeaf::new(key, value_for(&key));
    assert_eq!(
        proof.verify::<Blake2b256>(256, &key, Some(&leaf), &tree.root()),
        Err(SMTError::ProofLengthMismatch {
            expected: 256,
            actual: 16
        })
    );
    let truncated = SmtProof::new(proof.siblings()[1..].to_vec(), proof.leaf().copied());
    assert!(truncated.verify::<Blake2b256>(16, &key, Some(&leaf), &tree.root()).is_err());
}

#[test]
fn shallow_trees_share_positions() {
    let mut tree = TestSmt::new(4).unwrap();
    let first = NodeKey::from([0x50u8; 32]);
    let mut second = [0u8; 32];
    second[0] = 0x5f;
    let second = NodeKey::from(second);
    tree.put(first, value_for(&first)).unwrap();
    assert!(matches!(
        tree.put(second, value_for(&second)),
        Err(SMTError::PositionOccupied { .. })
    ));
    // Deleting the key that is not stored is a no-op rather than a collision
    let root = tree.root();
    assert_eq!(tree.delete(&second).unwrap(), root);
    assert_eq!(tree.get(&first), Some(value_for(&first)));
}

/// Flipping a byte in any sibling invalidates both inclusion and exclusion proofs
#[test]
fn tampered_siblings_are_rejected() {
    let keys = random_keys(16, 5);
    let mut tree = TestSmt::new(256).unwrap();
    tree.batch_put(keys.iter().map(|k| (*k, value_for(k)))).unwrap();
    let root = tree.root();

    let leaf = SmtLeaf::new(keys[7], value_for(&keys[7]));
    let inclusion = tree.prove_inclusion(&keys[7]).unwrap();
    let absent = NodeKey::from([0x5au8; 32]);
    let exclusion = tree.prove_exclusion(&absent).unwrap();
    let cases = [(keys[7], inclusion, Some(leaf)), (absent, exclusion, None)];

    for (key, proof, leaf) in &cases {
        assert!(proof.verify::<Blake2b256>(256, key, leaf.as_ref(), &root).unwrap());
        for level in [0usize, 1, 3, 100, 200, 254, 255] {
            for byte in [0usize, 17, 31] {
                let mut siblings = proof.siblings().to_vec();
                siblings[level].as_slice_mut()[byte] ^= 0x01;
                let tampered = SmtProof::new(siblings, proof.leaf().copied());
                assert!(
                    !tampered.verify::<Blake2b256>(256, key, leaf.as_ref(), &root).unwrap(),
                    "level {} byte {}",
                    level,
                    byte
                );
            }
        }
    }
}
