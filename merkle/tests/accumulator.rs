// Copyright 2024. The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

#[allow(dead_code)]
mod support;

use authtree_hashing::{Blake2b256, DomainHasher, INTERNAL_ACC, LEAF_ACC};
use authtree_merkle::{
    accumulator::{AccumulatorError, AccumulatorProof, Side, EMPTY_ACCUMULATOR, PLACEHOLDER_ACC},
    tree_height,
    NodeHash,
};
use support::{create_accumulator, hash_from_hex, init_logging, int_to_hash, letters, TestAccumulator};

fn leaf(payload: &[u8]) -> NodeHash {
    DomainHasher::<Blake2b256>::hash(LEAF_ACC, [payload]).into()
}

fn internal(left: &NodeHash, right: &NodeHash) -> NodeHash {
    DomainHasher::<Blake2b256>::hash(INTERNAL_ACC, [left, right]).into()
}

#[test]
fn known_roots() {
    init_logging();
    assert_eq!(create_accumulator(0).root(), EMPTY_ACCUMULATOR);
    let expected = [
        (1, "c418a877a2827ca6372403a6ddc2f651472ceb366e8a1ae05c23783bc35bff92"),
        (2, "57c34019be8d699cf9ac07f8a57f112e1b791f29101e8c62576d13e2857313c9"),
        (3, "fdb433a789c083da64aab80ac41deaf3070e19beb9704481dedd9a47d6f12606"),
        (5, "99cb7c6d4d3e4cc0966c0bbb86f7af68652e1cc87f00e8bf6d1c7268a80b7097"),
        (7, "a97a21f79a1e2093484179c9c17c0a919ca1c2ab5d823ba75fae637b2e5c9ab5"),
    ];
    for (size, root) in expected {
        assert_eq!(create_accumulator(size).root().to_hex(), root, "size = {}", size);
    }
}

#[test]
fn three_leaves() {
    init_logging();
    let tree = create_accumulator(3);
    let (a, b, c) = (leaf(b"a"), leaf(b"b"), leaf(b"c"));
    let ab = internal(&a, &b);
    let root = internal(&ab, &internal(&c, &PLACEHOLDER_ACC));
    assert_eq!(tree.root(), root);
    assert_eq!(tree.frozen_subtree_roots(), &[ab, c]);

    let proof = tree.proof_for(2).unwrap();
    assert_eq!(proof.siblings(), &[(PLACEHOLDER_ACC, Side::Right), (ab, Side::Left)]);
    assert!(proof.verify::<Blake2b256>(&c, 2, 3, &root).unwrap());
    // Right sibling, wrong leaf
    assert!(!proof.verify::<Blake2b256>(&a, 2, 3, &root).unwrap());
    // The same proof at another index contradicts its own sides
    assert!(!proof.verify::<Blake2b256>(&c, 1, 3, &root).unwrap());
}

#[test]
fn one_leaf_is_its_own_root() {
    let mut tree = TestAccumulator::new();
    let root = tree.append(int_to_hash(0)).unwrap();
    assert_eq!(root, int_to_hash(0));
    let proof = tree.proof_for(0).unwrap();
    assert!(proof.siblings().is_empty());
    assert!(TestAccumulator::verify(&proof, &root, 0, 1, &root).unwrap());
}

/// Every leaf of every accumulator size up to 64 proves against the current root and every historical root.
#[test]
fn proofs_for_small_accumulators() {
    init_logging();
    let hashes = (0..64).map(int_to_hash).collect::<Vec<_>>();
    let mut tree = TestAccumulator::new();
    let mut roots = vec![tree.root()];
    for hash in &hashes {
        roots.push(tree.append(*hash).unwrap());
    }
    for leaf_count in 1..=64u64 {
        let root = roots[leaf_count as usize];
        assert_eq!(tree.root_at(leaf_count).unwrap(), root);
        for index in 0..leaf_count {
            let proof = tree.proof_for_at(index, leaf_count).unwrap();
            assert_eq!(proof.siblings().len(), tree_height(leaf_count));
            assert!(
                proof
                    .verify::<Blake2b256>(&hashes[index as usize], index, leaf_count, &root)
                    .unwrap(),
                "leaf {} of {}",
                index,
                leaf_count
            );
        }
    }
    assert!(tree.validate().is_ok());
}

#[test]
fn proofs_fail_against_other_roots() {
    let tree = create_accumulator(9);
    let proof = tree.proof_for(4).unwrap();
    let e = leaf(b"e");
    assert!(proof.verify::<Blake2b256>(&e, 4, 9, &tree.root()).unwrap());
    assert!(!proof.verify::<Blake2b256>(&e, 4, 9, &tree.root_at(8).unwrap()).unwrap());

    let mut tampered = proof.siblings().to_vec();
    tampered[1].0 = int_to_hash(1000);
    let tampered = AccumulatorProof::new(tampered);
    assert!(!tampered.verify::<Blake2b256>(&e, 4, 9, &tree.root()).unwrap());
}

#[test]
fn malformed_proof_requests() {
    let tree = create_accumulator(5);
    let root = tree.root();
    assert_eq!(
        tree.proof_for(5),
        Err(AccumulatorError::IndexOutOfRange { index: 5, leaf_count: 5 })
    );
    assert_eq!(
        tree.proof_for_at(0, 6),
        Err(AccumulatorError::LeafCountOutOfRange {
            requested: 6,
            leaf_count: 5
        })
    );
    let proof = tree.proof_for(0).unwrap();
    assert_eq!(
        proof.verify::<Blake2b256>(&leaf(b"a"), 0, 4, &root),
        Err(AccumulatorError::ProofLengthMismatch { expected: 2, actual: 3 })
    );
    assert_eq!(
        proof.verify::<Blake2b256>(&leaf(b"a"), 7, 5, &root),
        Err(AccumulatorError::IndexOutOfRange { index: 7, leaf_count: 5 })
    );
}

#[test]
fn appending_never_changes_earlier_roots() {
    let mut tree = TestAccumulator::new();
    let mut roots = Vec::new();
    for payload in letters(20) {
        roots.push(tree.append_leaf_data(&payload).unwrap());
        for (i, root) in roots.iter().enumerate() {
            assert_eq!(tree.root_at(i as u64 + 1).unwrap(), *root);
        }
    }
    assert_eq!(tree.root_at(0).unwrap(), EMPTY_ACCUMULATOR);
}

#[test]
fn rebuild_from_leaf_hashes() {
    let tree = create_accumulator(11);
    let leaves = (0..11).map(|i| tree.get_leaf_hash(i).unwrap()).collect::<Vec<_>>();
    let rebuilt = TestAccumulator::from_leaf_hashes(leaves).unwrap();
    assert_eq!(rebuilt.root(), tree.root());
    assert_eq!(rebuilt.frozen_subtree_roots(), tree.frozen_subtree_roots());
    assert_eq!(
        rebuilt.root(),
        hash_from_hex(&tree.root().to_hex()),
        "hex round trip of the root"
    );
}

#[test]
fn leaf_order_matters() {
    let (a, b) = (leaf(b"a"), leaf(b"b"));
    let forward = TestAccumulator::from_leaf_hashes([a, b]).unwrap();
    let backward = TestAccumulator::from_leaf_hashes([b, a]).unwrap();
    assert_ne!(forward.root(), backward.root());
}

/// Flipping any single bit of any sibling invalidates the proof
#[test]
fn single_bit_flips_are_rejected() {
    let tree = create_accumulator(13);
    let root = tree.root();
    for index in [0u64, 6, 12] {
        let proof = tree.proof_for(index).unwrap();
        let leaf_hash = tree.get_leaf_hash(index).unwrap();
        for level in 0..proof.siblings().len() {
            for byte in 0..32 {
                let mut siblings = proof.siblings().to_vec();
                siblings[level].0.as_slice_mut()[byte] ^= 0x01;
                let tampered = AccumulatorProof::new(siblings);
                assert!(!tampered.verify::<Blake2b256>(&leaf_hash, index, 13, &root).unwrap());
            }
        }
    }
}

#[test]
fn reserved_constants_cannot_be_leaves() {
    init_logging();
    let mut tree = TestAccumulator::new();
    assert_eq!(
        tree.append(EMPTY_ACCUMULATOR),
        Err(AccumulatorError::ReservedLeafHash(EMPTY_ACCUMULATOR))
    );
    assert!(tree.is_empty());
    assert_eq!(tree.root(), EMPTY_ACCUMULATOR);

    let mut tree = create_accumulator(3);
    let root = tree.root();
    assert_eq!(
        tree.append(PLACEHOLDER_ACC),
        Err(AccumulatorError::ReservedLeafHash(PLACEHOLDER_ACC))
    );
    assert!(TestAccumulator::from_leaf_hashes([leaf(b"a"), PLACEHOLDER_ACC]).is_err());
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.root(), root);

    // A fourth leaf equal to the placeholder would reproduce the three leaf root
    let (a, b, c) = (leaf(b"a"), leaf(b"b"), leaf(b"c"));
    let phantom = AccumulatorProof::new(vec![(c, Side::Left), (internal(&a, &b), Side::Left)]);
    assert!(!phantom.verify::<Blake2b256>(&PLACEHOLDER_ACC, 3, 4, &root).unwrap());
    assert!(!AccumulatorProof::default()
        .verify::<Blake2b256>(&EMPTY_ACCUMULATOR, 0, 1, &EMPTY_ACCUMULATOR)
        .unwrap());
}
