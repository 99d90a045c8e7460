use merkle_allowlist::{
    build_tree, generate_proof, to_hex, verify, verify_hex, verify_identifier, Allowlist, Hash,
    HashFunction, LeafHasher, MerkleError, MerkleProof, MerkleProofTrait, MerkleTree,
    OddNodePolicy, PositionedProof, SortedProof, TreeOptions,
};
use rand::seq::SliceRandom;
use rand::Rng;

const ALICE: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";
const BOB: &str = "0xAb8483F64d9C6d1EcF9b849Ae677dD3315835cb2";
const CAROL: &str = "0x4B20993Bc481177ec7E8f571ceCaE8A9e22C02db";

const ALICE_LEAF: &str = "0x5931b4ed56ace4c46b68524cb5bcbf4195f1bbaacbe5228fbd090546c88dd229";
const BOB_LEAF: &str = "0x999bf57501565dbd2fdcea36efa2b9aef8340a8901e3459f4a4c926275d36cdb";
const ALICE_BOB_ROOT: &str = "0x9d997719c0a5b5f6db9b8ac69a988be57cf324cb9fffd51dc2c37544bb520d65";

fn all_options() -> Vec<TreeOptions> {
    let mut out = Vec::new();
    for hash in [HashFunction::Keccak256, HashFunction::Sha256] {
        for sort_pairs in [true, false] {
            for policy in [OddNodePolicy::Duplicate, OddNodePolicy::PromoteLone] {
                out.push(
                    TreeOptions::default()
                        .with_hash_function(hash)
                        .with_sort_pairs(sort_pairs)
                        .with_odd_node_policy(policy),
                );
            }
        }
    }
    out
}

fn random_leaves(count: usize) -> Vec<Hash> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

#[test]
fn two_address_scenario_matches_known_vectors() {
    let hasher = LeafHasher::default();
    let a = hasher.hash_identifier(ALICE).unwrap();
    let b = hasher.hash_identifier(BOB).unwrap();
    assert_eq!(to_hex(&a), ALICE_LEAF);
    assert_eq!(to_hex(&b), BOB_LEAF);

    let tree = build_tree(vec![a, b], TreeOptions::default()).unwrap();
    assert_eq!(tree.root_hex(), ALICE_BOB_ROOT);
    assert_eq!(tree.root(), HashFunction::Keccak256.hash_pair(&a, &b, true));

    let proof = generate_proof(&tree, &b).unwrap();
    assert_eq!(proof.proof_hashes_hex(), vec![ALICE_LEAF.to_string()]);
    assert!(verify(&b, &proof, &tree.root(), &TreeOptions::default()).unwrap());

    let other = MerkleTree::from_identifiers(&[ALICE, CAROL], TreeOptions::default()).unwrap();
    assert!(
        !verify(&b, &proof, &other.root(), &TreeOptions::default()).unwrap(),
        "A proof must not verify against another tree's root"
    );

    let options = TreeOptions::default();
    assert!(verify_hex(BOB_LEAF, &[ALICE_LEAF], None, ALICE_BOB_ROOT, &options).unwrap());
}

#[test]
fn known_three_address_roots() {
    let ids = [ALICE, BOB, CAROL];
    let promoted = MerkleTree::from_identifiers(&ids, TreeOptions::default()).unwrap();
    assert_eq!(
        promoted.root_hex(),
        "0x74f4666169faccda89a45d47ab1997a62f24c3cd534a01539db8f0e40d3eb8b1"
    );

    let duplicated = MerkleTree::from_identifiers(
        &ids,
        TreeOptions::default().with_odd_node_policy(OddNodePolicy::Duplicate),
    )
    .unwrap();
    assert_eq!(
        duplicated.root_hex(),
        "0xedc0eb94bae06e84bc6af5cd5bed7c120121fe64af5bf38104313a95caaefa54"
    );
}

#[test]
fn sha256_and_unsorted_vectors() {
    let sha = MerkleTree::from_identifiers(
        &[ALICE, BOB],
        TreeOptions::default().with_hash_function(HashFunction::Sha256),
    )
    .unwrap();
    assert_eq!(
        sha.root_hex(),
        "0xece307457ff3b5f333a5ecb21a1c7435532bec6553cae1dd91886fad7901615b"
    );

    let unsorted = MerkleTree::from_identifiers(
        &[BOB, ALICE],
        TreeOptions::default().with_sort_pairs(false),
    )
    .unwrap();
    assert_eq!(
        unsorted.root_hex(),
        "0x63b1716e3d9ce115c3803b7fc8674441e61a0c2a31c47f51f1a35b6d3de5d083"
    );

    let reversed = MerkleTree::from_identifiers(&[BOB, ALICE], TreeOptions::default()).unwrap();
    assert_eq!(reversed.root_hex(), ALICE_BOB_ROOT, "Sorted pairs ignore input order");
}

#[test]
fn rebuilding_is_deterministic() {
    let leaves = random_leaves(37);
    for options in all_options() {
        let first = MerkleTree::build(leaves.clone(), options).unwrap();
        let second = MerkleTree::build(leaves.clone(), options).unwrap();
        assert_eq!(first.root(), second.root(), "Root must be stable for {options:?}");
        assert_eq!(first, second);
    }
}

#[test]
fn sorted_pairs_with_sorted_leaves_ignore_input_order() {
    let mut leaves = random_leaves(23);
    let options = TreeOptions::default().with_sort_leaves(true);
    let root = MerkleTree::build(leaves.clone(), options).unwrap().root();

    let mut rng = rand::thread_rng();
    for _ in 0..5 {
        leaves.shuffle(&mut rng);
        assert_eq!(MerkleTree::build(leaves.clone(), options).unwrap().root(), root);
    }
}

#[test]
fn sorted_pairs_ignore_sibling_swaps() {
    // Swapping the two children of any pair leaves the sorted-pair root unchanged
    let leaves = random_leaves(16);
    let root = MerkleTree::build(leaves.clone(), TreeOptions::default()).unwrap().root();

    let mut swapped = leaves.clone();
    for pair in swapped.chunks_mut(2) {
        pair.swap(0, 1);
    }
    assert_eq!(MerkleTree::build(swapped.clone(), TreeOptions::default()).unwrap().root(), root);

    let unsorted = TreeOptions::default().with_sort_pairs(false);
    assert_ne!(
        MerkleTree::build(leaves, unsorted).unwrap().root(),
        MerkleTree::build(swapped, unsorted).unwrap().root(),
        "Without pair sorting, child order is committed"
    );
}

#[test]
fn every_leaf_proves_membership() {
    for options in all_options() {
        for size in [1, 2, 3, 5, 8, 13, 32, 33] {
            let tree = MerkleTree::build(random_leaves(size), options).unwrap();
            for leaf in tree.leaves() {
                let proof = tree.proof_for_hash(&leaf.hash).unwrap();
                assert!(
                    verify(&leaf.hash, &proof, &tree.root(), &options).unwrap(),
                    "Leaf {} of {size} must verify with {options:?}",
                    leaf.index
                );
            }
        }
    }
}

#[test]
fn proof_length_is_ceil_log2_under_duplicate() {
    let options = TreeOptions::default().with_odd_node_policy(OddNodePolicy::Duplicate);
    for size in 2..=40 {
        let tree = MerkleTree::build(random_leaves(size), options).unwrap();
        for position in 0..size {
            assert_eq!(
                tree.proof(position).unwrap().len(),
                ceil_log2(size),
                "Proof length for leaf {position} of {size}"
            );
        }
    }
}

#[test]
fn proof_length_is_bounded_under_promotion() {
    for size in 2..=40 {
        let tree = MerkleTree::build(random_leaves(size), TreeOptions::default()).unwrap();
        assert_eq!(tree.depth(), ceil_log2(size));
        for position in 0..size {
            let len = tree.proof(position).unwrap().len();
            assert!(len <= ceil_log2(size));
            if size.is_power_of_two() {
                assert_eq!(len, ceil_log2(size));
            }
        }
    }
}

#[test]
fn single_leaf_root_is_the_leaf() {
    for options in all_options() {
        let leaf = random_leaves(1)[0];
        let tree = MerkleTree::build(vec![leaf], options).unwrap();
        assert_eq!(tree.root(), leaf);
        let proof = tree.proof(0).unwrap();
        assert!(proof.is_empty());
        assert!(verify(&leaf, &proof, &leaf, &options).unwrap());
    }
}

fn flip(hash: &Hash, bit: usize) -> Hash {
    let mut out = *hash;
    out[bit / 8] ^= 1 << (bit % 8);
    out
}

fn with_entry(proof: &MerkleProof, index: usize, value: Hash) -> MerkleProof {
    match proof {
        MerkleProof::Sorted(p) => {
            let mut steps = p.steps.clone();
            steps[index] = value;
            MerkleProof::Sorted(SortedProof::new(steps))
        }
        MerkleProof::Positioned(p) => {
            let mut steps = p.steps.clone();
            steps[index].1 = value;
            MerkleProof::Positioned(PositionedProof::new(steps))
        }
    }
}

#[test]
fn single_bit_flips_never_verify() {
    for options in all_options() {
        let tree = MerkleTree::build(random_leaves(6), options).unwrap();
        let root = tree.root();
        let leaf = tree.leaves()[3].hash;
        let proof = tree.proof(3).unwrap();
        assert!(verify(&leaf, &proof, &root, &options).unwrap());

        for bit in 0..256 {
            assert!(!verify(&flip(&leaf, bit), &proof, &root, &options).unwrap());
            assert!(!verify(&leaf, &proof, &flip(&root, bit), &options).unwrap());
            for (index, sibling) in proof.proof_hashes().iter().enumerate() {
                let forged = with_entry(&proof, index, flip(sibling, bit));
                assert!(
                    !verify(&leaf, &forged, &root, &options).unwrap(),
                    "Flipping bit {bit} of entry {index} must fail with {options:?}"
                );
            }
        }
    }
}

#[test]
fn mismatched_configuration_is_false() {
    let tree = MerkleTree::from_identifiers(&[ALICE, BOB, CAROL], TreeOptions::default()).unwrap();
    let proof = tree.proof_for_identifier(CAROL).unwrap();
    let sha = TreeOptions::default().with_hash_function(HashFunction::Sha256);
    assert!(verify_identifier(CAROL, &proof, &tree.root(), &TreeOptions::default()).unwrap());
    assert!(!verify_identifier(CAROL, &proof, &tree.root(), &sha).unwrap());
}

#[test]
fn error_taxonomy() {
    assert!(matches!(
        MerkleTree::build(vec![], TreeOptions::default()),
        Err(MerkleError::EmptyLeafSet)
    ));
    assert!(matches!(
        MerkleTree::from_identifiers(&[ALICE, "0xdeadbeef"], TreeOptions::default()),
        Err(MerkleError::InvalidInput { index: 1, .. })
    ));

    let tree = MerkleTree::from_identifiers(&[ALICE, BOB], TreeOptions::default()).unwrap();
    assert!(matches!(
        tree.proof_for_identifier(CAROL),
        Err(MerkleError::LeafNotFound(_))
    ));

    let proof = tree.proof_for_identifier(ALICE).unwrap();
    let leaf = LeafHasher::default().hash_identifier(ALICE).unwrap();
    assert!(matches!(
        verify(&leaf, &proof, &tree.root()[..16], &TreeOptions::default()),
        Err(MerkleError::InvalidProofInput(_))
    ));
}

#[test]
fn allowlist_records_cover_everyone() {
    let allowlist = Allowlist::new(&[ALICE, BOB, CAROL], TreeOptions::default()).unwrap();
    assert_eq!(
        allowlist.root_hex(),
        "0x74f4666169faccda89a45d47ab1997a62f24c3cd534a01539db8f0e40d3eb8b1"
    );
    for record in allowlist.records().unwrap() {
        assert!(record.verify().unwrap(), "{} must verify", record.address);
    }
}

#[test]
fn concurrent_proofs_from_shared_tree() {
    let tree = MerkleTree::build(random_leaves(64), TreeOptions::default()).unwrap();
    let tree = std::sync::Arc::new(tree);
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let tree = tree.clone();
            std::thread::spawn(move || {
                (t * 16..(t + 1) * 16).all(|position| {
                    let leaf = tree.leaves()[position].hash;
                    let proof = tree.proof(position).unwrap();
                    verify(&leaf, &proof, &tree.root(), tree.options()).unwrap()
                })
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
