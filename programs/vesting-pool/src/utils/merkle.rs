//! Merkle commitment over an ordered list of leaf hashes.
//!
//! Each level is padded to even width with [`empty_hash`] and every adjacent
//! pair is combined smaller-first, so a proof carries no left/right flags.
//! Leaf order at the base level is fixed by the caller; nothing is re-sorted
//! globally.

use crate::error::VestingError;
use crate::utils::hash::{combine_sorted, empty_hash, Hash};

/// One level of the tree above `level`.
fn next_level(level: &[Hash], empty: &Hash) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => combine_sorted(left, right),
            [single] => combine_sorted(single, empty),
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

/// Root of the tree built over `leaves`.
///
/// A single leaf is its own root.
pub fn build_root(leaves: &[Hash]) -> Result<Hash, VestingError> {
    if leaves.is_empty() {
        return Err(VestingError::EmptyTree);
    }
    let empty = empty_hash();
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level, &empty);
    }
    Ok(level[0])
}

/// Every level of the tree: index 0 is `leaves`, the last level is the root.
pub fn build_full_tree(leaves: &[Hash]) -> Result<Vec<Vec<Hash>>, VestingError> {
    if leaves.is_empty() {
        return Err(VestingError::EmptyTree);
    }
    let empty = empty_hash();
    let mut levels = vec![leaves.to_vec()];
    while let Some(top) = levels.last().filter(|level| level.len() > 1) {
        let next = next_level(top, &empty);
        levels.push(next);
    }
    Ok(levels)
}

/// Root of a materialised tree.
pub fn tree_root(tree: &[Vec<Hash>]) -> Option<Hash> {
    tree.last().and_then(|level| level.first()).copied()
}

/// Sibling path for the first occurrence of `target` in a materialised tree.
pub fn extract_proof(target: &Hash, tree: &[Vec<Hash>]) -> Result<Vec<Hash>, VestingError> {
    let leaves = tree.first().ok_or(VestingError::EmptyTree)?;
    let mut index = leaves
        .iter()
        .position(|leaf| leaf == target)
        .ok_or(VestingError::ElementNotFound)?;

    let empty = empty_hash();
    let mut proof = Vec::with_capacity(tree.len().saturating_sub(1));
    for level in &tree[..tree.len() - 1] {
        let sibling = if index % 2 == 0 {
            level.get(index + 1).copied().unwrap_or(empty)
        } else {
            level[index - 1]
        };
        proof.push(sibling);
        index /= 2;
    }
    Ok(proof)
}

/// Same proof as [`extract_proof`], reducing one level at a time in place so
/// only a single level is ever held in memory.
pub fn generate_proof(leaves: &[Hash], target: &Hash) -> Result<Vec<Hash>, VestingError> {
    if leaves.is_empty() {
        return Err(VestingError::EmptyTree);
    }
    let mut index = leaves
        .iter()
        .position(|leaf| leaf == target)
        .ok_or(VestingError::ElementNotFound)?;

    let empty = empty_hash();
    let mut level = leaves.to_vec();
    let mut proof = Vec::new();
    while level.len() > 1 {
        let sibling = index ^ 1;
        proof.push(level.get(sibling).copied().unwrap_or(empty));

        let width = level.len();
        for i in (0..width).step_by(2) {
            let right = if i + 1 < width { level[i + 1] } else { empty };
            level[i / 2] = combine_sorted(&level[i], &right);
        }
        level.truncate(width.div_ceil(2));
        index /= 2;
    }
    Ok(proof)
}

/// Replay `proof` from `leaf`; true iff it reproduces `root`.
pub fn verify(root: &Hash, leaf: &Hash, proof: &[Hash]) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |acc, sibling| combine_sorted(&acc, sibling));
    computed == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::hash::{combine, hash_bytes};

    fn leaves(n: usize) -> Vec<Hash> {
        (0..n as u32).map(|i| hash_bytes(&i.to_le_bytes())).collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(build_root(&[]), Err(VestingError::EmptyTree)));
        assert!(matches!(build_full_tree(&[]), Err(VestingError::EmptyTree)));
        assert!(matches!(
            generate_proof(&[], &[0u8; 32]),
            Err(VestingError::EmptyTree)
        ));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let l = leaves(1);
        assert_eq!(build_root(&l).unwrap(), l[0]);
        let tree = build_full_tree(&l).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(extract_proof(&l[0], &tree).unwrap().is_empty());
        assert!(generate_proof(&l, &l[0]).unwrap().is_empty());
        assert!(verify(&l[0], &l[0], &[]));
    }

    #[test]
    fn odd_levels_are_padded_with_empty_hash() {
        let l = leaves(3);
        let left = combine_sorted(&l[0], &l[1]);
        let right = combine_sorted(&l[2], &empty_hash());
        assert_eq!(build_root(&l).unwrap(), combine_sorted(&left, &right));
        assert_eq!(
            extract_proof(&l[2], &build_full_tree(&l).unwrap()).unwrap(),
            vec![empty_hash(), left]
        );
    }

    #[test]
    fn pairs_are_combined_smaller_first() {
        let l = leaves(2);
        let (lo, hi) = if l[0] < l[1] { (l[0], l[1]) } else { (l[1], l[0]) };
        assert_eq!(build_root(&l).unwrap(), combine(&lo, &hi));
    }

    #[test]
    fn full_tree_shape_and_root_agree() {
        for n in [1usize, 2, 3, 4, 5, 7, 8, 9, 16, 33] {
            let l = leaves(n);
            let tree = build_full_tree(&l).unwrap();
            assert_eq!(tree[0], l);
            assert_eq!(tree.last().unwrap().len(), 1);
            for pair in tree.windows(2) {
                assert_eq!(pair[1].len(), pair[0].len().div_ceil(2));
            }
            assert_eq!(tree_root(&tree).unwrap(), build_root(&l).unwrap());
        }
    }

    #[test]
    fn every_leaf_verifies_against_the_root() {
        for n in 1usize..=17 {
            let l = leaves(n);
            let root = build_root(&l).unwrap();
            let tree = build_full_tree(&l).unwrap();
            for leaf in &l {
                let proof = extract_proof(leaf, &tree).unwrap();
                assert_eq!(proof.len(), tree.len() - 1);
                assert!(verify(&root, leaf, &proof), "n={n}");
            }
        }
    }

    #[test]
    fn streaming_and_materialised_proofs_match() {
        for n in 1usize..=21 {
            let l = leaves(n);
            let tree = build_full_tree(&l).unwrap();
            for leaf in &l {
                assert_eq!(
                    generate_proof(&l, leaf).unwrap(),
                    extract_proof(leaf, &tree).unwrap()
                );
            }
        }
    }

    #[test]
    fn tampering_breaks_verification() {
        let l = leaves(10);
        let root = build_root(&l).unwrap();
        let tree = build_full_tree(&l).unwrap();
        let proof = extract_proof(&l[6], &tree).unwrap();

        for i in 0..proof.len() {
            let mut forged = proof.clone();
            forged[i][0] ^= 0x01;
            assert!(!verify(&root, &l[6], &forged));
        }
        let mut leaf = l[6];
        leaf[31] ^= 0x80;
        assert!(!verify(&root, &leaf, &proof));
        assert!(!verify(&root, &l[6], &proof[..proof.len() - 1]));
        assert!(!verify(&root, &l[5], &proof));
    }

    #[test]
    fn unknown_element_is_reported() {
        let l = leaves(4);
        let tree = build_full_tree(&l).unwrap();
        let missing = hash_bytes(b"missing");
        assert!(matches!(
            extract_proof(&missing, &tree),
            Err(VestingError::ElementNotFound)
        ));
        assert!(matches!(
            generate_proof(&l, &missing),
            Err(VestingError::ElementNotFound)
        ));
    }
}
