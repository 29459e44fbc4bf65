//! Merkle root computation over event digests.
//!
//! The tree is built bottom-up: adjacent digests are paired and the
//! concatenation of their hex forms is hashed to produce the next level.
//! When a level has an odd count the LAST digest is duplicated before
//! pairing. That tie-break is a convention choice, not a cryptographic
//! requirement — but every producer of this log must use it, or roots
//! stop agreeing. Do not substitute an alternate convention.

use crate::canonical::sha256_hex;

/// Hash one pair of nodes: SHA-256 over the concatenated hex digests.
pub fn pair_hash(left: &str, right: &str) -> String {
    let mut combined = String::with_capacity(left.len() + right.len());
    combined.push_str(left);
    combined.push_str(right);
    sha256_hex(combined.as_bytes())
}

/// Compute the Merkle root of `leaves` (event digests in insertion order).
///
/// An empty slice yields the hash of empty input, so an empty block still
/// has a well-defined, verifiable root. A single leaf is its own root.
/// Cost is O(k) hash operations for k leaves.
pub fn merkle_root(leaves: &[String]) -> String {
    if leaves.is_empty() {
        return sha256_hex(b"");
    }

    let mut level: Vec<String> = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            // Odd level: duplicate the last digest before pairing.
            let last = level[level.len() - 1].clone();
            level.push(last);
        }
        level = level
            .chunks(2)
            .map(|pair| pair_hash(&pair[0], &pair[1]))
            .collect();
    }
    level.swap_remove(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tag: &str) -> String {
        sha256_hex(tag.as_bytes())
    }

    #[test]
    fn empty_list_hashes_empty_input() {
        assert_eq!(merkle_root(&[]), sha256_hex(b""));
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let a = leaf("a");
        assert_eq!(merkle_root(std::slice::from_ref(&a)), a);
    }

    #[test]
    fn two_leaves_pair_directly() {
        let (a, b) = (leaf("a"), leaf("b"));
        assert_eq!(merkle_root(&[a.clone(), b.clone()]), pair_hash(&a, &b));
    }

    #[test]
    fn odd_count_duplicates_the_last_leaf() {
        let (a, b, c) = (leaf("a"), leaf("b"), leaf("c"));
        let expected = pair_hash(&pair_hash(&a, &b), &pair_hash(&c, &c));
        assert_eq!(merkle_root(&[a, b, c]), expected);
    }

    #[test]
    fn four_leaves_build_two_levels() {
        let (a, b, c, d) = (leaf("a"), leaf("b"), leaf("c"), leaf("d"));
        let expected = pair_hash(&pair_hash(&a, &b), &pair_hash(&c, &d));
        assert_eq!(merkle_root(&[a, b, c, d]), expected);
    }

    #[test]
    fn root_depends_on_leaf_order() {
        let (a, b) = (leaf("a"), leaf("b"));
        assert_ne!(
            merkle_root(&[a.clone(), b.clone()]),
            merkle_root(&[b, a]),
            "insertion order is part of what the root attests to"
        );
    }
}
