//! Deletion variants and the delete hash used as index key.

use std::collections::VecDeque;

use ahash::AHashSet;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Hash a deletion variant into its 32-bit bucket key.
///
/// FNV-1a over the UTF-8 bytes, with the two low bits replaced by
/// `min(char count, 3)` so that short variants spread over more buckets.
/// Collisions are expected; callers verify every candidate by exact distance.
pub fn delete_hash(variant: &str) -> u32 {
    let hash = variant.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    });
    let length_tag = variant.chars().take(3).count() as u32;

    (hash & !0b11) | length_tag
}

/// Generate the distinct deletion variants of a term's prefix.
///
/// The first `prefix_length` chars (all of them for shorter terms) form the
/// prefix, which is always a variant. The empty string is added when the
/// whole term is no longer than `max_edit_distance`. Every string reachable
/// by deleting up to `max_edit_distance` chars from the prefix follows, each
/// emitted once.
pub fn prefix_deletes(term: &str, max_edit_distance: usize, prefix_length: usize) -> Vec<String> {
    let chars: Vec<char> = term.chars().collect();
    let prefix = &chars[..chars.len().min(prefix_length)];

    let mut variants = Vec::new();
    let mut seen: AHashSet<Vec<char>> = AHashSet::new();

    if chars.len() <= max_edit_distance {
        seen.insert(Vec::new());
        variants.push(String::new());
    }
    if seen.insert(prefix.to_vec()) {
        variants.push(prefix.iter().collect());
    }

    let mut queue = VecDeque::from([(prefix.to_vec(), 0usize)]);
    while let Some((word, depth)) = queue.pop_front() {
        if depth >= max_edit_distance {
            continue;
        }
        for i in 0..word.len() {
            let mut deleted = word.clone();
            deleted.remove(i);
            if seen.insert(deleted.clone()) {
                variants.push(deleted.iter().collect());
                queue.push_back((deleted, depth + 1));
            }
        }
    }

    variants
}

/// Whether `delete` appears in order within the first `prefix_length` chars
/// of `suggestion`.
///
/// A cheap necessary condition for `delete` to be a genuine deletion of the
/// suggestion's prefix, used to reject hash collisions before computing a
/// distance.
pub fn delete_in_suggestion_prefix(
    delete: &[char],
    suggestion: &[char],
    prefix_length: usize,
) -> bool {
    let limit = suggestion.len().min(prefix_length);
    let mut position = 0;

    for &ch in delete {
        while position < limit && suggestion[position] != ch {
            position += 1;
        }
        if position == limit {
            return false;
        }
        position += 1;
    }

    true
}
