//! Bounded edit distance with adjacent transpositions.
//!
//! The distance is the optimal string alignment (OSA) variant of
//! Damerau-Levenshtein: insertions, deletions, substitutions and swaps of two
//! adjacent characters each cost one, and no substring is edited twice. It is
//! therefore not the unrestricted Damerau distance; `"ca"` to `"abc"` costs 3
//! here, not 2.
//!
//! Every function takes a bound and returns `bound + 1` as soon as the true
//! distance is known to exceed it.

use std::cmp::min;

/// Compute the OSA distance between two char slices, bounded by `max_distance`.
///
/// Returns the exact distance when it is at most `max_distance`, otherwise
/// `max_distance + 1`.
pub fn bounded_distance_chars(s1: &[char], s2: &[char], max_distance: usize) -> usize {
    let len1 = s1.len();
    let len2 = s2.len();
    let exceeded = max_distance.saturating_add(1);

    if len1.abs_diff(len2) > max_distance {
        return exceeded;
    }

    // Rows i-2, i-1 and i of the DP matrix.
    let mut transposition_row = vec![0; len2 + 1];
    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = usize::from(s1[i - 1] != s2[j - 1]);

            let mut value = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            if i > 1 && j > 1 && s1[i - 1] == s2[j - 2] && s1[i - 2] == s2[j - 1] {
                value = min(value, transposition_row[j - 2] + cost);
            }

            curr_row[j] = value;
            min_in_row = min(min_in_row, value);
        }

        // Row minima never decrease, so nothing below can get back under the bound.
        if min_in_row > max_distance {
            return exceeded;
        }

        std::mem::swap(&mut transposition_row, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    if distance <= max_distance {
        distance
    } else {
        exceeded
    }
}

/// Compute the OSA distance between two strings, bounded by `max_distance`.
///
/// Strings are compared char by char.
pub fn bounded_distance(s1: &str, s2: &str, max_distance: usize) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    bounded_distance_chars(&s1_chars, &s2_chars, max_distance)
}

/// Like [`bounded_distance`], but `None` when the bound is exceeded.
pub fn distance_within(s1: &str, s2: &str, max_distance: usize) -> Option<usize> {
    let distance = bounded_distance(s1, s2, max_distance);
    (distance <= max_distance).then_some(distance)
}
