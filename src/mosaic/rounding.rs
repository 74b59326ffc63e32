//! Sum-preserving integer rounding.
//!
//! Rounding each value independently lets per-element error accumulate: a
//! row of columns rounded with `f64::round` can end up one or two pixels
//! short of (or past) the gallery width. This module rounds a whole array
//! at once, distributing the leftover units to the elements that were
//! closest to rounding up, so the integer results always hit the requested
//! total exactly.
//!
//! All functions here are pure and testable without any I/O.

use std::cmp::Ordering;

/// Round an array of reals to integers whose sum equals `target`.
///
/// Each element becomes either `floor(v)` or `floor(v) + 1`. The elements
/// with the largest fractional parts are rounded up first, until the
/// integer sum reaches the target. If the target exceeds the number of
/// elements' worth of increments, distribution wraps around the array.
///
/// When `target` is `None`, or below the floor-sum (unreachable by
/// rounding up), the real sum of the inputs is used instead — recovering
/// the "natural" integer total.
///
/// Negative and zero inputs need no special casing: the floor/fraction
/// decomposition is well-defined for them (`floor` rounds toward negative
/// infinity). NaN and infinity propagate through the arithmetic unguarded.
///
/// # Examples
/// ```
/// # use tiled_gal::mosaic::round_preserving_sum;
/// // Independent rounding would give 333 + 333 + 333 = 999.
/// assert_eq!(
///     round_preserving_sum(&[333.33, 333.33, 333.33], Some(1000)),
///     vec![334, 333, 333],
/// );
///
/// // No target: the real sum (10.0) is preserved.
/// assert_eq!(round_preserving_sum(&[2.5, 2.5, 2.5, 2.5], None), vec![3, 3, 2, 2]);
/// ```
pub fn round_preserving_sum(values: &[f64], target: Option<i32>) -> Vec<i32> {
    if values.is_empty() {
        return Vec::new();
    }

    // Floor/fraction decomposition, retaining original positions.
    let mut parts: Vec<(usize, i32, f64)> = values
        .iter()
        .enumerate()
        .map(|(index, &v)| {
            let floored = v.floor();
            (index, floored as i32, v - floored)
        })
        .collect();

    let lower_sum: i32 = parts.iter().map(|&(_, floor, _)| floor).sum();

    // A target below the floor-sum cannot be reached by rounding up, so it
    // is replaced by the real sum, same as a missing target.
    let effective_target = match target {
        Some(t) if t >= lower_sum => f64::from(t),
        _ => values.iter().sum(),
    };

    // Units left to distribute. An integer target gives an exact count; the
    // real-sum fallback has a fractional remainder, which still earns one
    // increment (a partial unit rounds up).
    let deficit = (effective_target - f64::from(lower_sum)).ceil().max(0.0) as usize;

    // Largest fractional remainders are first in line for an extra unit.
    // Ties can land in any order; only membership in the first `deficit`
    // positions matters.
    parts.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal));

    let len = parts.len();
    for i in 0..deficit {
        parts[i % len].1 += 1;
    }

    parts.sort_by_key(|&(index, _, _)| index);
    parts.into_iter().map(|(_, value, _)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(values: &[i32]) -> i32 {
        values.iter().sum()
    }

    // =========================================================================
    // Sum preservation
    // =========================================================================

    #[test]
    fn exact_target_is_hit() {
        let rounded = round_preserving_sum(&[333.33, 333.33, 333.33], Some(1000));
        assert_eq!(sum(&rounded), 1000);
    }

    #[test]
    fn target_equal_to_floor_sum_means_no_increments() {
        let rounded = round_preserving_sum(&[10.9, 20.9, 30.9], Some(60));
        assert_eq!(rounded, vec![10, 20, 30]);
    }

    #[test]
    fn target_preserved_across_range_of_deficits() {
        let values: [f64; 6] = [12.37, 88.01, 45.5, 45.5, 9.99, 140.25];
        let floor_sum: i32 = values.iter().map(|v| v.floor() as i32).sum();
        for target in floor_sum..=floor_sum + values.len() as i32 {
            let rounded = round_preserving_sum(&values, Some(target));
            assert_eq!(sum(&rounded), target, "target {target}");
        }
    }

    #[test]
    fn largest_fractions_round_up_first() {
        // Fractions: .9, .1, .5 — one unit goes to the .9 element.
        assert_eq!(
            round_preserving_sum(&[1.9, 2.1, 3.5], Some(7)),
            vec![2, 2, 3]
        );
        // Two units: .9 and .5 elements.
        assert_eq!(
            round_preserving_sum(&[1.9, 2.1, 3.5], Some(8)),
            vec![2, 2, 4]
        );
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    #[test]
    fn outputs_are_floor_or_floor_plus_one() {
        let values: [f64; 5] = [0.1, 7.7, 3.2, 99.99, 12.5];
        let floor_sum: i32 = values.iter().map(|v| v.floor() as i32).sum();
        for target in floor_sum..=floor_sum + values.len() as i32 {
            let rounded = round_preserving_sum(&values, Some(target));
            for (&v, &r) in values.iter().zip(&rounded) {
                let floor = v.floor() as i32;
                assert!(
                    r == floor || r == floor + 1,
                    "value {v} rounded to {r}, expected {floor} or {}",
                    floor + 1
                );
            }
        }
    }

    #[test]
    fn original_order_is_restored() {
        let rounded = round_preserving_sum(&[5.1, 1.9, 3.5], Some(10));
        // The .9 element gets the unit, but positions are unchanged.
        assert_eq!(rounded, vec![5, 2, 3]);
    }

    // =========================================================================
    // Target fallback
    // =========================================================================

    #[test]
    fn no_target_uses_real_sum() {
        // Real sum 3.6 → floor-sum 3, one partial unit to distribute.
        assert_eq!(sum(&round_preserving_sum(&[1.2, 1.2, 1.2], None)), 4);
    }

    #[test]
    fn no_target_with_integral_values_is_identity() {
        assert_eq!(
            round_preserving_sum(&[4.0, 2.0, 6.0], None),
            vec![4, 2, 6]
        );
    }

    #[test]
    fn target_below_floor_sum_falls_back_to_real_sum() {
        // floor-sum is 60; 10 is unreachable, so the real sum (62.7 → 63)
        // is used instead.
        let rounded = round_preserving_sum(&[10.9, 20.9, 30.9], Some(10));
        assert_eq!(sum(&rounded), 63);
    }

    // =========================================================================
    // Wraparound and degenerate inputs
    // =========================================================================

    #[test]
    fn deficit_beyond_length_wraps_around() {
        // floor-sum 3, target 8 → 5 increments over 3 elements: the first
        // two (by fraction rank) get two units each.
        let rounded = round_preserving_sum(&[1.9, 1.5, 1.1], Some(8));
        assert_eq!(sum(&rounded), 8);
        assert_eq!(rounded, vec![3, 3, 2]);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(round_preserving_sum(&[], Some(10)), Vec::<i32>::new());
        assert_eq!(round_preserving_sum(&[], None), Vec::<i32>::new());
    }

    #[test]
    fn single_element() {
        assert_eq!(round_preserving_sum(&[3.7], Some(4)), vec![4]);
        assert_eq!(round_preserving_sum(&[3.7], None), vec![4]);
    }

    #[test]
    fn negative_values_floor_toward_negative_infinity() {
        // floor(-1.5) = -2, floor(2.5) = 2 → floor-sum 0, real sum 1.0.
        let rounded = round_preserving_sum(&[-1.5, 2.5], None);
        assert_eq!(sum(&rounded), 1);
        for (&v, &r) in [-1.5f64, 2.5].iter().zip(&rounded) {
            let floor = v.floor() as i32;
            assert!(r == floor || r == floor + 1);
        }
    }

    #[test]
    fn zeros_are_untouched_without_deficit() {
        assert_eq!(
            round_preserving_sum(&[0.0, 0.0, 0.0], Some(0)),
            vec![0, 0, 0]
        );
    }
}
