//! Random Selection Helpers
//!
//! Weighted and gated choices shared by the decision functions.

use rand::Rng;

/// "1 in `n`" roll. Always consumes one draw.
pub fn one_in<R: Rng>(rng: &mut R, n: u32) -> bool {
    rng.gen_range(1..=n.max(1)) == 1
}

/// Weighted random selection over `(item, weight)` pairs.
///
/// Non-positive weights are never chosen. Returns `None` when nothing has
/// positive weight.
pub fn weighted_random_choice<'a, T, R: Rng>(rng: &mut R, candidates: &'a [(T, f32)]) -> Option<&'a T> {
    let total_weight: f32 = candidates
        .iter()
        .map(|(_, weight)| weight.max(0.0))
        .sum();

    if total_weight <= 0.0 {
        return None;
    }

    // Generate random value in [0, total_weight)
    let mut roll: f32 = rng.gen::<f32>() * total_weight;

    for (item, weight) in candidates {
        if *weight <= 0.0 {
            continue;
        }
        roll -= weight;
        if roll <= 0.0 {
            return Some(item);
        }
    }

    // Rounding can leave a sliver of roll behind
    candidates
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0.0)
        .map(|(item, _)| item)
}

/// First candidate with the strictly greatest weight.
pub fn best_choice<T>(candidates: &[(T, f32)]) -> Option<&T> {
    let mut best: Option<(&T, f32)> = None;
    for (item, weight) in candidates {
        if best.map_or(true, |(_, best_weight)| *weight > best_weight) {
            best = Some((item, *weight));
        }
    }
    best.map(|(item, _)| item)
}
