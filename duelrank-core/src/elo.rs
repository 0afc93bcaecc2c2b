/// Elo rating math.
///
/// Pure functions over a single bucket's rating vector. Both sides of a
/// duel update from the pre-duel ratings (simultaneous update), so the
/// combined rating change of a duel is zero-sum.
use crate::constants::RATING_SCALE;
use crate::types::Winner;

/// Expected score of the first item: `1 / (1 + 10^((rb - ra) / 400))`.
///
/// Equal ratings give exactly 0.5, and `expected_score(a, b)` and
/// `expected_score(b, a)` always sum to 1.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((rating_b - rating_a) / RATING_SCALE))
}

/// Apply a duel outcome to a bucket in place.
///
/// Each side moves by `k * (score - expectation)`, with both expectations
/// computed before either rating changes.
pub fn apply_outcome(ratings: &mut [f64], idx_a: usize, idx_b: usize, winner: Winner, k: f64) {
    assert!(
        idx_a != idx_b,
        "A duel needs two distinct items, got index {} twice",
        idx_a
    );

    let ra = ratings[idx_a];
    let rb = ratings[idx_b];
    let ea = expected_score(ra, rb);
    let eb = expected_score(rb, ra);

    let (sa, sb) = match winner {
        Winner::A => (1.0, 0.0),
        Winner::B => (0.0, 1.0),
    };

    ratings[idx_a] = ra + k * (sa - ea);
    ratings[idx_b] = rb + k * (sb - eb);
}
