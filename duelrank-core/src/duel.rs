/// Duel selection: two uniformly-random distinct catalog indices.
use rand::Rng;

/// Pick a random pair for presentation. The second slot is resampled until
/// it differs from the first, which terminates quickly for any catalog of
/// two or more items. Fewer than two items is a precondition violation.
pub fn pick_pair(catalog_len: usize, rng: &mut impl Rng) -> (usize, usize) {
    assert!(
        catalog_len >= 2,
        "Duel selection requires at least two catalog items."
    );

    let a = rng.random_range(0..catalog_len);
    let mut b = a;
    while b == a {
        b = rng.random_range(0..catalog_len);
    }
    (a, b)
}
