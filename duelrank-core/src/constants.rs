/// Rating assigned to every catalog item in every bucket at initialization.
///
/// 1000 is the conventional Elo midpoint; with K = 32 a brand-new bucket
/// moves each side by exactly 16 points on the first duel.
pub const INITIAL_RATING: f64 = 1000.0;

/// K-factor: the maximum rating change a single duel can produce.
pub const K_FACTOR: f64 = 32.0;

/// Logistic scale of the expected-score curve. A 400-point gap means the
/// stronger item is expected to win about 10 times out of 11.
pub const RATING_SCALE: f64 = 400.0;

/// Number of rows `rankings` returns when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 10;
