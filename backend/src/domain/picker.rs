//! Seeded deterministic selection from a fixed pool.
//!
//! Server-rendered and client-rendered output must agree, so image choice
//! cannot rely on ambient randomness. A string seed (typically the ISO date)
//! is hashed to a 32-bit state which drives a linear-congruential generator
//! through a Fisher-Yates shuffle. The same seed always produces the same
//! ordering.

/// Derive the 32-bit PRNG state from a string seed.
///
/// Iterates UTF-16 code units with `h = h * 31 + unit`, wrapping to 32 bits
/// (the conventional multiplicative string hash).
pub fn seed_hash(seed: &str) -> u32 {
    let mut hash: u32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(u32::from(unit));
    }
    hash
}

/// Advance the LCG state: `h = h * 1664525 + 1013904223 (mod 2^32)`.
fn next_state(state: u32) -> u32 {
    state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)
}

/// Pick `n` distinct entries from `pool`, deterministically for `seed`.
///
/// The pool is copied and shuffled; the input slice is never mutated. When
/// `n` exceeds the pool size the full shuffled pool is returned, without
/// duplication and without error.
///
/// # Examples
/// ```
/// use tandem_backend::domain::picker::pick;
///
/// let pool = vec!["a", "b", "c", "d"];
/// let first = pick(&pool, 2, "2024-06-01");
/// let second = pick(&pool, 2, "2024-06-01");
/// assert_eq!(first, second);
/// assert_eq!(first.len(), 2);
/// ```
pub fn pick<T: Clone>(pool: &[T], n: usize, seed: &str) -> Vec<T> {
    let mut state = seed_hash(seed);
    let mut shuffled: Vec<T> = pool.to_vec();
    for i in (1..shuffled.len()).rev() {
        state = next_state(state);
        // Scale the state into 0..=i without modulo bias against the
        // reference behaviour of floor(state / 2^32 * (i + 1)).
        let j = ((u64::from(state) * (i as u64 + 1)) >> 32) as usize;
        shuffled.swap(i, j);
    }
    shuffled.truncate(n.min(pool.len()));
    shuffled
}
