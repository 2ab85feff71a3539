//! Parallel processing utilities with deterministic seeding
//!
//! Work items are distributed with rayon, but every item draws from its own
//! RNG seeded from the base seed plus the item index. Results therefore do
//! not depend on the number of worker threads or on scheduling order.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Produce `count` items in parallel, each with an independently seeded RNG.
///
/// Item `i` receives `StdRng::seed_from_u64(seed.wrapping_add(i))`. The
/// returned vector is in index order.
///
/// # Arguments
/// * `count` - Number of items to generate
/// * `seed` - Base seed for random number generation
/// * `generator` - Closure producing one item from its index and RNG
pub fn generate_seeded_in_parallel<T, F>(count: usize, seed: u64, generator: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &mut StdRng) -> T + Send + Sync,
{
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(idx as u64));
            generator(idx, &mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_results_in_index_order() {
        let items = generate_seeded_in_parallel(100, 7, |idx, _rng| idx);
        assert_eq!(items, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_deterministic_per_item() {
        let a = generate_seeded_in_parallel(32, 11, |_, rng| rng.gen::<u64>());
        let b = generate_seeded_in_parallel(32, 11, |_, rng| rng.gen::<u64>());
        assert_eq!(a, b);

        // Item i matches a serial RNG seeded with seed + i
        let mut rng = StdRng::seed_from_u64(11 + 5);
        assert_eq!(a[5], rng.gen::<u64>());
    }

    #[test]
    fn test_empty() {
        let items: Vec<u8> = generate_seeded_in_parallel(0, 1, |_, _| 0);
        assert!(items.is_empty());
    }
}
