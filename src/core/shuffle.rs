//! Fisher–Yates shuffle
//!
//! Walks from the last index down to 1, swapping each slot with a uniformly
//! chosen slot in `[0, i]`. `random_range` samples without modulo bias.

use rand::Rng;

/// Shuffle `items` in place
///
/// # Examples
/// ```
/// use memory_match::core::shuffle;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut items = vec![1, 2, 3, 4, 5];
/// shuffle(&mut items, &mut StdRng::seed_from_u64(3));
///
/// items.sort_unstable();
/// assert_eq!(items, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut items: Vec<usize> = (0..50).collect();
        shuffle(&mut items, &mut rng);

        assert_eq!(items.len(), 50);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(0);

        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![9];
        shuffle(&mut single, &mut rng);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn same_seed_same_order() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(11));
        shuffle(&mut b, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn every_position_is_reachable() {
        // Three items have six orderings; a fair shuffle hits all of them
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut items = [0u8, 1, 2];
            shuffle(&mut items, &mut rng);
            seen.insert(items);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn first_slot_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut hits = [0usize; 4];
        let trials = 8000;
        for _ in 0..trials {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            hits[items[0]] += 1;
        }
        // Expected 2000 each; allow a wide margin
        for count in hits {
            assert!((1700..=2300).contains(&count), "skewed count {count}");
        }
    }
}
