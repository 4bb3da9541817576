//! Uniform random permutation

use rand::Rng;

/// In-place Fisher-Yates shuffle
///
/// Walks from the last index down to 1, swapping each slot with one picked
/// uniformly from `[0, i]`. Every ordering is equally likely.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    /// Chi-square statistic of observed ordering counts against a uniform
    /// distribution over `n!` orderings
    fn chi_square<F>(n: usize, runs: u32, mut shuffle: F) -> (f64, usize)
    where
        F: FnMut(&mut [usize]),
    {
        let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();
        for _ in 0..runs {
            let mut items: Vec<usize> = (0..n).collect();
            shuffle(&mut items);
            *counts.entry(items).or_default() += 1;
        }

        let orderings: usize = (1..=n).product();
        let expected = runs as f64 / orderings as f64;
        let observed: f64 = counts
            .values()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // Orderings that never showed up still contribute
        let missing = (orderings - counts.len()) as f64 * expected;
        (observed + missing, counts.len())
    }

    #[test]
    fn test_empty_and_single() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        fisher_yates(&mut empty, &mut rng);
        let mut one = [7];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }

    #[test]
    fn test_is_permutation() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut items: Vec<u32> = (0..50).collect();
        fisher_yates(&mut items, &mut rng);
        assert_ne!(items, (0..50).collect::<Vec<_>>());
        items.sort();
        assert_eq!(items, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_uniform_three() {
        let mut rng = Pcg32::seed_from_u64(0x5ca7e);
        let (chi2, seen) = chi_square(3, 60_000, |items| fisher_yates(items, &mut rng));
        assert_eq!(seen, 6);
        // df = 5, p = 0.001
        assert!(chi2 < 20.52, "chi2 = {chi2}");
    }

    #[test]
    fn test_uniform_four() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let (chi2, seen) = chi_square(4, 120_000, |items| fisher_yates(items, &mut rng));
        assert_eq!(seen, 24);
        // df = 23, p = 0.001
        assert!(chi2 < 49.73, "chi2 = {chi2}");
    }

    #[test]
    fn test_chi_square_detects_naive_shuffle() {
        // Swapping with any index (not just [0, i]) yields n^n equally likely
        // paths over n! orderings, which cannot be uniform
        let mut rng = Pcg32::seed_from_u64(0x5ca7e);
        let (chi2, _) = chi_square(3, 60_000, |items| {
            for i in 0..items.len() {
                let j = rng.random_range(0..items.len());
                items.swap(i, j);
            }
        });
        assert!(chi2 > 100.0, "chi2 = {chi2}");
    }
}
