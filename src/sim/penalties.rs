//! Penalty shootout for drawn knockout matches.
//!
//! Each side takes [`REGULAR_KICKS`] kicks, every kick converted with
//! probability [`CONVERSION_PROBABILITY`]. While the totals are level both
//! sides take one more kick each (sudden death). There is no upper bound
//! on the number of sudden-death rounds, each one simply has an even
//! chance of separating the sides.

use rand::Rng;

use super::fixture::Score;

pub const REGULAR_KICKS: u32 = 5;
pub const CONVERSION_PROBABILITY: f64 = 0.5;

fn kick<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    u32::from(rng.gen_bool(CONVERSION_PROBABILITY))
}

/// Run a full shootout. The returned totals always differ.
pub fn shootout<R: Rng + ?Sized>(rng: &mut R) -> Score {
    let mut p1: u32 = (0..REGULAR_KICKS).map(|_| kick(rng)).sum();
    let mut p2: u32 = (0..REGULAR_KICKS).map(|_| kick(rng)).sum();

    while p1 == p2 {
        p1 += kick(rng);
        p2 += kick(rng);
    }

    (p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shootout_always_decisive() {
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (p1, p2) = shootout(&mut rng);
            assert_ne!(p1, p2, "seed {} produced a level shootout", seed);
        }
    }

    #[test]
    fn test_shootout_has_no_side_bias() {
        let mut rng = StdRng::seed_from_u64(2024);
        let first_side_wins = (0..4_000)
            .filter(|_| {
                let (p1, p2) = shootout(&mut rng);
                p1 > p2
            })
            .count();
        assert!(
            (1_700..=2_300).contains(&first_side_wins),
            "first side won {} of 4000",
            first_side_wins
        );
    }

    #[test]
    fn test_shootout_is_reproducible_with_seed() {
        let a = shootout(&mut StdRng::seed_from_u64(99));
        let b = shootout(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
