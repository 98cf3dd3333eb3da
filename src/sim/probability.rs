//! Rank-weighted match outcome model.
//!
//! The ranking gap between two sides shifts the chance that the first side
//! wins the outcome draw by 5 percentage points per position, starting from
//! an even 50/50 and clamped to [0.10, 0.90]. The winning side of the draw
//! scores 1–3 goals (plus one if it is the higher-ranked side), the losing
//! side 0–2.

use rand::Rng;

use super::fixture::Score;

/// Win probability when nothing is known about the teams.
pub const BASE_PROBABILITY: f64 = 0.5;
/// Probability shift per ranking position of difference.
pub const RANK_STEP: f64 = 0.05;
pub const MIN_PROBABILITY: f64 = 0.10;
pub const MAX_PROBABILITY: f64 = 0.90;

/// Probability that the first side wins the outcome draw.
///
/// Falls back to [`BASE_PROBABILITY`] unless both ranks are known.
pub fn win_probability(rank1: Option<u32>, rank2: Option<u32>) -> f64 {
    match (rank1, rank2) {
        (Some(r1), Some(r2)) => {
            let rank_diff = i64::from(r2) - i64::from(r1);
            (BASE_PROBABILITY + rank_diff as f64 * RANK_STEP).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
        }
        _ => BASE_PROBABILITY,
    }
}

/// True when `rank` is known and numerically lower than `other`.
fn is_stronger(rank: Option<u32>, other: Option<u32>) -> bool {
    matches!((rank, other), (Some(a), Some(b)) if a < b)
}

/// Draw a scoreline from the rank-weighted model.
pub fn draw_weighted_score<R: Rng + ?Sized>(
    rng: &mut R,
    rank1: Option<u32>,
    rank2: Option<u32>,
) -> Score {
    let prob = win_probability(rank1, rank2);
    if rng.gen::<f64>() < prob {
        let g1 = rng.gen_range(1..=3) + u32::from(is_stronger(rank1, rank2));
        let g2 = rng.gen_range(0..=2);
        (g1, g2)
    } else {
        let g1 = rng.gen_range(0..=2);
        let g2 = rng.gen_range(1..=3) + u32::from(is_stronger(rank2, rank1));
        (g1, g2)
    }
}

/// Draw a rank-independent scoreline, each side uniform in 0..=5.
pub fn draw_uniform_score<R: Rng + ?Sized>(rng: &mut R) -> Score {
    (rng.gen_range(0..=5), rng.gen_range(0..=5))
}
