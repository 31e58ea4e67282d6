//! Per-ballot rating normalisation.
//!
//! Voters use the 1–5 scale unevenly: some spread across the whole range,
//! some cluster in a narrow band. Each ballot's used range is stretched onto
//! a common 0–5 scale before scores are accumulated.

use std::collections::HashMap;

use encore_common::Week;
use uuid::Uuid;

/// Write each ballot's rating extent into its scratch fields: `minimum` is
/// the lowest non-zero rating issued (default 5 when none), `maximum` the
/// highest (default 1). Zero ratings are abstentions and excluded from the
/// scan.
pub fn compute_extents(week: &mut Week) {
    for vote in &mut week.votes {
        vote.minimum = 5;
        vote.maximum = 1;
        for rating in &vote.ratings {
            if rating.value == 0 {
                continue;
            }
            if rating.value > vote.maximum {
                vote.maximum = rating.value;
            }
            if rating.value < vote.minimum {
                vote.minimum = rating.value;
            }
        }
    }
}

/// `((value - (min - 1)) / (max - (min - 1))) * 5`.
///
/// A ballot's maximum rating maps to exactly 5.0; its minimum non-zero
/// rating maps to `5 / (max - min + 1)`, not 0. A non-positive denominator
/// cannot arise from in-range extents; it falls back to the scale midpoint.
pub fn normalise_rating(value: i32, minimum: i32, maximum: i32) -> f64 {
    let denominator = maximum - (minimum - 1);
    if denominator <= 0 {
        return 2.5; // degenerate ballot
    }
    f64::from(value - (minimum - 1)) / f64::from(denominator) * 5.0
}

/// Accumulate normalised scores per entry across all ballots. Zero ratings
/// contribute nothing, so an entry rated only with zeros ends up absent.
pub fn accumulate_scores(week: &Week) -> HashMap<Uuid, Vec<f64>> {
    let mut scores: HashMap<Uuid, Vec<f64>> = HashMap::new();

    for vote in &week.votes {
        for rating in &vote.ratings {
            if rating.value == 0 {
                continue;
            }
            scores
                .entry(rating.entry)
                .or_default()
                .push(normalise_rating(rating.value, vote.minimum, vote.maximum));
        }
    }

    scores
}
