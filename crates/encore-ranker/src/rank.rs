//! Elimination ranking.
//!
//! After sanitisation and normalisation every valid entry carries a mean
//! score. The ranking is then built bottom-up: the two lowest-scored
//! survivors fight a head-to-head runoff over raw rating sums and the loser
//! leaves the pool, until one entry remains.

use std::cmp::Ordering;

use encore_common::{Entry, Week};
use uuid::Uuid;

use crate::normalise::{accumulate_scores, compute_extents};
use crate::sanitise::sanitise_votes;

/// Entries with every upload field populated. Used by callers to decide
/// whether a week is complete; invalid entries never reach the ranking.
pub fn count_valid_entries(week: &Week) -> usize {
    week.entries.iter().filter(|e| e.is_valid()).count()
}

/// Rank a week's valid entries.
///
/// Sanitises the ballots, writes `vote_score` (mean normalised rating, 0
/// when unrated) and `vote_placement` (1 = best) back into `week.entries`,
/// and returns the valid entries ordered best-first. Invalid entries are
/// left untouched and absent from the result. Deterministic for identical
/// input; every runoff round shrinks the pool by exactly one.
pub fn rank_entries(week: &mut Week) -> Vec<Entry> {
    sanitise_votes(week);
    compute_extents(week);
    let scores = accumulate_scores(week);

    let mut pool: Vec<usize> = Vec::new();
    for (idx, entry) in week.entries.iter_mut().enumerate() {
        if !entry.is_valid() {
            continue;
        }
        entry.vote_score = scores
            .get(&entry.id)
            .filter(|values| !values.is_empty())
            .map(|values| values.iter().sum::<f64>() / values.len() as f64)
            .unwrap_or(0.0);
        pool.push(idx);
    }

    // Worst-first elimination order.
    let mut eliminated: Vec<usize> = Vec::new();

    while pool.len() > 1 {
        pool.sort_by(|&a, &b| {
            week.entries[a]
                .vote_score
                .partial_cmp(&week.entries[b].vote_score)
                .unwrap_or(Ordering::Equal)
        });

        let a = pool[0];
        let b = pool[1];
        let (prefer_a, prefer_b) = head_to_head(week, week.entries[a].id, week.entries[b].id);

        // Ballots split evenly: B is eliminated, A survives the runoff.
        if prefer_a >= prefer_b {
            eliminated.push(pool.remove(1));
        } else {
            eliminated.push(pool.remove(0));
        }
    }

    // Sole survivor first, then the eliminated from last out to first out.
    let mut order: Vec<usize> = Vec::with_capacity(eliminated.len() + 1);
    order.extend(pool.pop());
    order.extend(eliminated.into_iter().rev());

    for (place, &idx) in order.iter().enumerate() {
        week.entries[idx].vote_placement = place + 1;
    }

    order.iter().map(|&idx| week.entries[idx].clone()).collect()
}

/// Count, per ballot, which of the two entries carries the higher raw
/// rating sum across all categories. Normalisation is irrelevant here, both
/// sums come from the same ballot. Ballots with equal sums count toward
/// neither entry.
fn head_to_head(week: &Week, entry_a: Uuid, entry_b: Uuid) -> (usize, usize) {
    let mut prefer_a = 0;
    let mut prefer_b = 0;

    for vote in &week.votes {
        let mut sum_a = 0;
        let mut sum_b = 0;
        for rating in &vote.ratings {
            if rating.entry == entry_a {
                sum_a += rating.value;
            } else if rating.entry == entry_b {
                sum_b += rating.value;
            }
        }
        match sum_a.cmp(&sum_b) {
            Ordering::Greater => prefer_a += 1,
            Ordering::Less => prefer_b += 1,
            Ordering::Equal => {}
        }
    }

    (prefer_a, prefer_b)
}
