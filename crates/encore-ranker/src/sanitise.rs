//! Ballot sanitisation: duplicate and out-of-range ratings are dropped
//! before any scoring happens.

use std::collections::HashSet;
use std::mem;

use encore_common::Week;
use tracing::warn;
use uuid::Uuid;

/// Lowest accepted rating value. 0 means "unset/abstain".
pub const RATING_MIN: i32 = 0;
/// Highest accepted rating value.
pub const RATING_MAX: i32 = 5;

/// Drop every rating that reuses a (voter, entry, category) triple already
/// accepted in this pass, or whose value lies outside [0, 5]. Each ballot's
/// rating list is rebuilt by a filtering pass into a new list; rejections are
/// logged as suspected fraud and processing continues.
///
/// A zero-valued rating is "seen but unset": it still claims its triple and
/// blocks any later duplicate. Running this twice removes nothing the second
/// time. Made-up categories are deliberately not filtered here.
pub fn sanitise_votes(week: &mut Week) {
    let mut seen: HashSet<(String, Uuid, String)> = HashSet::new();

    for vote in &mut week.votes {
        let voter = vote.voter.clone();
        let ratings = mem::take(&mut vote.ratings);

        vote.ratings = ratings
            .into_iter()
            .filter(|r| {
                // Out-of-range ratings must not claim the triple.
                let accepted = (RATING_MIN..=RATING_MAX).contains(&r.value)
                    && seen.insert((voter.clone(), r.entry, r.category.clone()));
                if !accepted {
                    warn!("vote fraud suspected, dropping rating from {}: {:?}", voter, r);
                }
                accepted
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_common::{Rating, Vote};

    fn rating(entry: Uuid, category: &str, value: i32) -> Rating {
        Rating {
            entry,
            category: category.to_string(),
            value,
        }
    }

    fn week_with_votes(votes: Vec<Vote>) -> Week {
        let mut week = Week::blank(false);
        week.votes = votes;
        week
    }

    #[test]
    fn test_duplicate_triple_keeps_first() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![Vote::new(
            "alice",
            vec![rating(entry, "composition", 4), rating(entry, "composition", 1)],
        )]);

        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings.len(), 1);
        assert_eq!(week.votes[0].ratings[0].value, 4);
    }

    #[test]
    fn test_duplicate_across_ballots_of_same_voter() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![
            Vote::new("alice", vec![rating(entry, "performance", 3)]),
            Vote::new("alice", vec![rating(entry, "performance", 5)]),
        ]);

        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings.len(), 1);
        assert!(week.votes[1].ratings.is_empty());
    }

    #[test]
    fn test_out_of_range_dropped() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![Vote::new(
            "bob",
            vec![
                rating(entry, "composition", 6),
                rating(entry, "performance", -1),
                rating(entry, "sound", 5),
            ],
        )]);

        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings.len(), 1);
        assert_eq!(week.votes[0].ratings[0].category, "sound");
    }

    #[test]
    fn test_out_of_range_does_not_claim_triple() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![Vote::new(
            "bob",
            vec![rating(entry, "composition", 9), rating(entry, "composition", 4)],
        )]);

        sanitise_votes(&mut week);

        // The rejected rating never counted as seen, so the in-range
        // resubmission survives.
        assert_eq!(week.votes[0].ratings.len(), 1);
        assert_eq!(week.votes[0].ratings[0].value, 4);
    }

    #[test]
    fn test_zero_rating_claims_triple() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![Vote::new(
            "carol",
            vec![rating(entry, "composition", 0), rating(entry, "composition", 5)],
        )]);

        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings.len(), 1);
        assert_eq!(week.votes[0].ratings[0].value, 0);
    }

    #[test]
    fn test_different_voters_may_rate_same_entry() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![
            Vote::new("alice", vec![rating(entry, "composition", 4)]),
            Vote::new("bob", vec![rating(entry, "composition", 2)]),
        ]);

        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings.len(), 1);
        assert_eq!(week.votes[1].ratings.len(), 1);
    }

    #[test]
    fn test_sanitise_is_idempotent() {
        let entry = Uuid::new_v4();
        let mut week = week_with_votes(vec![Vote::new(
            "alice",
            vec![
                rating(entry, "composition", 4),
                rating(entry, "composition", 2),
                rating(entry, "performance", 7),
            ],
        )]);

        sanitise_votes(&mut week);
        let after_first = week.votes[0].ratings.clone();
        sanitise_votes(&mut week);

        assert_eq!(week.votes[0].ratings, after_first);
    }

    #[test]
    fn test_no_surviving_triple_repeats() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut week = week_with_votes(vec![
            Vote::new(
                "alice",
                vec![
                    rating(a, "composition", 4),
                    rating(a, "composition", 4),
                    rating(b, "composition", 3),
                    rating(a, "performance", 2),
                ],
            ),
            Vote::new("bob", vec![rating(a, "composition", 1), rating(a, "composition", 2)]),
        ]);

        sanitise_votes(&mut week);

        let mut triples = HashSet::new();
        for vote in &week.votes {
            for r in &vote.ratings {
                assert!(triples.insert((vote.voter.clone(), r.entry, r.category.clone())));
                assert!((RATING_MIN..=RATING_MAX).contains(&r.value));
            }
        }
    }
}
