use crate::{Rating, Stars, ViewerId};

/// Entries from other viewers keep their relative order; the new entry is
/// appended at the end.
pub fn upsert_rating(
    ratings: &[Rating],
    viewer: &ViewerId,
    stars: Stars,
    timestamp: i64,
) -> Vec<Rating> {
    let mut updated: Vec<Rating> = ratings
        .iter()
        .filter(|rating| &rating.viewer_id != viewer)
        .cloned()
        .collect();
    updated.push(Rating {
        viewer_id: viewer.clone(),
        stars,
        timestamp,
    });
    updated
}

pub fn compute_average(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let total: u32 = ratings
        .iter()
        .map(|rating| u32::from(rating.stars.get()))
        .sum();
    f64::from(total) / ratings.len() as f64
}

pub fn rounded_bucket(average: f64) -> u8 {
    if !average.is_finite() || average <= 0.0 {
        return 0;
    }
    (average + 0.5).floor().min(f64::from(Stars::MAX)) as u8
}

pub fn viewer_rating(ratings: &[Rating], viewer: &ViewerId) -> Option<Stars> {
    ratings
        .iter()
        .find(|rating| &rating.viewer_id == viewer)
        .map(|rating| rating.stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(id: &str) -> ViewerId {
        ViewerId::new(id).expect("viewer id")
    }

    fn stars(value: i64) -> Stars {
        Stars::new(value).expect("stars")
    }

    fn rating(id: &str, value: i64) -> Rating {
        Rating {
            viewer_id: viewer(id),
            stars: stars(value),
            timestamp: 0,
        }
    }

    #[test]
    fn average_of_empty_list_is_zero() {
        assert_eq!(compute_average(&[]), 0.0);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        assert_eq!(compute_average(&[rating("a", 5), rating("b", 1)]), 3.0);
        assert_eq!(
            compute_average(&[rating("a", 4), rating("b", 4), rating("c", 5)]),
            13.0 / 3.0
        );
    }

    #[test]
    fn upsert_leaves_exactly_one_entry_per_viewer() {
        let existing = vec![rating("u1", 3), rating("u2", 4), rating("u1", 1)];
        for value in 1..=5 {
            let updated = upsert_rating(&existing, &viewer("u1"), stars(value), 99);
            let own: Vec<&Rating> = updated
                .iter()
                .filter(|entry| entry.viewer_id == viewer("u1"))
                .collect();
            assert_eq!(own.len(), 1);
            assert_eq!(own[0].stars, stars(value));
            assert_eq!(own[0].timestamp, 99);
        }
    }

    #[test]
    fn upsert_preserves_order_of_untouched_entries() {
        let existing = vec![rating("a", 1), rating("u1", 2), rating("b", 3), rating("c", 4)];
        let updated = upsert_rating(&existing, &viewer("u1"), stars(5), 7);
        let order: Vec<&str> = updated
            .iter()
            .map(|entry| entry.viewer_id.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "u1"]);
    }

    #[test]
    fn replacing_a_rating_keeps_only_the_latest_value() {
        let first = upsert_rating(&[], &viewer("u1"), stars(2), 1);
        let second = upsert_rating(&first, &viewer("u1"), stars(5), 2);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].stars, stars(5));
        assert_eq!(compute_average(&second), 5.0);
    }

    #[test]
    fn repeating_the_same_vote_does_not_move_the_average() {
        let base = vec![rating("a", 1), rating("b", 4)];
        let once = upsert_rating(&base, &viewer("u1"), stars(3), 1);
        let twice = upsert_rating(&once, &viewer("u1"), stars(3), 2);
        assert_eq!(compute_average(&once), compute_average(&twice));
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn buckets_round_half_up() {
        assert_eq!(rounded_bucket(0.0), 0);
        assert_eq!(rounded_bucket(1.0), 1);
        assert_eq!(rounded_bucket(3.4), 3);
        assert_eq!(rounded_bucket(3.49), 3);
        assert_eq!(rounded_bucket(3.5), 4);
        assert_eq!(rounded_bucket(3.6), 4);
        assert_eq!(rounded_bucket(4.6), 5);
        assert_eq!(rounded_bucket(5.0), 5);
    }

    #[test]
    fn finds_viewer_rating() {
        let ratings = vec![rating("a", 1), rating("b", 4)];
        assert_eq!(viewer_rating(&ratings, &viewer("b")), Some(stars(4)));
        assert_eq!(viewer_rating(&ratings, &viewer("z")), None);
    }
}
