use std::cmp::Reverse;

use super::fit::FitScore;

/// Orders entries by descending fit score.
///
/// The sort is stable, so entries with equal scores keep their input order,
/// and a missing score sorts as 0.
pub fn rank<T>(entries: Vec<(T, Option<FitScore>)>) -> Vec<(T, Option<FitScore>)> {
    rank_by(entries, |(_, score)| *score)
}

/// [`rank`] for entries that carry their score inside the item.
pub fn rank_by<T, F>(mut entries: Vec<T>, score_of: F) -> Vec<T>
where
    F: Fn(&T) -> Option<FitScore>,
{
    entries.sort_by_key(|entry| Reverse(score_of(entry).unwrap_or(FitScore::ZERO)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: u8) -> Option<FitScore> {
        Some(FitScore::new(value))
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank(vec![("A", score(70)), ("B", score(70)), ("C", score(90))]);
        let names: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn missing_scores_sort_as_zero() {
        let ranked = rank(vec![
            ("unscored", None),
            ("zero", score(0)),
            ("low", score(10)),
        ]);
        let names: Vec<_> = ranked.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["low", "unscored", "zero"]);
    }

    #[test]
    fn empty_input_ranks_to_empty() {
        let ranked: Vec<(&str, Option<FitScore>)> = rank(Vec::new());
        assert!(ranked.is_empty());
    }

    #[test]
    fn rank_by_reads_embedded_scores() {
        struct Entry {
            name: &'static str,
            score: Option<FitScore>,
        }

        let ranked = rank_by(
            vec![
                Entry { name: "x", score: score(40) },
                Entry { name: "y", score: score(95) },
                Entry { name: "z", score: score(40) },
            ],
            |entry| entry.score,
        );
        let names: Vec<_> = ranked.iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["y", "x", "z"]);
    }
}
