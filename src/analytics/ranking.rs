// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use crate::models::Content;

/// Direction of a key-parameterized sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort a slice by a computed key using a partition-exchange (quicksort)
/// scheme with the last element as pivot.
///
/// Not stable: equal keys may reorder. Recursive with no fallback for
/// worst-case skew, which is acceptable for the entity counts a report
/// sorts.
pub fn quick_sort_by_key<T, K, F>(items: &mut [T], key: F, order: SortOrder)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    sort_range(items, &key, order);
}

fn sort_range<T, K, F>(items: &mut [T], key: &F, order: SortOrder)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    if items.len() < 2 {
        return;
    }
    let pivot_index = partition(items, key, order);
    let (left, right) = items.split_at_mut(pivot_index);
    sort_range(left, key, order);
    sort_range(&mut right[1..], key, order);
}

fn partition<T, K, F>(items: &mut [T], key: &F, order: SortOrder) -> usize
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    let high = items.len() - 1;
    let pivot = key(&items[high]);
    let mut boundary = 0;
    for j in 0..high {
        let candidate = key(&items[j]);
        let belongs_before = match order {
            SortOrder::Ascending => candidate < pivot,
            SortOrder::Descending => candidate > pivot,
        };
        if belongs_before {
            items.swap(boundary, j);
            boundary += 1;
        }
    }
    items.swap(boundary, high);
    boundary
}

/// Weights combining normalized engagement and watch-time totals into a
/// recommendation score. They need not sum to 1.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationWeights {
    pub engagement: f64,
    pub watch_time: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            engagement: 0.6,
            watch_time: 0.4,
        }
    }
}

/// Score the contents of one category for recommendation.
///
/// Filters by case-insensitive category match, normalizes each content's
/// engagement and watch totals against the per-category maxima (a zero
/// maximum is substituted with 1 to avoid dividing by zero), combines them
/// with the given weights and returns the scored contents sorted descending.
pub fn score_by_category<'a>(
    contents: &[&'a Content],
    category: &str,
    weights: RecommendationWeights,
) -> Vec<(&'a Content, f64)> {
    let category = category.trim().to_lowercase();
    let candidates: Vec<&Content> = contents
        .iter()
        .copied()
        .filter(|c| c.category() == category)
        .collect();
    if candidates.is_empty() {
        return Vec::new();
    }

    let max_engagement = candidates
        .iter()
        .map(|c| c.engagement_total())
        .max()
        .filter(|&m| m > 0)
        .unwrap_or(1) as f64;
    let max_watch = candidates
        .iter()
        .map(|c| c.total_watch_secs())
        .max()
        .filter(|&m| m > 0)
        .unwrap_or(1) as f64;

    let mut scored: Vec<(&Content, f64)> = candidates
        .into_iter()
        .map(|content| {
            let score = weights.engagement * (content.engagement_total() as f64 / max_engagement)
                + weights.watch_time * (content.total_watch_secs() as f64 / max_watch);
            (content, score)
        })
        .collect();

    quick_sort_by_key(&mut scored, |entry| entry.1, SortOrder::Descending);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, Interaction};

    fn is_sorted<K: PartialOrd>(keys: &[K], order: SortOrder) -> bool {
        keys.windows(2).all(|pair| match order {
            SortOrder::Ascending => pair[0] <= pair[1],
            SortOrder::Descending => pair[0] >= pair[1],
        })
    }

    #[test]
    fn test_sort_descending_is_a_permutation() {
        let mut items = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        quick_sort_by_key(&mut items, |&n| n, SortOrder::Descending);
        assert!(is_sorted(&items, SortOrder::Descending));

        let mut sorted_copy = items.clone();
        sorted_copy.sort_unstable();
        assert_eq!(sorted_copy, vec![1, 1, 2, 3, 3, 4, 5, 5, 6, 9]);
    }

    #[test]
    fn test_sort_ascending() {
        let mut items = vec![10, -3, 7, 0, 2];
        quick_sort_by_key(&mut items, |&n| n, SortOrder::Ascending);
        assert_eq!(items, vec![-3, 0, 2, 7, 10]);
    }

    #[test]
    fn test_sort_is_idempotent_on_ordering() {
        let mut items = vec![5, 2, 8, 2, 5];
        quick_sort_by_key(&mut items, |&n| n, SortOrder::Descending);
        let after_first: Vec<i32> = items.clone();
        quick_sort_by_key(&mut items, |&n| n, SortOrder::Descending);
        assert_eq!(items, after_first);
    }

    #[test]
    fn test_sort_by_computed_key() {
        let mut words = vec!["pelican", "ox", "gnu", "aardvark"];
        quick_sort_by_key(&mut words, |w| w.len(), SortOrder::Ascending);
        let lengths: Vec<usize> = words.iter().map(|w| w.len()).collect();
        assert_eq!(lengths, vec![2, 3, 7, 8]);
    }

    #[test]
    fn test_sort_trivial_inputs() {
        let mut empty: Vec<i32> = Vec::new();
        quick_sort_by_key(&mut empty, |&n| n, SortOrder::Ascending);
        assert!(empty.is_empty());

        let mut single = vec![42];
        quick_sort_by_key(&mut single, |&n| n, SortOrder::Descending);
        assert_eq!(single, vec![42]);

        let mut equal = vec![7, 7, 7, 7];
        quick_sort_by_key(&mut equal, |&n| n, SortOrder::Descending);
        assert_eq!(equal, vec![7, 7, 7, 7]);
    }

    fn content_with(id: i64, category: &str, interactions: u64, watch_secs: u64) -> Content {
        let mut content = Content::new(id, "Show", category, ContentKind::from_type_tag("video"));
        for n in 0..interactions {
            let duration = if n == 0 { watch_secs.to_string() } else { "0".to_string() };
            content.add_interaction(Interaction::new(
                n + 1,
                1,
                id,
                "2024-01-01T00:00:00",
                "like",
                &duration,
                "",
                None,
            ));
        }
        content
    }

    #[test]
    fn test_recommendation_scenario_with_default_weights() {
        // interactions=10/time=100 vs interactions=5/time=200:
        // score1 = 0.6*1.0 + 0.4*0.5 = 0.8, score2 = 0.6*0.5 + 0.4*1.0 = 0.7
        let first = content_with(1, "news", 10, 100);
        let second = content_with(2, "news", 5, 200);
        let contents = vec![&first, &second];

        let scored = score_by_category(&contents, "news", RecommendationWeights::default());
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].0.id(), 1);
        assert!((scored[0].1 - 0.8).abs() < 1e-9);
        assert_eq!(scored[1].0.id(), 2);
        assert!((scored[1].1 - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_recommendation_category_match_is_case_insensitive() {
        let content = content_with(1, "News", 1, 10);
        let contents = vec![&content];
        let scored = score_by_category(&contents, "NEWS", RecommendationWeights::default());
        assert_eq!(scored.len(), 1);
    }

    #[test]
    fn test_recommendation_unknown_category_is_empty() {
        let content = content_with(1, "news", 1, 10);
        let contents = vec![&content];
        assert!(score_by_category(&contents, "sports", RecommendationWeights::default()).is_empty());
    }

    #[test]
    fn test_recommendation_zero_maxima_do_not_divide_by_zero() {
        // vote-only interactions: engagement total and watch total both 0
        let mut content = Content::new(1, "Show", "news", ContentKind::from_type_tag("video"));
        content.add_interaction(Interaction::new(
            1, 1, 1, "2024-01-01T00:00:00", "vote", "0", "", None,
        ));
        let contents = vec![&content];

        let scored = score_by_category(&contents, "news", RecommendationWeights::default());
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].1, 0.0);
    }

    #[test]
    fn test_recommendation_weights_are_overridable() {
        let first = content_with(1, "news", 10, 100);
        let second = content_with(2, "news", 5, 200);
        let contents = vec![&first, &second];

        // flip the weights so watch time dominates
        let weights = RecommendationWeights {
            engagement: 0.1,
            watch_time: 0.9,
        };
        let scored = score_by_category(&contents, "news", weights);
        assert_eq!(scored[0].0.id(), 2);
    }
}
