use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::Rating;
use super::repository::ScoredRecord;

/// Number of suggestion texts reported in `top_issues`.
pub const DEFAULT_TOP_ISSUES: usize = 3;

/// Aggregate view over every stored submission. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_products: usize,
    pub average_score: f64,
    pub max_score: u8,
    pub min_score: u8,
    pub rating_counts: BTreeMap<Rating, usize>,
    pub top_issues: Vec<String>,
}

impl SummaryStatistics {
    pub fn rating_count(&self, rating: Rating) -> usize {
        self.rating_counts.get(&rating).copied().unwrap_or(0)
    }
}

/// Summarize stored records. An empty history is valid and reports zeros.
pub fn summarize(records: &[ScoredRecord]) -> SummaryStatistics {
    let mut rating_counts: BTreeMap<Rating, usize> =
        Rating::ordered().into_iter().map(|rating| (rating, 0)).collect();
    for record in records {
        *rating_counts.entry(record.rating).or_insert(0) += 1;
    }

    let scores = records.iter().map(|record| record.sustainability_score);
    let total: u64 = scores.clone().map(u64::from).sum();

    let average_score = if records.is_empty() {
        0.0
    } else {
        round_to_tenth(total as f64 / records.len() as f64)
    };

    SummaryStatistics {
        total_products: records.len(),
        average_score,
        max_score: scores.clone().max().unwrap_or(0),
        min_score: scores.min().unwrap_or(0),
        rating_counts,
        top_issues: rank_issues(records, DEFAULT_TOP_ISSUES),
    }
}

/// Suggestion texts by descending frequency; ties keep first-seen order.
pub fn rank_issues(records: &[ScoredRecord], limit: usize) -> Vec<String> {
    let mut first_seen: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for suggestion in records.iter().flat_map(|record| &record.suggestions) {
        let count = counts.entry(suggestion.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(suggestion.as_str());
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts.
    first_seen.sort_by(|left, right| counts[right].cmp(&counts[left]));

    first_seen
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
