use super::common::*;
use crate::workflows::sustainability::{rank_issues, summarize, Rating};

#[test]
fn empty_history_reports_zeroes() {
    let summary = summarize(&[]);

    assert_eq!(summary.total_products, 0);
    assert_eq!(summary.average_score, 0.0);
    assert_eq!(summary.max_score, 0);
    assert_eq!(summary.min_score, 0);
    assert!(summary.top_issues.is_empty());
    for rating in Rating::ordered() {
        assert_eq!(summary.rating_count(rating), 0);
    }

    let json = serde_json::to_value(&summary).expect("serializes");
    assert_eq!(
        json["rating_counts"],
        serde_json::json!({ "A": 0, "B": 0, "C": 0, "D": 0 })
    );
}

#[test]
fn statistics_match_known_scores() {
    let records = vec![
        record(1, 90, &[]),
        record(2, 75, &[]),
        record(3, 60, &[]),
        record(4, 100, &[]),
        record(5, 41, &[]),
    ];

    let summary = summarize(&records);

    assert_eq!(summary.total_products, 5);
    // 366 / 5 = 73.2
    assert_eq!(summary.average_score, 73.2);
    assert_eq!(summary.max_score, 100);
    assert_eq!(summary.min_score, 41);
    assert_eq!(summary.rating_count(Rating::A), 2);
    assert_eq!(summary.rating_count(Rating::B), 1);
    assert_eq!(summary.rating_count(Rating::C), 1);
    assert_eq!(summary.rating_count(Rating::D), 1);
}

#[test]
fn average_rounds_to_one_decimal() {
    let records = vec![record(1, 90, &[]), record(2, 85, &[]), record(3, 85, &[])];
    // 260 / 3 = 86.666..
    assert_eq!(summarize(&records).average_score, 86.7);
}

#[test]
fn top_issues_rank_by_frequency_then_first_seen() {
    let records = vec![
        record(1, 90, &["Avoid air transport", "Reduce product weight"]),
        record(2, 80, &["Avoid using plastic", "Reduce product weight"]),
        record(3, 70, &["Avoid using plastic", "Avoid air transport"]),
        record(4, 70, &["Use recyclable or biodegradable packaging"]),
        record(5, 70, &["Avoid using plastic"]),
    ];

    let summary = summarize(&records);
    assert_eq!(
        summary.top_issues,
        vec![
            "Avoid using plastic",
            "Avoid air transport",
            "Reduce product weight"
        ]
    );

    let everything = rank_issues(&records, usize::MAX);
    assert_eq!(everything.len(), 4);
    assert_eq!(everything[3], "Use recyclable or biodegradable packaging");
}

#[test]
fn summarize_leaves_records_untouched() {
    let records = vec![record(1, 90, &["Avoid air transport"])];
    let before = records.clone();
    let _ = summarize(&records);
    assert_eq!(records, before);
}
